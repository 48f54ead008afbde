//! XDG Base Directory lookup for the user-global configuration file.

use std::path::PathBuf;

pub const APP_DIR: &str = "tmuxbot";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set and non-empty, otherwise `$HOME/.config`.
pub fn config_home() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Some(PathBuf::from(xdg_config_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".config"))
}

/// Path of the global configuration file
///
/// Returns `$XDG_CONFIG_HOME/tmuxbot/config.yaml`. The file may not exist.
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|home| home.join(APP_DIR).join(CONFIG_FILE_NAME))
}

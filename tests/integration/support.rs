use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn lock_env() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run `f` with the given variables set, restoring previous values after.
pub fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = lock_env();
    let previous: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        env::set_var(key, value);
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    for (key, value) in previous {
        match value {
            Some(value) => env::set_var(&key, value),
            None => env::remove_var(&key),
        }
    }
    match result {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Run `f` with `XDG_CONFIG_HOME` pointed inside `temp_dir`, so no user
/// configuration leaks into the test.
pub fn with_xdg_env<F, R>(temp_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let xdg = temp_dir.path().join("xdg");
    fs::create_dir_all(&xdg).unwrap();
    let xdg = xdg.to_string_lossy().into_owned();
    with_env(&[("XDG_CONFIG_HOME", xdg.as_str())], f)
}

pub fn workspace(temp_dir: &TempDir) -> PathBuf {
    let root = temp_dir.path().join("workspace");
    fs::create_dir_all(&root).unwrap();
    root
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Config with a `mock` profile on the `mock_provider` provider, bound to the
/// `primary` role.
pub const MOCK_CONFIG_YAML: &str = "\
profiles:
  mock:
    provider: mock_provider
    api_key: test-key
    model: mock-gpt-1
  broken:
    provider: missing_provider
    api_key: test-key
    model: m
agents:
  primary:
    profile: mock
  devops:
    profile: broken
  orphan:
    profile: nowhere
max_history: 20
conversation_timeout: 30
";

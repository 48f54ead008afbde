/// Validation result for a configuration profile.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationResult {
    pub profile_name: String,
    pub checks: Vec<(String, bool)>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new(profile_name: String) -> Self {
        Self {
            profile_name,
            checks: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_check(&mut self, description: &str, passed: bool) {
        self.checks.push((description.to_string(), passed));
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total_checks(&self) -> usize {
        self.checks.len()
    }

    pub fn passed_checks(&self) -> usize {
        self.checks.iter().filter(|(_, passed)| *passed).count()
    }
}

fn endpoint_has_scheme(endpoint: &str) -> bool {
    endpoint.starts_with("http://") || endpoint.starts_with("https://")
}

/// Whether `endpoint` looks like a usable http(s) base URL.
pub fn endpoint_url_is_valid(endpoint: &str) -> bool {
    let endpoint = endpoint.trim();
    if !endpoint_has_scheme(endpoint) {
        return false;
    }

    let Some(rest) = endpoint.split_once("://").map(|(_, rest)| rest) else {
        return false;
    };

    if rest.is_empty() || rest.chars().any(char::is_whitespace) {
        return false;
    }

    let authority = rest.split('/').next().unwrap_or_default();
    if authority.is_empty() {
        return false;
    }

    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let host = if host_port.starts_with('[') {
        let Some(end_bracket) = host_port.find(']') else {
            return false;
        };
        &host_port[1..end_bracket]
    } else {
        host_port.split(':').next().unwrap_or_default()
    };

    if host.is_empty() {
        return false;
    }

    host == "localhost" || host.contains('.') || host.parse::<std::net::IpAddr>().is_ok()
}

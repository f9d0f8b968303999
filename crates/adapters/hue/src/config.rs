//! Hue integration configuration.

use serde::Deserialize;

/// Configuration for the Hue bridge controller.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HueConfig {
    /// Bridge address: `host`, `host:port`, or a full `http://` base URL.
    pub host: String,
    /// Whitelisted bridge username (the API credential).
    pub username: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HueConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: String::new(),
            timeout_secs: 10,
        }
    }
}

impl HueConfig {
    /// Create a configuration for the given bridge and username.
    pub fn new(host: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            ..Self::default()
        }
    }

    /// Both host and username are required for the controller to exist.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.username.is_empty()
    }

    /// Base URL of the bridge's per-user API, without trailing slash.
    #[must_use]
    pub fn api_base(&self) -> String {
        let host = self.host.trim_end_matches('/');
        let origin = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };
        format!("{origin}/api/{}", self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = HueConfig::default();
        assert!(config.host.is_empty());
        assert_eq!(config.timeout_secs, 10);
        assert!(!config.is_configured());
    }

    #[test]
    fn should_build_api_base_from_bare_host() {
        let config = HueConfig::new("192.168.1.2", "abc");
        assert_eq!(config.api_base(), "http://192.168.1.2/api/abc");
    }

    #[test]
    fn should_keep_explicit_scheme_and_strip_trailing_slash() {
        let config = HueConfig::new("https://bridge.local:8443/", "abc");
        assert_eq!(config.api_base(), "https://bridge.local:8443/api/abc");
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            host = "10.0.0.5"
            username = "user"
            timeout_secs = 3
        "#;
        let config: HueConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.username, "user");
        assert_eq!(config.timeout_secs, 3);
    }
}

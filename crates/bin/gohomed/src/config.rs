//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `gohome.toml` in the working directory. Every field except the
//! API key has a sensible default so the file is optional. Environment
//! variables take precedence over file values.

use serde::Deserialize;

use gohome_adapter_hue::HueConfig;
use gohome_adapter_tasmota::{MqttConfig, TasmotaHttpConfig};
use gohome_adapter_wemo::WemoConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shared secret every command must carry.
    pub api_key: String,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Hue bridge; disabled unless host and username are set.
    pub hue: HueConfig,
    /// Wemo discovery.
    pub wemo: WemoConfig,
    /// HTTP-controlled Tasmota outlets; disabled with no hosts.
    pub tasmota: TasmotaHttpConfig,
    /// MQTT broadcast; disabled unless server and topic are set.
    pub mqtt: MqttConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `gohome.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("gohome.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("GOHOME_API_KEY") {
            self.api_key = val;
        }
        if let Some(val) = var("GOHOME_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("GOHOME_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("GOHOME_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("HUE_GATEWAY_IP") {
            self.hue.host = val;
        }
        if let Some(val) = var("HUE_USERNAME") {
            self.hue.username = val;
        }
        if let Some(enabled) = var("WEMO_ENABLED").and_then(|val| parse_bool(&val)) {
            self.wemo.enabled = enabled;
        }
        if let Some(val) = var("TASMOTA_HOSTS") {
            self.tasmota.hosts = parse_list(&val);
        }
        if let Some(val) = var("TASMOTA_NAMES") {
            self.tasmota.names = parse_list(&val);
        }
        if let Some(val) = var("TASMOTA_MQTT_SERVER") {
            self.mqtt.server = val;
        }
        if let Some(val) = var("TASMOTA_MQTT_TOPIC") {
            self.mqtt.topic = val;
        }
        if let Some(val) = var("GOHOME_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Validation("api_key must be set".to_string()));
        }
        if self.hue.host.is_empty() != self.hue.username.is_empty() {
            return Err(ConfigError::Validation(
                "hue needs both host and username".to_string(),
            ));
        }
        if self.mqtt.server.is_empty() != self.mqtt.topic.is_empty() {
            return Err(ConfigError::Validation(
                "mqtt needs both server and topic".to_string(),
            ));
        }
        self.tasmota
            .outlets()
            .map_err(|err| ConfigError::Validation(format!("tasmota: {err}")))?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Split a comma-separated list, dropping quotes and blank entries.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().trim_matches('"').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8053,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "gohomed=info,gohome=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with_key() -> Config {
        Config {
            api_key: "s3cret".to_string(),
            ..Config::default()
        }
    }

    fn overridden(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).cloned());
        config
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8053);
        assert!(config.api_key.is_empty());
        assert!(config.wemo.enabled);
        assert!(!config.hue.is_configured());
        assert!(!config.mqtt.is_configured());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            api_key = 's3cret'

            [server]
            host = '127.0.0.1'
            port = 9090

            [logging]
            filter = 'debug'

            [hue]
            host = '192.168.1.2'
            username = 'abc'

            [wemo]
            enabled = false

            [tasmota]
            hosts = ['10.0.0.7', '10.0.0.8']
            names = ['Fan', 'Heater']

            [mqtt]
            server = 'mqtts://broker.local'
            topic = 'cmnd/outlets/POWER'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api_key, "s3cret");
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.logging.filter, "debug");
        assert!(config.hue.is_configured());
        assert!(!config.wemo.enabled);
        assert_eq!(config.tasmota.names, vec!["Fan", "Heater"]);
        assert!(config.mqtt.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 8053);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = with_key();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_require_api_key() {
        let err = Config::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: api_key must be set");
    }

    #[test]
    fn should_reject_half_configured_mqtt() {
        let mut config = with_key();
        config.mqtt.server = "tcp://broker:1883".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_mismatched_tasmota_names() {
        let config = Config {
            tasmota: TasmotaHttpConfig {
                hosts: vec!["10.0.0.7".to_string()],
                names: vec!["Fan".to_string(), "Heater".to_string()],
                ..TasmotaHttpConfig::default()
            },
            ..with_key()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("1 hosts but 2 names"));
    }

    #[test]
    fn should_apply_env_overrides() {
        let config = overridden(&[
            ("GOHOME_API_KEY", "from-env"),
            ("GOHOME_BIND", "127.0.0.1:9000"),
            ("HUE_GATEWAY_IP", "192.168.1.2"),
            ("HUE_USERNAME", "abc"),
            ("WEMO_ENABLED", "false"),
            ("TASMOTA_MQTT_SERVER", "tcp://broker:1883"),
            ("TASMOTA_MQTT_TOPIC", "cmnd/outlets/POWER"),
        ]);
        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert!(config.hue.is_configured());
        assert!(!config.wemo.enabled);
        assert!(config.mqtt.is_configured());
    }

    #[test]
    fn should_split_tasmota_lists() {
        let config = overridden(&[
            ("TASMOTA_HOSTS", r#""10.0.0.7", 10.0.0.8,,"#),
            ("TASMOTA_NAMES", r#""Fan","Heater""#),
        ]);
        assert_eq!(config.tasmota.hosts, vec!["10.0.0.7", "10.0.0.8"]);
        assert_eq!(config.tasmota.names, vec!["Fan", "Heater"]);
    }

    #[test]
    fn should_prefer_rust_log_over_gohome_log() {
        let config = overridden(&[("GOHOME_LOG", "warn"), ("RUST_LOG", "trace")]);
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparseable_overrides() {
        let config = overridden(&[("GOHOME_PORT", "http"), ("WEMO_ENABLED", "maybe")]);
        assert_eq!(config.server.port, 8053);
        assert!(config.wemo.enabled);
    }
}

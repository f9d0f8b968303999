//! Wemo integration configuration.

use serde::Deserialize;

use crate::soap::SERVICE_URN;

/// Configuration for the Wemo controller.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WemoConfig {
    /// Enable the Wemo controller.
    pub enabled: bool,
    /// How long to collect SSDP answers, per searched service, in seconds.
    pub discovery_timeout_secs: u64,
    /// Service identifiers to search for.
    pub service_urns: Vec<String>,
    /// Static `host:port` list. When non-empty, discovery is skipped.
    pub hosts: Vec<String>,
    /// Per-request timeout for SOAP calls, in seconds.
    pub timeout_secs: u64,
}

impl Default for WemoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            discovery_timeout_secs: 3,
            service_urns: vec![SERVICE_URN.to_string()],
            hosts: Vec::new(),
            timeout_secs: 10,
        }
    }
}

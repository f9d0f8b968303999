//! Tasmota integration configuration.

use serde::Deserialize;

use gohome_domain::device::Device;

use crate::error::TasmotaError;

/// Configuration for HTTP-controlled Tasmota outlets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TasmotaHttpConfig {
    /// Outlet hosts (`host` or `host:port`).
    pub hosts: Vec<String>,
    /// Human names, one per host. Empty means "use the host as name".
    pub names: Vec<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TasmotaHttpConfig {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            names: Vec::new(),
            timeout_secs: 10,
        }
    }
}

impl TasmotaHttpConfig {
    /// Pair hosts with names.
    ///
    /// # Errors
    ///
    /// Returns [`TasmotaError::MismatchedNames`] when names are given but
    /// their count differs from the host count.
    pub fn outlets(&self) -> Result<Vec<Device>, TasmotaError> {
        if self.names.is_empty() {
            return Ok(self.hosts.iter().cloned().map(Device::new).collect());
        }
        if self.names.len() != self.hosts.len() {
            return Err(TasmotaError::MismatchedNames {
                hosts: self.hosts.len(),
                names: self.names.len(),
            });
        }
        Ok(self
            .hosts
            .iter()
            .zip(&self.names)
            .map(|(host, name)| Device::named(host.clone(), name.clone()))
            .collect())
    }
}

/// Configuration for the MQTT broadcast controller.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// Broker URL, e.g. `mqtts://broker.local:8883` or `tcp://10.0.0.2:1883`.
    pub server: String,
    /// Topic every outlet subscribes to for bulk commands.
    pub topic: String,
    /// Connection attempts before giving up at startup.
    pub max_attempts: u32,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u64,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            topic: String::new(),
            max_attempts: 9,
            keep_alive_secs: 30,
        }
    }
}

impl MqttConfig {
    /// Both server and topic are required for the controller to exist.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.server.is_empty() && !self.topic.is_empty()
    }
}

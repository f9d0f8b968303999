//! HTTP-controlled Tasmota outlets.
//!
//! Uses the Tasmota web API endpoint `/cm?cmnd=<command>`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use gohome_app::ports::DeviceController;
use gohome_domain::device::Device;
use gohome_domain::error::CommandError;
use gohome_domain::power::PowerState;

use crate::config::TasmotaHttpConfig;
use crate::error::TasmotaError;

/// Controller over a configured list of Tasmota outlets.
#[derive(Debug, Clone)]
pub struct TasmotaHttpController {
    client: Client,
    outlets: Vec<Device>,
}

impl TasmotaHttpController {
    /// Build the controller from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TasmotaError::MismatchedNames`] for inconsistent lists or
    /// [`TasmotaError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &TasmotaHttpConfig) -> Result<Self, TasmotaError> {
        let outlets = config.outlets()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, outlets })
    }

    async fn send_power(&self, host: &str, power: PowerState) -> Result<(), TasmotaError> {
        let url = command_url(host, power);
        tracing::debug!(%url, "sending Tasmota power command");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TasmotaError::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// `http://{host}/cm?cmnd=Power%20On` (or `Off`).
fn command_url(host: &str, power: PowerState) -> String {
    let base = if host.starts_with("http://") || host.starts_with("https://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("http://{host}")
    };
    let argument = if power.is_on() { "On" } else { "Off" };
    format!("{base}/cm?cmnd=Power%20{argument}")
}

#[async_trait]
impl DeviceController for TasmotaHttpController {
    fn name(&self) -> &'static str {
        "tasmota"
    }

    async fn list_devices(&self) -> Result<Vec<Device>, CommandError> {
        Ok(self.outlets.clone())
    }

    async fn set_power(&self, device: &Device, power: PowerState) -> Result<(), CommandError> {
        self.send_power(&device.id, power)
            .await
            .map_err(|err| CommandError::device_failed(device.name.clone(), power, err))
    }
}

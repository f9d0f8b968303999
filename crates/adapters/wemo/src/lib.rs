//! # gohome-adapter-wemo
//!
//! Discovery-backed controller for Belkin Wemo outlets.
//!
//! ## How it works
//!
//! At construction the adapter sends an SSDP `M-SEARCH` for the
//! `basicevent` service and keeps every responder whose `USN` matches,
//! keyed by the `host:port` of its `LOCATION` URL. That list is fixed for
//! the lifetime of the controller; there is no re-discovery.
//!
//! Each outlet is switched with one SOAP `SetBinaryState` POST to
//! `http://{host:port}/upnp/control/basicevent1`.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `gohome-app` and `gohome-domain`.

mod config;
mod error;
pub mod soap;
mod ssdp;

pub use config::WemoConfig;
pub use error::WemoError;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use gohome_app::ports::DeviceController;
use gohome_domain::device::Device;
use gohome_domain::error::CommandError;
use gohome_domain::power::PowerState;

/// Controller over a fixed set of discovered Wemo outlets.
#[derive(Debug, Clone)]
pub struct WemoController {
    client: Client,
    devices: Vec<Device>,
}

impl WemoController {
    /// Build the controller, discovering outlets unless `config.hosts` is
    /// set.
    ///
    /// Finding no outlet is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`WemoError::Socket`] if the discovery socket fails, or
    /// [`WemoError::Http`] if the HTTP client cannot be created.
    pub async fn discover(config: &WemoConfig) -> Result<Self, WemoError> {
        if !config.hosts.is_empty() {
            tracing::info!(count = config.hosts.len(), "using static Wemo host list");
            return Self::with_hosts(config, config.hosts.iter().cloned());
        }

        let window = Duration::from_secs(config.discovery_timeout_secs);
        tracing::info!(
            window_secs = config.discovery_timeout_secs,
            "Wemo discovery started"
        );
        let hosts = discover_hosts(ssdp::MULTICAST_ADDR, &config.service_urns, window).await?;
        tracing::info!(count = hosts.len(), "Wemo discovery complete");

        Self::with_hosts(config, hosts)
    }

    /// Build the controller from known `host:port` addresses.
    ///
    /// # Errors
    ///
    /// Returns [`WemoError::Http`] if the HTTP client cannot be created.
    pub fn with_hosts(
        config: &WemoConfig,
        hosts: impl IntoIterator<Item = String>,
    ) -> Result<Self, WemoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            devices: hosts.into_iter().map(Device::new).collect(),
        })
    }

    /// The outlets this controller manages.
    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    async fn post_binary_state(&self, host: &str, power: PowerState) -> Result<(), WemoError> {
        let url = format!("http://{host}{}", soap::CONTROL_PATH);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/xml")
            .header("SOAPACTION", soap::soap_action())
            .header("charset", "utf8")
            .body(soap::set_binary_state(power))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WemoError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Search every URN and keep distinct `host:port` of matching responders.
async fn discover_hosts(
    target: &str,
    urns: &[String],
    window: Duration,
) -> Result<Vec<String>, WemoError> {
    let mut hosts: Vec<String> = Vec::new();
    for urn in urns {
        for response in ssdp::search(target, urn, window).await? {
            if !response.usn.contains(urn.as_str()) {
                continue;
            }
            match response.host_port() {
                Some(host) if !hosts.contains(&host) => {
                    tracing::info!(%host, "discovered Wemo device");
                    hosts.push(host);
                }
                Some(_) => {}
                None => {
                    tracing::debug!(location = %response.location, "ignoring unusable LOCATION");
                }
            }
        }
    }
    Ok(hosts)
}

#[async_trait]
impl DeviceController for WemoController {
    fn name(&self) -> &'static str {
        "wemo"
    }

    async fn list_devices(&self) -> Result<Vec<Device>, CommandError> {
        Ok(self.devices.clone())
    }

    async fn set_power(&self, device: &Device, power: PowerState) -> Result<(), CommandError> {
        self.post_binary_state(&device.id, power)
            .await
            .map_err(|err| err.into_device_failure(&device.name, power))
    }
}

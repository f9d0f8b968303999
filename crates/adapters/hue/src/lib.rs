//! # gohome-adapter-hue
//!
//! Bridge-backed controller: a Hue bridge already knows every light attached
//! to it, so each bulk command starts by asking the bridge for its lights and
//! then switches them one by one.
//!
//! ## Bridge API used
//!
//! | Call | Request | Response |
//! |------|---------|----------|
//! | list | `GET /api/{user}/lights` | `{"1": {"name": "Kitchen", …}, …}` |
//! | set  | `PUT /api/{user}/lights/{id}/state` `{"on": true}` | `[{"success": …}]` |
//!
//! Either call may instead return `[{"error": {"description": …}}]` with a
//! `200 OK` status; that is treated as a failure.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `gohome-app` and `gohome-domain`.

mod config;
mod error;

pub use config::HueConfig;
pub use error::HueError;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use gohome_app::ports::DeviceController;
use gohome_domain::device::Device;
use gohome_domain::error::CommandError;
use gohome_domain::power::PowerState;

/// Light description as returned by the bridge; only the name matters here.
#[derive(Debug, Deserialize)]
struct LightInfo {
    name: String,
}

/// Controller talking to a single Hue bridge.
#[derive(Debug, Clone)]
pub struct HueBridge {
    client: Client,
    api_base: String,
}

impl HueBridge {
    /// Build the controller. The bridge is not contacted until the first
    /// command.
    ///
    /// # Errors
    ///
    /// Returns [`HueError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &HueConfig) -> Result<Self, HueError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_base: config.api_base(),
        })
    }

    async fn fetch_lights(&self) -> Result<Vec<Device>, HueError> {
        let url = format!("{}/lights", self.api_base);
        let response = self.client.get(&url).send().await?;
        let body = read_success_body(response).await?;

        let lights: HashMap<String, LightInfo> = serde_json::from_value(body)?;
        let mut devices: Vec<Device> = lights
            .into_iter()
            .map(|(id, info)| Device::named(id, info.name))
            .collect();
        devices.sort_by(|a, b| {
            (a.id.parse::<u64>().ok(), &a.id).cmp(&(b.id.parse::<u64>().ok(), &b.id))
        });
        Ok(devices)
    }

    async fn put_state(&self, light_id: &str, power: PowerState) -> Result<(), HueError> {
        let url = format!("{}/lights/{light_id}/state", self.api_base);
        let response = self
            .client
            .put(&url)
            .json(&serde_json::json!({ "on": power.is_on() }))
            .send()
            .await?;
        read_success_body(response).await?;
        Ok(())
    }
}

/// Check the status, decode the JSON body, and surface bridge error entries.
async fn read_success_body(response: reqwest::Response) -> Result<Value, HueError> {
    let status = response.status();
    if !status.is_success() {
        return Err(HueError::Status(status.as_u16()));
    }
    let text = response.text().await?;
    let body: Value = serde_json::from_str(&text)?;
    if let Some(description) = first_bridge_error(&body) {
        return Err(HueError::Bridge(description));
    }
    Ok(body)
}

/// The bridge reports errors as `[{"error": {"description": "..."}}]`.
fn first_bridge_error(body: &Value) -> Option<String> {
    body.as_array()?.iter().find_map(|entry| {
        let error = entry.get("error")?;
        Some(
            error
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        )
    })
}

#[async_trait]
impl DeviceController for HueBridge {
    fn name(&self) -> &'static str {
        "hue"
    }

    async fn list_devices(&self) -> Result<Vec<Device>, CommandError> {
        let lights = self
            .fetch_lights()
            .await
            .map_err(HueError::into_unreachable)?;
        tracing::debug!(count = lights.len(), "fetched lights from hue bridge");
        Ok(lights)
    }

    async fn set_power(&self, device: &Device, power: PowerState) -> Result<(), CommandError> {
        self.put_state(&device.id, power)
            .await
            .map_err(|err| err.into_device_failure(&device.to_string(), power))
    }
}

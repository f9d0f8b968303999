//! # gohome-adapter-tasmota
//!
//! Two ways of switching Tasmota outlets:
//!
//! - [`TasmotaHttpController`] calls `GET /cm?cmnd=Power%20On` on every
//!   configured host, one failure per unreachable outlet.
//! - [`TasmotaMqttController`] publishes `on`/`off` once on a shared topic.
//!   It also implements [`DeviceSwitch`](gohome_app::ports::DeviceSwitch)
//!   for single-outlet commands on `cmnd/{device}/POWER`.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `gohome-app` and `gohome-domain`.

mod config;
mod error;
mod http;
mod mqtt;

pub use config::{MqttConfig, TasmotaHttpConfig};
pub use error::TasmotaError;
pub use http::TasmotaHttpController;
pub use mqtt::{BrokerAddress, TasmotaMqttController};

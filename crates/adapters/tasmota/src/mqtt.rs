//! MQTT broadcast to Tasmota outlets.
//!
//! Bulk commands go out as one publish of `on`/`off` on a shared topic, so
//! this controller has no device list and reports at most one failure.
//! Single outlets are addressed on their own `cmnd/{device}/POWER` topic.
//!
//! Publishes never wait: while the broker is down, or the outgoing queue is
//! full, a command fails right away instead of being queued for later.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rumqttc::{
    AsyncClient, ConnectionError, Event, EventLoop, MqttOptions, Packet, QoS, Transport,
};
use url::Url;

use gohome_app::ports::{DeviceController, DeviceSwitch};
use gohome_domain::auth::DeviceStateChange;
use gohome_domain::device::Device;
use gohome_domain::error::CommandError;
use gohome_domain::power::PowerState;
use gohome_domain::report::CommandReport;

use crate::config::MqttConfig;
use crate::error::TasmotaError;

static CLIENT_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

const CONTROLLER_NAME: &str = "tasmota-mqtt";

/// Outgoing requests buffered between the client and its event loop.
const REQUEST_CAPACITY: usize = 10;

/// Where and how to reach the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerAddress {
    pub host: String,
    pub port: u16,
    /// Wrap the connection in TLS with the platform's root certificates.
    pub tls: bool,
}

impl BrokerAddress {
    /// Parse a broker URL.
    ///
    /// `mqtts`, `ssl` and `tls` schemes select TLS (default port 8883);
    /// `mqtt`, `tcp` or no scheme select plain TCP (default port 1883).
    ///
    /// # Errors
    ///
    /// Returns [`TasmotaError::InvalidBroker`] for unknown schemes or a
    /// missing host.
    pub fn parse(server: &str) -> Result<Self, TasmotaError> {
        let invalid = || TasmotaError::InvalidBroker(server.to_string());
        let normalized = if server.contains("://") {
            server.to_string()
        } else {
            format!("tcp://{server}")
        };
        let url = Url::parse(&normalized).map_err(|_| invalid())?;

        let tls = match url.scheme() {
            "mqtts" | "ssl" | "tls" => true,
            "mqtt" | "tcp" => false,
            _ => return Err(invalid()),
        };
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(invalid)?
            .to_string();
        let port = url.port().unwrap_or(if tls { 8883 } else { 1883 });

        Ok(Self { host, port, tls })
    }

    fn options(&self, keep_alive: Duration) -> MqttOptions {
        let counter = CLIENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        let client_id = format!("gohome_{}_{}", std::process::id(), counter);

        let mut options = MqttOptions::new(client_id, &self.host, self.port);
        options.set_keep_alive(keep_alive);
        options.set_clean_session(true);
        if self.tls {
            options.set_transport(Transport::tls_with_default_config());
        }
        options
    }
}

/// Delay after the given failed connection attempt (1-based).
pub(crate) fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(u64::from(attempt))
}

/// Controller publishing Tasmota power commands through a broker.
#[derive(Clone)]
pub struct TasmotaMqttController {
    client: AsyncClient,
    topic: String,
    connected: Arc<AtomicBool>,
}

impl std::fmt::Debug for TasmotaMqttController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TasmotaMqttController")
            .field("topic", &self.topic)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

impl TasmotaMqttController {
    /// Connect to the broker, retrying with a growing delay.
    ///
    /// Once connected, the event loop keeps running in a background task
    /// that reconnects on its own.
    ///
    /// # Errors
    ///
    /// Returns [`TasmotaError::InvalidBroker`] for an unusable URL, or
    /// [`TasmotaError::ConnectExhausted`] when every attempt failed.
    #[tracing::instrument(skip(config), fields(server = %config.server))]
    pub async fn connect(config: &MqttConfig) -> Result<Self, TasmotaError> {
        let broker = BrokerAddress::parse(&config.server)?;
        let options = broker.options(Duration::from_secs(config.keep_alive_secs));
        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);

        let attempts = config.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match wait_for_connack(&mut eventloop).await {
                Ok(()) => break,
                Err(source) if attempt >= attempts => {
                    return Err(TasmotaError::ConnectExhausted { attempts, source });
                }
                Err(err) => {
                    let delay = backoff(attempt);
                    tracing::warn!(
                        attempt,
                        delay_secs = delay.as_secs(),
                        error = %err,
                        "MQTT connection failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
        tracing::info!(
            host = %broker.host,
            port = broker.port,
            tls = broker.tls,
            "connected to MQTT broker"
        );

        let connected = Arc::new(AtomicBool::new(true));
        tokio::spawn(drive(eventloop, Arc::clone(&connected)));
        Ok(Self::from_client(client, config.topic.clone(), connected))
    }

    /// Wrap a client whose event loop keeps `connected` up to date.
    pub(crate) fn from_client(
        client: AsyncClient,
        topic: impl Into<String>,
        connected: Arc<AtomicBool>,
    ) -> Self {
        Self {
            client,
            topic: topic.into(),
            connected,
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    fn publish(&self, topic: &str, payload: &str) -> Result<(), TasmotaError> {
        if !self.is_connected() {
            return Err(TasmotaError::NotConnected);
        }
        tracing::debug!(topic, payload, "publishing MQTT message");
        self.client
            .try_publish(topic, QoS::AtMostOnce, false, payload.as_bytes().to_vec())?;
        Ok(())
    }
}

/// Per-device command topic.
fn power_topic(device: &str) -> String {
    format!("cmnd/{device}/POWER")
}

async fn wait_for_connack(eventloop: &mut EventLoop) -> Result<(), ConnectionError> {
    loop {
        if let Event::Incoming(Packet::ConnAck(connack)) = eventloop.poll().await? {
            tracing::debug!(?connack, "MQTT connected");
            return Ok(());
        }
    }
}

async fn drive(mut eventloop: EventLoop, connected: Arc<AtomicBool>) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(connack))) => {
                tracing::debug!(?connack, "MQTT reconnected");
                connected.store(true, Ordering::Release);
            }
            Ok(_) => {}
            Err(err) => {
                connected.store(false, Ordering::Release);
                tracing::warn!(error = %err, "MQTT event loop error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}

#[async_trait]
impl DeviceController for TasmotaMqttController {
    fn name(&self) -> &'static str {
        CONTROLLER_NAME
    }

    async fn list_devices(&self) -> Result<Vec<Device>, CommandError> {
        Ok(Vec::new())
    }

    async fn set_power(&self, device: &Device, power: PowerState) -> Result<(), CommandError> {
        self.publish(&power_topic(&device.id), power.as_str())
            .map_err(|err| CommandError::device_failed(device.name.clone(), power, err))
    }

    async fn set_all_power(&self, power: PowerState) -> CommandReport {
        match self.publish(&self.topic, power.as_str()) {
            Ok(()) => CommandReport::new(),
            Err(err) => {
                tracing::warn!(topic = %self.topic, error = %err, "bulk MQTT publish failed");
                CommandReport::single(
                    CONTROLLER_NAME,
                    CommandError::unreachable("mqtt broker", err),
                )
            }
        }
    }
}

#[async_trait]
impl DeviceSwitch for TasmotaMqttController {
    fn name(&self) -> &'static str {
        CONTROLLER_NAME
    }

    async fn set_device_state(&self, change: &DeviceStateChange) -> Result<(), CommandError> {
        self.publish(&power_topic(change.device()), change.state())
            .map_err(|err| CommandError::unreachable("mqtt broker", err))
    }
}

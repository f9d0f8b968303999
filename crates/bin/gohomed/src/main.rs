//! # gohomed — gohome daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Construct the controllers that are configured, in dispatch order:
//!   hue, wemo, tasmota (HTTP), tasmota (MQTT)
//! - Construct the command service with the shared secret
//! - Build the axum router, bind and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use gohome_adapter_http_axum::router;
use gohome_adapter_http_axum::state::AppState;
use gohome_adapter_hue::{HueBridge, HueError};
use gohome_adapter_tasmota::{TasmotaError, TasmotaHttpController, TasmotaMqttController};
use gohome_adapter_wemo::{WemoController, WemoError};
use gohome_app::ports::{DeviceController, DeviceSwitch};
use gohome_app::services::command_service::CommandService;
use gohome_app::services::dispatcher::Dispatcher;
use gohome_domain::auth::ApiKey;
use gohome_domain::error::{CommandError, error_chain};

use crate::config::Config;

type Controllers = (Vec<Arc<dyn DeviceController>>, Option<Arc<dyn DeviceSwitch>>);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let api_key = ApiKey::new(config.api_key.clone())?;
    let (controllers, switch) = match build_controllers(&config).await {
        Ok(built) => built,
        Err(err) => {
            tracing::error!(error = %error_chain(&err), "failed to start controllers");
            return Err(err.into());
        }
    };

    let dispatcher = Dispatcher::new(controllers);
    let names: Vec<_> = dispatcher.controller_names().collect();
    if names.is_empty() {
        tracing::warn!("no controllers configured, commands will be no-ops");
    } else {
        tracing::info!(controllers = ?names, "dispatcher ready");
    }

    let mut service = CommandService::new(api_key, dispatcher);
    if let Some(switch) = switch {
        service = service.with_switch(switch);
    }
    let app = router::build(AppState::new(service));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "gohomed listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("gohomed stopped");
    Ok(())
}

async fn build_controllers(config: &Config) -> Result<Controllers, CommandError> {
    let mut controllers: Vec<Arc<dyn DeviceController>> = Vec::new();
    let mut switch: Option<Arc<dyn DeviceSwitch>> = None;

    if config.hue.is_configured() {
        let hue = HueBridge::new(&config.hue).map_err(HueError::into_fatal)?;
        controllers.push(Arc::new(hue));
    }

    if config.wemo.enabled {
        let wemo = WemoController::discover(&config.wemo)
            .await
            .map_err(WemoError::into_fatal)?;
        controllers.push(Arc::new(wemo));
    }

    if !config.tasmota.hosts.is_empty() {
        let tasmota =
            TasmotaHttpController::new(&config.tasmota).map_err(TasmotaError::into_fatal)?;
        controllers.push(Arc::new(tasmota));
    }

    if config.mqtt.is_configured() {
        let mqtt = Arc::new(
            TasmotaMqttController::connect(&config.mqtt)
                .await
                .map_err(TasmotaError::into_fatal)?,
        );
        switch = Some(mqtt.clone());
        controllers.push(mqtt);
    }

    Ok((controllers, switch))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(error = %err, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

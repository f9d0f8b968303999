//! JSON handlers for power commands.
//!
//! Bodies are parsed from raw bytes so that clients which omit
//! `Content-Type: application/json` are still served.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use gohome_domain::error::CommandError;
use gohome_domain::power::PowerState;
use gohome_domain::report::CommandReport;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `/on` and `/off`.
#[derive(Debug, Deserialize)]
pub struct PowerAllRequest {
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

/// Request body for `/power`.
#[derive(Debug, Deserialize)]
pub struct PowerRequest {
    #[serde(rename = "apiKey")]
    pub api_key: String,
    pub device: String,
    pub state: String,
}

/// Success body.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// Possible responses from the command endpoints.
pub enum CommandResponse {
    Ok(Json<MessageBody>),
}

impl IntoResponse for CommandResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

impl CommandResponse {
    fn message(message: String) -> Self {
        Self::Ok(Json(MessageBody { message }))
    }
}

fn parse<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| ApiError::malformed(&err))
}

/// `POST /on`
pub async fn on(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<CommandResponse, ApiError> {
    power_all(&state, &body, PowerState::On).await
}

/// `POST /off`
pub async fn off(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<CommandResponse, ApiError> {
    power_all(&state, &body, PowerState::Off).await
}

async fn power_all(
    state: &AppState,
    body: &Bytes,
    power: PowerState,
) -> Result<CommandResponse, ApiError> {
    let request: PowerAllRequest = parse(body)?;
    let report = state.service.power_all(&request.api_key, power).await?;
    if !report.is_success() {
        return Err(ApiError::Failed(report));
    }
    Ok(CommandResponse::message(format!(
        "all lights turned {power} successfully"
    )))
}

/// `POST /power`
pub async fn power(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<CommandResponse, ApiError> {
    let request: PowerRequest = parse(&body)?;
    let outcome = state
        .service
        .set_device_state(&request.api_key, &request.device, &request.state)
        .await;

    match outcome {
        Ok(change) => Ok(CommandResponse::message(format!(
            "set {} to {}",
            change.device(),
            change.state()
        ))),
        Err(err @ (CommandError::BadRequest(_) | CommandError::Unauthorized)) => Err(err.into()),
        Err(err) => {
            let controller = state.service.switch_name().unwrap_or("switch");
            Err(ApiError::Failed(CommandReport::single(controller, err)))
        }
    }
}

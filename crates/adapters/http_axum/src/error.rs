//! HTTP error response mapping.
//!
//! Every error body has the shape `{"errors": [...]}`. Client errors carry
//! plain strings; device failures carry one object per failure.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use gohome_domain::error::{CommandError, ValidationError, error_chain};
use gohome_domain::report::CommandReport;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody<T> {
    errors: Vec<T>,
}

/// One collected failure in a 500 body.
#[derive(Serialize)]
struct FailureEntry<'a> {
    controller: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<&'a str>,
    error: String,
}

/// Maps command outcomes to an HTTP response with appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    /// The request was rejected before any device was touched.
    Command(CommandError),
    /// The command ran and some devices failed.
    Failed(CommandReport),
}

impl ApiError {
    /// A body that is not valid JSON for the expected request type.
    #[must_use]
    pub fn malformed(err: &serde_json::Error) -> Self {
        Self::Command(ValidationError::MalformedBody(err.to_string()).into())
    }
}

impl From<CommandError> for ApiError {
    fn from(err: CommandError) -> Self {
        Self::Command(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Command(CommandError::BadRequest(err)) => {
                tracing::debug!(error = %err, "rejected request");
                client_error(StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Command(err @ CommandError::Unauthorized) => {
                tracing::warn!("rejected request with invalid API key");
                client_error(StatusCode::UNAUTHORIZED, err.to_string())
            }
            Self::Command(err) => {
                tracing::error!(error = %error_chain(&err), "command failed");
                let entry = FailureEntry {
                    controller: "gohome",
                    device: err.device(),
                    error: error_chain(&err),
                };
                server_error(vec![entry])
            }
            Self::Failed(report) => {
                let entries: Vec<FailureEntry<'_>> = report
                    .failures()
                    .map(|failure| FailureEntry {
                        controller: &failure.controller,
                        device: failure.device(),
                        error: failure.message(),
                    })
                    .collect();
                tracing::error!(failures = entries.len(), "command finished with failures");
                server_error(entries)
            }
        }
    }
}

fn client_error(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(ErrorBody {
            errors: vec![message],
        }),
    )
        .into_response()
}

fn server_error(entries: Vec<FailureEntry<'_>>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody { errors: entries }),
    )
        .into_response()
}

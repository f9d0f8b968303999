//! Common error types used across the workspace.
//!
//! Each adapter defines its own typed errors and converts them into
//! [`CommandError`] at the port boundary.

use std::error::Error as StdError;
use std::fmt::Write as _;

use crate::power::PowerState;

/// Boxed, thread-safe error used as the source of transport failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error kinds shared by every layer.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Malformed or missing input.
    #[error("bad request")]
    BadRequest(#[from] ValidationError),

    /// The supplied API key does not match.
    #[error("invalid API key")]
    Unauthorized,

    /// A gateway, discovery socket, or broker could not be reached or
    /// answered with something that is not a valid protocol response.
    #[error("{target} unreachable")]
    UpstreamUnreachable {
        /// What we tried to reach (e.g. `"hue bridge"`).
        target: String,
        #[source]
        source: BoxError,
    },

    /// One specific device rejected or failed a command.
    #[error("failed to {} device ({device})", .power.verb())]
    DeviceCommandFailed {
        /// Label of the failing device.
        device: String,
        /// State the device was asked for.
        power: PowerState,
        #[source]
        source: BoxError,
    },

    /// Construction-time failure that aborts startup.
    #[error("configuration error")]
    ConfigurationFatal(#[source] BoxError),
}

impl CommandError {
    /// Shorthand for [`CommandError::UpstreamUnreachable`].
    pub fn unreachable(target: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::UpstreamUnreachable {
            target: target.into(),
            source: source.into(),
        }
    }

    /// Shorthand for [`CommandError::DeviceCommandFailed`].
    pub fn device_failed(
        device: impl Into<String>,
        power: PowerState,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::DeviceCommandFailed {
            device: device.into(),
            power,
            source: source.into(),
        }
    }

    /// Label of the failing device, if this error is device-scoped.
    #[must_use]
    pub fn device(&self) -> Option<&str> {
        match self {
            Self::DeviceCommandFailed { device, .. } => Some(device),
            _ => None,
        }
    }
}

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent or blank.
    #[error("missing {0}")]
    MissingField(&'static str),

    /// The operation is not available with the current configuration.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),

    /// The request body could not be decoded.
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// Render an error and all of its sources as `outer: inner: root`.
#[must_use]
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        let _ = write!(out, ": {source}");
        current = source.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_tag_device_failure_with_verb_and_label() {
        let err = CommandError::device_failed("Kitchen", PowerState::Off, "timed out");
        assert_eq!(err.to_string(), "failed to turn off device (Kitchen)");
        assert_eq!(err.device(), Some("Kitchen"));
    }

    #[test]
    fn should_not_expose_device_for_controller_errors() {
        let err = CommandError::unreachable("hue bridge", "connection refused");
        assert_eq!(err.device(), None);
    }

    #[test]
    fn should_render_full_source_chain() {
        let err = CommandError::unreachable("hue bridge", "connection refused");
        assert_eq!(error_chain(&err), "hue bridge unreachable: connection refused");
    }

    #[test]
    fn should_convert_validation_error_into_bad_request() {
        let err: CommandError = ValidationError::MissingField("device").into();
        assert!(matches!(err, CommandError::BadRequest(_)));
        assert_eq!(error_chain(&err), "bad request: missing device");
    }
}

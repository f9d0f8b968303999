//! Hue adapter error types.

use gohome_domain::error::CommandError;
use gohome_domain::power::PowerState;

/// Errors specific to the Hue adapter.
#[derive(Debug, thiserror::Error)]
pub enum HueError {
    /// Building the HTTP client or sending a request failed.
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// The bridge answered with a non-success status.
    #[error("bridge answered with HTTP {0}")]
    Status(u16),

    /// The bridge body is not the JSON shape we expect.
    #[error("unexpected bridge response")]
    Decode(#[from] serde_json::Error),

    /// The bridge reported an error entry (bad username, unknown light, …).
    #[error("bridge error: {0}")]
    Bridge(String),
}

impl HueError {
    /// Client construction failures abort startup.
    #[must_use]
    pub fn into_fatal(self) -> CommandError {
        CommandError::ConfigurationFatal(Box::new(self))
    }

    /// Convert a listing failure into a controller-level error.
    #[must_use]
    pub fn into_unreachable(self) -> CommandError {
        CommandError::unreachable("hue bridge", self)
    }

    /// Convert a per-light failure into a device-tagged error.
    #[must_use]
    pub fn into_device_failure(self, light: &str, power: PowerState) -> CommandError {
        CommandError::device_failed(light, power, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gohome_domain::error::error_chain;

    #[test]
    fn should_display_bridge_error_description() {
        let err = HueError::Bridge("unauthorized user".to_string());
        assert_eq!(err.to_string(), "bridge error: unauthorized user");
    }

    #[test]
    fn should_convert_to_unreachable_with_chain() {
        let err = HueError::Status(503).into_unreachable();
        assert!(matches!(err, CommandError::UpstreamUnreachable { .. }));
        assert_eq!(
            error_chain(&err),
            "hue bridge unreachable: bridge answered with HTTP 503"
        );
    }

    #[test]
    fn should_tag_device_failure_with_light_name() {
        let err = HueError::Status(500).into_device_failure("Kitchen", PowerState::On);
        assert_eq!(err.device(), Some("Kitchen"));
    }
}

//! Tasmota adapter error types.

use gohome_domain::error::CommandError;

/// Errors specific to the Tasmota adapter.
#[derive(Debug, thiserror::Error)]
pub enum TasmotaError {
    /// Configured names do not line up with configured hosts.
    #[error("{hosts} hosts but {names} names configured")]
    MismatchedNames {
        /// Number of hosts.
        hosts: usize,
        /// Number of names.
        names: usize,
    },

    /// Building the HTTP client or sending a request failed.
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// The outlet answered with a non-success status.
    #[error("outlet answered with HTTP {0}")]
    Status(u16),

    /// The broker URL could not be understood.
    #[error("invalid broker address {0:?}")]
    InvalidBroker(String),

    /// Every connection attempt to the broker failed.
    #[error("failed to connect to MQTT broker after {attempts} attempts")]
    ConnectExhausted {
        /// How many attempts were made.
        attempts: u32,
        #[source]
        source: rumqttc::ConnectionError,
    },

    /// The event loop has no live broker connection.
    #[error("not connected to MQTT broker")]
    NotConnected,

    /// The client could not hand the publish to its event loop.
    #[error("failed to publish MQTT message")]
    Publish(#[from] rumqttc::ClientError),
}

impl TasmotaError {
    /// Construction failures abort startup.
    #[must_use]
    pub fn into_fatal(self) -> CommandError {
        CommandError::ConfigurationFatal(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_mismatched_names() {
        let err = TasmotaError::MismatchedNames { hosts: 3, names: 2 };
        assert_eq!(err.to_string(), "3 hosts but 2 names configured");
    }

    #[test]
    fn should_convert_to_fatal() {
        let err = TasmotaError::InvalidBroker("::".to_string()).into_fatal();
        assert!(matches!(err, CommandError::ConfigurationFatal(_)));
    }
}

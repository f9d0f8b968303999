//! Wemo adapter error types.

use gohome_domain::error::CommandError;
use gohome_domain::power::PowerState;

/// Errors specific to the Wemo adapter.
#[derive(Debug, thiserror::Error)]
pub enum WemoError {
    /// The discovery socket could not be opened, written, or read.
    #[error("SSDP socket error")]
    Socket(#[source] std::io::Error),

    /// A configured discovery target is not a socket address.
    #[error("invalid SSDP target address {0:?}")]
    InvalidAddress(String),

    /// Building the HTTP client or sending the SOAP request failed.
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// The outlet answered with a non-success status.
    #[error("device answered with HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },
}

impl WemoError {
    /// Discovery and client construction failures abort startup.
    #[must_use]
    pub fn into_fatal(self) -> CommandError {
        CommandError::ConfigurationFatal(Box::new(self))
    }

    /// Convert a per-outlet failure into a device-tagged error.
    #[must_use]
    pub fn into_device_failure(self, host: &str, power: PowerState) -> CommandError {
        CommandError::device_failed(host, power, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_with_body() {
        let err = WemoError::Status {
            status: 500,
            body: "<s:Fault/>".to_string(),
        };
        assert_eq!(err.to_string(), "device answered with HTTP 500: <s:Fault/>");
    }

    #[test]
    fn should_convert_socket_error_to_fatal() {
        let err = WemoError::Socket(std::io::Error::other("no route")).into_fatal();
        assert!(matches!(err, CommandError::ConfigurationFatal(_)));
    }
}

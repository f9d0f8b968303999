//! API key and the validated single-device request.

use std::fmt;

use crate::error::{CommandError, ValidationError};

/// Process-wide shared secret.
///
/// Compared verbatim against the key a request supplies. `Debug` is
/// redacted so the key never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a secret. Blank secrets are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `key` is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ValidationError::MissingField("api key"));
        }
        Ok(Self(key))
    }

    /// Check a supplied key.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Unauthorized`] on mismatch.
    pub fn verify(&self, supplied: &str) -> Result<(), CommandError> {
        if self.0 == supplied {
            Ok(())
        } else {
            Err(CommandError::Unauthorized)
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// A validated request to put one named device into a state.
///
/// The state is passed through verbatim (e.g. `on`, `off`, `toggle`), only
/// emptiness is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceStateChange {
    device: String,
    state: String,
}

impl DeviceStateChange {
    /// Validate both fields are non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first blank field.
    pub fn new(device: &str, state: &str) -> Result<Self, ValidationError> {
        let device = device.trim();
        let state = state.trim();
        if device.is_empty() {
            return Err(ValidationError::MissingField("device"));
        }
        if state.is_empty() {
            return Err(ValidationError::MissingField("state"));
        }
        Ok(Self {
            device: device.to_string(),
            state: state.to_string(),
        })
    }

    /// Target device name.
    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Requested state literal.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }
}

//! Power state — the only thing a bulk command can ask for.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Requested power state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    /// Lowercase literal used as message-bus payload (`"on"` / `"off"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }

    /// Whether this is [`PowerState::On`].
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// Verb phrase used in failure messages ("failed to turn on ...").
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Self::On => "turn on",
            Self::Off => "turn off",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

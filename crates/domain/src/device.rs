//! Device — one addressable thing behind a controller.

use std::fmt;

use serde::Serialize;

/// A device as known by its controller.
///
/// `id` is whatever the transport needs to reach the device (a Hue light id,
/// a Wemo `host:port`, a Tasmota host, an MQTT device topic). `name` is the
/// human label used when tagging failures; it defaults to the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: String,
    pub name: String,
}

impl Device {
    /// Create a device whose label is its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
        }
    }

    /// Create a device with an explicit human label.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.id {
            f.write_str(&self.id)
        } else {
            write!(f, "{} ({})", self.name, self.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_name_to_id() {
        let device = Device::new("192.168.1.20:49153");
        assert_eq!(device.name, "192.168.1.20:49153");
        assert_eq!(device.to_string(), "192.168.1.20:49153");
    }

    #[test]
    fn should_display_name_and_id() {
        let device = Device::named("3", "Kitchen");
        assert_eq!(device.to_string(), "Kitchen (3)");
    }
}

//! In-memory port implementations shared by the unit tests of this crate.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use gohome_domain::auth::DeviceStateChange;
use gohome_domain::device::Device;
use gohome_domain::error::CommandError;
use gohome_domain::power::PowerState;

use crate::ports::{DeviceController, DeviceSwitch};

/// Controller over a fixed device list that records every call.
pub struct FakeController {
    name: &'static str,
    devices: Vec<Device>,
    failing: HashSet<String>,
    unlistable: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeController {
    pub fn new(name: &'static str, devices: &[&str]) -> Self {
        Self {
            name,
            devices: devices.iter().map(|id| Device::new(*id)).collect(),
            failing: HashSet::new(),
            unlistable: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(mut self, devices: &[&str]) -> Self {
        self.failing = devices.iter().map(ToString::to_string).collect();
        self
    }

    pub fn unlistable(mut self) -> Self {
        self.unlistable = true;
        self
    }

    /// Shared handle on the call log, usable after the controller moved
    /// into an `Arc<dyn DeviceController>`.
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeviceController for FakeController {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn list_devices(&self) -> Result<Vec<Device>, CommandError> {
        if self.unlistable {
            return Err(CommandError::unreachable(self.name, "gateway offline"));
        }
        Ok(self.devices.clone())
    }

    async fn set_power(&self, device: &Device, power: PowerState) -> Result<(), CommandError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{power}", device.id));
        if self.failing.contains(&device.id) {
            return Err(CommandError::device_failed(
                device.name.clone(),
                power,
                "device rejected command",
            ));
        }
        Ok(())
    }
}

/// Switch that records every change it receives.
#[derive(Default)]
pub struct FakeSwitch {
    pub changes: Mutex<Vec<DeviceStateChange>>,
}

#[async_trait]
impl DeviceSwitch for FakeSwitch {
    fn name(&self) -> &'static str {
        "fake-switch"
    }

    async fn set_device_state(&self, change: &DeviceStateChange) -> Result<(), CommandError> {
        self.changes.lock().unwrap().push(change.clone());
        Ok(())
    }
}

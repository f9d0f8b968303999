//! Controller port — one integration managing one class of devices over one
//! transport.
//!
//! A controller is built once at startup (by discovery or from
//! configuration) and its device list is never refreshed afterwards.

use async_trait::async_trait;

use gohome_domain::device::Device;
use gohome_domain::error::CommandError;
use gohome_domain::power::PowerState;
use gohome_domain::report::CommandReport;

/// A pluggable device integration.
///
/// Implementations live in the adapter crates (`gohome-adapter-hue`,
/// `gohome-adapter-wemo`, `gohome-adapter-tasmota`). The dispatcher holds
/// them as `Arc<dyn DeviceController>`.
#[async_trait]
pub trait DeviceController: Send + Sync {
    /// Unique name identifying this controller (e.g. `"hue"`). Used to tag
    /// failures in a [`CommandReport`].
    fn name(&self) -> &'static str;

    /// Enumerate the devices this controller manages.
    ///
    /// Bridge-backed controllers query their gateway here; the others return
    /// the list fixed at construction.
    async fn list_devices(&self) -> Result<Vec<Device>, CommandError>;

    /// Send one power command to one device.
    async fn set_power(&self, device: &Device, power: PowerState) -> Result<(), CommandError>;

    /// Bulk operation: put every device into `power`.
    ///
    /// The default lists devices, then calls [`set_power`](Self::set_power)
    /// once per device, recording each failure and moving on to the next
    /// device. A listing failure yields a single failure and no device call.
    async fn set_all_power(&self, power: PowerState) -> CommandReport {
        let devices = match self.list_devices().await {
            Ok(devices) => devices,
            Err(err) => {
                tracing::warn!(controller = self.name(), %err, "failed to list devices");
                return CommandReport::single(self.name(), err);
            }
        };

        let mut report = CommandReport::new();
        for device in &devices {
            match self.set_power(device, power).await {
                Ok(()) => {
                    tracing::debug!(
                        controller = self.name(),
                        device = %device,
                        %power,
                        "device switched"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        controller = self.name(),
                        device = %device,
                        %err,
                        "device command failed"
                    );
                    report.record(self.name(), err);
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::FakeController;

    #[tokio::test]
    async fn should_call_every_device_when_all_succeed() {
        let controller = FakeController::new("fake", &["a", "b", "c"]);

        let report = controller.set_all_power(PowerState::On).await;

        assert!(report.is_success());
        assert_eq!(controller.calls(), vec!["a:on", "b:on", "c:on"]);
    }

    #[tokio::test]
    async fn should_collect_one_failure_per_failing_device_and_continue() {
        let controller = FakeController::new("fake", &["a", "b", "c", "d"]).failing(&["a", "c"]);

        let report = controller.set_all_power(PowerState::Off).await;

        assert_eq!(report.len(), 2);
        let devices: Vec<_> = report.failures().filter_map(|f| f.device()).collect();
        assert_eq!(devices, vec!["a", "c"]);
        assert!(report.failures().all(|f| f.controller == "fake"));
        assert_eq!(controller.calls(), vec!["a:off", "b:off", "c:off", "d:off"]);
    }

    #[tokio::test]
    async fn should_return_single_failure_without_device_calls_when_listing_fails() {
        let controller = FakeController::new("fake", &["a", "b"]).unlistable();

        let report = controller.set_all_power(PowerState::On).await;

        assert_eq!(report.len(), 1);
        let failure = report.failures().next().unwrap();
        assert!(matches!(
            failure.error,
            CommandError::UpstreamUnreachable { .. }
        ));
        assert!(controller.calls().is_empty());
    }

    #[tokio::test]
    async fn should_succeed_with_no_devices() {
        let controller = FakeController::new("fake", &[]);
        assert!(controller.set_all_power(PowerState::On).await.is_success());
    }
}

//! Switch port — address one named device directly.

use async_trait::async_trait;

use gohome_domain::auth::DeviceStateChange;
use gohome_domain::error::CommandError;

/// Direct single-device control.
///
/// Only the message-bus controller implements this: it can reach a device
/// by name without enumerating anything. The request is validated before it
/// gets here, so implementations never see blank fields.
#[async_trait]
pub trait DeviceSwitch: Send + Sync {
    /// Label used to tag failures.
    fn name(&self) -> &'static str;

    /// Put `change.device()` into `change.state()`.
    async fn set_device_state(&self, change: &DeviceStateChange) -> Result<(), CommandError>;
}

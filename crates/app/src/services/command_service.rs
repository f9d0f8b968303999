//! Command service — gates inbound commands and routes them.

use std::sync::Arc;

use gohome_domain::auth::{ApiKey, DeviceStateChange};
use gohome_domain::error::{CommandError, ValidationError};
use gohome_domain::power::PowerState;
use gohome_domain::report::CommandReport;

use crate::ports::DeviceSwitch;
use crate::services::dispatcher::Dispatcher;

/// Immutable request-handling context built once at startup.
///
/// Holds the shared secret, the dispatcher, and the optional direct
/// device switch. Nothing here mutates after construction.
pub struct CommandService {
    api_key: ApiKey,
    dispatcher: Dispatcher,
    switch: Option<Arc<dyn DeviceSwitch>>,
}

impl CommandService {
    /// Create a service without direct device control.
    #[must_use]
    pub fn new(api_key: ApiKey, dispatcher: Dispatcher) -> Self {
        Self {
            api_key,
            dispatcher,
            switch: None,
        }
    }

    /// Enable direct device control through `switch`.
    #[must_use]
    pub fn with_switch(mut self, switch: Arc<dyn DeviceSwitch>) -> Self {
        self.switch = Some(switch);
        self
    }

    /// Whether direct device control is available.
    #[must_use]
    pub fn has_switch(&self) -> bool {
        self.switch.is_some()
    }

    /// Name of the direct device switch, if any.
    #[must_use]
    pub fn switch_name(&self) -> Option<&'static str> {
        self.switch.as_ref().map(|switch| switch.name())
    }

    /// Turn every device of every controller on or off.
    ///
    /// The key is checked before any controller is touched. The returned
    /// report may carry failures; those are not an `Err` because the
    /// successful device calls already took effect.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Unauthorized`] if `api_key` does not match.
    #[tracing::instrument(skip(self, api_key))]
    pub async fn power_all(
        &self,
        api_key: &str,
        power: PowerState,
    ) -> Result<CommandReport, CommandError> {
        self.api_key.verify(api_key)?;
        let report = self.dispatcher.dispatch(power).await;
        if report.is_success() {
            tracing::info!("all devices switched");
        } else {
            tracing::warn!(failures = report.len(), "command finished with failures");
        }
        Ok(report)
    }

    /// Put one named device into `state`.
    ///
    /// Both fields are validated before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Unauthorized`] on key mismatch,
    /// [`CommandError::BadRequest`] for blank fields or when no switch is
    /// configured, or whatever the switch reports.
    #[tracing::instrument(skip(self, api_key))]
    pub async fn set_device_state(
        &self,
        api_key: &str,
        device: &str,
        state: &str,
    ) -> Result<DeviceStateChange, CommandError> {
        self.api_key.verify(api_key)?;
        let change = DeviceStateChange::new(device, state)?;
        let switch = self
            .switch
            .as_ref()
            .ok_or(ValidationError::Unsupported("direct device control"))?;
        switch.set_device_state(&change).await?;
        Ok(change)
    }
}

//! Dispatcher — runs every configured controller against one command.

use std::sync::Arc;

use gohome_domain::power::PowerState;
use gohome_domain::report::CommandReport;

use crate::ports::DeviceController;

/// Ordered, heterogeneous list of controllers.
///
/// Controllers are independent partitions: a controller that reports
/// failures never stops the next one from running. There is no rollback,
/// a device switched by an earlier controller stays switched.
#[derive(Clone, Default)]
pub struct Dispatcher {
    controllers: Vec<Arc<dyn DeviceController>>,
}

impl Dispatcher {
    /// Create a dispatcher that runs `controllers` in the given order.
    #[must_use]
    pub fn new(controllers: Vec<Arc<dyn DeviceController>>) -> Self {
        Self { controllers }
    }

    /// Names of the configured controllers, in dispatch order.
    pub fn controller_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.controllers.iter().map(|c| c.name())
    }

    /// Run each controller's bulk operation sequentially and concatenate
    /// their reports.
    #[tracing::instrument(skip(self))]
    pub async fn dispatch(&self, power: PowerState) -> CommandReport {
        let mut report = CommandReport::new();
        for controller in &self.controllers {
            let partial = controller.set_all_power(power).await;
            if partial.is_success() {
                tracing::debug!(controller = controller.name(), "controller done");
            } else {
                tracing::warn!(
                    controller = controller.name(),
                    failures = partial.len(),
                    "controller reported failures"
                );
            }
            report.merge(partial);
        }
        report
    }
}

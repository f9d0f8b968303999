//! Command report — the accumulator returned by every bulk operation.
//!
//! A report is an ordered sequence of failures, each tagged with the
//! controller that produced it. Successful device calls leave no trace. The
//! dispatcher concatenates the reports of all controllers with
//! [`CommandReport::merge`]; an empty report means every call succeeded.

use crate::error::{CommandError, error_chain};

/// One collected failure.
#[derive(Debug)]
pub struct Failure {
    /// Name of the controller that produced the failure.
    pub controller: String,
    /// What went wrong.
    pub error: CommandError,
}

impl Failure {
    /// Label of the failing device, if the failure is device-scoped.
    #[must_use]
    pub fn device(&self) -> Option<&str> {
        self.error.device()
    }

    /// Full human-readable message including the source chain.
    #[must_use]
    pub fn message(&self) -> String {
        error_chain(&self.error)
    }
}

/// Ordered collection of failures. Not deduplicated.
#[derive(Debug, Default)]
pub struct CommandReport {
    failures: Vec<Failure>,
}

impl CommandReport {
    /// An empty (successful) report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A report holding exactly one failure.
    pub fn single(controller: impl Into<String>, error: CommandError) -> Self {
        let mut report = Self::new();
        report.record(controller, error);
        report
    }

    /// Append a failure.
    pub fn record(&mut self, controller: impl Into<String>, error: CommandError) {
        self.failures.push(Failure {
            controller: controller.into(),
            error,
        });
    }

    /// Append every failure of `other`, preserving order.
    pub fn merge(&mut self, other: CommandReport) {
        self.failures.extend(other.failures);
    }

    /// `true` when no failure was recorded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Same as [`is_success`](Self::is_success).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Iterate over failures in recording order.
    pub fn failures(&self) -> impl Iterator<Item = &Failure> {
        self.failures.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::PowerState;

    #[test]
    fn should_start_successful() {
        let report = CommandReport::new();
        assert!(report.is_success());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn should_keep_failures_in_recording_order() {
        let mut report = CommandReport::new();
        report.record(
            "wemo",
            CommandError::device_failed("a", PowerState::On, "boom"),
        );
        report.record(
            "wemo",
            CommandError::device_failed("b", PowerState::On, "boom"),
        );

        let devices: Vec<_> = report.failures().filter_map(Failure::device).collect();
        assert_eq!(devices, vec!["a", "b"]);
    }

    #[test]
    fn should_concatenate_reports_on_merge() {
        let mut first = CommandReport::single(
            "hue",
            CommandError::unreachable("hue bridge", "refused"),
        );
        let second = CommandReport::single(
            "tasmota",
            CommandError::device_failed("plug", PowerState::Off, "404"),
        );
        first.merge(second);

        let controllers: Vec<_> = first.failures().map(|f| f.controller.as_str()).collect();
        assert_eq!(controllers, vec!["hue", "tasmota"]);
        assert!(!first.is_success());
    }

    #[test]
    fn should_not_deduplicate() {
        let mut report = CommandReport::new();
        for _ in 0..2 {
            report.record(
                "wemo",
                CommandError::device_failed("a", PowerState::On, "boom"),
            );
        }
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn should_render_message_with_cause() {
        let report = CommandReport::single(
            "tasmota",
            CommandError::device_failed("plug", PowerState::Off, "HTTP 500"),
        );
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.message(), "failed to turn off device (plug): HTTP 500");
    }
}

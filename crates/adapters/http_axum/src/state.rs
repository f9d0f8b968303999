//! Shared application state for axum handlers.

use std::sync::Arc;

use gohome_app::services::command_service::CommandService;

/// Application state shared across all axum handlers.
///
/// The service is immutable after startup, so handlers share it through an
/// `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    /// Secret check and command routing.
    pub service: Arc<CommandService>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(service: CommandService) -> Self {
        Self::from_arc(Arc::new(service))
    }

    /// Create a new application state from a pre-wrapped service.
    #[must_use]
    pub fn from_arc(service: Arc<CommandService>) -> Self {
        Self { service }
    }
}

//! # gohome-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the command API: `POST /on`, `POST /off` and, when a direct
//!   device switch is configured, `POST /power`
//! - Map JSON bodies into [`CommandService`](gohome_app::services::command_service::CommandService)
//!   calls (driving adapter)
//! - Map outcomes into status codes and `{"message"}` / `{"errors"}` bodies
//!
//! ## Dependency rule
//! Depends on `gohome-app` (for services) and `gohome-domain` (for outcome
//! types). Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

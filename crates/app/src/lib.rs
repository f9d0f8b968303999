//! # gohome-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceController` — enumerate devices and switch their power, with a
//!     collect-and-continue bulk operation
//!   - `DeviceSwitch` — put one named device into an arbitrary state
//! - Define **driving/inbound** use-cases:
//!   - `Dispatcher` — run every controller against one command
//!   - `CommandService` — check the API key, validate input, dispatch
//!
//! ## Dependency rule
//! Depends on `gohome-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
mod fakes;

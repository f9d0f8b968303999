//! # gohome-domain
//!
//! Pure domain model for the gohome command fan-out service.
//!
//! ## Responsibilities
//! - Define the **power state** a command asks for (`on` / `off`)
//! - Define **devices** as seen by a controller (address + human label)
//! - Define the **command report**, the accumulator of tagged failures that
//!   bulk operations return and the dispatcher concatenates
//! - Define the **API key** and the validated single-device request
//! - Define the error kinds shared by every layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod auth;
pub mod device;
pub mod error;
pub mod power;
pub mod report;

//! Application services — use-case implementations.
//!
//! Services hold controllers as trait objects so the binary can mix
//! transports freely in one ordered list.

pub mod command_service;
pub mod dispatcher;

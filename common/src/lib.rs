//! # eolaudit common
//!
//! Types and helpers shared by every crate of the workspace:
//!
//! * **[`config`]**: runtime knobs and the on-disk configuration file.
//! * **[`network`]**: IPv4 ranges, CIDR expansion and probe results.
//! * **[`audit`]**: the audit domain (OS inventory, lifecycle mapping, records).
//! * **[`error`]**: run-level error type.
//! * **[`log`]**: logging macros forwarding to `tracing`.

pub mod audit;
pub mod config;
pub mod error;
pub mod log;
pub mod network;

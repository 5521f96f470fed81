//! # Audit domain
//!
//! * [`profile`]: what to scan ([`profile::ScanProfile`], [`profile::PortSet`]).
//! * [`inventory`]: the static tables driving classification and lifecycle lookups.
//! * [`lifecycle`]: support status of an operating system.
//! * [`record`]: one audited host, the unit written to reports.

pub mod inventory;
pub mod lifecycle;
pub mod profile;
pub mod record;

/// Placeholder for any value that could not be determined.
pub const NOT_APPLICABLE: &str = "N/A";

//! # eolaudit core
//!
//! The concurrent audit engine.
//!
//! * **[`scanner`]**: the coordinator and the traits at its seams.
//! * **[`network`]**: the TCP liveness prober.
//! * **[`classifier`]**: OS labels from the static inventory.
//! * **[`lifecycle`]**: support status from the product-lifecycle service.
//! * **[`report`]**: sorted aggregation and CSV/JSON export.

pub mod classifier;
pub mod lifecycle;
pub mod network;
pub mod report;
pub mod scanner;

//! Logging macros used across the workspace.
//!
//! They forward to `tracing` so the subscriber installed by the binary decides
//! how (and whether) events are rendered. `success!` is an `INFO` event with
//! its own target, letting formatters highlight completed steps.

#[doc(hidden)]
pub use tracing as __tracing;

/// Target carried by every `success!` event.
pub const SUCCESS_TARGET: &str = "eolaudit::success";

/// Target used for raw, undecorated terminal output.
pub const PRINT_TARGET: &str = "eolaudit::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log::__tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log::__tracing::error!($($arg)*)
    };
}

//! Cross-crate scenarios of the audit engine, run against fake network,
//! lifecycle service and clock.

#[cfg(test)]
mod audit;
#[cfg(test)]
mod utils;

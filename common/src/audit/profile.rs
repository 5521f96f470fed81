use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// Ports probed when the configuration does not provide any.
pub const DEFAULT_PORTS: &[u16] = &[22, 80, 135, 139, 443, 445, 3389];

/// One subnet to audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanProfile {
    pub network_name: String,
    pub cidr: String,
}

impl ScanProfile {
    pub fn new(network_name: impl Into<String>, cidr: impl Into<String>) -> Self {
        Self {
            network_name: network_name.into(),
            cidr: cidr.into(),
        }
    }
}

/// Ordered TCP ports probed on every host of a run.
///
/// Cloning is cheap, every probe of a run shares the same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSet(Arc<[u16]>);

impl PortSet {
    /// Builds a port set, keeping the given order and dropping duplicates.
    pub fn new(ports: impl IntoIterator<Item = u16>) -> Result<Self, AuditError> {
        let mut ordered: Vec<u16> = Vec::new();
        for port in ports {
            if port == 0 {
                return Err(AuditError::InvalidPort(port));
            }
            if !ordered.contains(&port) {
                ordered.push(port);
            }
        }
        Ok(Self(ordered.into()))
    }
}

impl Default for PortSet {
    fn default() -> Self {
        Self(DEFAULT_PORTS.into())
    }
}

impl Deref for PortSet {
    type Target = [u16];

    fn deref(&self) -> &[u16] {
        &self.0
    }
}

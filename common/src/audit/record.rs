use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use serde::Serialize;

use super::lifecycle::{EolStatus, EolVerdict};

/// One live host, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    pub ip: Ipv4Addr,
    pub hostname: String,
    pub os_label: String,
    pub eol_status: EolStatus,
    pub eol_date: String,
    pub open_ports: BTreeSet<u16>,
}

impl AuditRecord {
    pub fn new(
        ip: Ipv4Addr,
        hostname: String,
        os_label: String,
        verdict: EolVerdict,
        open_ports: BTreeSet<u16>,
    ) -> Self {
        Self {
            ip,
            hostname,
            os_label,
            eol_status: verdict.status,
            eol_date: verdict.date,
            open_ports,
        }
    }

    /// Open ports rendered as a list, e.g. `[22, 80]`.
    pub fn ports_field(&self) -> String {
        let ports: Vec<u16> = self.open_ports.iter().copied().collect();
        format!("{ports:?}")
    }
}

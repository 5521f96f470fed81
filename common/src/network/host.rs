use std::collections::BTreeSet;
use std::net::Ipv4Addr;

/// Outcome of probing one host against the configured port set.
///
/// A host is considered alive as soon as one probed port accepted a
/// connection. Hosts that answer on none of the ports are indistinguishable
/// from offline hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProbeResult {
    pub ip: Ipv4Addr,
    pub open_ports: BTreeSet<u16>,
}

impl HostProbeResult {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            ip,
            open_ports: BTreeSet::new(),
        }
    }

    pub fn with_open_port(mut self, port: u16) -> Self {
        self.open_ports.insert(port);
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.open_ports.is_empty()
    }
}

//! IPv4 ranges and CIDR expansion.
//!
//! A CIDR block is expanded into the *usable* host addresses of the network:
//! the network and broadcast addresses are stripped. Following the usual
//! host-counting convention, `/31` and `/32` networks have no usable host.

use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::AuditError;

/// An inclusive range of IPv4 addresses.
///
/// A range whose start is above its end is empty. Iterating never consumes the
/// range, so the same value can be walked as many times as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub const EMPTY: Ipv4Range = Ipv4Range {
        start_addr: Ipv4Addr::new(0, 0, 0, 1),
        end_addr: Ipv4Addr::UNSPECIFIED,
    };

    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> + Send + 'static {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> usize {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        match end.checked_sub(start) {
            Some(span) => span as usize + 1,
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses CIDR notation like "192.168.1.0/24".
///
/// The address does not need to be the network address: "10.0.0.7/24"
/// designates 10.0.0.0/24.
pub fn parse_cidr(cidr: &str) -> Result<Ipv4Network, AuditError> {
    let trimmed = cidr.trim();
    let Some((ip_str, prefix_str)) = trimmed.split_once('/') else {
        return Err(AuditError::invalid_cidr(cidr, "missing '/<prefix>'"));
    };

    let ipv4_addr = ip_str
        .parse::<Ipv4Addr>()
        .map_err(|e| AuditError::invalid_cidr(cidr, format!("bad address '{ip_str}': {e}")))?;

    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| AuditError::invalid_cidr(cidr, format!("bad prefix '{prefix_str}': {e}")))?;

    Ipv4Network::new(ipv4_addr, prefix).map_err(|e| AuditError::invalid_cidr(cidr, e))
}

/// Expands a CIDR block into its usable host addresses.
pub fn usable_hosts(cidr: &str) -> Result<Ipv4Range, AuditError> {
    let network = parse_cidr(cidr)?;
    if network.prefix() >= 31 {
        return Ok(Ipv4Range::EMPTY);
    }

    let start = u32::from(network.network()) + 1;
    let end = u32::from(network.broadcast()) - 1;

    Ok(Ipv4Range::new(Ipv4Addr::from(start), Ipv4Addr::from(end)))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

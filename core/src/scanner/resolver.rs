use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::debug;

use super::NameResolver;

/// Reverse DNS through the system resolver.
///
/// `getnameinfo` blocks, so every lookup runs on the blocking pool and is
/// abandoned once `lookup_timeout` elapses.
pub struct DnsResolver {
    lookup_timeout: Duration,
    lookup: fn(&IpAddr) -> io::Result<String>,
}

impl DnsResolver {
    pub fn new(lookup_timeout: Duration) -> Self {
        Self {
            lookup_timeout,
            lookup: dns_lookup::lookup_addr,
        }
    }

    /// Replaces the system lookup, e.g. with a canned one.
    pub fn with_lookup(mut self, lookup: fn(&IpAddr) -> io::Result<String>) -> Self {
        self.lookup = lookup;
        self
    }
}

#[async_trait]
impl NameResolver for DnsResolver {
    async fn reverse_lookup(&self, ip: Ipv4Addr) -> Option<String> {
        let addr = IpAddr::V4(ip);
        let resolve = self.lookup;
        let lookup = tokio::task::spawn_blocking(move || resolve(&addr));

        let hostname = match timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(Ok(name))) => name,
            Ok(Ok(Err(e))) => {
                debug!("Reverse lookup of {ip} failed: {e}");
                return None;
            }
            Ok(Err(e)) => {
                debug!("Reverse lookup task for {ip} failed: {e}");
                return None;
            }
            Err(_elapsed) => {
                debug!("Reverse lookup of {ip} timed out");
                return None;
            }
        };

        meaningful_name(ip, hostname)
    }
}

// getnameinfo falls back to the numeric form when no PTR record exists
fn meaningful_name(ip: Ipv4Addr, hostname: String) -> Option<String> {
    let hostname = hostname.trim_end_matches('.');
    if hostname.is_empty() || hostname == ip.to_string() {
        None
    } else {
        Some(hostname.to_string())
    }
}

/// Resolver used when DNS lookups are disabled.
pub struct NoLookup;

#[async_trait]
impl NameResolver for NoLookup {
    async fn reverse_lookup(&self, _ip: Ipv4Addr) -> Option<String> {
        None
    }
}

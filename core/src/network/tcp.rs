use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use async_trait::async_trait;
use eolaudit_common::audit::profile::PortSet;
use eolaudit_common::network::host::HostProbeResult;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use crate::scanner::Prober;

/// Liveness prober based on plain TCP connects.
///
/// No raw sockets and no ICMP, so it runs unprivileged. A host answering on
/// none of the probed ports is reported dead.
pub struct TcpProber {
    probe_timeout: Duration,
}

impl TcpProber {
    pub fn new(probe_timeout: Duration) -> Self {
        Self { probe_timeout }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, ip: Ipv4Addr, ports: &PortSet) -> HostProbeResult {
        let mut result = HostProbeResult::new(ip);
        for &port in ports.iter() {
            if handshake_probe(SocketAddrV4::new(ip, port), self.probe_timeout).await {
                result.open_ports.insert(port);
            }
        }
        result
    }
}

/// Returns true when the three-way handshake completes within `probe_timeout`.
///
/// Refusals, unreachable networks and timeouts all count as closed.
pub async fn handshake_probe(addr: SocketAddrV4, probe_timeout: Duration) -> bool {
    match timeout(probe_timeout, TcpStream::connect(SocketAddr::V4(addr))).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(e)) => {
            trace!("{addr} closed: {e}");
            false
        }
        Err(_elapsed) => false,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

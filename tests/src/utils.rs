use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use eolaudit_common::audit::inventory::{Inventory, LifecycleMapping};
use eolaudit_common::audit::profile::PortSet;
use eolaudit_common::network::host::HostProbeResult;
use eolaudit_core::classifier::HostClassifier;
use eolaudit_core::lifecycle::{Clock, EolField, LifecycleResolver, LookupError, Release, ReleaseSource};
use eolaudit_core::scanner::{AuditEngine, NameResolver, NoLookup, Prober};

/// Prober answering from a fixed table instead of the network.
#[derive(Default)]
pub struct FakeProber {
    listening: HashMap<Ipv4Addr, Vec<u16>>,
    latency: HashMap<Ipv4Addr, Duration>,
}

impl FakeProber {
    pub fn listening(mut self, ip: Ipv4Addr, ports: &[u16]) -> Self {
        self.listening.insert(ip, ports.to_vec());
        self
    }

    pub fn with_latency(mut self, ip: Ipv4Addr, latency: Duration) -> Self {
        self.latency.insert(ip, latency);
        self
    }
}

#[async_trait]
impl Prober for FakeProber {
    async fn probe(&self, ip: Ipv4Addr, ports: &PortSet) -> HostProbeResult {
        if let Some(latency) = self.latency.get(&ip) {
            tokio::time::sleep(*latency).await;
        }

        let mut result = HostProbeResult::new(ip);
        if let Some(listening) = self.listening.get(&ip) {
            for port in ports.iter().filter(|p| listening.contains(*p)) {
                result.open_ports.insert(*port);
            }
        }
        result
    }
}

/// Lifecycle service serving canned release lists; unknown products fail.
#[derive(Default)]
pub struct FakeReleases {
    products: HashMap<String, Vec<Release>>,
    calls: AtomicUsize,
}

impl FakeReleases {
    pub fn product(mut self, product: &str, releases: &[(&str, &str)]) -> Self {
        let releases = releases
            .iter()
            .map(|(cycle, eol)| Release::new(*cycle, Some(EolField::Date(eol.to_string()))))
            .collect();
        self.products.insert(product.to_string(), releases);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReleaseSource for FakeReleases {
    async fn releases(&self, product: &str) -> Result<Vec<Release>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.products
            .get(product)
            .cloned()
            .ok_or(LookupError::Status(503))
    }
}

/// PTR records of a fake zone; any other address has none.
#[derive(Default)]
pub struct FakeZone {
    names: HashMap<Ipv4Addr, String>,
}

impl FakeZone {
    pub fn name(mut self, ip: Ipv4Addr, hostname: &str) -> Self {
        self.names.insert(ip, hostname.to_string());
        self
    }
}

#[async_trait]
impl NameResolver for FakeZone {
    async fn reverse_lookup(&self, ip: Ipv4Addr) -> Option<String> {
        self.names.get(&ip).cloned()
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn lan(last_octet: u8) -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 10, last_octet)
}

/// Engine wired with fakes, DNS disabled.
pub fn engine(
    prober: FakeProber,
    releases: Arc<FakeReleases>,
    inventory: Inventory,
    today: NaiveDate,
) -> AuditEngine {
    engine_with_names(prober, Arc::new(NoLookup), releases, inventory, today)
}

pub fn engine_with_names(
    prober: FakeProber,
    names: Arc<dyn NameResolver>,
    releases: Arc<FakeReleases>,
    inventory: Inventory,
    today: NaiveDate,
) -> AuditEngine {
    let lifecycle = LifecycleResolver::new(LifecycleMapping::builtin(), releases)
        .with_clock(Arc::new(FixedClock(today)));
    AuditEngine::new(
        Arc::new(prober),
        names,
        HostClassifier::new(inventory),
        lifecycle,
    )
}

#![cfg(test)]
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use eolaudit_common::audit::inventory::Inventory;
use eolaudit_common::audit::profile::{PortSet, ScanProfile};
use eolaudit_common::audit::record::AuditRecord;
use eolaudit_core::scanner::Silent;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::utils::{FakeProber, FakeReleases, day, engine, lan};

const PROFILE_CIDR: &str = "192.168.10.0/24";

/// Every third host is alive; each host gets a random probe latency.
fn shuffled_prober() -> FakeProber {
    let mut rng = rand::rng();
    let mut latencies: Vec<u64> = (0..254).map(|_| rng.random_range(0..15)).collect();
    latencies.shuffle(&mut rng);

    let mut prober = FakeProber::default();
    for (idx, latency) in latencies.into_iter().enumerate() {
        let ip = lan(idx as u8 + 1);
        prober = prober.with_latency(ip, Duration::from_millis(latency));
        if (idx + 1) % 3 == 0 {
            prober = prober.listening(ip, &[22]);
        }
    }
    prober
}

async fn run_once() -> anyhow::Result<Vec<AuditRecord>> {
    let releases = Arc::new(
        FakeReleases::default()
            .product("centos", &[("7", "2024-06-30")])
            .product("ubuntu", &[("20.04", "2030-04-02")])
            .product("windows-server", &[("2016", "2027-01-12"), ("2019", "2029-01-09")]),
    );
    let engine = engine(shuffled_prober(), releases, Inventory::builtin(), day(2025, 3, 1))
        .with_workers(16);

    let report = engine
        .audit(&ScanProfile::new("lan", PROFILE_CIDR), &PortSet::new([22])?, &Silent)
        .await?;
    assert_eq!(report.hosts_scanned(), 254);
    Ok(report.records().to_vec())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn report_is_independent_of_completion_order() -> anyhow::Result<()> {
    let first = run_once().await?;
    let second = run_once().await?;

    assert_eq!(first.len(), 84);
    assert_eq!(first, second);

    let ips: Vec<u32> = first.iter().map(|r| u32::from(r.ip)).collect();
    assert!(ips.windows(2).all(|w| w[0] < w[1]), "records are not strictly ascending");

    let unique: HashSet<Ipv4Addr> = first.iter().map(|r| r.ip).collect();
    assert_eq!(unique.len(), first.len());
    Ok(())
}

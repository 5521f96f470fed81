#![cfg(test)]
use std::sync::Arc;

use eolaudit_common::audit::NOT_APPLICABLE;
use eolaudit_common::audit::inventory::{Inventory, UNKNOWN_OS};
use eolaudit_common::audit::lifecycle::EolStatus;
use eolaudit_common::audit::profile::{PortSet, ScanProfile};
use eolaudit_common::error::AuditError;
use eolaudit_core::report::AuditReport;
use eolaudit_core::scanner::Silent;

use crate::utils::{FakeProber, FakeReleases, FakeZone, day, engine, engine_with_names, lan};

fn centos() -> FakeReleases {
    FakeReleases::default().product("centos", &[("8", "2021-12-31"), ("7", "2024-06-30")])
}

/// A /29 with a single host answering on SSH, running an obsolete CentOS.
#[tokio::test]
async fn single_obsolete_host_in_small_subnet() -> anyhow::Result<()> {
    let prober = FakeProber::default().listening(lan(2), &[22, 80]);
    let inventory = Inventory::new([(lan(2), "CentOS 7".to_string())]);
    let releases = Arc::new(centos());
    let engine = engine(prober, releases.clone(), inventory, day(2025, 3, 1));

    let profile = ScanProfile::new("Siège", "192.168.10.0/29");
    let ports = PortSet::new([22])?;
    let report: AuditReport = engine.audit(&profile, &ports, &Silent).await?;

    assert_eq!(report.hosts_scanned(), 6);
    assert_eq!(report.records().len(), 1);

    let record = &report.records()[0];
    assert_eq!(record.ip, lan(2));
    assert_eq!(record.hostname, NOT_APPLICABLE);
    assert_eq!(record.os_label, "CentOS 7");
    assert_eq!(record.eol_status, EolStatus::Obsolete);
    assert_eq!(record.eol_date, "2024-06-30");
    assert_eq!(record.ports_field(), "[22]");
    assert_eq!(releases.calls(), 1);

    let mut csv: Vec<u8> = Vec::new();
    report.write_csv(&mut csv)?;
    let csv = String::from_utf8(csv)?;
    assert_eq!(
        csv.lines().last(),
        Some("192.168.10.2;N/A;CentOS 7;OBSOLÈTE (DANGER);2024-06-30;[22]")
    );
    Ok(())
}

#[tokio::test]
async fn resolved_names_reach_the_report() -> anyhow::Result<()> {
    let prober = FakeProber::default()
        .listening(lan(21), &[22])
        .listening(lan(40), &[22]);
    // .40 has no PTR record
    let zone = Arc::new(FakeZone::default().name(lan(21), "web-01.siege.lan"));
    let releases = Arc::new(centos().product("ubuntu", &[("20.04", "2030-04-02")]));
    let engine = engine_with_names(prober, zone, releases, Inventory::builtin(), day(2025, 3, 1));

    let report = engine
        .audit(&ScanProfile::new("lan", "192.168.10.0/26"), &PortSet::new([22])?, &Silent)
        .await?;

    let names: Vec<(u8, &str)> = report
        .records()
        .iter()
        .map(|r| (r.ip.octets()[3], r.hostname.as_str()))
        .collect();
    assert_eq!(names, vec![(21, "web-01.siege.lan"), (40, NOT_APPLICABLE)]);

    let mut csv: Vec<u8> = Vec::new();
    report.write_csv(&mut csv)?;
    let csv = String::from_utf8(csv)?;
    let rows: Vec<&str> = csv.lines().skip(1).collect();
    assert_eq!(
        rows,
        vec![
            "192.168.10.21;web-01.siege.lan;Ubuntu 20.04 LTS;SUPPORTÉ;2030-04-02;[22]",
            "192.168.10.40;N/A;CentOS 7;OBSOLÈTE (DANGER);2024-06-30;[22]",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn one_failing_lookup_leaves_other_hosts_intact() -> anyhow::Result<()> {
    let prober = FakeProber::default()
        .listening(lan(10), &[3389])
        .listening(lan(21), &[22])
        .listening(lan(40), &[22])
        .listening(lan(99), &[80]);
    // windows-server is missing from the fake service: its lookup fails
    let releases = Arc::new(centos().product("ubuntu", &[("20.04", "2030-04-02")]));
    let engine = engine(prober, releases, Inventory::builtin(), day(2025, 3, 1));

    let report = engine
        .audit(&ScanProfile::new("lan", "192.168.10.0/24"), &PortSet::default(), &Silent)
        .await?;

    let summary: Vec<(u8, &str, EolStatus, &str)> = report
        .records()
        .iter()
        .map(|r| (r.ip.octets()[3], r.os_label.as_str(), r.eol_status, r.eol_date.as_str()))
        .collect();

    assert_eq!(
        summary,
        vec![
            (10, "Windows Server 2016", EolStatus::ApiError, NOT_APPLICABLE),
            (21, "Ubuntu 20.04 LTS", EolStatus::Supported, "2030-04-02"),
            (40, "CentOS 7", EolStatus::Obsolete, "2024-06-30"),
            (99, UNKNOWN_OS, EolStatus::Unknown, NOT_APPLICABLE),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn hosts_sharing_a_label_trigger_one_lookup() -> anyhow::Result<()> {
    let prober = FakeProber::default()
        .listening(lan(21), &[22])
        .listening(lan(22), &[22])
        .listening(lan(40), &[22]);
    let releases = Arc::new(centos().product("ubuntu", &[("20.04", "2030-04-02")]));
    let engine = engine(prober, releases.clone(), Inventory::builtin(), day(2025, 3, 1));

    let report = engine
        .audit(&ScanProfile::new("lan", "192.168.10.0/24"), &PortSet::default(), &Silent)
        .await?;

    assert_eq!(report.records().len(), 3);
    assert_eq!(releases.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn hosts_without_open_probed_port_are_not_reported() -> anyhow::Result<()> {
    // the host listens, but only on a port outside the probed set
    let prober = FakeProber::default().listening(lan(40), &[8080]);
    let releases = Arc::new(centos());
    let engine = engine(prober, releases.clone(), Inventory::builtin(), day(2025, 3, 1));

    let report = engine
        .audit(&ScanProfile::new("lan", "192.168.10.32/28"), &PortSet::new([22, 443])?, &Silent)
        .await?;

    assert!(report.is_empty());
    assert_eq!(report.hosts_scanned(), 14);
    assert_eq!(releases.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn bad_profile_does_not_poison_the_next_one() -> anyhow::Result<()> {
    let prober = FakeProber::default().listening(lan(40), &[22]);
    let engine = engine(prober, Arc::new(centos()), Inventory::builtin(), day(2025, 3, 1));
    let ports = PortSet::default();

    let broken = engine
        .audit(&ScanProfile::new("broken", "192.168.10.0/40"), &ports, &Silent)
        .await;
    assert!(matches!(broken, Err(AuditError::InvalidCidr { .. })));

    let report = engine
        .audit(&ScanProfile::new("lan", "192.168.10.0/24"), &ports, &Silent)
        .await?;
    assert_eq!(report.records().len(), 1);
    Ok(())
}

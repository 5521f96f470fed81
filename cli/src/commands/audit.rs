use std::time::{Duration, Instant};

use anyhow::{self, Context};
use chrono::Local;
use colored::*;
use tracing::{Instrument, info_span};

use crate::terminal::{colors, format, print, spinner::AuditProgress};
use eolaudit_common::audit::lifecycle::EolStatus;
use eolaudit_common::audit::profile::ScanProfile;
use eolaudit_common::config::{Config, Settings};
use eolaudit_common::{error, info, success, warn};
use eolaudit_core::report::AuditReport;
use eolaudit_core::scanner::AuditEngine;

/// Which networks an `audit` invocation covers.
pub enum Selection {
    All,
    Named(String),
    AdHoc { name: String, cidr: String },
}

impl Selection {
    pub fn new(profile: Option<String>, cidr: Option<String>, name: Option<String>) -> Self {
        match (profile, cidr) {
            (_, Some(cidr)) => Selection::AdHoc {
                name: name.unwrap_or_else(|| cidr.clone()),
                cidr,
            },
            (Some(profile), None) => Selection::Named(profile),
            (None, None) => Selection::All,
        }
    }

    fn resolve(self, settings: &Settings) -> anyhow::Result<Vec<ScanProfile>> {
        let profiles = match self {
            Selection::All => settings.profiles.clone(),
            Selection::Named(name) => vec![settings.profile(&name)?.clone()],
            Selection::AdHoc { name, cidr } => vec![ScanProfile::new(name, cidr)],
        };
        anyhow::ensure!(
            !profiles.is_empty(),
            "no scan profile configured, add one to the configuration file or pass --cidr"
        );
        Ok(profiles)
    }
}

pub async fn audit(selection: Selection, settings: &Settings, cfg: &Config) -> anyhow::Result<()> {
    let profiles: Vec<ScanProfile> = selection.resolve(settings)?;
    let engine = AuditEngine::from_config(cfg, settings)
        .context("failed to set up the lifecycle service client")?;

    info!(
        "{} profile(s), {} workers, ports {:?}",
        profiles.len(),
        engine.workers(),
        &*settings.ports
    );

    let mut failures: usize = 0;
    for profile in &profiles {
        print::header(&format!("audit of {}", profile.network_name));

        let outcome = tokio::select! {
            outcome = audit_profile(&engine, profile, settings, cfg) => outcome,
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, no report written for {}", profile.network_name);
                anyhow::bail!("audit interrupted");
            }
        };

        if let Err(e) = outcome {
            error!("{}: {e:#}", profile.network_name);
            failures += 1;
        }
    }

    print::end_of_program();
    anyhow::ensure!(failures < profiles.len(), "every selected profile failed");
    Ok(())
}

async fn audit_profile(
    engine: &AuditEngine,
    profile: &ScanProfile,
    settings: &Settings,
    cfg: &Config,
) -> anyhow::Result<()> {
    let span = info_span!("audit", indicatif.pb_show = true);
    let progress = AuditProgress::new(span.clone());

    let start_time: Instant = Instant::now();
    let report: AuditReport = engine
        .audit(profile, &settings.ports, &progress)
        .instrument(span)
        .await?;

    audit_ends(&report, start_time.elapsed(), cfg)
}

fn audit_ends(report: &AuditReport, total_time: Duration, cfg: &Config) -> anyhow::Result<()> {
    if report.is_empty() {
        no_hosts_found(report, total_time);
        return Ok(());
    }

    print::header("lifecycle report");
    for (idx, record) in report.records().iter().enumerate() {
        print::tree_head(idx, &record.ip.to_string());
        print::as_tree_one_level(format::record_to_details(record));
        if idx + 1 != report.records().len() {
            print::print("");
        }
    }

    let generated_at = Local::now();
    let mut exports = vec![report.export_csv(&cfg.output_dir, generated_at)?];
    if cfg.json {
        exports.push(report.export_json(&cfg.output_dir, generated_at)?);
    }

    print::fat_separator();
    print_summary(report, total_time);
    for path in exports {
        success!("Report written to {}", path.display());
    }
    Ok(())
}

fn no_hosts_found(report: &AuditReport, total_time: Duration) {
    print::header("zero hosts detected");
    print::no_results();
    print_summary(report, total_time);
    info!("No live host, no report written");
}

fn print_summary(report: &AuditReport, total_time: Duration) {
    let obsolete: usize = report
        .records()
        .iter()
        .filter(|r| r.eol_status == EolStatus::Obsolete)
        .count();

    let live_hosts: ColoredString = format!("{} live hosts", report.records().len()).bold().green();
    let scanned: ColoredString = format!("{} scanned", report.hosts_scanned()).bold();
    let obsolete: ColoredString = format!("{obsolete} obsolete").bold().red();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    let output: ColoredString =
        format!("{live_hosts} / {scanned}, {obsolete}, in {total_time}").color(colors::TEXT_DEFAULT);
    print::centerln(&output.to_string());
}

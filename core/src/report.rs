//! # Audit report
//!
//! Aggregates the records of one profile and exports them.
//!
//! Records arrive in completion order, which depends on network timing; the
//! report sorts them by the numeric value of their address so that the same
//! set of live hosts always produces the same file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use eolaudit_common::audit::profile::ScanProfile;
use eolaudit_common::audit::record::AuditRecord;
use eolaudit_common::error::AuditError;
use serde::Serialize;

pub const CSV_HEADER: [&str; 6] = [
    "IP",
    "Nom (DNS)",
    "OS Détecté",
    "Statut Support (EOL)",
    "Date Fin Support",
    "Ports Ouverts",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone)]
pub struct AuditReport {
    profile: ScanProfile,
    hosts_scanned: usize,
    records: Vec<AuditRecord>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    network_name: &'a str,
    cidr: &'a str,
    generated_at: String,
    hosts_scanned: usize,
    records: &'a [AuditRecord],
}

impl AuditReport {
    /// Sorts `records` by address; a duplicated address keeps its first record.
    pub fn new(profile: ScanProfile, hosts_scanned: usize, mut records: Vec<AuditRecord>) -> Self {
        records.sort_by_key(|record| u32::from(record.ip));
        records.dedup_by_key(|record| record.ip);
        Self {
            profile,
            hosts_scanned,
            records,
        }
    }

    pub fn profile(&self) -> &ScanProfile {
        &self.profile
    }

    pub fn hosts_scanned(&self) -> usize {
        self.hosts_scanned
    }

    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the semicolon separated report, BOM included.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(UTF8_BOM)?;

        let mut csv = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(writer);
        csv.write_record(CSV_HEADER)?;

        for record in &self.records {
            csv.write_record([
                record.ip.to_string().as_str(),
                record.hostname.as_str(),
                record.os_label.as_str(),
                record.eol_status.label(),
                record.eol_date.as_str(),
                record.ports_field().as_str(),
            ])?;
        }

        csv.flush()
    }

    pub fn write_json<W: Write>(&self, writer: W, generated_at: DateTime<Local>) -> io::Result<()> {
        let report = JsonReport {
            network_name: &self.profile.network_name,
            cidr: &self.profile.cidr,
            generated_at: generated_at.to_rfc3339(),
            hosts_scanned: self.hosts_scanned,
            records: &self.records,
        };
        serde_json::to_writer_pretty(writer, &report)?;
        Ok(())
    }

    /// Exports the CSV report into `dir`, returning the written path.
    pub fn export_csv(&self, dir: &Path, generated_at: DateTime<Local>) -> Result<PathBuf, AuditError> {
        let path = dir.join(self.file_name(generated_at, "csv"));
        write_file(&path, |writer| self.write_csv(writer))?;
        Ok(path)
    }

    /// Exports the JSON report into `dir`, returning the written path.
    pub fn export_json(&self, dir: &Path, generated_at: DateTime<Local>) -> Result<PathBuf, AuditError> {
        let path = dir.join(self.file_name(generated_at, "json"));
        write_file(&path, |writer| self.write_json(writer, generated_at))?;
        Ok(path)
    }

    /// `AUDIT_<sanitized network name>_<timestamp>.<extension>`
    pub fn file_name(&self, generated_at: DateTime<Local>, extension: &str) -> String {
        format!(
            "AUDIT_{}_{}.{extension}",
            sanitize(&self.profile.network_name),
            generated_at.format(FILE_TIMESTAMP_FORMAT)
        )
    }
}

fn write_file<F>(path: &Path, write: F) -> Result<(), AuditError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let export = || -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        write(&mut writer)?;
        writer.flush()
    };
    export().map_err(|source| AuditError::Export {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces every character that is not an ASCII letter or digit with `_`.
pub fn sanitize(network_name: &str) -> String {
    network_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

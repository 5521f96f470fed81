use std::net::Ipv4Addr;

use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use eolaudit_common::audit::profile::ScanProfile;
use eolaudit_common::audit::record::AuditRecord;
use eolaudit_common::success;
use eolaudit_core::scanner::AuditObserver;

use crate::terminal::format;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn audit_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.blue} {msg} [{bar:32.green/bright_black}] {pos}/{len} hosts ({elapsed})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .tick_strings(TICK_STRINGS)
    .progress_chars("━╸ ")
}

/// Drives the progress bar attached to the audit span and prints live hosts
/// as they come in.
pub struct AuditProgress {
    span: Span,
}

impl AuditProgress {
    pub fn new(span: Span) -> Self {
        Self { span }
    }
}

impl AuditObserver for AuditProgress {
    fn audit_started(&self, profile: &ScanProfile, hosts: usize) {
        self.span.pb_set_style(&audit_style());
        self.span.pb_set_length(hosts as u64);
        self.span.pb_set_message(&format!("Auditing {}", profile.network_name));
    }

    fn host_scanned(&self, _ip: Ipv4Addr) {
        self.span.pb_inc(1);
    }

    fn host_found(&self, record: &AuditRecord) {
        success!("{}", format::record_line(record));
    }
}

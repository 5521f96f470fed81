use colored::*;
use eolaudit_common::audit::lifecycle::EolStatus;
use eolaudit_common::audit::record::AuditRecord;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn status_color(status: EolStatus) -> Color {
    match status {
        EolStatus::Supported => colors::STATUS_SUPPORTED,
        EolStatus::Obsolete => colors::STATUS_OBSOLETE,
        EolStatus::Unknown => colors::STATUS_UNKNOWN,
        EolStatus::ApiError | EolStatus::InvalidDate => colors::STATUS_ERROR,
    }
}

pub fn status(status: EolStatus) -> ColoredString {
    let label = status.label().color(status_color(status));
    match status {
        EolStatus::Obsolete => label.bold(),
        _ => label,
    }
}

pub fn record_to_details(record: &AuditRecord) -> Vec<Detail> {
    vec![
        ("DNS".to_string(), record.hostname.color(colors::HOSTNAME)),
        ("OS".to_string(), record.os_label.normal()),
        ("Status".to_string(), status(record.eol_status)),
        ("EOL".to_string(), record.eol_date.color(colors::TEXT_DEFAULT)),
        ("Ports".to_string(), record.ports_field().color(colors::PORTS)),
    ]
}

/// One-line summary printed when a live host completes.
pub fn record_line(record: &AuditRecord) -> String {
    format!(
        "{} ({}) {} {} : {}",
        record.ip.to_string().color(colors::IPV4_ADDR),
        record.hostname.color(colors::HOSTNAME),
        "→".color(colors::SEPARATOR),
        record.os_label,
        status(record.eol_status)
    )
}

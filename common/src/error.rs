use std::path::PathBuf;

use thiserror::Error;

/// Run-level failures.
///
/// Everything that can go wrong for a single host is recorded in the report
/// instead; only problems affecting a whole profile or the export end up here.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("invalid CIDR '{cidr}': {reason}")]
    InvalidCidr { cidr: String, reason: String },

    #[error("unknown scan profile '{0}'")]
    UnknownProfile(String),

    #[error("invalid port {0}: ports must be in 1..=65535")]
    InvalidPort(u16),

    #[error("failed to load configuration from {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("failed to export report to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AuditError {
    pub fn invalid_cidr(cidr: &str, reason: impl ToString) -> Self {
        Self::InvalidCidr {
            cidr: cidr.to_string(),
            reason: reason.to_string(),
        }
    }
}

use std::fmt;

use serde::Serialize;

use super::NOT_APPLICABLE;

/// Support status of an operating system version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EolStatus {
    /// Still within the vendor support window.
    Supported,
    /// End of support is in the past.
    Obsolete,
    /// No lifecycle mapping for the label, or no matching release.
    Unknown,
    /// The lifecycle service could not be reached or answered garbage.
    ApiError,
    /// The lifecycle service returned an unparseable end-of-support date.
    InvalidDate,
}

impl EolStatus {
    /// Label written to reports.
    pub fn label(&self) -> &'static str {
        match self {
            EolStatus::Supported => "SUPPORTÉ",
            EolStatus::Obsolete => "OBSOLÈTE (DANGER)",
            EolStatus::Unknown => "INCONNU (Pas de mapping API)",
            EolStatus::ApiError => "ERREUR API (Vérifier Internet)",
            EolStatus::InvalidDate => "ERREUR FORMAT DATE",
        }
    }
}

impl fmt::Display for EolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved status together with the end-of-support date it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EolVerdict {
    pub status: EolStatus,
    pub date: String,
}

impl EolVerdict {
    pub fn new(status: EolStatus, date: impl Into<String>) -> Self {
        Self {
            status,
            date: date.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(EolStatus::Unknown, NOT_APPLICABLE)
    }

    pub fn api_error() -> Self {
        Self::new(EolStatus::ApiError, NOT_APPLICABLE)
    }
}

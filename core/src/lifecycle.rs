//! # Lifecycle resolution
//!
//! Turns an OS label into a support status by asking a product-lifecycle
//! service (endoflife.date by default) for the release list of the mapped
//! product and comparing the end-of-support date of the mapped cycle with
//! today's date.
//!
//! Every failure mode degrades into an [`EolStatus`] value: one unreachable
//! lookup must never block the rest of the audit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use eolaudit_common::audit::NOT_APPLICABLE;
use eolaudit_common::audit::inventory::{LifecycleMapping, ProductRef};
use eolaudit_common::audit::lifecycle::{EolStatus, EolVerdict};
use eolaudit_common::warn;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::debug;

mod endoflife;

pub use endoflife::EndOfLifeApi;

const EOL_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lifecycle request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("lifecycle service answered with status {0}")]
    Status(u16),

    #[error("malformed lifecycle payload: {0}")]
    Malformed(String),
}

/// One release cycle of a product, as listed by the lifecycle service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    #[serde(deserialize_with = "cycle_as_string")]
    pub cycle: String,
    #[serde(default)]
    pub eol: Option<EolField>,
}

impl Release {
    pub fn new(cycle: impl Into<String>, eol: Option<EolField>) -> Self {
        Self {
            cycle: cycle.into(),
            eol,
        }
    }
}

/// The `eol` field of a release: a date, or a boolean when no date is published.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EolField {
    Flag(bool),
    Date(String),
}

fn cycle_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(cycle) => Ok(cycle),
        serde_json::Value::Number(cycle) => Ok(cycle.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "unexpected cycle identifier: {other}"
        ))),
    }
}

/// Decodes a release list, skipping entries that do not describe a release.
///
/// Only a body that is not a JSON array is malformed: one odd entry must not
/// hide the cycle being looked up.
pub fn parse_releases(body: &[u8]) -> Result<Vec<Release>, LookupError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_slice(body).map_err(|e| LookupError::Malformed(e.to_string()))?;

    let releases = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Release>(entry) {
            Ok(release) => Some(release),
            Err(e) => {
                debug!("Skipping release entry: {e}");
                None
            }
        })
        .collect();
    Ok(releases)
}

/// Where release lists come from.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn releases(&self, product: &str) -> Result<Vec<Release>, LookupError>;
}

/// Source of "today", frozen in tests.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Resolves OS labels to support statuses.
///
/// Results are memoized per label for the lifetime of the resolver, and
/// concurrent callers asking for the same label share one lookup.
pub struct LifecycleResolver {
    mapping: LifecycleMapping,
    source: Arc<dyn ReleaseSource>,
    clock: Arc<dyn Clock>,
    memo: Mutex<HashMap<String, Arc<OnceCell<EolVerdict>>>>,
}

impl LifecycleResolver {
    pub fn new(mapping: LifecycleMapping, source: Arc<dyn ReleaseSource>) -> Self {
        Self {
            mapping,
            source,
            clock: Arc::new(SystemClock),
            memo: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn resolve(&self, os_label: &str) -> EolVerdict {
        let Some(product) = self.mapping.get(os_label) else {
            return EolVerdict::unknown();
        };

        let cell = self.memo_cell(os_label);
        cell.get_or_init(|| self.lookup(product)).await.clone()
    }

    fn memo_cell(&self, os_label: &str) -> Arc<OnceCell<EolVerdict>> {
        let mut memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);
        memo.entry(os_label.to_string()).or_default().clone()
    }

    async fn lookup(&self, product: &ProductRef) -> EolVerdict {
        match self.source.releases(&product.product).await {
            Ok(releases) => {
                debug!("{} releases listed for {}", releases.len(), product.product);
                evaluate(&releases, &product.cycle, self.clock.today())
            }
            Err(e) => {
                warn!("Lifecycle lookup for '{}' failed: {e}", product.product);
                EolVerdict::api_error()
            }
        }
    }
}

/// Derives the verdict of `cycle` from a release list.
pub fn evaluate(releases: &[Release], cycle: &str, today: NaiveDate) -> EolVerdict {
    let Some(release) = releases.iter().find(|r| r.cycle == cycle) else {
        return EolVerdict::unknown();
    };

    match &release.eol {
        None => EolVerdict::new(EolStatus::Supported, NOT_APPLICABLE),
        // a boolean sentinel means no fixed end date
        Some(EolField::Flag(flag)) => EolVerdict::new(EolStatus::Supported, flag.to_string()),
        Some(EolField::Date(raw)) => match parse_eol_date(raw) {
            Some(date) if date < today => EolVerdict::new(EolStatus::Obsolete, raw.as_str()),
            Some(_) => EolVerdict::new(EolStatus::Supported, raw.as_str()),
            None => EolVerdict::new(EolStatus::InvalidDate, raw.as_str()),
        },
    }
}

fn parse_eol_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, EOL_DATE_FORMAT).ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

//! Runtime configuration.
//!
//! [`Config`] holds the knobs of a run, [`Settings`] is what the configuration
//! file provides (profiles, ports and the audit tables). The file is the JSON
//! document shared with the other tools of the toolbox: only its `audit`
//! section (and the legacy `network.target_subnet` key) is read here.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::audit::inventory::{Inventory, LifecycleMapping, ProductRef};
use crate::audit::profile::{DEFAULT_PORTS, PortSet, ScanProfile};
use crate::error::AuditError;
use crate::warn;

pub const DEFAULT_WORKERS: usize = 100;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(100);
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_LIFECYCLE_API: &str = "https://endoflife.date/api";

/// Name given to the profile built from the legacy `network.target_subnet` key.
pub const LEGACY_PROFILE_NAME: &str = "default";

#[derive(Debug, Clone)]
pub struct Config {
    /// Skips reverse DNS lookups, hostnames are reported as "N/A".
    pub no_dns: bool,
    /// Maximum number of host tasks running at the same time.
    pub workers: usize,
    /// Timeout of a single TCP connect attempt.
    pub probe_timeout: Duration,
    /// Timeout of a reverse DNS lookup.
    pub dns_timeout: Duration,
    /// Timeout of a lifecycle service request.
    pub lookup_timeout: Duration,
    /// Base URL of the lifecycle service.
    pub lifecycle_api: String,
    /// Directory receiving the exported reports.
    pub output_dir: PathBuf,
    /// Also writes a JSON copy of every report.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_dns: false,
            workers: DEFAULT_WORKERS,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            dns_timeout: DEFAULT_DNS_TIMEOUT,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            lifecycle_api: DEFAULT_LIFECYCLE_API.to_string(),
            output_dir: PathBuf::from("."),
            json: false,
        }
    }
}

/// Audit settings read from the configuration file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub profiles: Vec<ScanProfile>,
    pub ports: PortSet,
    pub inventory: Inventory,
    pub lifecycle_mapping: LifecycleMapping,
    pub lifecycle_api: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profiles: Vec::new(),
            ports: PortSet::default(),
            inventory: Inventory::builtin(),
            lifecycle_mapping: LifecycleMapping::builtin(),
            lifecycle_api: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    audit: AuditSection,
    #[serde(default)]
    network: Option<LegacyNetwork>,
}

#[derive(Debug, Default, Deserialize)]
struct AuditSection {
    #[serde(default)]
    profiles: Vec<ScanProfile>,
    #[serde(default)]
    ports: Option<Vec<u16>>,
    #[serde(default)]
    inventory: Option<BTreeMap<String, String>>,
    #[serde(default)]
    lifecycle_mapping: Option<BTreeMap<String, ProductRef>>,
    #[serde(default)]
    lifecycle_api: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LegacyNetwork {
    target_subnet: Option<String>,
}

impl Settings {
    /// Reads the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let raw = std::fs::read_to_string(path).map_err(|e| AuditError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&raw).map_err(|e| match e {
            AuditError::Config { reason, .. } => AuditError::Config {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Parses the content of a configuration file.
    pub fn from_json(raw: &str) -> Result<Self, AuditError> {
        let file: ConfigFile = serde_json::from_str(raw).map_err(|e| AuditError::Config {
            path: PathBuf::new(),
            reason: e.to_string(),
        })?;
        let section = file.audit;

        let mut profiles = section.profiles;
        if profiles.is_empty()
            && let Some(subnet) = file.network.and_then(|n| n.target_subnet)
        {
            profiles.push(ScanProfile::new(LEGACY_PROFILE_NAME, subnet));
        }

        let ports = match section.ports {
            Some(ports) if !ports.is_empty() => PortSet::new(ports)?,
            _ => PortSet::new(DEFAULT_PORTS.iter().copied())?,
        };

        let inventory = match section.inventory {
            Some(entries) => Inventory::new(entries.into_iter().filter_map(|(ip, label)| {
                match ip.parse::<Ipv4Addr>() {
                    Ok(addr) => Some((addr, label)),
                    Err(e) => {
                        warn!("Ignoring inventory entry '{ip}': {e}");
                        None
                    }
                }
            })),
            None => Inventory::builtin(),
        };

        let lifecycle_mapping = match section.lifecycle_mapping {
            Some(entries) => LifecycleMapping::new(entries),
            None => LifecycleMapping::builtin(),
        };

        Ok(Self {
            profiles,
            ports,
            inventory,
            lifecycle_mapping,
            lifecycle_api: section.lifecycle_api,
        })
    }

    /// Finds a profile by name (case-insensitive).
    pub fn profile(&self, name: &str) -> Result<&ScanProfile, AuditError> {
        self.profiles
            .iter()
            .find(|p| p.network_name.eq_ignore_ascii_case(name))
            .ok_or_else(|| AuditError::UnknownProfile(name.to_string()))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

pub mod audit;
pub mod profiles;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use eolaudit_common::audit::profile::PortSet;
use eolaudit_common::config::{Config, DEFAULT_LIFECYCLE_API, Settings};
use eolaudit_common::error::AuditError;
use eolaudit_common::warn;

#[derive(Parser)]
#[command(name = "eolaudit")]
#[command(about = "Audits subnets for hosts running end-of-life operating systems.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file holding the scan profiles
    #[arg(short, long, global = true, env = "EOLAUDIT_CONFIG", default_value = "config.json")]
    pub config: PathBuf,

    /// Ports probed to decide whether a host is alive, comma separated
    #[arg(short, long, global = true, value_delimiter = ',')]
    pub ports: Option<Vec<u16>>,

    /// Maximum number of hosts audited at the same time
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// TCP connect timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Skip reverse DNS lookups
    #[arg(long, global = true)]
    pub no_dns: bool,

    /// Directory receiving the reports
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Also export every report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the endoflife.date compatible lifecycle API
    #[arg(long, global = true)]
    pub api: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a configured profile, every profile, or an ad-hoc network
    #[command(alias = "a")]
    Audit {
        /// Profile to audit; every configured profile when omitted
        profile: Option<String>,
        /// Audit this CIDR instead of the configured profiles
        #[arg(long, conflicts_with = "profile")]
        cidr: Option<String>,
        /// Network name used for an ad-hoc CIDR
        #[arg(long)]
        name: Option<String>,
    },
    /// List the configured scan profiles
    #[command(alias = "p")]
    Profiles,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Loads the configuration file and applies the command line overrides.
    pub fn load_settings(&self) -> Result<Settings, AuditError> {
        let mut settings = read_settings(&self.config)?;
        if let Some(ports) = &self.ports {
            settings.ports = PortSet::new(ports.iter().copied())?;
        }
        Ok(settings)
    }

    pub fn to_config(&self, settings: &Settings) -> Config {
        let defaults = Config::default();
        let lifecycle_api = self
            .api
            .clone()
            .or_else(|| settings.lifecycle_api.clone())
            .unwrap_or_else(|| DEFAULT_LIFECYCLE_API.to_string());

        Config {
            no_dns: self.no_dns,
            workers: self.workers.unwrap_or(defaults.workers),
            probe_timeout: self
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.probe_timeout),
            lifecycle_api,
            output_dir: self.output_dir.clone().unwrap_or(defaults.output_dir),
            json: self.json,
            ..defaults
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings, AuditError> {
    if !path.exists() {
        warn!("No configuration found at {}, using built-in defaults", path.display());
        return Ok(Settings::default());
    }
    Settings::load(path)
}

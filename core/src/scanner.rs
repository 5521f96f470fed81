//! # Audit coordinator
//!
//! Drives one profile through the whole audit:
//!
//! 1. the CIDR is expanded into its usable hosts,
//! 2. each host becomes a task running the [`Prober`], then, for live hosts,
//!    the [`NameResolver`], the [`HostClassifier`] and the [`LifecycleResolver`],
//! 3. finished tasks are drained by this module alone and handed to the
//!    [`AuditReport`].
//!
//! At most `workers` host tasks are in flight; the remaining hosts wait in the
//! (lazy) host iterator until a slot frees. Tasks share no mutable state, and
//! a failing task only loses its own host.
//!
//! Dropping the future returned by [`AuditEngine::audit`] aborts every
//! in-flight task.

use std::net::Ipv4Addr;
use std::sync::Arc;

use async_trait::async_trait;
use eolaudit_common::audit::NOT_APPLICABLE;
use eolaudit_common::audit::profile::{PortSet, ScanProfile};
use eolaudit_common::audit::record::AuditRecord;
use eolaudit_common::config::{Config, DEFAULT_WORKERS, Settings};
use eolaudit_common::error::AuditError;
use eolaudit_common::network::host::HostProbeResult;
use eolaudit_common::network::range::{self, Ipv4Range};
use eolaudit_common::{error, info};
use tokio::task::JoinSet;
use tracing::debug;

use crate::classifier::HostClassifier;
use crate::lifecycle::{EndOfLifeApi, LifecycleResolver, LookupError};
use crate::network::tcp::TcpProber;
use crate::report::AuditReport;

mod resolver;

pub use resolver::{DnsResolver, NoLookup};

/// Decides whether a host is alive by probing transport-layer ports.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probes every port of `ports`, in order. Never fails: unreachable ports
    /// are simply absent from the result.
    async fn probe(&self, ip: Ipv4Addr, ports: &PortSet) -> HostProbeResult;
}

/// Best-effort reverse name resolution.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn reverse_lookup(&self, ip: Ipv4Addr) -> Option<String>;
}

/// Progress callbacks, invoked from the draining routine only.
pub trait AuditObserver: Send + Sync {
    fn audit_started(&self, _profile: &ScanProfile, _hosts: usize) {}
    fn host_scanned(&self, _ip: Ipv4Addr) {}
    fn host_found(&self, _record: &AuditRecord) {}
}

/// Observer ignoring every event.
pub struct Silent;

impl AuditObserver for Silent {}

struct HostPipeline {
    prober: Arc<dyn Prober>,
    resolver: Arc<dyn NameResolver>,
    classifier: HostClassifier,
    lifecycle: LifecycleResolver,
}

impl HostPipeline {
    async fn audit_host(&self, ip: Ipv4Addr, ports: &PortSet) -> Option<AuditRecord> {
        let probe: HostProbeResult = self.prober.probe(ip, ports).await;
        if !probe.is_alive() {
            return None;
        }

        let hostname: String = self
            .resolver
            .reverse_lookup(ip)
            .await
            .unwrap_or_else(|| NOT_APPLICABLE.to_string());
        let os_label: String = self.classifier.classify(ip).to_string();
        let verdict = self.lifecycle.resolve(&os_label).await;

        Some(AuditRecord::new(ip, hostname, os_label, verdict, probe.open_ports))
    }
}

pub struct AuditEngine {
    pipeline: Arc<HostPipeline>,
    workers: usize,
}

impl AuditEngine {
    pub fn new(
        prober: Arc<dyn Prober>,
        resolver: Arc<dyn NameResolver>,
        classifier: HostClassifier,
        lifecycle: LifecycleResolver,
    ) -> Self {
        Self {
            pipeline: Arc::new(HostPipeline {
                prober,
                resolver,
                classifier,
                lifecycle,
            }),
            workers: DEFAULT_WORKERS,
        }
    }

    /// Builds the production engine: TCP prober, system DNS and the HTTP
    /// lifecycle service.
    pub fn from_config(cfg: &Config, settings: &Settings) -> Result<Self, LookupError> {
        let prober: Arc<dyn Prober> = Arc::new(TcpProber::new(cfg.probe_timeout));
        let resolver: Arc<dyn NameResolver> = if cfg.no_dns {
            Arc::new(NoLookup)
        } else {
            Arc::new(DnsResolver::new(cfg.dns_timeout))
        };
        let source = Arc::new(EndOfLifeApi::new(&cfg.lifecycle_api, cfg.lookup_timeout)?);
        let lifecycle = LifecycleResolver::new(settings.lifecycle_mapping.clone(), source);
        let classifier = HostClassifier::new(settings.inventory.clone());

        Ok(Self::new(prober, resolver, classifier, lifecycle).with_workers(cfg.workers))
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Audits every usable host of `profile`.
    ///
    /// Fails only when the profile's CIDR is invalid; everything going wrong
    /// for individual hosts ends up in the report.
    pub async fn audit(
        &self,
        profile: &ScanProfile,
        ports: &PortSet,
        observer: &dyn AuditObserver,
    ) -> Result<AuditReport, AuditError> {
        let hosts: Ipv4Range = range::usable_hosts(&profile.cidr)?;
        let total: usize = hosts.len();
        info!(
            "Auditing {} ({}): {total} hosts on {} ports",
            profile.network_name,
            profile.cidr,
            ports.len()
        );
        observer.audit_started(profile, total);

        let mut pending = hosts.to_iter();
        let mut tasks: JoinSet<(Ipv4Addr, Option<AuditRecord>)> = JoinSet::new();
        let mut records: Vec<AuditRecord> = Vec::new();

        loop {
            while tasks.len() < self.workers {
                let Some(ip) = pending.next() else { break };
                let pipeline = self.pipeline.clone();
                let ports = ports.clone();
                tasks.spawn(async move { (ip, pipeline.audit_host(ip, &ports).await) });
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };

            match joined {
                Ok((ip, outcome)) => {
                    observer.host_scanned(ip);
                    if let Some(record) = outcome {
                        debug!("{ip} is alive on {:?}", record.open_ports);
                        observer.host_found(&record);
                        records.push(record);
                    }
                }
                Err(e) => error!("Host task failed: {e}"),
            }
        }

        Ok(AuditReport::new(profile.clone(), total, records))
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

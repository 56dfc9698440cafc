//! Update run orchestration
//!
//! The Updater owns the two collaborator seams and the run configuration
//! and drives a single reconciliation pass:
//!
//! ```text
//! ┌────────────┐   snapshot    ┌─────────┐   candidates
//! │ AddrSource │ ────────────▶ │ scanner │ ──────────────┐
//! └────────────┘               └─────────┘               ▼
//! ┌──────────────┐  published records              ┌──────────┐
//! │ ZoneProvider │ ──────────────────────────────▶ │   plan   │
//! └──────────────┘                                 └──────────┘
//!        ▲            upsert batch + status poll        │
//!        └───────────────────────────────────────────────┘
//! ```
//!
//! The flow is strictly sequential. The only suspension point besides the
//! provider calls is the propagation poll sleep. There is no retry around
//! provider calls, no partial-failure handling and no rollback: a
//! submitted change is never retracted.

use crate::config::UpdateConfig;
use crate::error::Result;
use crate::traits::{AddrSource, ZoneProvider};
use crate::{plan, scanner, sync};
use tracing::{debug, info};

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The published records already match the discovered addresses
    /// (or there was nothing publishable); no change was submitted
    NoChange,

    /// A change batch was submitted
    Submitted {
        /// Provider-assigned change identifier
        change_id: String,
        /// Whether the change was confirmed in sync before returning
        synced: bool,
    },
}

/// One-shot record updater
///
/// Construct with [`Updater::new`] and drive with [`Updater::run`]. The
/// updater holds no state between runs; everything durable lives in the
/// hosted zone.
pub struct Updater {
    provider: Box<dyn ZoneProvider>,
    addrs: Box<dyn AddrSource>,
    config: UpdateConfig,
}

impl Updater {
    /// Create an updater, validating the configuration
    pub fn new(
        provider: Box<dyn ZoneProvider>,
        addrs: Box<dyn AddrSource>,
        config: UpdateConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            addrs,
            config,
        })
    }

    /// The run configuration
    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    /// Run one reconciliation pass
    pub async fn run(&self) -> Result<RunOutcome> {
        let config = &self.config;

        let entries = self.addrs.list_interface_addresses()?;
        debug!(
            "{} reported {} interface address(es)",
            self.addrs.source_name(),
            entries.len()
        );

        let candidates =
            scanner::collect_candidates(&entries, &config.v4_interfaces, &config.v6_interfaces);
        if config.wants_v4() {
            info!(
                "IPv4 candidates from {:?}: {:?}",
                config.v4_interfaces,
                candidates.v4.addrs()
            );
        }
        if config.wants_v6() {
            info!(
                "IPv6 candidates from {:?}: {:?}",
                config.v6_interfaces,
                candidates.v6.addrs()
            );
        }

        let current = self
            .provider
            .list_records(&config.zone_id, &config.domain)
            .await?;
        debug!(
            "{} published record set(s) for {} in zone {}",
            current.len(),
            config.domain,
            config.zone_id
        );

        let changes = plan::plan_changes(config, &current, &candidates);
        if changes.is_empty() {
            info!("records for {} are up to date; nothing to do", config.domain);
            return Ok(RunOutcome::NoChange);
        }

        for change in &changes {
            info!(
                "upserting {} {} ttl={} -> {:?}",
                change.rtype, change.name, change.ttl, change.addrs
            );
        }

        let receipt = self
            .provider
            .upsert_records(&config.zone_id, &changes)
            .await?;
        info!(
            "change {} submitted to {} (status {})",
            receipt.id,
            self.provider.provider_name(),
            receipt.status
        );

        let synced = if receipt.status.is_insync() {
            true
        } else if config.wait_for_sync {
            sync::await_propagation(
                self.provider.as_ref(),
                &receipt.id,
                config.max_poll_attempts,
                config.poll_interval(),
            )
            .await?;
            true
        } else {
            debug!("not waiting for change {} to propagate", receipt.id);
            false
        };

        Ok(RunOutcome::Submitted {
            change_id: receipt.id,
            synced,
        })
    }
}

//! Hosted-zone provider seam
//!
//! Defines the interface for reading and upserting record sets in a
//! hosted-zone-style DNS service.
//!
//! ## Implementations
//!
//! - Route53: `zoneup-provider-route53` crate
//! - In-memory fakes: `tests/common/mod.rs`
//!
//! Implementations are single-shot API callers: one request per method
//! call, errors propagated to the caller. Retry policy lives with the
//! caller. For propagation status that is the bounded poll loop in
//! [`crate::sync`]; for everything else the provider client's own
//! network-layer behavior is all the retrying there is.

use crate::error::Result;
use crate::record::{ChangeRequest, DomainRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a submitted change batch
///
/// `PENDING` → `INSYNC` is the only success path. Anything the provider
/// reports that is neither is carried as [`ChangeStatus::Other`] and is
/// never treated as success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeStatus {
    /// Change accepted but not yet propagated
    Pending,
    /// Change fully propagated (terminal success)
    Insync,
    /// Any status value this crate does not recognize
    Other(String),
}

impl ChangeStatus {
    /// Whether this status is terminal success
    pub fn is_insync(&self) -> bool {
        matches!(self, ChangeStatus::Insync)
    }
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeStatus::Pending => f.write_str("PENDING"),
            ChangeStatus::Insync => f.write_str("INSYNC"),
            ChangeStatus::Other(s) => f.write_str(s),
        }
    }
}

/// Receipt for a submitted change batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReceipt {
    /// Provider-assigned change identifier
    pub id: String,
    /// Status reported at submission time
    pub status: ChangeStatus,
}

/// Trait for hosted-zone DNS provider implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    /// List the published A/AAAA records for an exact record name
    ///
    /// The provider API may only support prefix listing; implementations
    /// filter client-side to the exact name (case and trailing-dot
    /// insensitive) and to A/AAAA types. An absent record is simply not in
    /// the returned list.
    async fn list_records(&self, zone_id: &str, name: &str) -> Result<Vec<DomainRecord>>;

    /// Submit every planned change as one upsert batch
    ///
    /// Returns the provider's receipt for the batch. Callers only invoke
    /// this with a non-empty change list.
    async fn upsert_records(
        &self,
        zone_id: &str,
        changes: &[ChangeRequest],
    ) -> Result<ChangeReceipt>;

    /// Query the propagation status of a previously submitted change
    async fn get_change_status(&self, change_id: &str) -> Result<ChangeStatus>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

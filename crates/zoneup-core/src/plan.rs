//! Update planning
//!
//! Compares the candidate address sets against the provider's published
//! records and decides which upserts, if any, are required. Pure logic:
//! no I/O happens here, the caller reads and writes provider state.
//!
//! Per record type (A from the IPv4 candidates, AAAA from the IPv6 ones):
//!
//! 1. Family not requested (no interfaces configured) → the record is not
//!    touched at all.
//! 2. No current record: nothing to publish or creation disabled → no-op;
//!    otherwise a creation upsert.
//! 3. Current record exists: equal address sequences → no-op (the common
//!    steady state); empty candidates → no-op, a published record is
//!    never dropped just because discovery came back empty; anything else
//!    → an upsert carrying the full new set.
//!
//! Equality is over the sorted address sequences only. TTL is ignored: a
//! TTL-only difference never triggers an update.

use crate::config::UpdateConfig;
use crate::record::{AddressSet, ChangeRequest, DomainRecord, RecordType};
use crate::scanner::CandidateSets;
use tracing::{debug, info};

/// Decide which upserts the current run requires
pub fn plan_changes(
    config: &UpdateConfig,
    current: &[DomainRecord],
    candidates: &CandidateSets,
) -> Vec<ChangeRequest> {
    let mut changes = Vec::new();

    if config.wants_v4() {
        if let Some(change) = plan_record(config, RecordType::A, current, &candidates.v4) {
            changes.push(change);
        }
    }
    if config.wants_v6() {
        if let Some(change) = plan_record(config, RecordType::Aaaa, current, &candidates.v6) {
            changes.push(change);
        }
    }

    changes
}

fn plan_record(
    config: &UpdateConfig,
    rtype: RecordType,
    current: &[DomainRecord],
    candidates: &AddressSet,
) -> Option<ChangeRequest> {
    let existing = current.iter().find(|record| record.rtype == rtype);

    match existing {
        None => {
            if candidates.is_empty() {
                debug!("no {rtype} record and no candidates; nothing to do");
                return None;
            }
            if !config.create_missing {
                info!(
                    "{} record for {} does not exist and creation is disabled; skipping",
                    rtype, config.domain
                );
                return None;
            }
            info!(
                "{} record for {} does not exist; creating with {:?}",
                rtype,
                config.domain,
                candidates.addrs()
            );
            Some(ChangeRequest::from_set(&config.domain, config.ttl, candidates))
        }
        Some(record) => {
            if candidates.is_empty() {
                // A published record is never dropped on empty
                // discovery; a transient interface loss must not flap
                // the record to empty.
                info!(
                    "no {} candidates discovered; keeping published {} record {:?}",
                    rtype.family().label(),
                    rtype,
                    record.addrs
                );
                return None;
            }
            if record.sorted_addrs() == candidates.addrs() {
                debug!(
                    "{} record for {} already matches {:?}",
                    rtype,
                    config.domain,
                    candidates.addrs()
                );
                return None;
            }
            info!(
                "{} record for {} differs: published {:?}, discovered {:?}",
                rtype,
                config.domain,
                record.addrs,
                candidates.addrs()
            );
            Some(ChangeRequest::from_set(&config.domain, config.ttl, candidates))
        }
    }
}

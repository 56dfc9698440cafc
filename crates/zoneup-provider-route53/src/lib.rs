//! # Route53 hosted-zone provider
//!
//! Implements the `ZoneProvider` seam on top of the official
//! `aws-sdk-route53` client. The provider is a single-shot API caller:
//! one request per method, errors propagated to the caller, no retry or
//! backoff of its own (the SDK's network-layer retry policy is all the
//! retrying there is), no caching, no background tasks.
//!
//! ## Dry-Run Mode
//!
//! When `dry_run` is true the provider performs read requests normally,
//! logs the change batch it would have submitted as JSON, and returns a
//! synthetic in-sync receipt without calling the API.
//!
//! ## API Reference
//!
//! - List record sets: `ListResourceRecordSets` (name-ordered listing;
//!   exact-name filtering happens client-side)
//! - Upsert: `ChangeResourceRecordSets` with one UPSERT change batch
//! - Propagation: `GetChange` (`PENDING` → `INSYNC`)

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_route53::error::DisplayErrorContext;
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch, ChangeStatus as ApiChangeStatus, ResourceRecord,
    ResourceRecordSet, RrType,
};
use aws_sdk_route53::Client;
use std::net::IpAddr;
use tracing::{debug, warn};
use zoneup_core::record::{ChangeRequest, DomainRecord, RecordType};
use zoneup_core::traits::{ChangeReceipt, ChangeStatus, ZoneProvider};
use zoneup_core::{Error, Result};

const PROVIDER: &str = "route53";

/// Region used when neither the CLI nor the environment names one.
/// Route53 is a global service; the region only selects an endpoint
/// partition.
const FALLBACK_REGION: &str = "us-west-2";

/// Route53 implementation of the hosted-zone provider seam
pub struct Route53Provider {
    client: Client,
    /// Log intended changes without submitting them
    dry_run: bool,
}

impl Route53Provider {
    /// Wrap an already-configured client
    pub fn new(client: Client, dry_run: bool) -> Self {
        Self { client, dry_run }
    }

    /// Build a provider from the standard credential/region chain
    /// (environment, profile, instance metadata), with an optional
    /// explicit region override
    pub async fn from_env(region: Option<String>, dry_run: bool) -> Self {
        let region_chain = RegionProviderChain::first_try(region.map(Region::new))
            .or_default_provider()
            .or_else(Region::new(FALLBACK_REGION));
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(region_chain)
            .load()
            .await;
        debug!("route53 client region: {:?}", shared.region());
        Self::new(Client::new(&shared), dry_run)
    }
}

#[async_trait]
impl ZoneProvider for Route53Provider {
    async fn list_records(&self, zone_id: &str, name: &str) -> Result<Vec<DomainRecord>> {
        let output = self
            .client
            .list_resource_record_sets()
            .hosted_zone_id(zone_id)
            .start_record_name(name)
            .send()
            .await
            .map_err(|e| sdk_error("listing record sets", e))?;

        // The API lists from the start name onward; keep only the exact
        // name and the address record types.
        let records = output
            .resource_record_sets()
            .iter()
            .filter(|rrset| names_equal(rrset.name(), name))
            .filter_map(domain_record)
            .collect();
        Ok(records)
    }

    async fn upsert_records(
        &self,
        zone_id: &str,
        changes: &[ChangeRequest],
    ) -> Result<ChangeReceipt> {
        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] would submit change batch to zone {}: {}",
                zone_id,
                dry_run_payload(changes)
            );
            return Ok(ChangeReceipt {
                id: "dry-run".to_string(),
                status: ChangeStatus::Insync,
            });
        }

        let batch = build_change_batch(changes)?;
        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| sdk_error("submitting change batch", e))?;

        let info = output
            .change_info()
            .ok_or_else(|| Error::provider(PROVIDER, "change response carried no change info"))?;
        Ok(ChangeReceipt {
            id: bare_change_id(info.id()).to_string(),
            status: map_status(info.status()),
        })
    }

    async fn get_change_status(&self, change_id: &str) -> Result<ChangeStatus> {
        let output = self
            .client
            .get_change()
            .id(change_id)
            .send()
            .await
            .map_err(|e| sdk_error("querying change status", e))?;

        let info = output
            .change_info()
            .ok_or_else(|| Error::provider(PROVIDER, "status response carried no change info"))?;
        Ok(map_status(info.status()))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Exact record-name comparison: case-insensitive and indifferent to one
/// trailing dot (the API always returns fully qualified names)
fn names_equal(a: &str, b: &str) -> bool {
    let a = a.strip_suffix('.').unwrap_or(a);
    let b = b.strip_suffix('.').unwrap_or(b);
    a.eq_ignore_ascii_case(b)
}

/// Change ids come back as "/change/C123..."; the bare id is what
/// `GetChange` wants back
fn bare_change_id(id: &str) -> &str {
    id.strip_prefix("/change/").unwrap_or(id)
}

fn map_status(status: &ApiChangeStatus) -> ChangeStatus {
    match status {
        ApiChangeStatus::Insync => ChangeStatus::Insync,
        ApiChangeStatus::Pending => ChangeStatus::Pending,
        other => ChangeStatus::Other(other.as_str().to_string()),
    }
}

/// Convert an API record set into the model, skipping record types the
/// updater does not manage and values that do not parse as addresses
fn domain_record(rrset: &ResourceRecordSet) -> Option<DomainRecord> {
    let rtype = match rrset.r#type() {
        RrType::A => RecordType::A,
        RrType::Aaaa => RecordType::Aaaa,
        _ => return None,
    };

    let addrs: Vec<IpAddr> = rrset
        .resource_records()
        .iter()
        .filter_map(|record| match record.value().parse() {
            Ok(addr) => Some(addr),
            Err(_) => {
                warn!(
                    "ignoring unparseable {} value {:?} on {}",
                    rtype,
                    record.value(),
                    rrset.name()
                );
                None
            }
        })
        .collect();

    Some(DomainRecord {
        name: rrset.name().to_string(),
        rtype,
        ttl: rrset.ttl().unwrap_or(0),
        addrs,
    })
}

fn rr_type(rtype: RecordType) -> RrType {
    match rtype {
        RecordType::A => RrType::A,
        RecordType::Aaaa => RrType::Aaaa,
    }
}

fn build_change_batch(changes: &[ChangeRequest]) -> Result<ChangeBatch> {
    let mut batch = ChangeBatch::builder();
    for request in changes {
        let mut rrset = ResourceRecordSet::builder()
            .name(&request.name)
            .r#type(rr_type(request.rtype))
            .ttl(request.ttl);
        for addr in &request.addrs {
            rrset = rrset.resource_records(
                ResourceRecord::builder()
                    .value(addr.to_string())
                    .build()
                    .map_err(build_error)?,
            );
        }
        batch = batch.changes(
            Change::builder()
                .action(ChangeAction::Upsert)
                .resource_record_set(rrset.build().map_err(build_error)?)
                .build()
                .map_err(build_error)?,
        );
    }
    batch.build().map_err(build_error)
}

fn dry_run_payload(changes: &[ChangeRequest]) -> serde_json::Value {
    serde_json::json!({
        "Changes": changes
            .iter()
            .map(|change| {
                serde_json::json!({
                    "Action": "UPSERT",
                    "ResourceRecordSet": {
                        "Name": change.name,
                        "Type": change.rtype.as_str(),
                        "TTL": change.ttl,
                        "ResourceRecords": change
                            .addrs
                            .iter()
                            .map(|addr| serde_json::json!({ "Value": addr.to_string() }))
                            .collect::<Vec<_>>(),
                    }
                })
            })
            .collect::<Vec<_>>(),
    })
}

fn sdk_error(context: &str, err: impl std::error::Error) -> Error {
    Error::provider(PROVIDER, format!("{context}: {}", DisplayErrorContext(err)))
}

fn build_error(err: aws_sdk_route53::error::BuildError) -> Error {
    Error::provider(PROVIDER, format!("building change batch: {err}"))
}

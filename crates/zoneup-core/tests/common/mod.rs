//! Test doubles and common utilities for the update-flow tests
//!
//! In-memory fakes for both collaborator seams, with call counters so
//! tests can assert how often the provider was actually touched.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use zoneup_core::error::{Error, Result};
use zoneup_core::record::{ChangeRequest, DomainRecord, RecordType};
use zoneup_core::traits::{AddrSource, ChangeReceipt, ChangeStatus, InterfaceAddr, ZoneProvider};

struct FakeZoneInner {
    records: Mutex<Vec<DomainRecord>>,
    /// Scripted status sequence; once drained every further query
    /// reports PENDING
    statuses: Mutex<VecDeque<ChangeStatus>>,
    receipt_status: ChangeStatus,
    upserts: Mutex<Vec<(String, Vec<ChangeRequest>)>>,
    list_calls: AtomicUsize,
    status_queries: AtomicUsize,
}

/// An in-memory hosted zone
///
/// Cloning shares the underlying zone, so a test can keep one handle for
/// assertions while the updater owns another.
#[derive(Clone)]
pub struct FakeZoneProvider {
    inner: Arc<FakeZoneInner>,
}

impl FakeZoneProvider {
    pub fn new(records: Vec<DomainRecord>) -> Self {
        Self {
            inner: Arc::new(FakeZoneInner {
                records: Mutex::new(records),
                statuses: Mutex::new(VecDeque::new()),
                receipt_status: ChangeStatus::Pending,
                upserts: Mutex::new(Vec::new()),
                list_calls: AtomicUsize::new(0),
                status_queries: AtomicUsize::new(0),
            }),
        }
    }

    /// Script the status sequence returned by successive status queries
    pub fn with_statuses(self, statuses: impl IntoIterator<Item = ChangeStatus>) -> Self {
        *self.inner.statuses.lock().unwrap() = statuses.into_iter().collect();
        self
    }

    pub fn upsert_count(&self) -> usize {
        self.inner.upserts.lock().unwrap().len()
    }

    pub fn submitted_batches(&self) -> Vec<(String, Vec<ChangeRequest>)> {
        self.inner.upserts.lock().unwrap().clone()
    }

    pub fn list_call_count(&self) -> usize {
        self.inner.list_calls.load(Ordering::SeqCst)
    }

    pub fn status_query_count(&self) -> usize {
        self.inner.status_queries.load(Ordering::SeqCst)
    }
}

fn normalize(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase()
}

#[async_trait]
impl ZoneProvider for FakeZoneProvider {
    async fn list_records(&self, _zone_id: &str, name: &str) -> Result<Vec<DomainRecord>> {
        self.inner.list_calls.fetch_add(1, Ordering::SeqCst);
        let records = self.inner.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|record| normalize(&record.name) == normalize(name))
            .cloned()
            .collect())
    }

    async fn upsert_records(
        &self,
        zone_id: &str,
        changes: &[ChangeRequest],
    ) -> Result<ChangeReceipt> {
        self.inner
            .upserts
            .lock()
            .unwrap()
            .push((zone_id.to_string(), changes.to_vec()));
        Ok(ChangeReceipt {
            id: "chg-test-1".to_string(),
            status: self.inner.receipt_status.clone(),
        })
    }

    async fn get_change_status(&self, _change_id: &str) -> Result<ChangeStatus> {
        self.inner.status_queries.fetch_add(1, Ordering::SeqCst);
        let mut statuses = self.inner.statuses.lock().unwrap();
        Ok(statuses.pop_front().unwrap_or(ChangeStatus::Pending))
    }

    fn provider_name(&self) -> &'static str {
        "fake-zone"
    }
}

/// An address source backed by a fixed snapshot
pub struct StaticAddrSource {
    entries: Vec<InterfaceAddr>,
}

impl StaticAddrSource {
    pub fn new(entries: Vec<InterfaceAddr>) -> Self {
        Self { entries }
    }
}

impl AddrSource for StaticAddrSource {
    fn list_interface_addresses(&self) -> Result<Vec<InterfaceAddr>> {
        Ok(self.entries.clone())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// An address source whose enumeration always fails
pub struct FailingAddrSource;

impl AddrSource for FailingAddrSource {
    fn list_interface_addresses(&self) -> Result<Vec<InterfaceAddr>> {
        Err(Error::discovery("getifaddrs failed: permission denied"))
    }

    fn source_name(&self) -> &'static str {
        "failing"
    }
}

/// Build an enumeration row
pub fn iface(interface: &str, addr: &str, netmask: &str) -> InterfaceAddr {
    InterfaceAddr {
        interface: interface.to_string(),
        addr: addr.parse().unwrap(),
        netmask: netmask.parse().unwrap(),
    }
}

/// Build a published record
pub fn record(name: &str, rtype: RecordType, ttl: i64, addrs: &[&str]) -> DomainRecord {
    DomainRecord {
        name: name.to_string(),
        rtype,
        ttl,
        addrs: addrs.iter().map(|a| a.parse().unwrap()).collect(),
    }
}

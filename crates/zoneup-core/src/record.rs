//! Record-set model
//!
//! Types shared by the planner, the provider seam and the CLI: address
//! families, record types, candidate address sets and change requests.
//!
//! An [`AddressSet`] is rebuilt from scratch on every run; there is no
//! persistent identity across runs. The only durable state is the record
//! set published in the hosted zone, and that is provider-owned.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// IP address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl AddressFamily {
    /// Whether `addr` belongs to this family
    pub fn matches(&self, addr: &IpAddr) -> bool {
        match self {
            AddressFamily::V4 => addr.is_ipv4(),
            AddressFamily::V6 => addr.is_ipv6(),
        }
    }

    /// Human-readable family label for log messages
    pub fn label(&self) -> &'static str {
        match self {
            AddressFamily::V4 => "IPv4",
            AddressFamily::V6 => "IPv6",
        }
    }
}

/// DNS record type managed by the updater
///
/// Only host address records are supported. Each type maps 1:1 to an
/// address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// A record (IPv4)
    A,
    /// AAAA record (IPv6)
    Aaaa,
}

impl RecordType {
    /// The address family this record type carries
    pub fn family(&self) -> AddressFamily {
        match self {
            RecordType::A => AddressFamily::V4,
            RecordType::Aaaa => AddressFamily::V6,
        }
    }

    /// The record type for an address family
    pub fn for_family(family: AddressFamily) -> Self {
        match family {
            AddressFamily::V4 => RecordType::A,
            AddressFamily::V6 => RecordType::Aaaa,
        }
    }

    /// Wire name of the record type ("A" / "AAAA")
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered, deduplicated set of addresses of one family
///
/// Invariant: addresses are sorted ascending (numeric `Ord` on `IpAddr`),
/// contain no duplicates, and all belong to [`AddressSet::family`].
/// Ordering makes set comparison against a published record stable
/// regardless of enumeration order.
///
/// An empty set is a valid, meaningful value: it signals "no address to
/// publish for this family", not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressSet {
    family: AddressFamily,
    addrs: Vec<IpAddr>,
}

impl AddressSet {
    /// Create an empty set for a family
    pub fn new(family: AddressFamily) -> Self {
        Self {
            family,
            addrs: Vec::new(),
        }
    }

    /// Build a set from arbitrary addresses
    ///
    /// Addresses of the wrong family are dropped; the rest are sorted and
    /// deduplicated.
    pub fn collect(family: AddressFamily, addrs: impl IntoIterator<Item = IpAddr>) -> Self {
        let mut addrs: Vec<IpAddr> = addrs
            .into_iter()
            .filter(|addr| family.matches(addr))
            .collect();
        addrs.sort();
        addrs.dedup();
        Self { family, addrs }
    }

    /// The family of every address in the set
    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// The addresses, sorted ascending
    pub fn addrs(&self) -> &[IpAddr] {
        &self.addrs
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }
}

/// The provider's view of a published record set
///
/// Absence of a record is modeled by the record simply not appearing in a
/// listing, not by an empty `DomainRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Fully qualified record name
    pub name: String,
    /// Record type (A or AAAA)
    pub rtype: RecordType,
    /// Time-to-live in seconds
    pub ttl: i64,
    /// Published addresses, in provider order
    pub addrs: Vec<IpAddr>,
}

impl DomainRecord {
    /// Published addresses sorted and deduplicated, for stable comparison
    /// against a candidate [`AddressSet`]
    pub fn sorted_addrs(&self) -> Vec<IpAddr> {
        let mut addrs = self.addrs.clone();
        addrs.sort();
        addrs.dedup();
        addrs
    }
}

/// An intended upsert, produced by the planner only when the candidate set
/// differs from the published record (or the record is absent, creation is
/// enabled and the set is non-empty)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    /// Target record name
    pub name: String,
    /// Record type (A or AAAA)
    pub rtype: RecordType,
    /// Time-to-live in seconds
    pub ttl: i64,
    /// Full desired address list, sorted ascending
    pub addrs: Vec<IpAddr>,
}

impl ChangeRequest {
    /// Build a request carrying the full candidate set
    pub fn from_set(name: impl Into<String>, ttl: i64, set: &AddressSet) -> Self {
        Self {
            name: name.into(),
            rtype: RecordType::for_family(set.family()),
            ttl,
            addrs: set.addrs().to_vec(),
        }
    }
}

//! Interface scanning
//!
//! Applies the operator's per-family interface selection to an
//! enumeration snapshot and keeps only globally-routable addresses,
//! producing one candidate [`AddressSet`] per family.

use crate::record::{AddressFamily, AddressSet};
use crate::scope;
use crate::traits::InterfaceAddr;
use std::net::IpAddr;
use tracing::debug;

/// Candidate address sets for one run, one per family
///
/// A requested family that yielded nothing is an empty set, which is a
/// valid result ("no address to publish"), not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSets {
    pub v4: AddressSet,
    pub v6: AddressSet,
}

/// Build the candidate sets from an enumeration snapshot
///
/// An address contributes to a family's set iff its interface name is in
/// that family's requested list and the address classifies as globally
/// routable. Interfaces in neither list contribute nothing.
pub fn collect_candidates(
    entries: &[InterfaceAddr],
    v4_interfaces: &[String],
    v6_interfaces: &[String],
) -> CandidateSets {
    let mut v4 = Vec::new();
    let mut v6 = Vec::new();

    for entry in entries {
        let requested = match entry.addr {
            IpAddr::V4(_) => v4_interfaces.iter().any(|name| *name == entry.interface),
            IpAddr::V6(_) => v6_interfaces.iter().any(|name| *name == entry.interface),
        };
        if !requested {
            continue;
        }

        if !scope::is_global(&entry.addr) {
            debug!(
                "skipping non-global address {} on {} (netmask {})",
                entry.addr, entry.interface, entry.netmask
            );
            continue;
        }

        match entry.addr {
            IpAddr::V4(_) => v4.push(entry.addr),
            IpAddr::V6(_) => v6.push(entry.addr),
        }
    }

    CandidateSets {
        v4: AddressSet::collect(AddressFamily::V4, v4),
        v6: AddressSet::collect(AddressFamily::V6, v6),
    }
}

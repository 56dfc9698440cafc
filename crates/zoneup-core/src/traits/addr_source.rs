//! Interface address source seam
//!
//! Defines the interface for enumerating local network interface
//! addresses.
//!
//! ## Implementations
//!
//! - getifaddrs-style snapshot: `zoneup-ip-ifaddrs` crate
//! - Static fixtures: `tests/common/mod.rs`
//!
//! Unlike the provider seam this one is synchronous: enumeration is a
//! single blocking snapshot of kernel state, there is nothing to await
//! and nothing to watch.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// One address bound to one interface, as reported by the OS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceAddr {
    /// Interface name (e.g. "eth0")
    pub interface: String,
    /// Bound address
    pub addr: IpAddr,
    /// Netmask for the binding
    pub netmask: IpAddr,
}

/// Trait for interface enumeration implementations
pub trait AddrSource: Send + Sync {
    /// Snapshot all local interface addresses
    ///
    /// Failure is fatal for a run: without address data there is nothing
    /// to reconcile.
    fn list_interface_addresses(&self) -> Result<Vec<InterfaceAddr>>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}

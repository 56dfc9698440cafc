//! # getifaddrs interface address source
//!
//! Implements the `AddrSource` seam with a one-shot snapshot from the
//! `if-addrs` crate. A single run needs exactly one enumeration pass;
//! there is no change monitoring here.

use if_addrs::IfAddr;
use std::net::IpAddr;
use tracing::trace;
use zoneup_core::traits::{AddrSource, InterfaceAddr};
use zoneup_core::{Error, Result};

/// Interface address source backed by the OS getifaddrs facility
#[derive(Debug, Default)]
pub struct IfAddrsSource;

impl IfAddrsSource {
    pub fn new() -> Self {
        Self
    }
}

impl AddrSource for IfAddrsSource {
    fn list_interface_addresses(&self) -> Result<Vec<InterfaceAddr>> {
        let interfaces = if_addrs::get_if_addrs()
            .map_err(|e| Error::discovery(format!("getifaddrs failed: {e}")))?;

        let entries: Vec<InterfaceAddr> = interfaces
            .into_iter()
            .map(|iface| {
                let (addr, netmask) = match iface.addr {
                    IfAddr::V4(ref v4) => (IpAddr::V4(v4.ip), IpAddr::V4(v4.netmask)),
                    IfAddr::V6(ref v6) => (IpAddr::V6(v6.ip), IpAddr::V6(v6.netmask)),
                };
                trace!("{}: {} netmask {}", iface.name, addr, netmask);
                InterfaceAddr {
                    interface: iface.name,
                    addr,
                    netmask,
                }
            })
            .collect();

        Ok(entries)
    }

    fn source_name(&self) -> &'static str {
        "getifaddrs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_succeeds_and_rows_are_named() {
        let source = IfAddrsSource::new();
        let entries = source
            .list_interface_addresses()
            .expect("local enumeration works");

        // Every row must carry an interface name; at minimum loopback
        // exists on any host this runs on.
        for entry in &entries {
            assert!(!entry.interface.is_empty());
        }
        assert!(!entries.is_empty());
    }

    #[test]
    fn source_is_named_for_logs() {
        assert_eq!(IfAddrsSource::new().source_name(), "getifaddrs");
    }
}

//! Collaborator seams
//!
//! The updater talks to exactly two external systems: the hosted-zone DNS
//! provider and the operating system's interface enumeration. Both are
//! behind narrow traits so the scanner, planner and updater are testable
//! with in-memory fakes, without a real network or host environment.

pub mod addr_source;
pub mod zone_provider;

pub use addr_source::{AddrSource, InterfaceAddr};
pub use zone_provider::{ChangeReceipt, ChangeStatus, ZoneProvider};

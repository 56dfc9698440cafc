//! # zoneup-core
//!
//! Core library for the zoneup hosted-zone DNS updater.
//!
//! A run discovers the host's public addresses on designated interfaces,
//! reconciles them against the A/AAAA records published for a name in a
//! hosted zone, upserts only when they differ, and optionally polls until
//! the change propagates.
//!
//! ## Components
//!
//! - **scope**: address scope classification (globally routable or not)
//! - **scanner**: interface selection and candidate set construction
//! - **plan**: reconciliation of candidates against published records
//! - **sync**: bounded propagation status polling
//! - **Updater**: orchestrates one sequential reconciliation pass
//! - **ZoneProvider / AddrSource**: narrow traits for the two external
//!   collaborators, so everything above is testable with in-memory fakes

pub mod config;
pub mod engine;
pub mod error;
pub mod plan;
pub mod record;
pub mod scanner;
pub mod scope;
pub mod sync;
pub mod traits;

// Re-export core types for convenience
pub use config::UpdateConfig;
pub use engine::{RunOutcome, Updater};
pub use error::{Error, Result};
pub use record::{AddressFamily, AddressSet, ChangeRequest, DomainRecord, RecordType};
pub use scanner::CandidateSets;
pub use traits::{AddrSource, ChangeReceipt, ChangeStatus, InterfaceAddr, ZoneProvider};

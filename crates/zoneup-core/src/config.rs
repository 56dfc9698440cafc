//! Configuration for an update run
//!
//! A run is configured once, up front, from parsed arguments. The config
//! is immutable and passed by reference into each component; there is no
//! process-wide mutable state.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Immutable configuration for one update run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Hosted zone identifier
    pub zone_id: String,

    /// Record name to manage (e.g. "host.example.com.")
    pub domain: String,

    /// Interfaces whose IPv4 addresses are candidates for the A record
    #[serde(default)]
    pub v4_interfaces: Vec<String>,

    /// Interfaces whose IPv6 addresses are candidates for the AAAA record
    #[serde(default)]
    pub v6_interfaces: Vec<String>,

    /// Record TTL in seconds
    #[serde(default = "default_ttl")]
    pub ttl: i64,

    /// Create the record when it does not exist
    #[serde(default = "default_enabled")]
    pub create_missing: bool,

    /// Wait for the submitted change to propagate
    #[serde(default = "default_enabled")]
    pub wait_for_sync: bool,

    /// Propagation status checks before giving up
    #[serde(default = "default_poll_attempts")]
    pub max_poll_attempts: u32,

    /// Seconds to sleep between propagation status checks
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Log intended changes without submitting them
    #[serde(default)]
    pub dry_run: bool,
}

impl UpdateConfig {
    /// Create a configuration with defaults for everything but the targets
    pub fn new(zone_id: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            domain: domain.into(),
            v4_interfaces: Vec::new(),
            v6_interfaces: Vec::new(),
            ttl: default_ttl(),
            create_missing: default_enabled(),
            wait_for_sync: default_enabled(),
            max_poll_attempts: default_poll_attempts(),
            poll_interval_secs: default_poll_interval_secs(),
            dry_run: false,
        }
    }

    /// Set the interfaces checked for IPv4 addresses
    pub fn with_v4_interfaces(mut self, interfaces: impl IntoIterator<Item = String>) -> Self {
        self.v4_interfaces = interfaces.into_iter().collect();
        self
    }

    /// Set the interfaces checked for IPv6 addresses
    pub fn with_v6_interfaces(mut self, interfaces: impl IntoIterator<Item = String>) -> Self {
        self.v6_interfaces = interfaces.into_iter().collect();
        self
    }

    /// Set the record TTL
    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.ttl = ttl;
        self
    }

    /// Enable or disable record creation
    pub fn with_create_missing(mut self, create_missing: bool) -> Self {
        self.create_missing = create_missing;
        self
    }

    /// Enable or disable waiting for propagation
    pub fn with_wait_for_sync(mut self, wait_for_sync: bool) -> Self {
        self.wait_for_sync = wait_for_sync;
        self
    }

    /// Whether any interface was requested for the A record
    pub fn wants_v4(&self) -> bool {
        !self.v4_interfaces.is_empty()
    }

    /// Whether any interface was requested for the AAAA record
    pub fn wants_v6(&self) -> bool {
        !self.v6_interfaces.is_empty()
    }

    /// Sleep interval between propagation status checks
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Validate the configuration
    ///
    /// Checked before any network call is made; a failure here is an
    /// operator error, not a runtime one.
    pub fn validate(&self) -> Result<()> {
        if self.zone_id.trim().is_empty() {
            return Err(Error::usage("hosted zone identifier is required"));
        }

        if !self.wants_v4() && !self.wants_v6() {
            return Err(Error::usage(
                "no interfaces configured for either address family; \
                 name at least one interface to check for IPv4 or IPv6",
            ));
        }

        if self.ttl <= 0 {
            return Err(Error::config(format!(
                "record TTL must be positive, got {}",
                self.ttl
            )));
        }

        if self.wait_for_sync {
            if self.max_poll_attempts == 0 {
                return Err(Error::config(
                    "propagation wait requires at least one status check",
                ));
            }
            if self.poll_interval_secs == 0 {
                return Err(Error::config(
                    "propagation poll interval must be at least one second",
                ));
            }
        }

        validate_domain_name(&self.domain)?;

        Ok(())
    }
}

/// Validate that a string is a usable DNS record name
///
/// Basic RFC 1035 shape checks: total and per-label length, label charset,
/// hyphen placement. One trailing dot (fully qualified form) is accepted.
fn validate_domain_name(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(Error::config("record name cannot be empty"));
    }

    let unqualified = domain.strip_suffix('.').unwrap_or(domain);
    if unqualified.is_empty() {
        return Err(Error::config("record name cannot be the bare root"));
    }

    // RFC 1035: 253 chars max, excluding the trailing dot
    if unqualified.len() > 253 {
        return Err(Error::config(format!(
            "record name too long: {} chars (max 253): {}",
            unqualified.len(),
            domain
        )));
    }

    for label in unqualified.split('.') {
        if label.is_empty() {
            return Err(Error::config(format!(
                "record name has an empty label: '{domain}'"
            )));
        }

        if label.len() > 63 {
            return Err(Error::config(format!(
                "record label too long: {} chars (max 63): '{label}'",
                label.len()
            )));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::config(format!(
                "record label contains invalid characters: '{label}'"
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::config(format!(
                "record label cannot start or end with a hyphen: '{label}'"
            )));
        }
    }

    Ok(())
}

fn default_ttl() -> i64 {
    300
}

fn default_enabled() -> bool {
    true
}

fn default_poll_attempts() -> u32 {
    6
}

fn default_poll_interval_secs() -> u64 {
    10
}

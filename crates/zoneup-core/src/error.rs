//! Error types for the updater
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for updater operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the updater
#[derive(Error, Debug)]
pub enum Error {
    /// Operator misuse: missing arguments or an unusable combination of them.
    /// Reported before any network call is made.
    #[error("usage error: {0}")]
    Usage(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Failure to enumerate local interface addresses
    #[error("interface discovery error: {0}")]
    Discovery(String),

    /// Any failure from the DNS provider API (auth, network, rate limit)
    #[error("provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// The change batch was accepted but never reached a terminal success
    /// status within the retry budget. Distinct from a submission failure:
    /// the change was made, only confirmation timed out.
    #[error("change {change_id} was submitted but still pending after {attempts} status checks")]
    PropagationTimeout {
        /// Provider-assigned change identifier
        change_id: String,
        /// Number of status checks performed
        attempts: u32,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a usage error
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an interface discovery error
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

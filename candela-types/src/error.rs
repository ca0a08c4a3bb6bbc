use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the candela workspace.
///
/// Covers caller mistakes, unknown interval names, malformed provider payloads,
/// transport failures, cache store failures, and cooperative cancellation.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CandelaError {
    /// Invalid or missing input argument. Caller bug; never retried.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The interval name is not one of the fixed-duration intervals.
    #[error("unsupported interval: {interval}")]
    UnsupportedInterval {
        /// The interval string exactly as it was supplied.
        interval: String,
    },

    /// The provider payload is missing required structure or fields.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The transport failed or the provider answered with a non-success status.
    #[error("transport error (status {status:?}): {message}")]
    Transport {
        /// HTTP status code, when one was received.
        status: Option<u16>,
        /// Human-readable error message.
        message: String,
    },

    /// The cache store failed to load or persist a document.
    #[error("cache store error: {0}")]
    Store(String),

    /// The call was cancelled before it ran to completion.
    #[error("operation cancelled")]
    Cancelled,
}

impl CandelaError {
    /// Helper: build an `UnsupportedInterval` error for an interval string.
    pub fn unsupported_interval(interval: impl Into<String>) -> Self {
        Self::UnsupportedInterval {
            interval: interval.into(),
        }
    }

    /// Helper: build a `MalformedResponse` error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Helper: build a `Transport` error with an optional HTTP status.
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Helper: build a `Store` error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Returns true for errors caused by the caller rather than the environment.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidArg(_) | Self::UnsupportedInterval { .. })
    }
}

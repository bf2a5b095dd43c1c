//! Error types for the weather aggregation service.
//!
//! This module defines typed errors for different components of the application,
//! providing better error categorization and enabling specific error handling strategies.

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Source fetch errors
    #[error("fetch error")]
    Fetch(#[from] FetchError),

    /// Payload parsing errors
    #[error("parse error")]
    Parse(#[from] ParseError),

    /// Store errors
    #[error("storage error")]
    Storage(#[from] StorageError),

    /// Collection cycle exceeded its configured deadline
    #[error("collection cycle exceeded deadline of {0} seconds")]
    CycleDeadline(u64),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Errors raised while fetching a payload from one source endpoint.
///
/// Network-level failures are retryable; caller input validation failures
/// are not. The collector consults [`FetchError::is_retryable`] to decide.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connection refused, timeout, DNS, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Source answered with a non-success status
    #[error("source {source_id} returned status {status}: {body}")]
    Status {
        source_id: u32,
        status: u16,
        body: String,
    },

    /// Malformed source id supplied by the caller
    #[error("invalid source id: {0}")]
    InvalidSource(u32),
}

/// Payload parsing errors. Never retried upstream.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Valid JSON that matches none of the recognized schemas
    #[error("unknown payload format: {0}")]
    UnknownFormat(String),

    /// Invalid JSON, or a matched schema carrying unparseable values
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Append failed
    #[error("failed to save {kind} record: {message}")]
    WriteFailed { kind: String, message: String },

    /// History read failed
    #[error("failed to read {kind} records: {message}")]
    ReadFailed { kind: String, message: String },
}

/// Per-item processing errors: one failed step fails the item, and the
/// failure is isolated at the batch level.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Payload did not parse into a canonical reading
    #[error("parse failed")]
    Parse(#[from] ParseError),

    /// Raw or normalized record could not be persisted
    #[error("persistence failed")]
    Storage(#[from] StorageError),
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl FetchError {
    /// Creates a non-success status error from an HTTP response.
    pub fn status(source_id: u32, status: reqwest::StatusCode, body: String) -> Self {
        Self::Status {
            source_id,
            status: status.as_u16(),
            body,
        }
    }

    /// Whether the collector's retry policy applies to this error.
    ///
    /// Transport and status failures are transient from the caller's point
    /// of view; a malformed source id will never become valid by retrying.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidSource(_))
    }
}

impl ParseError {
    /// Creates an unknown format error, truncating oversized payloads.
    pub fn unknown_format(payload: &str) -> Self {
        Self::UnknownFormat(truncate_payload(payload))
    }

    /// Creates a malformed payload error.
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}

impl StorageError {
    /// Creates a write failed error.
    pub fn write_failed(kind: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::WriteFailed {
            kind: kind.into(),
            message: err.to_string(),
        }
    }

    /// Creates a read failed error.
    pub fn read_failed(kind: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::ReadFailed {
            kind: kind.into(),
            message: err.to_string(),
        }
    }
}

/// Payloads come from untrusted sources; keep error messages bounded.
fn truncate_payload(payload: &str) -> String {
    const MAX: usize = 256;
    if payload.len() <= MAX {
        payload.to_string()
    } else {
        let cut = payload
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &payload[..cut])
    }
}

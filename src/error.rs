// src/error.rs

//! Error types for modsync
//!
//! One taxonomy for the whole run: every variant here is fatal and aborts the
//! run when it reaches `main`. Per-dependency failures (no match, no universal
//! download) are not errors; they are resolution outcomes logged as warnings.

use thiserror::Error;

/// Errors that abort a modsync run
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to construct a client or other startup state
    #[error("Initialization error: {0}")]
    InitError(String),

    /// A configuration input did not have the expected shape
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An HTTP request failed or returned a non-success status
    #[error("Download error: {0}")]
    DownloadError(String),

    /// A response body could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The build-tool query exited non-zero or produced unusable output
    #[error("Build tool error: {0}")]
    BuildToolError(String),

    /// A downloaded archive could not be extracted
    #[error("Extraction error: {0}")]
    ExtractError(String),

    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

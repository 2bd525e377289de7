//! Unified error types for the CTR benchmark report.
//!
//! Warehouse errors carry a code:
//! - WH_001: Query failed
//! - WH_002: Connection check failed

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Warehouse error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseErrorCode {
    /// WH_001: The performance query failed
    QueryFailed,
    /// WH_002: The warehouse did not answer a connection check
    Unreachable,
}

impl WarehouseErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::QueryFailed => "WH_001",
            Self::Unreachable => "WH_002",
        }
    }
}

/// Unified error type for the report pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Warehouse error with code.
    #[error("[{code}] {message}")]
    Warehouse { code: &'static str, message: String },

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("export error: {0}")]
    Export(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a warehouse error.
    pub fn warehouse(code: WarehouseErrorCode, msg: impl Into<String>) -> Self {
        Self::Warehouse {
            code: code.code(),
            message: msg.into(),
        }
    }

    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Get the error code if this is a coded error.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Warehouse { code, .. } => Some(code),
            _ => None,
        }
    }
}

//! # Sync Error Types
//!
//! Error types for the sync engine.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Local         │  │   Remote        │  │     Engine              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NotFound       │  │  Remote(Store-  │  │  ChannelError           │ │
//! │  │  Validation     │  │  Error)         │  │  ShuttingDown           │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │  Configuration  │   Local errors are detected synchronously,        │
//! │  │                 │   before any remote call. Remote errors arrive    │
//! │  │  InvalidConfig  │   through MutationTicket resolution and are       │
//! │  │  ConfigLoad/Save│   never silently dropped.                         │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use boba_core::error::ValidationError;
use boba_store::StoreError;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync error type covering controller, agent, and config failures.
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Local Errors (synchronous, pre-remote)
    // =========================================================================
    /// Record id is absent from the current catalog snapshot.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Draft failed submit-time validation; no remote call was made.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Remote Errors (asynchronous, via MutationTicket)
    // =========================================================================
    /// The remote store reported a failure.
    #[error("Remote store error: {0}")]
    Remote(#[from] StoreError),

    // =========================================================================
    // Engine Errors
    // =========================================================================
    /// Channel send/receive failed.
    #[error("Channel error: {0}")]
    ChannelError(String),

    /// The agent is shutting down and no longer accepts commands.
    #[error("Catalog agent is shutting down")]
    ShuttingDown,

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid sync configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SyncError {
    /// Returns true if this error is recoverable by user action alone -
    /// fix the input (or pick an existing record) and try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SyncError::NotFound(_) | SyncError::Validation(_))
    }

    /// Returns true if retrying the same operation unchanged may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Remote(e) if e.is_retryable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorization() {
        assert!(SyncError::NotFound("p1".into()).is_recoverable());
        assert!(SyncError::Validation(ValidationError::required("name")).is_recoverable());
        assert!(!SyncError::ShuttingDown.is_recoverable());

        assert!(SyncError::Remote(StoreError::Unavailable("offline".into())).is_retryable());
        assert!(!SyncError::Remote(StoreError::rejected("denied")).is_retryable());
        assert!(!SyncError::NotFound("p1".into()).is_retryable());
    }

    #[test]
    fn test_validation_error_converts() {
        let err: SyncError = ValidationError::required("price").into();
        assert!(matches!(err, SyncError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: price is required");
    }
}

//! # Store Error Types
//!
//! Error types for the collaborator surface.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Collaborator Error Categories                       │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────────────────────┐     │
//! │  │  StoreError         │        │  AuthError                      │     │
//! │  │                     │        │                                 │     │
//! │  │  Rejected           │        │  Rejected (vendor message)      │     │
//! │  │  Unavailable        │        │  NotSignedIn                    │     │
//! │  │  FeedClosed         │        │  Unavailable                    │     │
//! │  └─────────────────────┘        └─────────────────────────────────┘     │
//! │                                                                         │
//! │  Both carry the vendor's own failure text where one exists - the        │
//! │  engine relays it, it does not interpret it.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for record-store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

// =============================================================================
// Record Store Errors
// =============================================================================

/// Failures reported by the remote record collection.
///
/// These correspond to a create/set/delete call the backend refused or
/// could not complete. They are asynchronous by nature and must be carried
/// back to the caller through the same channel as success - never dropped.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backend rejected the mutation.
    #[error("Remote store rejected the operation: {reason}")]
    Rejected { reason: String },

    /// The backend could not be reached.
    #[error("Remote store unavailable: {0}")]
    Unavailable(String),

    /// The snapshot feed ended (store torn down or subscription revoked).
    #[error("Snapshot feed closed")]
    FeedClosed,
}

impl StoreError {
    /// Shorthand for the rejected variant.
    pub fn rejected(reason: impl Into<String>) -> Self {
        StoreError::Rejected {
            reason: reason.into(),
        }
    }

    /// Returns true if retrying the same operation may succeed.
    ///
    /// ## Retryable
    /// - Connectivity failures
    ///
    /// ## Non-Retryable
    /// - Backend rejections (the payload itself was refused)
    /// - A closed feed (the owning context is gone)
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Failures reported by the credential service.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The vendor refused the credentials; carries its failure message.
    #[error("Authentication failed: {0}")]
    Rejected(String),

    /// Operation requires a signed-in account and none exists.
    #[error("No account is signed in")]
    NotSignedIn,

    /// The credential service could not be reached.
    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(StoreError::Unavailable("network down".into()).is_retryable());

        assert!(!StoreError::rejected("quota exceeded").is_retryable());
        assert!(!StoreError::FeedClosed.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::rejected("permission denied");
        assert!(err.to_string().contains("permission denied"));

        let err = AuthError::Rejected("wrong password".into());
        assert!(err.to_string().contains("wrong password"));
    }
}

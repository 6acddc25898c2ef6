//! # Error Types
//!
//! Domain-specific error types for boba-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  boba-core errors (this file)                                           │
//! │  ├── CoreError        - General domain errors                           │
//! │  └── ValidationError  - Submit-time field validation failures           │
//! │                                                                         │
//! │  boba-store errors (separate crate)                                     │
//! │  ├── StoreError       - Remote record-store failures                    │
//! │  └── AuthError        - Auth collaborator failures                      │
//! │                                                                         │
//! │  boba-sync errors (separate crate)                                      │
//! │  └── SyncError        - What the frontend sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SyncError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, record id)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Record id is absent from the current catalog snapshot.
    ///
    /// ## When This Occurs
    /// - Editing or deleting a record another actor already removed
    /// - A stale id held across a snapshot push
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Submit-time validation errors.
///
/// The draft accepts any input while being composed; these checks run only
/// when the draft is submitted, before any remote call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },
}

impl ValidationError {
    /// Shorthand for the required-field variant.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::RecordNotFound("p1".to_string());
        assert_eq!(err.to_string(), "Record not found: p1");

        let err = ValidationError::required("price");
        assert_eq!(err.to_string(), "price is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

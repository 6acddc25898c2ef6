//! # Validation Module
//!
//! Submit-time validation for draft records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Draft entry (none)                                            │
//! │  └── Field writes accept anything; the operator may type freely         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Submit (THIS MODULE)                                          │
//! │  ├── name, category, price must be non-empty after trimming             │
//! │  └── image may be empty (records without a picture are valid)           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote store                                                  │
//! │  └── Vendor-side rules, surfaced as StoreError                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `price` is text by contract - the catalog stores whatever was typed and
//! performs no numeric or currency parsing.

use crate::error::ValidationError;
use crate::types::{DraftField, ProductRecord};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The fields that must be non-empty for a draft to be submitted.
pub const REQUIRED_FIELDS: [DraftField; 3] =
    [DraftField::Name, DraftField::Category, DraftField::Price];

/// Validates a single required field.
pub fn validate_required(field: DraftField, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field.label()));
    }
    Ok(())
}

/// Validates a draft for submission.
///
/// Checks the required fields in a fixed order and reports the first one
/// that is empty, so the frontend can focus the offending input.
///
/// ## Example
/// ```rust
/// use boba_core::types::ProductRecord;
/// use boba_core::validation::validate_draft;
///
/// assert!(validate_draft(&ProductRecord::new("Trà sữa", "Trà", "25000")).is_ok());
/// assert!(validate_draft(&ProductRecord::new("Trà sữa", "", "25000")).is_err());
/// ```
pub fn validate_draft(draft: &ProductRecord) -> ValidationResult<()> {
    for field in REQUIRED_FIELDS {
        validate_required(field, draft.field(field))?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_draft_passes() {
        let draft = ProductRecord::new("Trà sữa", "Trà", "25000");
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn test_empty_image_is_allowed() {
        let draft = ProductRecord::new("Trà sữa", "Trà", "25000");
        assert!(draft.image.is_empty());
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn test_each_required_field_is_checked() {
        for field in REQUIRED_FIELDS {
            let mut draft = ProductRecord::new("Trà sữa", "Trà", "25000");
            draft.set_field(field, "");

            let err = validate_draft(&draft).unwrap_err();
            assert_eq!(err, ValidationError::required(field.label()));
        }
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let draft = ProductRecord::new("   ", "Trà", "25000");
        assert_eq!(
            validate_draft(&draft).unwrap_err(),
            ValidationError::required("name")
        );
    }

    #[test]
    fn test_price_is_not_parsed_as_number() {
        // Free-form price text is valid; no currency rules apply.
        let draft = ProductRecord::new("Trà sữa", "Trà", "hai lăm nghìn");
        assert!(validate_draft(&draft).is_ok());
    }
}

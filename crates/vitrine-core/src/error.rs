//! # Error Types
//!
//! Domain-specific error types for vitrine-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vitrine-core errors (this file)                                       │
//! │  ├── CoreError        - Engine contract violations                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vitrine-store errors (separate crate)                                 │
//! │  └── StoreError       - NotFound / Validation / InvalidRequest         │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError → ApiError → 400 / 404             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation errors and not-found errors stay distinct all the way to the
//! HTTP status code, so callers can tell "bad input" from "no such entity".

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A cart line references a product that is not in the catalog.
    ///
    /// ## When This Occurs
    /// Cart items are only ever built from catalog entries, so this means the
    /// caller handed the discount engine inconsistent state. Skipping the line
    /// would silently corrupt the totals, so the whole calculation fails.
    #[error("Cart references unknown product: {0}")]
    UnknownCartProduct(ProductId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a request body doesn't meet the product invariants.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g. malformed JSON, non-numeric price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn must_be_positive(field: impl Into<String>) -> Self {
        ValidationError::MustBePositive {
            field: field.into(),
        }
    }

    pub fn must_be_non_negative(field: impl Into<String>) -> Self {
        ValidationError::MustBeNonNegative {
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

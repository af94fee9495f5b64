//! # Store Error Types
//!
//! Error types for collection store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (vitrine-core)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds not-found and request errors          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in vitrine-api) ← Serialized { code, message }              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  404 / 400 / 500                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use vitrine_core::ValidationError;

/// Collection store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the collection.
    ///
    /// ## When This Occurs
    /// - get/update/delete with an id that doesn't exist
    /// - The product was deleted by an earlier request
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A create/update body broke a product invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request itself is unusable (e.g. a bulk call with no ids).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The seed file could not be read or parsed.
    #[error("Failed to load seed data: {0}")]
    SeedLoad(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        StoreError::InvalidRequest(message.into())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::SeedLoad(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SeedLoad(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

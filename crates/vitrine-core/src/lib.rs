//! # vitrine-core: Pure Business Logic for Vitrine
//!
//! This crate is the **heart** of the Vitrine catalog admin. It contains the
//! product query engine and the checkout discount engine as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrine Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Admin Front End                              │   │
//! │  │    Product Table ──► Filters ──► Edit Dialog ──► Checkout Demo  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vitrine-api (axum)                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               vitrine-store (ProductStore)                      │   │
//! │  │        owns the Vec<Product>, hands out snapshots               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &[Product]                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vitrine-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   query   │  │ discount  │  │ validation│  │   │
//! │  │   │  Product  │  │  filter   │  │  Catalog  │  │   rules   │  │   │
//! │  │   │ Category  │  │ sort/page │  │  resolve  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, PageResult, etc.)
//! - [`query`] - Filter → sort → paginate pipeline
//! - [`discount`] - Best-discount-per-line checkout pricing
//! - [`validation`] - Product field rules, create/update bodies
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vitrine_core::discount::{calculate, CartItem, Catalog, CatalogEntry};
//! use vitrine_core::{AppliedDiscount, Category};
//!
//! let mut catalog = Catalog::new();
//! catalog.insert(1, CatalogEntry::new("Headphones", 100.0, Category::Electronics));
//!
//! let result = calculate(&catalog, &[CartItem::new(1, 2)]).unwrap();
//! assert_eq!(result.final_total, 170.0);
//! assert_eq!(result.applied_discount, AppliedDiscount::Category);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::{AppliedDiscount, CalculationResult, DiscountLine, DiscountType};
pub use error::{CoreError, CoreResult, ValidationError};
pub use query::{query, QueryDescriptor};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound (inclusive) of the "low stock" bucket.
///
/// Products with `0 < stock <= LOW_STOCK_THRESHOLD` are low on stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Page size used when a list request does not supply one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

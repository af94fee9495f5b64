//! # Validation Module
//!
//! Input validation for product create/update requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP shell (axum)                                            │
//! │  ├── JSON decoding (types, enum values)                                │
//! │  └── Decode failures → 400                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields (name, category, price, stock)                    │
//! │  └── Invariants (price > 0, stock >= 0)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: ProductStore                                                 │
//! │  └── Only validated values reach the collection                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrine_core::validation::{validate_price, validate_stock};
//!
//! assert!(validate_price(19.99).is_ok());
//! assert!(validate_price(-5.0).is_err());
//! assert!(validate_stock(0).is_ok());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Category, Product, ProductStatus};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be strictly positive (free items are not allowed)
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price <= 0.0 {
        return Err(ValidationError::must_be_positive("price"));
    }

    Ok(())
}

/// Validates a stock level. Zero is allowed (out of stock).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::must_be_non_negative("stock"));
    }

    Ok(())
}

/// Validates a cart quantity.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }

    Ok(())
}

// =============================================================================
// Create Body
// =============================================================================

/// Body of a create request: a product without its id.
///
/// Required fields are `Option` at the type level so that a missing field is
/// reported as a validation error rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub status: Option<ProductStatus>,
    pub sales: Option<f64>,
    pub image: Option<String>,
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A create request that passed validation. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub stock: i64,
    pub status: ProductStatus,
    pub sales: f64,
    pub image: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewProduct {
    /// Builds the stored product, defaulting `created_at` to `now`.
    pub fn into_product(self, id: u64, now: DateTime<Utc>) -> Product {
        Product {
            id,
            image: self.image,
            name: self.name,
            category: self.category,
            price: self.price,
            stock: self.stock,
            status: self.status,
            sales: self.sales,
            created_at: self.created_at.unwrap_or(now),
        }
    }
}

impl ProductDraft {
    /// Checks required fields and invariants.
    ///
    /// ## Rules
    /// ```text
    ///  name      required, non-empty        → Required / TooLong
    ///  category  required                   → Required
    ///  price     required, > 0              → Required / MustBePositive
    ///  stock     required, >= 0             → Required / MustBeNonNegative
    ///  status    optional (default active)
    ///  sales     optional (default 0)
    /// ```
    /// Presence is checked for every field before any range check, so a body
    /// missing `stock` with a negative price reports the missing field.
    pub fn validate(self) -> ValidationResult<NewProduct> {
        let name = self.name.ok_or_else(|| ValidationError::required("name"))?;
        validate_product_name(&name)?;
        let category = self
            .category
            .ok_or_else(|| ValidationError::required("category"))?;
        let price = self.price.ok_or_else(|| ValidationError::required("price"))?;
        let stock = self.stock.ok_or_else(|| ValidationError::required("stock"))?;

        validate_price(price)?;
        validate_stock(stock)?;

        Ok(NewProduct {
            name,
            category,
            price,
            stock,
            status: self.status.unwrap_or_default(),
            sales: self.sales.unwrap_or(0.0),
            image: self.image.unwrap_or_default(),
            created_at: self.created_at,
        })
    }
}

// =============================================================================
// Update Body
// =============================================================================

/// Body of an update request. Absent fields keep their current value.
///
/// An `id` in the body is accepted and ignored; the path id always wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub status: Option<ProductStatus>,
    pub sales: Option<f64>,
    pub image: Option<String>,
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProductPatch {
    /// Validates only the fields that are present.
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(stock) = self.stock {
            validate_stock(stock)?;
        }
        if let Some(name) = &self.name {
            validate_product_name(name)?;
        }
        Ok(())
    }

    /// Merges the present fields into `product`. Never touches `id`.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(status) = self.status {
            product.status = status;
        }
        if let Some(sales) = self.sales {
            product.sales = sales;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(created_at) = self.created_at {
            product.created_at = created_at;
        }
    }

    /// True if the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

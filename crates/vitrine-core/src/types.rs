//! # Domain Types
//!
//! Core domain types used throughout Vitrine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │  StockStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  Electronics    │   │  InStock   >0   │       │
//! │  │  name           │   │  Clothing       │   │  LowStock  1-10 │       │
//! │  │  price / stock  │   │  Books          │   │  OutOfStock  0  │       │
//! │  │  status / sales │   └─────────────────┘   └─────────────────┘       │
//! │  │  created_at     │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │ ProductStatus   │   │  PageResult<T>  │       │
//! │                        │  Active         │   │  data, total    │       │
//! │                        │  Inactive       │   │  page, pageSize │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Product ids are integers assigned by the store (`max(existing) + 1`).
//! Wire field names are camelCase to match the admin front end.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::LOW_STOCK_THRESHOLD;

/// Store-assigned product identifier.
pub type ProductId = u64;

// =============================================================================
// Category
// =============================================================================

/// Product category. Also the key for category discount rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Clothing,
    Books,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 3] = [Category::Electronics, Category::Clothing, Category::Books];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Books => "books",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "electronics" => Ok(Category::Electronics),
            "clothing" => Ok(Category::Clothing),
            "books" => Ok(Category::Books),
            other => Err(ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("unknown category '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Product Status
// =============================================================================

/// Whether a product is listed (active) or delisted (inactive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

impl ProductStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            other => Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: format!("unknown status '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Stock Status
// =============================================================================

/// Stock bucket used by the list filter.
///
/// ## Buckets
/// ```text
///  stock:   0     1 ........ 10    11 ..........
///           │     └── LowStock ─┘
///           │     └────────── InStock ──────────►
///      OutOfStock
/// ```
/// `InStock` overlaps `LowStock`: a product with 4 units matches both filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Returns true if `stock` falls inside this bucket.
    pub const fn matches(&self, stock: i64) -> bool {
        match self {
            StockStatus::InStock => stock > 0,
            StockStatus::LowStock => stock > 0 && stock <= LOW_STOCK_THRESHOLD,
            StockStatus::OutOfStock => stock == 0,
        }
    }

    /// The most specific bucket for a stock level (what a badge would show).
    pub const fn classify(stock: i64) -> Self {
        if stock <= 0 {
            StockStatus::OutOfStock
        } else if stock <= LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

impl FromStr for StockStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_stock" => Ok(StockStatus::InStock),
            "low_stock" => Ok(StockStatus::LowStock),
            "out_of_stock" => Ok(StockStatus::OutOfStock),
            other => Err(ValidationError::InvalidFormat {
                field: "stockStatus".to_string(),
                reason: format!("unknown stock status '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// Immutable by convention: the query engine only ever reads a snapshot.
/// The store is the only component that mutates products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier.
    pub id: ProductId,

    /// Image URL shown in the product table.
    #[serde(default)]
    pub image: String,

    /// Display name; the free-text search matches against it.
    pub name: String,

    pub category: Category,

    /// Unit price (always > 0).
    pub price: f64,

    /// Units on hand (always >= 0).
    pub stock: i64,

    pub status: ProductStatus,

    /// Units sold to date.
    #[serde(default)]
    pub sales: f64,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the stock bucket for this product.
    #[inline]
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.stock)
    }

    /// Checks if the product is currently listed.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}

// =============================================================================
// Page Result
// =============================================================================

/// One page of a filtered, sorted list.
///
/// ## Invariants
/// - `total` counts the filtered set, independent of the requested page
/// - `data.len() <= page_size`
/// - `data` is empty iff `(page - 1) * page_size >= total`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> PageResult<T> {
    /// Number of pages needed to show `total` items.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

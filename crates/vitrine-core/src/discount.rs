//! # Discount Resolution Engine
//!
//! Prices a cart, picking the single best discount for every line.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FULL AMOUNT   order original total >= 10000      → whole order × 0.90  │
//! │                                                                         │
//! │  CATEGORY      cart quantity in the category      → that category's     │
//! │                  electronics  >= 2                   lines × 0.85       │
//! │                  clothing     >= 3                   lines × 0.80       │
//! │                  books        >= 5                   lines × 0.70       │
//! │                                                                         │
//! │  Discounts never stack: each line gets exactly one of them (or none).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Passes
//! ```text
//!  cart ──► 1. aggregate: quantity per category, original total
//!               │
//!               ▼
//!           2. resolve each line independently:
//!                category_rate = rule.rate if category qty >= rule.min else 1
//!                full_rate     = 0.90 if original total >= 10000 else 1
//!                (type, rate)  = resolve(category_rate, full_rate)
//!               │
//!               ▼
//!           3. totals + applied_discount (none / category / full_amount / mixed)
//! ```
//!
//! Output lines are in cart order. The engine is a pure function: the rules
//! are constants passed in, never mutated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Category, Product, ProductId};
use crate::validation::validate_quantity;

// =============================================================================
// Discount Rate
// =============================================================================

/// A price multiplier in basis points: 8500 = 0.85 (15% off).
///
/// Rates are compared as integers so the tie-break in [`resolve`] is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Full price (no discount).
    pub const NONE: DiscountRate = DiscountRate(10_000);

    /// Creates a rate from basis points. Must be in `1..=10000`.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// The multiplier as a fraction, e.g. `0.85`.
    #[inline]
    pub fn as_fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    #[inline]
    pub const fn is_discount(&self) -> bool {
        self.0 < Self::NONE.0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::NONE
    }
}

// =============================================================================
// Rules
// =============================================================================

/// Category discount: triggered by total cart quantity in one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryRule {
    pub min_quantity: i64,
    pub rate: DiscountRate,
}

/// Order-wide discount: triggered by the pre-discount order total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FullAmountRule {
    pub min_amount: f64,
    pub rate: DiscountRate,
}

/// The complete rule set for one calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountRules {
    pub electronics: CategoryRule,
    pub clothing: CategoryRule,
    pub books: CategoryRule,
    pub full_amount: FullAmountRule,
}

impl DiscountRules {
    /// The store's standing rules.
    pub const fn standard() -> Self {
        DiscountRules {
            electronics: CategoryRule {
                min_quantity: 2,
                rate: DiscountRate::from_bps(8_500),
            },
            clothing: CategoryRule {
                min_quantity: 3,
                rate: DiscountRate::from_bps(8_000),
            },
            books: CategoryRule {
                min_quantity: 5,
                rate: DiscountRate::from_bps(7_000),
            },
            full_amount: FullAmountRule {
                min_amount: 10_000.0,
                rate: DiscountRate::from_bps(9_000),
            },
        }
    }

    pub const fn for_category(&self, category: Category) -> &CategoryRule {
        match category {
            Category::Electronics => &self.electronics,
            Category::Clothing => &self.clothing,
            Category::Books => &self.books,
        }
    }
}

impl Default for DiscountRules {
    fn default() -> Self {
        DiscountRules::standard()
    }
}

// =============================================================================
// Catalog & Cart
// =============================================================================

/// The part of a product the discount engine needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub price: f64,
    pub category: Category,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, price: f64, category: Category) -> Self {
        CatalogEntry {
            name: name.into(),
            price,
            category,
        }
    }
}

/// Product id → price/category lookup, built from a product snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: HashMap<ProductId, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: &[Product]) -> Self {
        let entries = products
            .iter()
            .map(|p| (p.id, CatalogEntry::new(p.name.clone(), p.price, p.category)))
            .collect();
        Catalog { entries }
    }

    pub fn insert(&mut self, id: ProductId, entry: CatalogEntry) {
        self.entries.insert(id, entry);
    }

    pub fn get(&self, id: ProductId) -> Option<&CatalogEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One cart entry. Quantity must be > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl CartItem {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        CartItem {
            product_id,
            quantity,
        }
    }
}

// =============================================================================
// Result Types
// =============================================================================

/// Which discount a single line received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    None,
    Category,
    FullAmount,
}

/// Order-level label derived from the line types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AppliedDiscount {
    None,
    Category,
    FullAmount,
    /// At least one line used each of the two discount types.
    Mixed,
}

/// Pricing breakdown for one cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    /// Unit price before discount.
    pub original_price: f64,
    /// `original_price × quantity`.
    pub original_subtotal: f64,
    pub discount_type: DiscountType,
    /// Multiplier in `(0, 1]`; 0.9 means 10% off.
    pub discount_rate: f64,
    /// `original_price × discount_rate`.
    pub final_price: f64,
    /// `final_price × quantity`.
    pub final_subtotal: f64,
    /// `original_subtotal − final_subtotal`.
    pub saved: f64,
}

/// Pricing breakdown for a whole cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub original_total: f64,
    pub final_total: f64,
    pub total_saved: f64,
    pub applied_discount: AppliedDiscount,
    /// One line per cart item, in cart order.
    pub discounts: Vec<DiscountLine>,
}

// =============================================================================
// Resolution
// =============================================================================

/// Picks the discount for one line from its two candidate rates.
///
/// ## Decision Table
/// ```text
///  condition                                   → type          rate
///  ─────────────────────────────────────────   ─────────────   ─────────────
///  category_rate <= full_rate AND category < 1 → Category      category_rate
///  full_rate < category_rate                   → FullAmount    full_rate
///  otherwise (both are 1)                      → None          1
/// ```
/// The first row uses `<=`: when both rates are equal and below 1, the
/// category discount wins. This tie-break is observable and must not become
/// a plain `min`.
pub fn resolve(category_rate: DiscountRate, full_rate: DiscountRate) -> (DiscountType, DiscountRate) {
    if category_rate <= full_rate && category_rate.is_discount() {
        (DiscountType::Category, category_rate)
    } else if full_rate < category_rate {
        (DiscountType::FullAmount, full_rate)
    } else {
        (DiscountType::None, DiscountRate::NONE)
    }
}

/// Derives the order label from the set of line types actually used.
pub fn applied_discount(lines: &[DiscountLine]) -> AppliedDiscount {
    let has_full = lines
        .iter()
        .any(|l| l.discount_type == DiscountType::FullAmount);
    let has_category = lines
        .iter()
        .any(|l| l.discount_type == DiscountType::Category);

    match (has_category, has_full) {
        (true, true) => AppliedDiscount::Mixed,
        (false, true) => AppliedDiscount::FullAmount,
        (true, false) => AppliedDiscount::Category,
        (false, false) => AppliedDiscount::None,
    }
}

/// Prices `cart` with the standard rules.
///
/// ## Errors
/// - [`CoreError::UnknownCartProduct`] if a line's product is not in `catalog`
/// - [`CoreError::Validation`] if a quantity is not positive, or a
///   category's summed quantity overflows
pub fn calculate(catalog: &Catalog, cart: &[CartItem]) -> CoreResult<CalculationResult> {
    calculate_with(&DiscountRules::standard(), catalog, cart)
}

/// Prices `cart` with an explicit rule set.
pub fn calculate_with(
    rules: &DiscountRules,
    catalog: &Catalog,
    cart: &[CartItem],
) -> CoreResult<CalculationResult> {
    // Pass 1: resolve every line against the catalog and aggregate.
    let mut resolved = Vec::with_capacity(cart.len());
    let mut category_counts: HashMap<Category, i64> = HashMap::new();
    let mut original_total = 0.0;

    for item in cart {
        validate_quantity(item.quantity)?;
        let entry = catalog
            .get(item.product_id)
            .ok_or(CoreError::UnknownCartProduct(item.product_id))?;

        let count = category_counts.entry(entry.category).or_insert(0);
        *count = count
            .checked_add(item.quantity)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "quantity".to_string(),
                reason: "total quantity is too large".to_string(),
            })?;
        original_total += entry.price * item.quantity as f64;
        resolved.push((item, entry));
    }

    let full_rate = if original_total >= rules.full_amount.min_amount {
        rules.full_amount.rate
    } else {
        DiscountRate::NONE
    };

    // Pass 2: choose one discount per line.
    let discounts: Vec<DiscountLine> = resolved
        .into_iter()
        .map(|(item, entry)| {
            let rule = rules.for_category(entry.category);
            let in_category = category_counts
                .get(&entry.category)
                .copied()
                .unwrap_or(0);
            let category_rate = if in_category >= rule.min_quantity {
                rule.rate
            } else {
                DiscountRate::NONE
            };

            let (discount_type, rate) = resolve(category_rate, full_rate);
            price_line(item, entry, discount_type, rate)
        })
        .collect();

    let final_total: f64 = discounts.iter().map(|l| l.final_subtotal).sum();

    Ok(CalculationResult {
        original_total,
        final_total,
        total_saved: original_total - final_total,
        applied_discount: applied_discount(&discounts),
        discounts,
    })
}

fn price_line(
    item: &CartItem,
    entry: &CatalogEntry,
    discount_type: DiscountType,
    rate: DiscountRate,
) -> DiscountLine {
    let quantity = item.quantity as f64;
    let original_subtotal = entry.price * quantity;
    let final_price = entry.price * rate.as_fraction();
    let final_subtotal = final_price * quantity;

    DiscountLine {
        product_id: item.product_id,
        product_name: entry.name.clone(),
        quantity: item.quantity,
        original_price: entry.price,
        original_subtotal,
        discount_type,
        discount_rate: rate.as_fraction(),
        final_price,
        final_subtotal,
        saved: original_subtotal - final_subtotal,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(1, CatalogEntry::new("Headphones", 100.0, Category::Electronics));
        catalog.insert(2, CatalogEntry::new("Laptop", 6000.0, Category::Electronics));
        catalog.insert(3, CatalogEntry::new("Jacket", 3000.0, Category::Clothing));
        catalog.insert(4, CatalogEntry::new("Novel", 300.0, Category::Books));
        catalog.insert(5, CatalogEntry::new("T-Shirt", 200.0, Category::Clothing));
        catalog
    }

    #[test]
    fn test_single_category_discount() {
        let result = calculate(&catalog(), &[CartItem::new(1, 2)]).unwrap();

        assert!(close(result.original_total, 200.0));
        let line = &result.discounts[0];
        assert_eq!(line.discount_type, DiscountType::Category);
        assert!(close(line.discount_rate, 0.85));
        assert!(close(line.final_subtotal, 170.0));
        assert!(close(line.saved, 30.0));
        assert_eq!(result.applied_discount, AppliedDiscount::Category);
    }

    #[test]
    fn test_full_amount_discount_without_category_thresholds() {
        // 6000 + 2×3000 = 12000, one electronics item and two clothing items
        let cart = [CartItem::new(2, 1), CartItem::new(3, 2)];
        let result = calculate(&catalog(), &cart).unwrap();

        assert!(close(result.original_total, 12_000.0));
        assert!(result
            .discounts
            .iter()
            .all(|l| l.discount_type == DiscountType::FullAmount && close(l.discount_rate, 0.9)));
        assert_eq!(result.applied_discount, AppliedDiscount::FullAmount);
        assert!(close(result.final_total, 10_800.0));
        assert!(close(result.total_saved, 1_200.0));
    }

    #[test]
    fn test_mixed_discounts() {
        // electronics qty 2 → 0.85 beats 0.90; clothing qty 1 → only 0.90
        let cart = [CartItem::new(2, 2), CartItem::new(3, 1)];
        let result = calculate(&catalog(), &cart).unwrap();

        assert_eq!(result.discounts[0].discount_type, DiscountType::Category);
        assert_eq!(result.discounts[1].discount_type, DiscountType::FullAmount);
        assert_eq!(result.applied_discount, AppliedDiscount::Mixed);
        assert!(close(result.final_total, 12_000.0 * 0.85 + 3_000.0 * 0.9));
    }

    #[test]
    fn test_full_amount_beats_weaker_category_rate() {
        let rules = DiscountRules {
            clothing: CategoryRule {
                min_quantity: 3,
                rate: DiscountRate::from_bps(9_500),
            },
            ..DiscountRules::standard()
        };
        // 4 jackets = 12000, clothing qty 4 >= 3 → 0.95 vs 0.90
        let result = calculate_with(&rules, &catalog(), &[CartItem::new(3, 4)]).unwrap();
        assert_eq!(result.discounts[0].discount_type, DiscountType::FullAmount);
    }

    #[test]
    fn test_category_counts_span_lines() {
        // two separate clothing lines add up to 3 units
        let cart = [CartItem::new(5, 1), CartItem::new(5, 2)];
        let result = calculate(&catalog(), &cart).unwrap();
        assert!(result
            .discounts
            .iter()
            .all(|l| l.discount_type == DiscountType::Category && close(l.discount_rate, 0.8)));
    }

    #[test]
    fn test_no_discount() {
        let result = calculate(&catalog(), &[CartItem::new(4, 4)]).unwrap();
        let line = &result.discounts[0];
        assert_eq!(line.discount_type, DiscountType::None);
        assert!(close(line.discount_rate, 1.0));
        assert!(close(line.saved, 0.0));
        assert_eq!(result.applied_discount, AppliedDiscount::None);
    }

    #[test]
    fn test_empty_cart() {
        let result = calculate(&catalog(), &[]).unwrap();
        assert_eq!(result.original_total, 0.0);
        assert_eq!(result.final_total, 0.0);
        assert!(result.discounts.is_empty());
        assert_eq!(result.applied_discount, AppliedDiscount::None);
    }

    #[test]
    fn test_unknown_product_fails() {
        let cart = [CartItem::new(1, 1), CartItem::new(99, 1)];
        assert_eq!(
            calculate(&catalog(), &cart),
            Err(CoreError::UnknownCartProduct(99))
        );
    }

    #[test]
    fn test_non_positive_quantity_fails() {
        let result = calculate(&catalog(), &[CartItem::new(1, 0)]);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_quantity_sum_overflow_is_validation_error() {
        let cart = [CartItem::new(1, i64::MAX), CartItem::new(2, i64::MAX)];
        let result = calculate(&catalog(), &cart);
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::InvalidFormat { ref field, .. })) if field == "quantity"
        ));
    }

    #[test]
    fn test_lines_follow_cart_order() {
        let cart = [CartItem::new(4, 1), CartItem::new(1, 1), CartItem::new(3, 1)];
        let result = calculate(&catalog(), &cart).unwrap();
        let ids: Vec<u64> = result.discounts.iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![4, 1, 3]);
    }

    #[test]
    fn test_resolve_decision_table() {
        let r = DiscountRate::from_bps;
        assert_eq!(resolve(r(8_500), r(9_000)), (DiscountType::Category, r(8_500)));
        assert_eq!(resolve(r(9_500), r(9_000)), (DiscountType::FullAmount, r(9_000)));
        assert_eq!(resolve(DiscountRate::NONE, r(9_000)), (DiscountType::FullAmount, r(9_000)));
        assert_eq!(
            resolve(DiscountRate::NONE, DiscountRate::NONE),
            (DiscountType::None, DiscountRate::NONE)
        );
    }

    #[test]
    fn test_equal_rates_favor_category() {
        let rate = DiscountRate::from_bps(8_500);
        assert_eq!(resolve(rate, rate), (DiscountType::Category, rate));

        let rules = DiscountRules {
            full_amount: FullAmountRule {
                min_amount: 10_000.0,
                rate,
            },
            ..DiscountRules::standard()
        };
        // 2 laptops: electronics qty 2 → 0.85, total 12000 → 0.85
        let result = calculate_with(&rules, &catalog(), &[CartItem::new(2, 2)]).unwrap();
        assert_eq!(result.discounts[0].discount_type, DiscountType::Category);
    }

    #[test]
    fn test_catalog_from_products() {
        use crate::types::ProductStatus;
        use chrono::Utc;

        let product = Product {
            id: 11,
            image: String::new(),
            name: "Poster".to_string(),
            category: Category::Books,
            price: 12.0,
            stock: 1,
            status: ProductStatus::Active,
            sales: 0.0,
            created_at: Utc::now(),
        };
        let catalog = Catalog::from_products(&[product]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(11).map(|e| e.price), Some(12.0));
    }

    #[test]
    fn test_result_wire_format() {
        let result = calculate(&catalog(), &[CartItem::new(1, 2)]).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["appliedDiscount"], "category");
        assert_eq!(value["discounts"][0]["discountType"], "category");
        assert!(value["discounts"][0].get("finalSubtotal").is_some());
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn arb_cart() -> impl Strategy<Value = Vec<CartItem>> {
        prop::collection::vec((1u64..=5, 1i64..8), 0..8)
            .prop_map(|rows| rows.into_iter().map(|(id, q)| CartItem::new(id, q)).collect())
    }

    proptest! {
        #[test]
        fn prop_rates_are_bounded(cart in arb_cart()) {
            let result = calculate(&catalog(), &cart).unwrap();
            prop_assert_eq!(result.discounts.len(), cart.len());
            for line in &result.discounts {
                prop_assert!(line.discount_rate > 0.0 && line.discount_rate <= 1.0);
                prop_assert!(line.final_subtotal <= line.original_subtotal + EPS);
            }
            prop_assert!(result.final_total <= result.original_total + EPS);
        }

        #[test]
        fn prop_rate_never_worse_than_best_candidate(cart in arb_cart()) {
            let rules = DiscountRules::standard();
            let result = calculate(&catalog(), &cart).unwrap();
            let full_eligible = result.original_total >= rules.full_amount.min_amount;
            for line in &result.discounts {
                if full_eligible {
                    prop_assert!(line.discount_rate <= 0.9 + EPS);
                }
            }
        }

        #[test]
        fn prop_crossing_category_threshold_never_raises_subtotals(extra in 0i64..3, others in arb_cart()) {
            // Books threshold is 5: four books sit below it, one more line crosses it.
            let below: Vec<CartItem> = others
                .iter()
                .copied()
                .filter(|i| i.product_id != 4)
                .chain(std::iter::once(CartItem::new(4, 4)))
                .collect();
            let mut above = below.clone();
            above.push(CartItem::new(4, 1 + extra));

            let before = calculate(&catalog(), &below).unwrap();
            let after = calculate(&catalog(), &above).unwrap();
            for (old, new) in before.discounts.iter().zip(&after.discounts) {
                if old.product_id == 4 {
                    prop_assert!(new.final_subtotal <= old.final_subtotal + EPS);
                }
            }
            for line in after.discounts.iter().filter(|l| l.product_id == 4) {
                prop_assert_eq!(line.discount_type, DiscountType::Category);
            }
        }
    }
}

//! # Product Query Engine
//!
//! Deterministic filter → sort → paginate over a product snapshot.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     query(&[Product], &QueryDescriptor)                 │
//! │                                                                         │
//! │  snapshot ──► 1. filter_products ──► 2. sort_products ──► 3. paginate   │
//! │                  (conjunction of        (stable, key +      (total =     │
//! │                   all predicates)        order)              |filtered|) │
//! │                                                                         │
//! │  Each stage is a public function and can be tested on its own.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never mutates its input and holds no state between calls.
//!
//! ## Unrecognized filter values
//! Callers may pass through raw query-string values that don't name a real
//! category or status. Those are kept as [`Selector::Unrecognized`] and match
//! nothing. An unparseable price bound is represented as `NaN`, which also
//! matches nothing because every comparison against `NaN` is false.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::types::{Category, PageResult, Product, ProductStatus, StockStatus};
use crate::DEFAULT_PAGE_SIZE;

// =============================================================================
// Filter
// =============================================================================

/// An exact-match filter value that may not name a real variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    /// Match products whose field equals this value.
    Is(T),
    /// The caller asked for a value that doesn't exist: matches nothing.
    Unrecognized(String),
}

impl<T: FromStr> Selector<T> {
    /// Parses a raw value. Empty input means "no constraint" and gives `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse::<T>() {
            Ok(value) => Selector::Is(value),
            Err(_) => Selector::Unrecognized(raw.to_string()),
        })
    }
}

impl<T: PartialEq> Selector<T> {
    fn accepts(&self, value: &T) -> bool {
        match self {
            Selector::Is(expected) => expected == value,
            Selector::Unrecognized(_) => false,
        }
    }
}

/// Filters applied to a list request. Every field is optional; absent or
/// empty values impose no constraint. Present filters are AND-ed together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub search: String,
    pub category: Option<Selector<Category>>,
    pub stock_status: Option<StockStatus>,
    pub status: Option<Selector<ProductStatus>>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// Returns true if `product` satisfies every present filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.matches_category(product)
            && self.matches_stock(product)
            && self.matches_status(product)
            && self.matches_price(product)
    }

    pub fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        product
            .name
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    pub fn matches_category(&self, product: &Product) -> bool {
        self.category
            .as_ref()
            .map_or(true, |c| c.accepts(&product.category))
    }

    pub fn matches_stock(&self, product: &Product) -> bool {
        self.stock_status
            .map_or(true, |bucket| bucket.matches(product.stock))
    }

    pub fn matches_status(&self, product: &Product) -> bool {
        self.status
            .as_ref()
            .map_or(true, |s| s.accepts(&product.status))
    }

    pub fn matches_price(&self, product: &Product) -> bool {
        let above_min = self.min_price.map_or(true, |min| product.price >= min);
        let below_max = self.max_price.map_or(true, |max| product.price <= max);
        above_min && below_max
    }
}

// =============================================================================
// Sort
// =============================================================================

/// Field a list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Category,
    Price,
    Stock,
    Sales,
    #[default]
    CreatedAt,
}

impl SortKey {
    /// Parses a wire value; anything unknown falls back to the default key.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "name" => SortKey::Name,
            "category" => SortKey::Category,
            "price" => SortKey::Price,
            "stock" => SortKey::Stock,
            "sales" => SortKey::Sales,
            _ => SortKey::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `"asc"` is ascending; every other value is descending.
    pub fn parse_or_default(raw: &str) -> Self {
        if raw == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

/// Locale-style text ordering: case-folded comparison first, then lowercase
/// before uppercase on a tie ("apple" < "banana" < "Banana").
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Ascending comparison of two products on `key`.
pub fn compare_by(key: SortKey, a: &Product, b: &Product) -> Ordering {
    match key {
        SortKey::Name => compare_text(&a.name, &b.name),
        SortKey::Category => compare_text(a.category.as_str(), b.category.as_str()),
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::Stock => a.stock.cmp(&b.stock),
        SortKey::Sales => a.sales.total_cmp(&b.sales),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Page window. Both values are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    /// Builds a window, normalising non-positive values to 1.
    pub fn new(page: i64, page_size: i64) -> Self {
        Pagination {
            page: normalize(page),
            page_size: normalize(page_size),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn normalize(value: i64) -> usize {
    if value < 1 {
        1
    } else {
        usize::try_from(value).unwrap_or(usize::MAX)
    }
}

// =============================================================================
// Query Descriptor
// =============================================================================

/// Filter, sort and pagination parameters for one list request.
///
/// ## Example
/// ```rust
/// use vitrine_core::query::{QueryDescriptor, SortKey, SortOrder};
/// use vitrine_core::StockStatus;
///
/// let descriptor = QueryDescriptor::new()
///     .search("lamp")
///     .stock_status(StockStatus::LowStock)
///     .sort(SortKey::Price, SortOrder::Asc)
///     .page(2, 20);
/// assert_eq!(descriptor.pagination.offset(), 20);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDescriptor {
    pub filter: ProductFilter,
    pub sort: SortSpec,
    pub pagination: Pagination,
}

impl QueryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.filter.search = search.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.filter.category = Some(Selector::Is(category));
        self
    }

    pub fn status(mut self, status: ProductStatus) -> Self {
        self.filter.status = Some(Selector::Is(status));
        self
    }

    pub fn stock_status(mut self, stock_status: StockStatus) -> Self {
        self.filter.stock_status = Some(stock_status);
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.filter.min_price = min;
        self.filter.max_price = max;
        self
    }

    pub fn sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort = SortSpec { key, order };
        self
    }

    pub fn page(mut self, page: i64, page_size: i64) -> Self {
        self.pagination = Pagination::new(page, page_size);
        self
    }
}

// =============================================================================
// Pipeline Stages
// =============================================================================

/// Stage 1: keeps the products matching every filter, in input order.
pub fn filter_products<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

/// Stage 2: stable sort by `spec.key`.
///
/// Descending uses the mirrored comparator rather than reversing the sorted
/// output, so equal keys keep their input order in both directions.
pub fn sort_products(products: &mut [&Product], spec: SortSpec) {
    match spec.order {
        SortOrder::Asc => products.sort_by(|a, b| compare_by(spec.key, a, b)),
        SortOrder::Desc => products.sort_by(|a, b| compare_by(spec.key, b, a)),
    }
}

/// Stage 3: cuts one page out of the sorted set.
pub fn paginate<T: Clone>(items: &[T], pagination: Pagination) -> PageResult<T> {
    let total = items.len();
    let start = pagination.offset().min(total);
    let end = start.saturating_add(pagination.page_size()).min(total);

    PageResult {
        data: items[start..end].to_vec(),
        total,
        page: pagination.page(),
        page_size: pagination.page_size(),
    }
}

/// Runs the full pipeline over a snapshot.
pub fn query(products: &[Product], descriptor: &QueryDescriptor) -> PageResult<Product> {
    let mut matched = filter_products(products, &descriptor.filter);
    sort_products(&mut matched, descriptor.sort);

    let page = paginate(&matched, descriptor.pagination);
    PageResult {
        data: page.data.into_iter().cloned().collect(),
        total: page.total,
        page: page.page,
        page_size: page.page_size,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn product(id: u64, name: &str, category: Category, price: f64, stock: i64) -> Product {
        Product {
            id,
            image: String::new(),
            name: name.to_string(),
            category,
            price,
            stock,
            status: ProductStatus::Active,
            sales: (id * 3) as f64,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
                + Duration::hours(id as i64),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "USB-C Cable", Category::Electronics, 9.9, 120),
            product(2, "Linen Shirt", Category::Clothing, 45.0, 8),
            product(3, "Rust in Action", Category::Books, 39.0, 0),
            product(4, "usb hub", Category::Electronics, 29.0, 3),
            product(5, "Wool Scarf", Category::Clothing, 25.0, 15),
        ]
    }

    fn ids(page: &PageResult<Product>) -> Vec<u64> {
        page.data.iter().map(|p| p.id).collect()
    }

    fn many(count: u64) -> Vec<Product> {
        (1..=count)
            .map(|id| product(id, &format!("Item {id}"), Category::Books, 10.0, 5))
            .collect()
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let page = query(&catalog(), &QueryDescriptor::new());
        assert_eq!(ids(&page), vec![5, 4, 3, 2, 1]);
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 10);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let descriptor = QueryDescriptor::new()
            .search("USB")
            .sort(SortKey::Price, SortOrder::Asc);
        assert_eq!(ids(&query(&catalog(), &descriptor)), vec![1, 4]);
    }

    #[test]
    fn test_stock_buckets() {
        let low = QueryDescriptor::new().stock_status(StockStatus::LowStock);
        assert_eq!(ids(&query(&catalog(), &low)), vec![4, 2]);

        let out = QueryDescriptor::new().stock_status(StockStatus::OutOfStock);
        assert_eq!(ids(&query(&catalog(), &out)), vec![3]);

        let in_stock = QueryDescriptor::new().stock_status(StockStatus::InStock);
        assert_eq!(query(&catalog(), &in_stock).total, 4);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let descriptor = QueryDescriptor::new().price_range(Some(25.0), Some(39.0));
        assert_eq!(ids(&query(&catalog(), &descriptor)), vec![5, 4, 3]);
    }

    #[test]
    fn test_nan_price_bound_matches_nothing() {
        let descriptor = QueryDescriptor::new().price_range(Some(f64::NAN), None);
        assert_eq!(query(&catalog(), &descriptor).total, 0);
    }

    #[test]
    fn test_unrecognized_selector_matches_nothing() {
        let mut descriptor = QueryDescriptor::new();
        descriptor.filter.category = Selector::parse("toys");
        assert_eq!(
            descriptor.filter.category,
            Some(Selector::Unrecognized("toys".to_string()))
        );
        assert_eq!(query(&catalog(), &descriptor).total, 0);

        assert_eq!(Selector::<Category>::parse(""), None);
    }

    #[test]
    fn test_status_filter() {
        let mut products = catalog();
        products[1].status = ProductStatus::Inactive;
        let descriptor = QueryDescriptor::new().status(ProductStatus::Inactive);
        assert_eq!(ids(&query(&products, &descriptor)), vec![2]);
    }

    #[test]
    fn test_name_sort_is_case_folded() {
        let descriptor = QueryDescriptor::new().sort(SortKey::Name, SortOrder::Asc);
        // "usb hub" sorts before "usb-c cable": ' ' < '-'
        assert_eq!(ids(&query(&catalog(), &descriptor)), vec![2, 3, 4, 1, 5]);
    }

    #[test]
    fn test_compare_text() {
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("banana", "Banana"), Ordering::Less);
        assert_eq!(compare_text("Banana", "banana"), Ordering::Greater);
        assert_eq!(compare_text("aB", "Ab"), Ordering::Less);
        assert_eq!(compare_text("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_name_sort_puts_lowercase_first_on_case_ties() {
        let products = vec![
            product(1, "Banana", Category::Books, 1.0, 1),
            product(2, "banana", Category::Books, 1.0, 1),
        ];
        let asc = QueryDescriptor::new().sort(SortKey::Name, SortOrder::Asc);
        assert_eq!(ids(&query(&products, &asc)), vec![2, 1]);

        let desc = QueryDescriptor::new().sort(SortKey::Name, SortOrder::Desc);
        assert_eq!(ids(&query(&products, &desc)), vec![1, 2]);
    }

    #[test]
    fn test_unknown_sort_values_fall_back() {
        assert_eq!(SortKey::parse_or_default("image"), SortKey::CreatedAt);
        assert_eq!(SortOrder::parse_or_default("ASC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse_or_default("asc"), SortOrder::Asc);
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let products = vec![
            product(1, "A", Category::Books, 10.0, 1),
            product(2, "B", Category::Books, 5.0, 1),
            product(3, "C", Category::Books, 10.0, 1),
        ];
        let asc = QueryDescriptor::new().sort(SortKey::Price, SortOrder::Asc);
        assert_eq!(ids(&query(&products, &asc)), vec![2, 1, 3]);

        let desc = QueryDescriptor::new().sort(SortKey::Price, SortOrder::Desc);
        assert_eq!(ids(&query(&products, &desc)), vec![1, 3, 2]);
    }

    #[test]
    fn test_pagination_of_25_items() {
        let products = many(25);

        let page2 = query(&products, &QueryDescriptor::new().page(2, 10));
        assert_eq!(page2.data.len(), 10);
        assert_eq!(page2.total, 25);

        let page3 = query(&products, &QueryDescriptor::new().page(3, 10));
        assert_eq!(page3.data.len(), 5);
        assert_eq!(page3.total, 25);

        let page4 = query(&products, &QueryDescriptor::new().page(4, 10));
        assert!(page4.data.is_empty());
        assert_eq!(page4.total, 25);
    }

    #[test]
    fn test_non_positive_pagination_is_normalized() {
        let pagination = Pagination::new(0, -5);
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.page_size(), 1);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let page = query(&many(3), &QueryDescriptor::new().page(i64::MAX, i64::MAX));
        assert!(page.data.is_empty());
        assert_eq!(page.total, 3);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn arb_category() -> impl Strategy<Value = Category> {
        prop_oneof![
            Just(Category::Electronics),
            Just(Category::Clothing),
            Just(Category::Books),
        ]
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(
            ("[a-dA-D]{1,4}", arb_category(), 1u32..50, 0i64..20, any::<bool>(), 0i64..5),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, category, price, stock, active, hours))| {
                    let mut p = product(i as u64 + 1, &name, category, price as f64, stock);
                    p.status = if active {
                        ProductStatus::Active
                    } else {
                        ProductStatus::Inactive
                    };
                    p.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                        + Duration::hours(hours);
                    p
                })
                .collect()
        })
    }

    fn arb_sort_key() -> impl Strategy<Value = SortKey> {
        prop_oneof![
            Just(SortKey::Name),
            Just(SortKey::Category),
            Just(SortKey::Price),
            Just(SortKey::Stock),
            Just(SortKey::Sales),
            Just(SortKey::CreatedAt),
        ]
    }

    proptest! {
        #[test]
        fn prop_filters_commute(products in arb_products(), category in arb_category(), min in 1u32..30) {
            let filter = ProductFilter {
                search: "a".to_string(),
                category: Some(Selector::Is(category)),
                stock_status: Some(StockStatus::InStock),
                status: Some(Selector::Is(ProductStatus::Active)),
                min_price: Some(min as f64),
                max_price: Some(40.0),
            };
            let forward: Vec<u64> = products
                .iter()
                .filter(|p| filter.matches_search(p))
                .filter(|p| filter.matches_category(p))
                .filter(|p| filter.matches_stock(p))
                .filter(|p| filter.matches_status(p))
                .filter(|p| filter.matches_price(p))
                .map(|p| p.id)
                .collect();
            let backward: Vec<u64> = products
                .iter()
                .filter(|p| filter.matches_price(p))
                .filter(|p| filter.matches_status(p))
                .filter(|p| filter.matches_stock(p))
                .filter(|p| filter.matches_category(p))
                .filter(|p| filter.matches_search(p))
                .map(|p| p.id)
                .collect();
            let combined: Vec<u64> = filter_products(&products, &filter).iter().map(|p| p.id).collect();
            prop_assert_eq!(&forward, &backward);
            prop_assert_eq!(&forward, &combined);
        }

        #[test]
        fn prop_pages_cover_filtered_set(products in arb_products(), page_size in 1i64..8, key in arb_sort_key(), asc in any::<bool>()) {
            let order = if asc { SortOrder::Asc } else { SortOrder::Desc };
            let all = query(&products, &QueryDescriptor::new().sort(key, order).page(1, i64::MAX));

            let mut collected = Vec::new();
            let pages = (all.total as i64 + page_size - 1) / page_size;
            for page in 1..=pages {
                let result = query(&products, &QueryDescriptor::new().sort(key, order).page(page, page_size));
                prop_assert_eq!(result.total, all.total);
                prop_assert!(result.data.len() <= page_size as usize);
                collected.extend(result.data.into_iter().map(|p| p.id));
            }
            let expected: Vec<u64> = all.data.iter().map(|p| p.id).collect();
            prop_assert_eq!(collected, expected);
        }

        #[test]
        fn prop_equal_keys_keep_relative_order(products in arb_products(), key in arb_sort_key(), asc in any::<bool>()) {
            let order = if asc { SortOrder::Asc } else { SortOrder::Desc };
            let mut refs: Vec<&Product> = products.iter().collect();
            sort_products(&mut refs, SortSpec { key, order });
            for pair in refs.windows(2) {
                if compare_by(key, pair[0], pair[1]) == Ordering::Equal {
                    // ids are assigned in input order
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }
    }
}

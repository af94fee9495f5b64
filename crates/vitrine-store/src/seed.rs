//! # Seed Data
//!
//! Initial contents for the store: either a JSON file of products or a
//! deterministic generated set.
//!
//! ## Generated Products
//! ```text
//!  id  1 ───────────────────────────────────────────────►  id N
//!  createdAt: now − 30 days ───────────────────────────►  now
//!
//!  category cycles electronics → clothing → books
//!  names come from a fixed table per category, with a size/variant suffix
//! ```
//! Higher ids are newer, so the default `createdAt desc` listing shows the
//! newest products first. No randomness is involved: the same `count` and
//! `now` always produce the same products.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use vitrine_core::{Category, Product, ProductStatus};

use crate::error::StoreResult;

/// Window over which generated `createdAt` values are spread.
pub const CREATED_AT_WINDOW_DAYS: i64 = 30;

const ELECTRONICS: &[&str] = &[
    "Wireless Headphones",
    "Bluetooth Speaker",
    "USB-C Cable",
    "Mechanical Keyboard",
    "Gaming Mouse",
    "4K Monitor",
    "Smart Watch",
    "Portable Charger",
    "Webcam",
    "Tablet Stand",
];

const CLOTHING: &[&str] = &[
    "Cotton T-Shirt",
    "Denim Jacket",
    "Wool Sweater",
    "Running Shoes",
    "Rain Coat",
    "Linen Shirt",
    "Chino Pants",
    "Baseball Cap",
    "Silk Scarf",
    "Hoodie",
];

const BOOKS: &[&str] = &[
    "Rust in Action",
    "The Pragmatic Programmer",
    "Designing Data-Intensive Applications",
    "Clean Architecture",
    "Refactoring",
    "Domain-Driven Design",
    "The Art of Computer Programming",
    "Structure and Interpretation",
    "Working Effectively with Legacy Code",
    "Release It!",
];

const VARIANTS: &[&str] = &["", " Pro", " Lite", " Plus", " Mini"];

/// Reads a JSON array of products.
///
/// ## Errors
/// [`StoreError::SeedLoad`](crate::StoreError::SeedLoad) if the file can't be
/// read or isn't a valid product array.
pub fn load_seed_file(path: impl AsRef<Path>) -> StoreResult<Vec<Product>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let products: Vec<Product> = serde_json::from_str(&raw)?;

    info!(path = %path.display(), count = products.len(), "Loaded seed file");
    Ok(products)
}

/// Generates `count` products with ids `1..=count`.
pub fn generate(count: usize, now: DateTime<Utc>) -> Vec<Product> {
    let window = Duration::days(CREATED_AT_WINDOW_DAYS).num_seconds();
    let products: Vec<Product> = (0..count)
        .map(|idx| generate_product(idx, count, window, now))
        .collect();

    debug!(count = products.len(), "Generated seed products");
    products
}

fn generate_product(idx: usize, count: usize, window_secs: i64, now: DateTime<Utc>) -> Product {
    let category = Category::ALL[idx % Category::ALL.len()];
    let names = match category {
        Category::Electronics => ELECTRONICS,
        Category::Clothing => CLOTHING,
        Category::Books => BOOKS,
    };
    let round = idx / Category::ALL.len();
    let base = names[round % names.len()];
    let variant = VARIANTS[(round / names.len()) % VARIANTS.len()];

    // Category price bands: electronics 199-6199, clothing 99-3099, books 49-549
    let price = match category {
        Category::Electronics => 199.0 + ((idx * 373) % 6_000) as f64,
        Category::Clothing => 99.0 + ((idx * 211) % 3_000) as f64,
        Category::Books => 49.0 + ((idx * 97) % 500) as f64,
    };

    // Every seventh product is out of stock so the stock filter has data
    let stock = if idx % 7 == 6 { 0 } else { ((idx * 13) % 120) as i64 };
    let status = if idx % 5 == 4 {
        ProductStatus::Inactive
    } else {
        ProductStatus::Active
    };

    // Oldest first: the last product lands on `now`
    let step = if count > 1 { window_secs / (count as i64 - 1) } else { 0 };
    let age = window_secs - step * idx as i64;
    let created_at = now - Duration::seconds(age.max(0));

    Product {
        id: idx as u64 + 1,
        image: format!("https://picsum.photos/seed/vitrine-{}/200/200", idx + 1),
        name: format!("{}{}", base, variant),
        category,
        price,
        stock,
        status,
        sales: ((idx * 37) % 500) as f64,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vitrine_core::validation::{validate_price, validate_stock};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generate_is_deterministic() {
        assert_eq!(generate(40, now()), generate(40, now()));
    }

    #[test]
    fn test_generated_products_respect_invariants() {
        let products = generate(90, now());

        assert_eq!(products.len(), 90);
        for (idx, p) in products.iter().enumerate() {
            assert_eq!(p.id, idx as u64 + 1);
            assert!(validate_price(p.price).is_ok());
            assert!(validate_stock(p.stock).is_ok());
        }
        for category in Category::ALL {
            assert!(products.iter().any(|p| p.category == category));
        }
        assert!(products.iter().any(|p| p.stock == 0));
        assert!(products.iter().any(|p| !p.is_active()));
    }

    #[test]
    fn test_created_at_is_oldest_first_within_window() {
        let products = generate(50, now());
        let earliest = now() - Duration::days(CREATED_AT_WINDOW_DAYS);

        assert!(products
            .windows(2)
            .all(|w| w[0].created_at <= w[1].created_at));
        assert!(products.iter().all(|p| p.created_at >= earliest && p.created_at <= now()));
    }

    #[test]
    fn test_generate_single_and_empty() {
        assert!(generate(0, now()).is_empty());
        let one = generate(1, now());
        assert_eq!(one[0].created_at, now() - Duration::days(CREATED_AT_WINDOW_DAYS));
    }

    #[test]
    fn test_load_seed_file() {
        let path = std::env::temp_dir().join(format!("vitrine-seed-{}.json", std::process::id()));
        let products = generate(5, now());
        fs::write(&path, serde_json::to_string(&products).unwrap()).unwrap();

        let loaded = load_seed_file(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, products);
    }

    #[test]
    fn test_load_seed_file_missing() {
        let result = load_seed_file("/definitely/not/here/products.json");
        assert!(matches!(result, Err(crate::StoreError::SeedLoad(_))));
    }
}

//! # Seed Data Generator
//!
//! Writes a JSON file of mock products for the API to load at startup.
//!
//! ## Usage
//! ```bash
//! # Generate 50 products (default) into ./products.json
//! cargo run -p vitrine-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p vitrine-store --bin seed -- --count 200
//!
//! # Specify output path
//! cargo run -p vitrine-store --bin seed -- --out ./data/products.json
//! ```
//!
//! Then start the API with `VITRINE_SEED_PATH=./products.json`.

use std::env;
use std::fs;

use chrono::Utc;
use vitrine_core::{Category, StockStatus};
use vitrine_store::seed;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut out_path = String::from("./products.json");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Vitrine Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>     Number of products to generate (default: 50)");
                println!("  -o, --out <PATH>    Output JSON file (default: ./products.json)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Vitrine Seed Data Generator");
    println!("==============================");
    println!("Output:   {}", out_path);
    println!("Products: {}", count);
    println!();

    let products = seed::generate(count, Utc::now());
    let json = serde_json::to_string_pretty(&products)?;
    fs::write(&out_path, json)?;

    println!("✓ Wrote {} products", products.len());
    for category in Category::ALL {
        let n = products.iter().filter(|p| p.category == category).count();
        println!("  {:<12} {}", category.as_str(), n);
    }
    let out_of_stock = products
        .iter()
        .filter(|p| p.stock_status() == StockStatus::OutOfStock)
        .count();
    println!("  out of stock {}", out_of_stock);
    let inactive = products.iter().filter(|p| !p.is_active()).count();
    println!("  inactive     {}", inactive);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

//! # vitrine-store: Collection Store for Vitrine
//!
//! This crate owns the one mutable product collection in the system.
//! Data lives in memory and is reset on restart.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrine Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (GET /api/products)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   vitrine-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ ProductStore  │    │  StoreError   │    │    seed      │  │   │
//! │  │   │  (store.rs)   │    │  (error.rs)   │    │  (seed.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ RwLock<Vec<>> │    │ NotFound      │    │ JSON file    │  │   │
//! │  │   │ CRUD + bulk   │    │ Validation    │    │ generated    │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │ snapshot (Vec<Product>)                            │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  vitrine-core::query / vitrine-core::discount (pure, lock-free)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use vitrine_core::validation::ProductDraft;
//! use vitrine_core::{Category, QueryDescriptor};
//! use vitrine_store::ProductStore;
//!
//! # tokio_test_block(async {
//! let store = ProductStore::empty();
//! let created = store
//!     .insert(ProductDraft {
//!         name: Some("Desk Lamp".into()),
//!         category: Some(Category::Electronics),
//!         price: Some(39.5),
//!         stock: Some(12),
//!         ..Default::default()
//!     })
//!     .await?;
//! assert_eq!(created.id, 1);
//!
//! let page = store.list(&QueryDescriptor::default()).await;
//! assert_eq!(page.total, 1);
//! # Ok::<(), vitrine_store::StoreError>(())
//! # });
//! # fn tokio_test_block<F: std::future::Future<Output = Result<(), vitrine_store::StoreError>>>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f).unwrap();
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::ProductStore;

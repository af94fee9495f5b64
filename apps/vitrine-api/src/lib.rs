//! # vitrine-api
//!
//! HTTP/JSON shell over the product store and the core engines.
//!
//! ## Routes
//! ```text
//! GET    /api/products               list (filter, sort, paginate)
//! GET    /api/products/{id}          one product or 404
//! POST   /api/products               create → 201
//! PUT    /api/products/{id}          partial update
//! DELETE /api/products/{id}          delete → 204
//! DELETE /api/products               bulk delete { ids } → 204
//! POST   /api/products/bulk-status   bulk status { ids, status } → { updated }
//! POST   /api/discounts/calculate    price a cart { items } → CalculationResult
//! ```
//!
//! The binary in `main.rs` only loads config, seeds the store and serves
//! [`app`]. Tests drive the same router in-process.

pub mod config;
pub mod error;
pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use vitrine_store::ProductStore;

pub use error::{ApiError, ApiResult, ErrorCode};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: ProductStore,
}

/// Builds the fully configured application router.
pub fn app(store: ProductStore) -> Router {
    routes::router()
        // CORS - the admin UI runs on its own dev-server origin
        .layer(CorsLayer::permissive())
        // Trace - request spans (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { store })
}

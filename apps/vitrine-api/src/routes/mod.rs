//! Route table.

pub mod discounts;
pub mod products;

use axum::Router;

use crate::AppState;

/// All routes, without middleware or state.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(products::router())
        .merge(discounts::router())
}

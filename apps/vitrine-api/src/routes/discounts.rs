//! Checkout pricing over the current catalog.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::debug;

use vitrine_core::discount::{calculate, CartItem};
use vitrine_core::CalculationResult;

use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/discounts/calculate", post(calculate_cart))
}

#[derive(Debug, Deserialize)]
pub struct CalculateBody {
    pub items: Vec<CartItem>,
}

/// Prices the cart against a catalog snapshot taken at request time.
async fn calculate_cart(
    State(state): State<AppState>,
    body: Result<Json<CalculateBody>, JsonRejection>,
) -> ApiResult<Json<CalculationResult>> {
    let Json(body) = body?;
    let catalog = state.store.catalog().await;
    let result = calculate(&catalog, &body.items)?;

    debug!(
        lines = result.discounts.len(),
        original_total = result.original_total,
        final_total = result.final_total,
        applied = ?result.applied_discount,
        "Calculated cart"
    );
    Ok(Json(result))
}

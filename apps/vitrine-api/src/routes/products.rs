//! # Product Routes
//!
//! CRUD and bulk endpoints over the product store.
//!
//! ## Query String → QueryDescriptor
//! ```text
//!  param        absent / empty      unparseable           parsed
//!  ──────────   ─────────────────   ───────────────────   ─────────────────
//!  page         1                   1                     max(page, 1)
//!  pageSize     10                  10                    max(size, 1)
//!  search       no constraint       -                     raw substring
//!  category     no constraint       matches nothing       exact match
//!  status       no constraint       matches nothing       exact match
//!  stockStatus  no constraint       no constraint         bucket
//!  minPrice     no bound            NaN (matches none)    inclusive bound
//!  maxPrice     no bound            NaN (matches none)    inclusive bound
//!  sortKey      createdAt           createdAt             key
//!  sortOrder    desc                desc                  "asc" → asc
//! ```
//!
//! page and pageSize take the leading integer ("2.5" → 2). A repeated key
//! keeps its first value.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use vitrine_core::query::{Pagination, ProductFilter, Selector, SortKey, SortOrder, SortSpec};
use vitrine_core::validation::{ProductDraft, ProductPatch};
use vitrine_core::{PageResult, Product, ProductId, ProductStatus, QueryDescriptor, StockStatus};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/products",
            get(list_products)
                .post(create_product)
                .delete(bulk_delete_products),
        )
        .route("/api/products/bulk-status", post(bulk_update_status))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

// =============================================================================
// Request Types
// =============================================================================

/// Raw list query string. Every value is taken as text so that no input can
/// make the request fail to decode.
#[derive(Debug, Default)]
pub struct ListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub stock_status: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort_key: Option<String>,
    pub sort_order: Option<String>,
}

impl ListParams {
    /// Collects decoded `key=value` pairs. Unknown keys are ignored and the
    /// first occurrence of a repeated key wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = ListParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "pageSize" => &mut params.page_size,
                "search" => &mut params.search,
                "category" => &mut params.category,
                "stockStatus" => &mut params.stock_status,
                "status" => &mut params.status,
                "minPrice" => &mut params.min_price,
                "maxPrice" => &mut params.max_price,
                "sortKey" => &mut params.sort_key,
                "sortOrder" => &mut params.sort_order,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    pub fn into_descriptor(self) -> QueryDescriptor {
        let filter = ProductFilter {
            search: self.search.unwrap_or_default(),
            category: self.category.as_deref().and_then(Selector::parse),
            stock_status: self
                .stock_status
                .as_deref()
                .and_then(|raw| raw.parse::<StockStatus>().ok()),
            status: self.status.as_deref().and_then(Selector::parse),
            min_price: parse_price_bound(self.min_price.as_deref()),
            max_price: parse_price_bound(self.max_price.as_deref()),
        };

        let sort = SortSpec {
            key: SortKey::parse_or_default(self.sort_key.as_deref().unwrap_or("")),
            order: SortOrder::parse_or_default(self.sort_order.as_deref().unwrap_or("")),
        };

        let pagination = Pagination::new(
            parse_int_or(self.page.as_deref(), 1),
            parse_int_or(self.page_size.as_deref(), vitrine_core::DEFAULT_PAGE_SIZE as i64),
        );

        QueryDescriptor {
            filter,
            sort,
            pagination,
        }
    }
}

fn parse_int_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(parse_leading_int).unwrap_or(default)
}

/// Reads an optionally signed run of digits after leading whitespace and
/// ignores whatever follows: "12abc" → 12, "2.5" → 2, "abc" → None.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let sign_len = usize::from(raw.starts_with(['+', '-']));
    let digits_len = raw[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    raw[..sign_len + digits_len].parse().ok()
}

/// Empty means no bound; anything else that isn't a number becomes NaN.
fn parse_price_bound(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.parse().unwrap_or(f64::NAN))
}

/// Path ids that aren't integers can't name a product.
fn parse_id(raw: &str) -> ApiResult<ProductId> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::not_found("Product", raw))
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteBody {
    pub ids: Vec<ProductId>,
}

#[derive(Debug, Deserialize)]
pub struct BulkStatusBody {
    pub ids: Vec<ProductId>,
    pub status: ProductStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkStatusResponse {
    pub updated: usize,
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<PageResult<Product>>> {
    let Query(pairs) = query?;
    let descriptor = ListParams::from_pairs(pairs).into_descriptor();
    Ok(Json(state.store.list(&descriptor).await))
}

async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id = parse_id(&raw_id)?;
    state
        .store
        .get_by_id(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", &raw_id))
}

async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(draft) = body?;
    let product = state.store.insert(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let id = parse_id(&raw_id)?;
    let Json(patch) = body?;
    Ok(Json(state.store.update(id, patch).await?))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&raw_id)?;
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn bulk_delete_products(
    State(state): State<AppState>,
    body: Result<Json<BulkDeleteBody>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(body) = body?;
    state.store.bulk_delete(&body.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `updated` echoes the number of ids requested, matched or not.
async fn bulk_update_status(
    State(state): State<AppState>,
    body: Result<Json<BulkStatusBody>, JsonRejection>,
) -> ApiResult<Json<BulkStatusResponse>> {
    let Json(body) = body?;
    let matched = state.store.bulk_update_status(&body.ids, body.status).await;
    debug!(requested = body.ids.len(), matched, "Bulk status request");

    Ok(Json(BulkStatusResponse {
        updated: body.ids.len(),
    }))
}

// =============================================================================
// Tests
// =============================================================================

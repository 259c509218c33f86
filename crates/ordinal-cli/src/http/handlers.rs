//! Request handlers. One function per route.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Extension, Path, Query, State};
use ordinal_core::domain::{Actor, CollectionKey, ItemId};
use ordinal_core::{
    ContentFilter, OrderSnapshot, OrderSummary, OrderedListing, ReconcileSummary, ReorderRequest,
};
use serde::Serialize;

use super::AppState;
use super::error::HttpError;

fn collection_key(raw: &str) -> Result<CollectionKey, HttpError> {
    Ok(CollectionKey::new(raw).map_err(ordinal_core::ApiError::from)?)
}

// -----------------------------------------------------------------------
// POST /order/{collection}
// -----------------------------------------------------------------------

/// Body is the full ordered list of item ids, e.g. `[12, 7, "ext-3"]`.
pub async fn reorder(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(collection): Path<String>,
    body: Bytes,
) -> Result<Json<OrderSummary>, HttpError> {
    let collection = collection_key(&collection)?;
    // 403 takes precedence over any body problem.
    state.app.api.authorize(&actor, &collection).await?;
    let ordered_item_ids: Vec<ItemId> =
        serde_json::from_slice(&body).map_err(|e| HttpError::MalformedBody(e.to_string()))?;

    let summary = state
        .app
        .api
        .reorder(ReorderRequest::new(collection, ordered_item_ids, actor))
        .await?;
    Ok(Json(summary))
}

// -----------------------------------------------------------------------
// GET /order/{collection}
// -----------------------------------------------------------------------

pub async fn get_order(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<Json<OrderSnapshot>, HttpError> {
    let collection = collection_key(&collection)?;
    Ok(Json(state.app.api.order(&collection).await?))
}

// -----------------------------------------------------------------------
// DELETE /order/{collection}
// -----------------------------------------------------------------------

#[derive(Serialize)]
pub struct ResetResponse {
    collection: CollectionKey,
    cleared: bool,
}

pub async fn reset_order(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(collection): Path<String>,
) -> Result<Json<ResetResponse>, HttpError> {
    let collection = collection_key(&collection)?;
    let cleared = state.app.api.reset(&collection, &actor).await?;
    Ok(Json(ResetResponse {
        collection,
        cleared,
    }))
}

// -----------------------------------------------------------------------
// POST /order/{collection}/reconcile
// -----------------------------------------------------------------------

pub async fn reconcile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(collection): Path<String>,
) -> Result<Json<ReconcileSummary>, HttpError> {
    let collection = collection_key(&collection)?;
    Ok(Json(state.app.api.reconcile(&collection, &actor).await?))
}

// -----------------------------------------------------------------------
// GET /items/{collection}?status=&search=
// -----------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListingResponse {
    collection: CollectionKey,
    items: OrderedListing,
}

pub async fn list_items(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(filter): Query<ContentFilter>,
) -> Result<Json<ListingResponse>, HttpError> {
    let collection = collection_key(&collection)?;
    let items = state.app.query.list_ordered(&collection, &filter).await?;
    Ok(Json(ListingResponse { collection, items }))
}

pub async fn health() -> &'static str {
    "ok"
}

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::feed::pagination::PageRequest;
use crate::feed::query::FeedFilter;
use crate::feed::{fetch_feed, fetch_related};
use crate::models::photo::{FeedResponse, Photo, RelatedResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/photos", get(list_photos))
        .route("/api/photos/related", get(related_photos))
        .route("/api/photos/{id}", get(get_photo))
}

/// page/limit arrive as raw strings so that malformed values can degrade to
/// defaults instead of rejecting the request.
#[derive(Debug, Deserialize)]
struct FeedParams {
    page: Option<String>,
    limit: Option<String>,
    search: Option<String>,
    tag: Option<String>,
    ids: Option<String>,
}

/// The gallery feed. Exactly one retrieval mode applies per request
/// (ids > tag > search > explore); with no filter at all, each call returns
/// an independent random sample, so explore pages are intentionally not
/// stable across requests.
async fn list_photos(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<FeedResponse>, AppError> {
    let page = PageRequest::from_raw(params.page.as_deref(), params.limit.as_deref());
    let filter = FeedFilter::resolve(
        params.ids.as_deref(),
        params.tag.as_deref(),
        params.search.as_deref(),
    );

    let feed = fetch_feed(&state.repo, &state.demoted, filter, page).await?;
    Ok(Json(feed))
}

#[derive(Debug, Deserialize)]
struct RelatedParams {
    id: Option<String>,
    tags: Option<String>,
}

/// Related photos for the detail view. A missing or unparseable id yields an
/// empty set without querying; an id that no longer exists just gets a
/// recency-only fill.
async fn related_photos(
    State(state): State<AppState>,
    Query(params): Query<RelatedParams>,
) -> Result<Json<RelatedResponse>, AppError> {
    let Some(id) = params
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
    else {
        return Ok(Json(RelatedResponse { data: vec![] }));
    };

    let tags: Vec<String> = params
        .tags
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    let data = fetch_related(&state.repo, id, &tags).await?;
    Ok(Json(RelatedResponse { data }))
}

async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Photo>, AppError> {
    let photo = sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".into()))?;

    Ok(Json(photo))
}

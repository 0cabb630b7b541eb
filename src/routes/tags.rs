use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sqlx::FromRow;

use crate::error::AppError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/tags", get(list_tags))
}

#[derive(Debug, Serialize, FromRow)]
struct TagCount {
    name: String,
    count: i64,
}

/// The 20 most-used tags across the corpus, for the tag filter bar.
async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagCount>>, AppError> {
    let tags = sqlx::query_as::<_, TagCount>(
        "SELECT u.tag AS name, COUNT(*) AS count
         FROM photos p
         CROSS JOIN unnest(p.tags) AS u(tag)
         GROUP BY u.tag
         ORDER BY count DESC, name
         LIMIT 20",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(tags))
}

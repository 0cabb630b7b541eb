use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::feed::pagination::FeedMeta;

/// A gallery photo as stored and as served. The binary asset itself lives in
/// the image store; `image_url` is an opaque reference into it.
///
/// The corpus is not normalized: `prompt` may be empty, `tags` may be empty
/// or contain casing duplicates. Readers must tolerate all of that.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: Uuid,
    pub title: String,
    pub prompt: Option<String>,
    pub image_url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub data: Vec<Photo>,
    pub meta: FeedMeta,
}

#[derive(Debug, Serialize)]
pub struct RelatedResponse {
    pub data: Vec<Photo>,
}

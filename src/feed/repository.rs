use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::photo::Photo;

use super::query::FeedFilter;
use super::ranking::DemotionList;

/// Read contract over the photo corpus. The feed and related resolvers only
/// ever read; creation and deletion happen on other surfaces entirely.
///
/// Implementations must support concurrent calls; the feed issues its data
/// and count queries in parallel.
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Number of photos matching the filter.
    async fn count(&self, filter: &FeedFilter) -> Result<i64, AppError>;

    /// One page of photos matching the filter, ordered by demotion priority
    /// first and `created_at` descending within each priority class.
    async fn find_ranked(
        &self,
        filter: &FeedFilter,
        demoted: &DemotionList,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Photo>, AppError>;

    /// A uniformly random sample of up to `limit` photos from the whole
    /// corpus. Successive calls are independent draws and do not form a
    /// stable pagination sequence.
    async fn sample(&self, limit: i64) -> Result<Vec<Photo>, AppError>;

    /// The most recent photos sharing at least one tag (exact match) with
    /// `tags`, excluding the photo with id `exclude`.
    async fn find_by_tags_excluding(
        &self,
        tags: &[String],
        exclude: Uuid,
        limit: i64,
    ) -> Result<Vec<Photo>, AppError>;

    /// The most recent photos whose id is not in the exclusion set.
    async fn find_recent_excluding(
        &self,
        exclude: &HashSet<Uuid>,
        limit: i64,
    ) -> Result<Vec<Photo>, AppError>;
}

//! The feed and related-content resolvers: the read paths behind the
//! gallery's browse, search, saved and detail views.

pub mod pagination;
pub mod query;
pub mod ranking;
pub mod repository;

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::photo::{FeedResponse, Photo};

use pagination::PageRequest;
use query::FeedFilter;
use ranking::DemotionList;
use repository::PhotoRepository;

/// Maximum size of a related-content result.
pub const RELATED_LIMIT: i64 = 6;
/// Below this many tag matches, the result is topped up with recent photos.
const RELATED_FILL_THRESHOLD: usize = 4;

/// Resolves one feed page.
///
/// An empty id list returns an empty page without touching the repository.
/// Explore mode (no filter) returns a fresh random sample per call, with the
/// corpus-wide total in the metadata; "page 2" of an explore feed may repeat
/// or skip photos seen on "page 1", which is the intended shuffle behavior.
/// All other modes are deterministic: ranked by demotion priority, then
/// recency, then offset-paginated. Data and count queries run concurrently.
pub async fn fetch_feed<R: PhotoRepository>(
    repo: &R,
    demoted: &DemotionList,
    filter: FeedFilter,
    page: PageRequest,
) -> Result<FeedResponse, AppError> {
    if let FeedFilter::Ids(ids) = &filter {
        if ids.is_empty() {
            return Ok(FeedResponse {
                data: vec![],
                meta: page.meta(0),
            });
        }
    }

    let (data, total) = if filter.filtered() {
        tokio::try_join!(
            repo.find_ranked(&filter, demoted, page.skip(), page.limit),
            repo.count(&filter)
        )?
    } else {
        tokio::try_join!(repo.sample(page.limit), repo.count(&filter))?
    };

    Ok(FeedResponse {
        data,
        meta: page.meta(total),
    })
}

/// Resolves related content for one focal photo: up to [`RELATED_LIMIT`]
/// photos, the focal photo excluded, no duplicates.
///
/// Photos sharing a tag come first, most recent first. When fewer than
/// `RELATED_FILL_THRESHOLD` of those exist (rare or absent tags), the
/// remaining capacity is filled with the most recent photos outside the
/// exclusion set, so the related panel is never needlessly empty.
pub async fn fetch_related<R: PhotoRepository>(
    repo: &R,
    id: Uuid,
    tags: &[String],
) -> Result<Vec<Photo>, AppError> {
    let mut related = if tags.is_empty() {
        vec![]
    } else {
        repo.find_by_tags_excluding(tags, id, RELATED_LIMIT).await?
    };

    if related.len() < RELATED_FILL_THRESHOLD {
        let mut exclude: HashSet<Uuid> = related.iter().map(|p| p.id).collect();
        exclude.insert(id);

        let fill = repo
            .find_recent_excluding(&exclude, RELATED_LIMIT - related.len() as i64)
            .await?;
        related.extend(fill);
    }

    Ok(related)
}

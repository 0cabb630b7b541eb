use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::AppError;
use crate::feed::query::FeedFilter;
use crate::feed::ranking::{self, DemotionList, PRIORITY_DEMOTED, PRIORITY_NORMAL};
use crate::feed::repository::PhotoRepository;
use crate::models::photo::Photo;

/// Postgres-backed photo repository.
#[derive(Clone)]
pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &FeedFilter) {
    match filter {
        FeedFilter::Ids(ids) => {
            qb.push(" WHERE id = ANY(").push_bind(ids.clone()).push(")");
        }
        FeedFilter::Tag(tag) => {
            qb.push(" WHERE ").push_bind(tag.clone()).push(" = ANY(tags)");
        }
        FeedFilter::Search(q) => {
            let pattern = ranking::like_pattern(q);
            qb.push(" WHERE (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR prompt ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR EXISTS (SELECT 1 FROM unnest(tags) AS t WHERE t ILIKE ")
                .push_bind(pattern)
                .push("))");
        }
        FeedFilter::All => {}
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    async fn count(&self, filter: &FeedFilter) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM photos");
        push_filter(&mut qb, filter);

        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn find_ranked(
        &self,
        filter: &FeedFilter,
        demoted: &DemotionList,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Photo>, AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM photos");
        push_filter(&mut qb, filter);

        if demoted.is_empty() {
            qb.push(" ORDER BY created_at DESC");
        } else {
            let patterns = demoted.like_patterns();
            qb.push(" ORDER BY CASE WHEN title ILIKE ANY(")
                .push_bind(patterns.clone())
                .push(") OR prompt ILIKE ANY(")
                .push_bind(patterns.clone())
                .push(") OR EXISTS (SELECT 1 FROM unnest(tags) AS t WHERE t ILIKE ANY(")
                .push_bind(patterns)
                .push(format!(
                    ")) THEN {PRIORITY_DEMOTED} ELSE {PRIORITY_NORMAL} END, created_at DESC"
                ));
        }

        qb.push(" OFFSET ")
            .push_bind(skip)
            .push(" LIMIT ")
            .push_bind(limit);

        Ok(qb.build_query_as::<Photo>().fetch_all(&self.pool).await?)
    }

    async fn sample(&self, limit: i64) -> Result<Vec<Photo>, AppError> {
        // Full reshuffle per draw; there is no offset and no stable ordering
        // across calls.
        let photos = sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos ORDER BY random() LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(photos)
    }

    async fn find_by_tags_excluding(
        &self,
        tags: &[String],
        exclude: Uuid,
        limit: i64,
    ) -> Result<Vec<Photo>, AppError> {
        let photos = sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos
             WHERE id <> $1 AND tags && $2
             ORDER BY created_at DESC
             LIMIT $3",
        )
        .bind(exclude)
        .bind(tags)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(photos)
    }

    async fn find_recent_excluding(
        &self,
        exclude: &HashSet<Uuid>,
        limit: i64,
    ) -> Result<Vec<Photo>, AppError> {
        let exclude: Vec<Uuid> = exclude.iter().copied().collect();

        let photos = sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos
             WHERE id <> ALL($1)
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(&exclude)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(photos)
    }
}

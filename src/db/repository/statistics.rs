//! Read-only review statistics projection
//!
//! Aggregates are computed from the current review rows at call time;
//! nothing here is persisted or cached, so every call reflects the latest
//! committed data.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::ReviewStatistics;
use crate::error::{Result, StoreError};

/// Compute aggregate review statistics for one reviewed object
///
/// Returns `None` when the object does not exist. With zero reviews the
/// totals are 0 and `average_rating` is absent; the average only covers
/// reviews that carry a star rating.
pub async fn for_object(pool: &PgPool, object_id: Uuid) -> Result<Option<ReviewStatistics>> {
    let row = sqlx::query_as::<_, ReviewStatistics>(
        r#"
        SELECT o.id AS object_id,
               o.object_type,
               o.object_name,
               COUNT(r.id) AS total_reviews,
               AVG(r.star_rating)::float8 AS average_rating,
               COUNT(r.id) FILTER (WHERE r.thumbs_rating = 'up') AS thumbs_up_count,
               COUNT(r.id) FILTER (WHERE r.thumbs_rating = 'down') AS thumbs_down_count
        FROM reviewed_objects o
        LEFT JOIN reviews r ON r.reviewed_object_id = o.id
        WHERE o.id = $1
        GROUP BY o.id, o.object_type, o.object_name
        "#,
    )
    .bind(object_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("object statistics", e))?;

    Ok(row)
}

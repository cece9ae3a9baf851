//! Review repository for database operations
//!
//! One reviewer may review a given object at most once; the store rejects
//! a second review for the same pair. Every review must carry at least one
//! content field (text, stars, or thumbs), enforced by a check constraint.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewReview, ReviewPatch, ReviewRow};
use crate::error::{Result, StoreError};

/// Insert a new review and return the stored row
///
/// Rejected by the store when the (reviewer, object) pair already has a
/// review, when the star rating falls outside 0..=5, when no content
/// field is set, or when either referenced row does not exist.
pub async fn create(pool: &PgPool, review: &NewReview) -> Result<ReviewRow> {
    let row = sqlx::query_as::<_, ReviewRow>(
        r#"
        INSERT INTO reviews (reviewer_id, reviewed_object_id, text_review, star_rating, thumbs_rating)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, reviewer_id, reviewed_object_id, text_review, star_rating, thumbs_rating,
                  created_at, updated_at
        "#,
    )
    .bind(review.reviewer_id)
    .bind(review.reviewed_object_id)
    .bind(&review.text_review)
    .bind(review.star_rating)
    .bind(review.thumbs_rating.map(|t| t.as_str()))
    .fetch_one(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("create review", e))?;

    Ok(row)
}

/// Find review by ID
pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ReviewRow>> {
    let row = sqlx::query_as::<_, ReviewRow>(
        r#"
        SELECT id, reviewer_id, reviewed_object_id, text_review, star_rating, thumbs_rating,
               created_at, updated_at
        FROM reviews
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("get review", e))?;

    Ok(row)
}

/// Find the unique review one reviewer left on one object
pub async fn get_by_reviewer_and_object(
    pool: &PgPool,
    reviewer_id: Uuid,
    object_id: Uuid,
) -> Result<Option<ReviewRow>> {
    let row = sqlx::query_as::<_, ReviewRow>(
        r#"
        SELECT id, reviewer_id, reviewed_object_id, text_review, star_rating, thumbs_rating,
               created_at, updated_at
        FROM reviews
        WHERE reviewer_id = $1 AND reviewed_object_id = $2
        "#,
    )
    .bind(reviewer_id)
    .bind(object_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("get review by reviewer and object", e))?;

    Ok(row)
}

/// List one reviewer's reviews as a stable page, oldest first
pub async fn get_by_reviewer(
    pool: &PgPool,
    reviewer_id: Uuid,
    skip: i64,
    limit: i64,
) -> Result<Vec<ReviewRow>> {
    let rows = sqlx::query_as::<_, ReviewRow>(
        r#"
        SELECT id, reviewer_id, reviewed_object_id, text_review, star_rating, thumbs_rating,
               created_at, updated_at
        FROM reviews
        WHERE reviewer_id = $1
        ORDER BY created_at ASC, id ASC
        OFFSET $2 LIMIT $3
        "#,
    )
    .bind(reviewer_id)
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("list reviews by reviewer", e))?;

    Ok(rows)
}

/// List one object's reviews as a stable page, newest first
pub async fn get_by_object(
    pool: &PgPool,
    object_id: Uuid,
    skip: i64,
    limit: i64,
) -> Result<Vec<ReviewRow>> {
    let rows = sqlx::query_as::<_, ReviewRow>(
        r#"
        SELECT id, reviewer_id, reviewed_object_id, text_review, star_rating, thumbs_rating,
               created_at, updated_at
        FROM reviews
        WHERE reviewed_object_id = $1
        ORDER BY created_at DESC, id ASC
        OFFSET $2 LIMIT $3
        "#,
    )
    .bind(object_id)
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("list reviews by object", e))?;

    Ok(rows)
}

/// List reviews as a stable page, oldest first
pub async fn get_all(pool: &PgPool, skip: i64, limit: i64) -> Result<Vec<ReviewRow>> {
    let rows = sqlx::query_as::<_, ReviewRow>(
        r#"
        SELECT id, reviewer_id, reviewed_object_id, text_review, star_rating, thumbs_rating,
               created_at, updated_at
        FROM reviews
        ORDER BY created_at ASC, id ASC
        OFFSET $1 LIMIT $2
        "#,
    )
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("list reviews", e))?;

    Ok(rows)
}

/// Apply a partial update to a review's content fields
///
/// Returns `None` when no review with the id exists. The reviewer/object
/// identity is immutable; only content fields can change, and clearing
/// all three is rejected by the content check constraint. `updated_at`
/// is refreshed on every successful update.
pub async fn update(pool: &PgPool, id: Uuid, patch: ReviewPatch) -> Result<Option<ReviewRow>> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| StoreError::from_sqlx("update review", e))?;

    let row = sqlx::query_as::<_, ReviewRow>(
        r#"
        SELECT id, reviewer_id, reviewed_object_id, text_review, star_rating, thumbs_rating,
               created_at, updated_at
        FROM reviews
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| StoreError::from_sqlx("update review", e))?;

    let mut row = match row {
        Some(row) => row,
        None => return Ok(None),
    };

    patch.apply(&mut row);

    let updated = sqlx::query_as::<_, ReviewRow>(
        r#"
        UPDATE reviews
        SET text_review = $2, star_rating = $3, thumbs_rating = $4, updated_at = NOW()
        WHERE id = $1
        RETURNING id, reviewer_id, reviewed_object_id, text_review, star_rating, thumbs_rating,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&row.text_review)
    .bind(row.star_rating)
    .bind(&row.thumbs_rating)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| StoreError::from_sqlx("update review", e))?;

    tx.commit()
        .await
        .map_err(|e| StoreError::from_sqlx("update review", e))?;

    Ok(Some(updated))
}

/// Delete a review by ID, returning whether a row was removed
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| StoreError::from_sqlx("delete review", e))?;

    Ok(result.rows_affected() > 0)
}

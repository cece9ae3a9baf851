//! Reviewer repository for database operations

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewReviewer, ReviewerPatch, ReviewerRow};
use crate::error::{Result, StoreError};

/// Insert a new reviewer and return the stored row
///
/// Username and email are globally unique; a duplicate of either is
/// rejected by the store and surfaced as a constraint violation.
pub async fn create(pool: &PgPool, reviewer: &NewReviewer) -> Result<ReviewerRow> {
    let row = sqlx::query_as::<_, ReviewerRow>(
        r#"
        INSERT INTO reviewers (username, email, full_name)
        VALUES ($1, $2, $3)
        RETURNING id, username, email, full_name, created_at, updated_at
        "#,
    )
    .bind(&reviewer.username)
    .bind(&reviewer.email)
    .bind(&reviewer.full_name)
    .fetch_one(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("create reviewer", e))?;

    Ok(row)
}

/// Find reviewer by ID
pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ReviewerRow>> {
    let row = sqlx::query_as::<_, ReviewerRow>(
        r#"
        SELECT id, username, email, full_name, created_at, updated_at
        FROM reviewers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("get reviewer", e))?;

    Ok(row)
}

/// Find reviewer by username
pub async fn get_by_username(pool: &PgPool, username: &str) -> Result<Option<ReviewerRow>> {
    let row = sqlx::query_as::<_, ReviewerRow>(
        r#"
        SELECT id, username, email, full_name, created_at, updated_at
        FROM reviewers
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("get reviewer by username", e))?;

    Ok(row)
}

/// Find reviewer by email
pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<ReviewerRow>> {
    let row = sqlx::query_as::<_, ReviewerRow>(
        r#"
        SELECT id, username, email, full_name, created_at, updated_at
        FROM reviewers
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("get reviewer by email", e))?;

    Ok(row)
}

/// List reviewers as a stable page, oldest first
pub async fn get_all(pool: &PgPool, skip: i64, limit: i64) -> Result<Vec<ReviewerRow>> {
    let rows = sqlx::query_as::<_, ReviewerRow>(
        r#"
        SELECT id, username, email, full_name, created_at, updated_at
        FROM reviewers
        ORDER BY created_at ASC, id ASC
        OFFSET $1 LIMIT $2
        "#,
    )
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("list reviewers", e))?;

    Ok(rows)
}

/// Apply a partial update to a reviewer
///
/// Returns `None` when no reviewer with the id exists. Only fields set in
/// the patch are written; `updated_at` is refreshed on every successful
/// update. Constraint rejections roll the transaction back and leave the
/// stored row untouched.
pub async fn update(pool: &PgPool, id: Uuid, patch: ReviewerPatch) -> Result<Option<ReviewerRow>> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| StoreError::from_sqlx("update reviewer", e))?;

    let row = sqlx::query_as::<_, ReviewerRow>(
        r#"
        SELECT id, username, email, full_name, created_at, updated_at
        FROM reviewers
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| StoreError::from_sqlx("update reviewer", e))?;

    let mut row = match row {
        Some(row) => row,
        None => return Ok(None),
    };

    patch.apply(&mut row);

    let updated = sqlx::query_as::<_, ReviewerRow>(
        r#"
        UPDATE reviewers
        SET username = $2, email = $3, full_name = $4, updated_at = NOW()
        WHERE id = $1
        RETURNING id, username, email, full_name, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&row.username)
    .bind(&row.email)
    .bind(&row.full_name)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| StoreError::from_sqlx("update reviewer", e))?;

    tx.commit()
        .await
        .map_err(|e| StoreError::from_sqlx("update reviewer", e))?;

    Ok(Some(updated))
}

/// Delete a reviewer by ID, returning whether a row was removed
///
/// Does not cascade: a reviewer that still owns reviews is protected by
/// the foreign key and the delete surfaces a referential-integrity error.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM reviewers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| StoreError::from_sqlx("delete reviewer", e))?;

    Ok(result.rows_affected() > 0)
}

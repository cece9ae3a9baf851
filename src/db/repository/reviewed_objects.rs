//! Reviewed object repository for database operations
//!
//! A reviewed object is anything that can receive reviews, identified to
//! callers by an (object_type, object_id) pair where object_id is an
//! external identifier. The pair is unique; the same external id may
//! recur under a different type.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewReviewedObject, ReviewedObjectPatch, ReviewedObjectRow};
use crate::error::{Result, StoreError};

/// Insert a new reviewed object and return the stored row
pub async fn create(pool: &PgPool, object: &NewReviewedObject) -> Result<ReviewedObjectRow> {
    let row = sqlx::query_as::<_, ReviewedObjectRow>(
        r#"
        INSERT INTO reviewed_objects (object_type, object_id, object_name, object_description, object_metadata)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, object_type, object_id, object_name, object_description, object_metadata,
                  created_at, updated_at
        "#,
    )
    .bind(&object.object_type)
    .bind(&object.object_id)
    .bind(&object.object_name)
    .bind(&object.object_description)
    .bind(&object.object_metadata)
    .fetch_one(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("create reviewed object", e))?;

    Ok(row)
}

/// Find reviewed object by ID
pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ReviewedObjectRow>> {
    let row = sqlx::query_as::<_, ReviewedObjectRow>(
        r#"
        SELECT id, object_type, object_id, object_name, object_description, object_metadata,
               created_at, updated_at
        FROM reviewed_objects
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("get reviewed object", e))?;

    Ok(row)
}

/// Find reviewed object by type and external identifier
pub async fn get_by_type_and_id(
    pool: &PgPool,
    object_type: &str,
    external_id: &str,
) -> Result<Option<ReviewedObjectRow>> {
    let row = sqlx::query_as::<_, ReviewedObjectRow>(
        r#"
        SELECT id, object_type, object_id, object_name, object_description, object_metadata,
               created_at, updated_at
        FROM reviewed_objects
        WHERE object_type = $1 AND object_id = $2
        "#,
    )
    .bind(object_type)
    .bind(external_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("get reviewed object by type and id", e))?;

    Ok(row)
}

/// List reviewed objects of one type as a stable page, oldest first
pub async fn get_by_type(
    pool: &PgPool,
    object_type: &str,
    skip: i64,
    limit: i64,
) -> Result<Vec<ReviewedObjectRow>> {
    let rows = sqlx::query_as::<_, ReviewedObjectRow>(
        r#"
        SELECT id, object_type, object_id, object_name, object_description, object_metadata,
               created_at, updated_at
        FROM reviewed_objects
        WHERE object_type = $1
        ORDER BY created_at ASC, id ASC
        OFFSET $2 LIMIT $3
        "#,
    )
    .bind(object_type)
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("list reviewed objects by type", e))?;

    Ok(rows)
}

/// List reviewed objects as a stable page, oldest first
pub async fn get_all(pool: &PgPool, skip: i64, limit: i64) -> Result<Vec<ReviewedObjectRow>> {
    let rows = sqlx::query_as::<_, ReviewedObjectRow>(
        r#"
        SELECT id, object_type, object_id, object_name, object_description, object_metadata,
               created_at, updated_at
        FROM reviewed_objects
        ORDER BY created_at ASC, id ASC
        OFFSET $1 LIMIT $2
        "#,
    )
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(|e| StoreError::from_sqlx("list reviewed objects", e))?;

    Ok(rows)
}

/// Apply a partial update to a reviewed object
///
/// Returns `None` when no object with the id exists. Only fields set in
/// the patch are written; `updated_at` is refreshed on every successful
/// update.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: ReviewedObjectPatch,
) -> Result<Option<ReviewedObjectRow>> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| StoreError::from_sqlx("update reviewed object", e))?;

    let row = sqlx::query_as::<_, ReviewedObjectRow>(
        r#"
        SELECT id, object_type, object_id, object_name, object_description, object_metadata,
               created_at, updated_at
        FROM reviewed_objects
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| StoreError::from_sqlx("update reviewed object", e))?;

    let mut row = match row {
        Some(row) => row,
        None => return Ok(None),
    };

    patch.apply(&mut row);

    let updated = sqlx::query_as::<_, ReviewedObjectRow>(
        r#"
        UPDATE reviewed_objects
        SET object_type = $2, object_id = $3, object_name = $4,
            object_description = $5, object_metadata = $6, updated_at = NOW()
        WHERE id = $1
        RETURNING id, object_type, object_id, object_name, object_description, object_metadata,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&row.object_type)
    .bind(&row.object_id)
    .bind(&row.object_name)
    .bind(&row.object_description)
    .bind(&row.object_metadata)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| StoreError::from_sqlx("update reviewed object", e))?;

    tx.commit()
        .await
        .map_err(|e| StoreError::from_sqlx("update reviewed object", e))?;

    Ok(Some(updated))
}

/// Delete a reviewed object by ID, returning whether a row was removed
///
/// Does not cascade to reviews; an object that is still reviewed is
/// protected by the foreign key.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM reviewed_objects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| StoreError::from_sqlx("delete reviewed object", e))?;

    Ok(result.rows_affected() > 0)
}

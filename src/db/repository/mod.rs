//! Database repositories
//!
//! Repository pattern for database access, separating data access logic
//! from business logic. Each repository is a set of free functions over a
//! `PgPool`; constraint enforcement stays in PostgreSQL and rejected
//! writes come back as typed [`StoreError`](crate::error::StoreError)
//! values.

pub mod reviewed_objects;
pub mod reviewers;
pub mod reviews;
pub mod statistics;

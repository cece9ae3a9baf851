//! Review management data-access layer
//!
//! Reviewers leave text, star (0-5), and thumbs (up/down) feedback on
//! arbitrary reviewed objects. This crate owns the persisted schema and
//! the repository layer over PostgreSQL:
//! - Three-shape entity types (row / insert / partial patch)
//! - Per-entity repositories with typed constraint-violation errors
//! - A per-object statistics projection computed at query time
//! - Pool construction, embedded migrations, and a health probe
//!
//! Every operation is one synchronous round-trip guarded by a
//! transaction; uniqueness and check constraints are enforced by the
//! database, never pre-checked in application code.

pub mod config;
pub mod db;
pub mod error;

pub use config::Config;
pub use error::{Result, StoreError};

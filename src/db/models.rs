//! Database row types for the review tables
//!
//! Each entity comes in three shapes: a `*Row` read type mapping directly
//! to a table row, a `New*` insert type carrying only caller-supplied
//! fields, and a `*Patch` partial-update type where unset fields leave the
//! stored value untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Thumbs Rating
// ============================================================================

/// Thumbs feedback carried by a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbsRating {
    Up,
    Down,
}

impl ThumbsRating {
    /// Stored string form ("up" / "down")
    pub fn as_str(self) -> &'static str {
        match self {
            ThumbsRating::Up => "up",
            ThumbsRating::Down => "down",
        }
    }
}

impl fmt::Display for ThumbsRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Database Row Types
// ============================================================================

/// Reviewer row from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ReviewerRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reviewed object row from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ReviewedObjectRow {
    pub id: Uuid,
    pub object_type: String,
    /// Caller-supplied external identifier, unique within `object_type`
    pub object_id: String,
    pub object_name: String,
    pub object_description: Option<String>,
    pub object_metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review row from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ReviewRow {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewed_object_id: Uuid,
    pub text_review: Option<String>,
    pub star_rating: Option<i16>,
    pub thumbs_rating: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewRow {
    /// Parse the stored thumbs rating into its enum form
    pub fn thumbs(&self) -> Option<ThumbsRating> {
        self.thumbs_rating.as_deref().and_then(parse_thumbs)
    }
}

/// Per-object review statistics, computed at query time and never stored
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ReviewStatistics {
    pub object_id: Uuid,
    pub object_type: String,
    pub object_name: String,
    pub total_reviews: i64,
    /// Mean of the star ratings present; `None` when no review carries one
    pub average_rating: Option<f64>,
    pub thumbs_up_count: i64,
    pub thumbs_down_count: i64,
}

// ============================================================================
// Insert Types
// ============================================================================

/// New reviewer to insert
#[derive(Debug, Clone, Deserialize)]
pub struct NewReviewer {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
}

/// New reviewed object to insert
#[derive(Debug, Clone, Deserialize)]
pub struct NewReviewedObject {
    pub object_type: String,
    pub object_id: String,
    pub object_name: String,
    pub object_description: Option<String>,
    pub object_metadata: Option<JsonValue>,
}

/// New review to insert
///
/// The identity pair (reviewer, object) is fixed at creation; at least one
/// content field must be set or the insert is rejected by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub reviewer_id: Uuid,
    pub reviewed_object_id: Uuid,
    pub text_review: Option<String>,
    pub star_rating: Option<i16>,
    pub thumbs_rating: Option<ThumbsRating>,
}

// ============================================================================
// Partial Update Types
// ============================================================================
//
// Outer `None` leaves the column untouched. For nullable columns the field
// is doubly optional: `Some(None)` writes an explicit NULL.

/// Partial update for a reviewer
#[derive(Debug, Clone, Default)]
pub struct ReviewerPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<Option<String>>,
}

impl ReviewerPatch {
    /// Apply the set fields on top of the current row
    pub(crate) fn apply(self, row: &mut ReviewerRow) {
        if let Some(username) = self.username {
            row.username = username;
        }
        if let Some(email) = self.email {
            row.email = email;
        }
        if let Some(full_name) = self.full_name {
            row.full_name = full_name;
        }
    }
}

/// Partial update for a reviewed object
#[derive(Debug, Clone, Default)]
pub struct ReviewedObjectPatch {
    pub object_type: Option<String>,
    pub object_id: Option<String>,
    pub object_name: Option<String>,
    pub object_description: Option<Option<String>>,
    pub object_metadata: Option<Option<JsonValue>>,
}

impl ReviewedObjectPatch {
    pub(crate) fn apply(self, row: &mut ReviewedObjectRow) {
        if let Some(object_type) = self.object_type {
            row.object_type = object_type;
        }
        if let Some(object_id) = self.object_id {
            row.object_id = object_id;
        }
        if let Some(object_name) = self.object_name {
            row.object_name = object_name;
        }
        if let Some(object_description) = self.object_description {
            row.object_description = object_description;
        }
        if let Some(object_metadata) = self.object_metadata {
            row.object_metadata = object_metadata;
        }
    }
}

/// Partial update for a review
///
/// Content fields only; the reviewer/object identity of a review is
/// immutable.
#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub text_review: Option<Option<String>>,
    pub star_rating: Option<Option<i16>>,
    pub thumbs_rating: Option<Option<ThumbsRating>>,
}

impl ReviewPatch {
    pub(crate) fn apply(self, row: &mut ReviewRow) {
        if let Some(text_review) = self.text_review {
            row.text_review = text_review;
        }
        if let Some(star_rating) = self.star_rating {
            row.star_rating = star_rating;
        }
        if let Some(thumbs_rating) = self.thumbs_rating {
            row.thumbs_rating = thumbs_rating.map(|t| t.as_str().to_string());
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a stored thumbs rating string
fn parse_thumbs(s: &str) -> Option<ThumbsRating> {
    match s {
        "up" => Some(ThumbsRating::Up),
        "down" => Some(ThumbsRating::Down),
        _ => None,
    }
}

//! Floating space-note domain models.
//!
//! Space notes are short-lived public messages rendered as drifting bubbles
//! in the universe view. They expire 24 hours after creation; expired rows
//! are excluded from queries and purged by a background job.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Hours a space note stays alive.
pub const NOTE_TTL_HOURS: i64 = 24;

/// Space note domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SpaceNote {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    /// Viewport-fraction coordinates, last writer wins.
    pub pos_x: f64,
    pub pos_y: f64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SpaceNote {
    /// Whether this note has outlived its TTL at the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Expiry timestamp for a note created at `created_at`.
    pub fn expiry_for(created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + Duration::hours(NOTE_TTL_HOURS)
    }
}

/// Request to create a space note.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateSpaceNoteRequest {
    #[validate(custom(function = "shared::validation::validate_note_content"))]
    pub content: String,
    #[validate(custom(function = "shared::validation::validate_note_coordinate"))]
    pub pos_x: f64,
    #[validate(custom(function = "shared::validation::validate_note_coordinate"))]
    pub pos_y: f64,
}

/// Request to move a note. Issued by the owning client on the persistence
/// throttle, not on every animation tick.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateNotePositionRequest {
    #[validate(custom(function = "shared::validation::validate_note_coordinate"))]
    pub pos_x: f64,
    #[validate(custom(function = "shared::validation::validate_note_coordinate"))]
    pub pos_y: f64,
}

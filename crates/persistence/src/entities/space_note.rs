//! Space note entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the space_notes table.
#[derive(Debug, Clone, FromRow)]
pub struct SpaceNoteEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub pos_x: f64,
    pub pos_y: f64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<SpaceNoteEntity> for domain::models::SpaceNote {
    fn from(entity: SpaceNoteEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            content: entity.content,
            pos_x: entity.pos_x,
            pos_y: entity.pos_y,
            created_at: entity.created_at,
            expires_at: entity.expires_at,
        }
    }
}

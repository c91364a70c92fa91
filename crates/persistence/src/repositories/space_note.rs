//! Floating space note repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::SpaceNote;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::space_note::SpaceNoteEntity;

const NOTE_COLUMNS: &str = "id, user_id, content, pos_x, pos_y, created_at, expires_at";

/// Repository for floating note database operations.
#[derive(Clone)]
pub struct SpaceNoteRepository {
    pool: PgPool,
}

impl SpaceNoteRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a note with an explicit expiry timestamp.
    pub async fn create(
        &self,
        user_id: Uuid,
        content: &str,
        pos_x: f64,
        pos_y: f64,
        expires_at: DateTime<Utc>,
    ) -> Result<SpaceNote, sqlx::Error> {
        let entity = sqlx::query_as::<_, SpaceNoteEntity>(&format!(
            r#"
            INSERT INTO space_notes (user_id, content, pos_x, pos_y, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {NOTE_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(content)
        .bind(pos_x)
        .bind(pos_y)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find a note by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SpaceNote>, sqlx::Error> {
        let entity = sqlx::query_as::<_, SpaceNoteEntity>(&format!(
            "SELECT {NOTE_COLUMNS} FROM space_notes WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// List all notes that have not yet expired, oldest first.
    pub async fn list_active(&self) -> Result<Vec<SpaceNote>, sqlx::Error> {
        let entities = sqlx::query_as::<_, SpaceNoteEntity>(&format!(
            r#"
            SELECT {NOTE_COLUMNS}
            FROM space_notes
            WHERE expires_at > NOW()
            ORDER BY created_at ASC
            "#,
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Update a note's position. Returns the updated row, or None if not found.
    pub async fn update_position(
        &self,
        id: Uuid,
        pos_x: f64,
        pos_y: f64,
    ) -> Result<Option<SpaceNote>, sqlx::Error> {
        let entity = sqlx::query_as::<_, SpaceNoteEntity>(&format!(
            r#"
            UPDATE space_notes
            SET pos_x = $2, pos_y = $3
            WHERE id = $1
            RETURNING {NOTE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(pos_x)
        .bind(pos_y)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Delete a note.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM space_notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete expired notes in batches. Returns the number of rows removed.
    pub async fn delete_expired(&self, batch_size: i64) -> Result<u64, sqlx::Error> {
        let mut total_deleted = 0u64;

        loop {
            let result = sqlx::query(
                r#"
                DELETE FROM space_notes
                WHERE id IN (
                    SELECT id FROM space_notes
                    WHERE expires_at <= NOW()
                    LIMIT $1
                )
                "#,
            )
            .bind(batch_size)
            .execute(&self.pool)
            .await?;

            let deleted = result.rows_affected();
            total_deleted += deleted;

            if deleted < batch_size as u64 {
                break;
            }
        }

        Ok(total_deleted)
    }
}

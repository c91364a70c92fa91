//! Space repository for database operations.

use domain::models::{Space, SpaceRole, SpaceWithRole};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::membership::SpaceRoleDb;
use crate::entities::space::{SpaceEntity, SpaceWithRoleEntity};

/// Repository for space database operations.
#[derive(Clone)]
pub struct SpaceRepository {
    pool: PgPool,
}

impl SpaceRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a space together with the creator's admin membership.
    ///
    /// Both inserts run in one transaction: a space is never left without
    /// an admin because the membership insert failed after the space insert
    /// succeeded.
    pub async fn create_with_owner(
        &self,
        name: &str,
        code: &str,
        owner_id: Uuid,
    ) -> Result<Space, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let entity = sqlx::query_as::<_, SpaceEntity>(
            r#"
            INSERT INTO spaces (name, code, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, name, code, created_by, created_at
            "#,
        )
        .bind(name)
        .bind(code)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO space_members (space_id, user_id, role)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(entity.id)
        .bind(owner_id)
        .bind(SpaceRoleDb::from(SpaceRole::Admin))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(entity.into())
    }

    /// Find a space by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Space>, sqlx::Error> {
        let entity = sqlx::query_as::<_, SpaceEntity>(
            r#"
            SELECT id, name, code, created_by, created_at
            FROM spaces
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find a space by its join code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Space>, sqlx::Error> {
        let entity = sqlx::query_as::<_, SpaceEntity>(
            r#"
            SELECT id, name, code, created_by, created_at
            FROM spaces
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Check whether a join code is already taken.
    pub async fn code_exists(&self, code: &str) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM spaces WHERE code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Rename a space. Returns the updated row, or None if not found.
    pub async fn update_name(
        &self,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Space>, sqlx::Error> {
        let entity = sqlx::query_as::<_, SpaceEntity>(
            r#"
            UPDATE spaces
            SET name = $2
            WHERE id = $1
            RETURNING id, name, code, created_by, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Delete a space. Memberships and tasks go with it via the schema's
    /// ON DELETE CASCADE.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM spaces WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List the spaces a user belongs to, with their role and member count.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SpaceWithRole>, sqlx::Error> {
        let entities = sqlx::query_as::<_, SpaceWithRoleEntity>(
            r#"
            SELECT
                s.id, s.name, s.code, s.created_by, s.created_at,
                m.role,
                (SELECT COUNT(*) FROM space_members mc WHERE mc.space_id = s.id) AS member_count
            FROM spaces s
            JOIN space_members m ON m.space_id = s.id
            WHERE m.user_id = $1
            ORDER BY m.joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}

//! Space membership repository for database operations.

use domain::models::{MemberWithProfile, Membership, SpaceRole};
use shared::pagination::PageParams;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::membership::{MembershipEntity, MemberWithProfileEntity, SpaceRoleDb};

/// Repository for space membership database operations.
#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a user to a space. The (space_id, user_id) unique key makes a
    /// concurrent duplicate insert surface as a constraint violation.
    pub async fn create(
        &self,
        space_id: Uuid,
        user_id: Uuid,
        role: SpaceRole,
    ) -> Result<Membership, sqlx::Error> {
        let entity = sqlx::query_as::<_, MembershipEntity>(
            r#"
            INSERT INTO space_members (space_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING id, space_id, user_id, role, joined_at
            "#,
        )
        .bind(space_id)
        .bind(user_id)
        .bind(SpaceRoleDb::from(role))
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find a membership by space and user.
    pub async fn find(
        &self,
        space_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let entity = sqlx::query_as::<_, MembershipEntity>(
            r#"
            SELECT id, space_id, user_id, role, joined_at
            FROM space_members
            WHERE space_id = $1 AND user_id = $2
            "#,
        )
        .bind(space_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Check whether a user belongs to a space.
    pub async fn exists(&self, space_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM space_members WHERE space_id = $1 AND user_id = $2)",
        )
        .bind(space_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Change a member's role. Returns the updated row, or None if the
    /// membership does not exist.
    pub async fn update_role(
        &self,
        space_id: Uuid,
        user_id: Uuid,
        role: SpaceRole,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let entity = sqlx::query_as::<_, MembershipEntity>(
            r#"
            UPDATE space_members
            SET role = $3
            WHERE space_id = $1 AND user_id = $2
            RETURNING id, space_id, user_id, role, joined_at
            "#,
        )
        .bind(space_id)
        .bind(user_id)
        .bind(SpaceRoleDb::from(role))
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Remove a user from a space.
    pub async fn delete(&self, space_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM space_members
            WHERE space_id = $1 AND user_id = $2
            "#,
        )
        .bind(space_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List space members with profile details, paginated.
    pub async fn list_with_profiles(
        &self,
        space_id: Uuid,
        params: &PageParams,
    ) -> Result<(Vec<MemberWithProfile>, i64), sqlx::Error> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM space_members WHERE space_id = $1")
                .bind(space_id)
                .fetch_one(&self.pool)
                .await?;

        let entities = sqlx::query_as::<_, MemberWithProfileEntity>(
            r#"
            SELECT
                m.space_id, m.user_id, m.role, m.joined_at,
                p.full_name, p.email, p.avatar_url
            FROM space_members m
            JOIN user_profiles p ON p.id = m.user_id
            WHERE m.space_id = $1
            ORDER BY m.joined_at ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(space_id)
        .bind(params.per_page() as i64)
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let members = entities.into_iter().map(Into::into).collect();

        Ok((members, total))
    }

    /// Count admins in a space. Guards the last-admin invariant for leave,
    /// kick, and demote.
    pub async fn count_admins(&self, space_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM space_members WHERE space_id = $1 AND role = 'admin'",
        )
        .bind(space_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Count all members in a space.
    pub async fn count_members(&self, space_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM space_members WHERE space_id = $1")
                .bind(space_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

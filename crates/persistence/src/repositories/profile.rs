//! User profile repository for database operations.

use domain::models::UserProfile;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::profile::UserProfileEntity;

/// Repository for user profile database operations.
#[derive(Clone)]
pub struct UserProfileRepository {
    pool: PgPool,
}

impl UserProfileRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by user ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, sqlx::Error> {
        let entity = sqlx::query_as::<_, UserProfileEntity>(
            "SELECT id, full_name, email, avatar_url FROM user_profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Insert or refresh a profile. Profiles mirror the external auth
    /// provider, so the upsert always takes the incoming values.
    pub async fn upsert(
        &self,
        id: Uuid,
        full_name: &str,
        email: &str,
        avatar_url: Option<&str>,
    ) -> Result<UserProfile, sqlx::Error> {
        let entity = sqlx::query_as::<_, UserProfileEntity>(
            r#"
            INSERT INTO user_profiles (id, full_name, email, avatar_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET full_name = EXCLUDED.full_name,
                email = EXCLUDED.email,
                avatar_url = EXCLUDED.avatar_url
            RETURNING id, full_name, email, avatar_url
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(email)
        .bind(avatar_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }
}

//! User profile entity (database row mapping).

use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the user_profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct UserProfileEntity {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl From<UserProfileEntity> for domain::models::UserProfile {
    fn from(entity: UserProfileEntity) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            email: entity.email,
            avatar_url: entity.avatar_url,
        }
    }
}

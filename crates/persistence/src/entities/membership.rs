//! Space membership entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for space_role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "space_role", rename_all = "lowercase")]
pub enum SpaceRoleDb {
    Admin,
    Member,
}

impl From<SpaceRoleDb> for domain::models::SpaceRole {
    fn from(db: SpaceRoleDb) -> Self {
        match db {
            SpaceRoleDb::Admin => Self::Admin,
            SpaceRoleDb::Member => Self::Member,
        }
    }
}

impl From<domain::models::SpaceRole> for SpaceRoleDb {
    fn from(role: domain::models::SpaceRole) -> Self {
        match role {
            domain::models::SpaceRole::Admin => Self::Admin,
            domain::models::SpaceRole::Member => Self::Member,
        }
    }
}

/// Database row mapping for the space_members table.
#[derive(Debug, Clone, FromRow)]
pub struct MembershipEntity {
    pub id: Uuid,
    pub space_id: Uuid,
    pub user_id: Uuid,
    pub role: SpaceRoleDb,
    pub joined_at: DateTime<Utc>,
}

impl From<MembershipEntity> for domain::models::Membership {
    fn from(entity: MembershipEntity) -> Self {
        Self {
            id: entity.id,
            space_id: entity.space_id,
            user_id: entity.user_id,
            role: entity.role.into(),
            joined_at: entity.joined_at,
        }
    }
}

/// Membership with profile details for member list responses.
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithProfileEntity {
    pub space_id: Uuid,
    pub user_id: Uuid,
    pub role: SpaceRoleDb,
    pub joined_at: DateTime<Utc>,
    // Profile details
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl From<MemberWithProfileEntity> for domain::models::MemberWithProfile {
    fn from(entity: MemberWithProfileEntity) -> Self {
        Self {
            space_id: entity.space_id,
            role: entity.role.into(),
            joined_at: entity.joined_at,
            user: domain::models::UserProfile {
                id: entity.user_id,
                full_name: entity.full_name,
                email: entity.email,
                avatar_url: entity.avatar_url,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_role_db_conversion() {
        assert_eq!(
            domain::models::SpaceRole::from(SpaceRoleDb::Admin),
            domain::models::SpaceRole::Admin
        );
        assert_eq!(
            SpaceRoleDb::from(domain::models::SpaceRole::Member),
            SpaceRoleDb::Member
        );
    }
}

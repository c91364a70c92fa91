//! Space entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::membership::SpaceRoleDb;

/// Database row mapping for the spaces table.
#[derive(Debug, Clone, FromRow)]
pub struct SpaceEntity {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<SpaceEntity> for domain::models::Space {
    fn from(entity: SpaceEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            code: entity.code,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }
}

/// Space row joined with the requesting user's membership.
#[derive(Debug, Clone, FromRow)]
pub struct SpaceWithRoleEntity {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub role: SpaceRoleDb,
    pub member_count: i64,
}

impl From<SpaceWithRoleEntity> for domain::models::SpaceWithRole {
    fn from(entity: SpaceWithRoleEntity) -> Self {
        Self {
            space: domain::models::Space {
                id: entity.id,
                name: entity.name,
                code: entity.code,
                created_by: entity.created_by,
                created_at: entity.created_at,
            },
            role: entity.role.into(),
            member_count: entity.member_count,
        }
    }
}

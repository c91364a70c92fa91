//! Space membership domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::profile::UserProfile;

/// Roles a user can hold within a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceRole {
    Admin,
    Member,
}

impl SpaceRole {
    /// Whether this role may perform admin-gated operations
    /// (rename, delete, kick, role changes).
    pub fn is_admin(&self) -> bool {
        matches!(self, SpaceRole::Admin)
    }
}

impl FromStr for SpaceRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(SpaceRole::Admin),
            "member" => Ok(SpaceRole::Member),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

impl std::fmt::Display for SpaceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpaceRole::Admin => write!(f, "admin"),
            SpaceRole::Member => write!(f, "member"),
        }
    }
}

/// Membership domain model: the relation between a user and a space.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Membership {
    pub id: Uuid,
    pub space_id: Uuid,
    pub user_id: Uuid,
    pub role: SpaceRole,
    pub joined_at: DateTime<Utc>,
}

/// Membership joined with the member's profile, normalized into a single
/// typed shape at the data-access boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberWithProfile {
    pub space_id: Uuid,
    pub role: SpaceRole,
    pub joined_at: DateTime<Utc>,
    pub user: UserProfile,
}

/// Request to change a member's role.
///
/// The role arrives as a string and is parsed into [`SpaceRole`] by the
/// handler, so a value outside {admin, member} is a 400 with the row
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateMemberRoleRequest {
    pub role: String,
}

impl UpdateMemberRoleRequest {
    /// Parses the requested role.
    pub fn parse_role(&self) -> Result<SpaceRole, String> {
        SpaceRole::from_str(&self.role)
    }
}

/// Response for the member list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListMembersResponse {
    pub data: Vec<MemberWithProfile>,
    pub pagination: shared::pagination::Pagination,
}

//! Space domain models.
//!
//! A space is a shared workspace containing members and tasks, joined via a
//! short alphanumeric code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::membership::SpaceRole;

/// Space domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Space {
    pub id: Uuid,
    pub name: String,
    /// Unique join token shared with prospective members.
    pub code: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A space together with the caller's role in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SpaceWithRole {
    #[serde(flatten)]
    pub space: Space,
    pub role: SpaceRole,
    pub member_count: i64,
}

/// Request to create a new space.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateSpaceRequest {
    #[validate(custom(function = "shared::validation::validate_space_name"))]
    pub name: String,
}

/// Request to join a space by code.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct JoinSpaceRequest {
    #[validate(length(min = 1, message = "Join code must not be empty"))]
    pub code: String,
}

/// Request to rename a space.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateSpaceNameRequest {
    #[validate(custom(function = "shared::validation::validate_space_name"))]
    pub name: String,
}

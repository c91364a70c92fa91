//! User profile domain model.
//!
//! Profiles mirror the auth service's user records. Lookups always go through
//! the profile table so the rest of the system sees one shape.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User profile domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Display name for notification templates: the full name when present,
    /// otherwise the mailbox part of the email address.
    pub fn display_name(&self) -> &str {
        if !self.full_name.trim().is_empty() {
            self.full_name.trim()
        } else {
            self.email.split('@').next().unwrap_or(&self.email)
        }
    }
}

/// Request to create or refresh the caller's profile. The email comes from
/// the access token, never from the request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 120, message = "Full name must be 1-120 characters"))]
    pub full_name: String,
    #[validate(url(message = "Avatar URL must be a valid URL"))]
    pub avatar_url: Option<String>,
}

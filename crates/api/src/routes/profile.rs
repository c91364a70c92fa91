//! Caller profile routes.
//!
//! Profiles mirror the auth service's user records; clients push a refresh
//! after sign-in so membership lists and notification templates have a name
//! to work with.

use axum::{
    extract::{Extension, State},
    response::IntoResponse,
    Json,
};
use domain::models::UpdateProfileRequest;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use persistence::repositories::UserProfileRepository;

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = UserProfileRepository::new(state.pool.clone());
    let profile = repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile))
}

/// PUT /api/v1/profile
///
/// Create or refresh the caller's profile. The email is taken from the
/// token's claim, falling back to the stored value for tokens without one.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = UserProfileRepository::new(state.pool.clone());

    let email = match &auth.email {
        Some(email) => email.clone(),
        None => {
            let existing = repo.find_by_id(auth.user_id).await?;
            existing
                .map(|p| p.email)
                .ok_or_else(|| {
                    ApiError::Validation(
                        "Token carries no email claim and no profile exists yet".to_string(),
                    )
                })?
        }
    };

    let profile = repo
        .upsert(
            auth.user_id,
            request.full_name.trim(),
            &email,
            request.avatar_url.as_deref(),
        )
        .await?;

    info!(user_id = %auth.user_id, "Profile refreshed");

    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_empty_name() {
        let request = UpdateProfileRequest {
            full_name: String::new(),
            avatar_url: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_accepts_missing_avatar() {
        let request: UpdateProfileRequest =
            serde_json::from_str(r#"{"full_name":"Jose Dela Cruz"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.avatar_url.is_none());
    }
}

//! Space lifecycle and membership API routes.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{CreateSpaceRequest, JoinSpaceRequest, SpaceRole, UpdateSpaceNameRequest};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use crate::routes::authz::{require_admin, require_membership};
use persistence::repositories::{
    MembershipRepository, SpaceRepository, UserProfileRepository,
};

/// Attempts before giving up on finding a free join code.
const CODE_GENERATION_ATTEMPTS: usize = 5;

/// POST /api/v1/spaces
///
/// Create a space. The creator's admin membership is inserted in the same
/// transaction, so a space can never exist without an admin.
pub async fn create_space(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Json(request): Json<CreateSpaceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = SpaceRepository::new(state.pool.clone());

    let mut code = shared::codes::generate_join_code();
    for attempt in 0..CODE_GENERATION_ATTEMPTS {
        if !repo.code_exists(&code).await? {
            break;
        }
        if attempt == CODE_GENERATION_ATTEMPTS - 1 {
            return Err(ApiError::Internal(
                "Could not generate a unique join code".to_string(),
            ));
        }
        code = shared::codes::generate_join_code();
    }

    let space = repo
        .create_with_owner(request.name.trim(), &code, auth.user_id)
        .await?;

    info!(
        space_id = %space.id,
        user_id = %auth.user_id,
        "Created space"
    );

    Ok((StatusCode::CREATED, Json(space)))
}

/// POST /api/v1/spaces/join
///
/// Join a space by its invite code. 404 for an unknown code, 409 when the
/// caller is already a member.
pub async fn join_space(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Json(request): Json<JoinSpaceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let code = request.code.trim().to_uppercase();
    let space_repo = SpaceRepository::new(state.pool.clone());
    let member_repo = MembershipRepository::new(state.pool.clone());

    let space = space_repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("No space with that code".to_string()))?;

    if member_repo.exists(space.id, auth.user_id).await? {
        return Err(ApiError::Conflict(
            "You are already a member of this space".to_string(),
        ));
    }

    // A concurrent duplicate join loses the unique-key race here and maps
    // to 409 via the sqlx error conversion.
    member_repo
        .create(space.id, auth.user_id, SpaceRole::Member)
        .await?;

    info!(
        space_id = %space.id,
        user_id = %auth.user_id,
        "User joined space"
    );

    let profile_repo = UserProfileRepository::new(state.pool.clone());
    if let Some(profile) = profile_repo.find_by_id(auth.user_id).await? {
        state.notifier.space_welcome(&profile, &space);
    }

    Ok((StatusCode::CREATED, Json(space)))
}

/// GET /api/v1/spaces
///
/// List the caller's spaces with their role and member count.
pub async fn list_spaces(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SpaceRepository::new(state.pool.clone());
    let spaces = repo.list_for_user(auth.user_id).await?;

    Ok(Json(spaces))
}

/// PUT /api/v1/spaces/:space_id/name
///
/// Rename a space. Admin only; like the other admin-gated operations, a
/// space the caller has no membership in answers 403 whether it exists or
/// not.
pub async fn rename_space(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(space_id): Path<Uuid>,
    Json(request): Json<UpdateSpaceNameRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    require_admin(&state.pool, space_id, auth.user_id).await?;

    let repo = SpaceRepository::new(state.pool.clone());
    let space = repo
        .update_name(space_id, request.name.trim())
        .await?
        .ok_or_else(|| ApiError::NotFound("Space not found".to_string()))?;

    info!(space_id = %space_id, user_id = %auth.user_id, "Renamed space");

    Ok(Json(space))
}

/// DELETE /api/v1/spaces/:space_id
///
/// Delete a space. Admin only; memberships and tasks cascade.
pub async fn delete_space(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(space_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state.pool, space_id, auth.user_id).await?;

    let repo = SpaceRepository::new(state.pool.clone());
    let deleted = repo.delete(space_id).await?;

    if deleted {
        info!(space_id = %space_id, user_id = %auth.user_id, "Deleted space");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Space not found".to_string()))
    }
}

/// POST /api/v1/spaces/:space_id/leave
///
/// Leave a space. The last admin of a space that still has other members
/// must hand off the role first (409).
pub async fn leave_space(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(space_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let membership = require_membership(&state.pool, space_id, auth.user_id).await?;

    let repo = MembershipRepository::new(state.pool.clone());
    if membership.role.is_admin() {
        let admins = repo.count_admins(space_id).await?;
        let members = repo.count_members(space_id).await?;
        if admins == 1 && members > 1 {
            warn!(
                space_id = %space_id,
                user_id = %auth.user_id,
                "Last admin attempted to leave a populated space"
            );
            return Err(ApiError::Conflict(
                "Promote another admin before leaving this space".to_string(),
            ));
        }
    }

    repo.delete(space_id, auth.user_id).await?;

    info!(space_id = %space_id, user_id = %auth.user_id, "User left space");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_space_request_validation() {
        let valid = CreateSpaceRequest {
            name: "Thesis Group".to_string(),
        };
        assert!(valid.validate().is_ok());

        let blank = CreateSpaceRequest {
            name: "   ".to_string(),
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_join_request_code_normalization() {
        let request = JoinSpaceRequest {
            code: " ab23cd ".to_string(),
        };
        let code = request.code.trim().to_uppercase();
        assert_eq!(code, "AB23CD");
    }

    #[test]
    fn test_code_generation_attempt_budget() {
        assert!(CODE_GENERATION_ATTEMPTS >= 3);
    }
}

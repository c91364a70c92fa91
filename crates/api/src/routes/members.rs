//! Space member API routes.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{ListMembersResponse, SpaceRole, UpdateMemberRoleRequest};
use shared::pagination::{PageParams, Pagination};
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use crate::routes::authz::{require_admin, require_membership};
use persistence::repositories::MembershipRepository;

/// GET /api/v1/spaces/:space_id/members
///
/// List members with profile details. Visible to any member of the space.
pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(space_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    require_membership(&state.pool, space_id, auth.user_id).await?;

    let repo = MembershipRepository::new(state.pool.clone());
    let (members, total) = repo.list_with_profiles(space_id, &params).await?;

    Ok(Json(ListMembersResponse {
        data: members,
        pagination: Pagination::new(&params, total),
    }))
}

/// PUT /api/v1/spaces/:space_id/members/:user_id/role
///
/// Change a member's role. Admin only. Roles outside {admin, member} are a
/// 400 with the row untouched. Demoting the last admin is a 409.
pub async fn update_member_role(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path((space_id, user_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateMemberRoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_role = request.parse_role().map_err(ApiError::Validation)?;

    require_admin(&state.pool, space_id, auth.user_id).await?;

    let repo = MembershipRepository::new(state.pool.clone());
    let target = repo
        .find(space_id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Member not found".to_string()))?;

    if target.role.is_admin()
        && new_role == SpaceRole::Member
        && repo.count_admins(space_id).await? == 1
    {
        warn!(
            space_id = %space_id,
            target_user_id = %user_id,
            "Attempted to demote the last admin"
        );
        return Err(ApiError::Conflict(
            "A space must keep at least one admin".to_string(),
        ));
    }

    let membership = repo
        .update_role(space_id, user_id, new_role)
        .await?
        .ok_or_else(|| ApiError::NotFound("Member not found".to_string()))?;

    info!(
        space_id = %space_id,
        target_user_id = %user_id,
        role = %new_role,
        changed_by = %auth.user_id,
        "Changed member role"
    );

    Ok(Json(membership))
}

/// DELETE /api/v1/spaces/:space_id/members/:user_id
///
/// Remove a member from a space. Admin only; admins leave via the leave
/// endpoint rather than kicking themselves.
pub async fn kick_member(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path((space_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state.pool, space_id, auth.user_id).await?;

    if user_id == auth.user_id {
        return Err(ApiError::Conflict(
            "Use the leave endpoint to remove yourself".to_string(),
        ));
    }

    let repo = MembershipRepository::new(state.pool.clone());
    let removed = repo.delete(space_id, user_id).await?;

    if removed {
        info!(
            space_id = %space_id,
            target_user_id = %user_id,
            removed_by = %auth.user_id,
            "Removed member from space"
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Member not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_request_parsing() {
        let valid: UpdateMemberRoleRequest = serde_json::from_str(r#"{"role":"admin"}"#).unwrap();
        assert_eq!(valid.parse_role().unwrap(), SpaceRole::Admin);

        let invalid: UpdateMemberRoleRequest =
            serde_json::from_str(r#"{"role":"owner"}"#).unwrap();
        assert!(invalid.parse_role().is_err());
    }

    #[test]
    fn test_self_kick_is_detected_by_id_equality() {
        let id = Uuid::new_v4();
        assert_eq!(id, id);
        assert_ne!(id, Uuid::new_v4());
    }
}

//! In-handler authorization checks.
//!
//! Handlers are the authority boundary: every privileged operation loads the
//! caller's membership row and checks the role in-process.

use domain::models::Membership;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use persistence::repositories::MembershipRepository;

/// Loads the caller's membership, 403 when absent. A nonexistent space has
/// no membership rows, so it answers the same 403 as a space the caller is
/// not part of.
pub(crate) async fn require_membership(
    pool: &PgPool,
    space_id: Uuid,
    user_id: Uuid,
) -> Result<Membership, ApiError> {
    let repo = MembershipRepository::new(pool.clone());
    member_gate(repo.find(space_id, user_id).await?)
}

/// Loads the caller's membership and requires the admin role.
pub(crate) async fn require_admin(
    pool: &PgPool,
    space_id: Uuid,
    user_id: Uuid,
) -> Result<Membership, ApiError> {
    let repo = MembershipRepository::new(pool.clone());
    admin_gate(repo.find(space_id, user_id).await?)
}

fn member_gate(membership: Option<Membership>) -> Result<Membership, ApiError> {
    membership.ok_or_else(|| ApiError::Forbidden("Not a member of this space".to_string()))
}

fn admin_gate(membership: Option<Membership>) -> Result<Membership, ApiError> {
    let membership = member_gate(membership)?;
    if !membership.role.is_admin() {
        return Err(ApiError::Forbidden("Admin role required".to_string()));
    }
    Ok(membership)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::models::SpaceRole;

    fn membership(role: SpaceRole) -> Membership {
        Membership {
            id: Uuid::new_v4(),
            space_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role,
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn test_missing_membership_is_forbidden() {
        // Covers both a non-member and a space that does not exist
        assert!(matches!(member_gate(None), Err(ApiError::Forbidden(_))));
        assert!(matches!(admin_gate(None), Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_member_role_fails_admin_gate() {
        let result = admin_gate(Some(membership(SpaceRole::Member)));
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_admin_passes_both_gates() {
        assert!(member_gate(Some(membership(SpaceRole::Admin))).is_ok());
        assert!(admin_gate(Some(membership(SpaceRole::Admin))).is_ok());
    }
}

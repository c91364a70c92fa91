//! Floating space-note API routes.
//!
//! Notes are public to every authenticated user and expire 24 hours after
//! creation. Position writes come from the owning client on its persistence
//! throttle; the last writer wins.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use domain::models::{CreateSpaceNoteRequest, SpaceNote, UpdateNotePositionRequest};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use persistence::repositories::SpaceNoteRepository;

/// POST /api/v1/notes
///
/// Create a note expiring 24 hours out.
pub async fn create_note(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Json(request): Json<CreateSpaceNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let expires_at = SpaceNote::expiry_for(Utc::now());
    let repo = SpaceNoteRepository::new(state.pool.clone());
    let note = repo
        .create(
            auth.user_id,
            request.content.trim(),
            request.pos_x,
            request.pos_y,
            expires_at,
        )
        .await?;

    info!(note_id = %note.id, user_id = %auth.user_id, "Created space note");

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/v1/notes
///
/// List all notes that have not yet expired.
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(_auth): Extension<UserAuth>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SpaceNoteRepository::new(state.pool.clone());
    let notes = repo.list_active().await?;

    Ok(Json(notes))
}

/// PUT /api/v1/notes/:note_id/position
///
/// Move a note. Owner only.
pub async fn update_note_position(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(note_id): Path<Uuid>,
    Json(request): Json<UpdateNotePositionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = SpaceNoteRepository::new(state.pool.clone());
    let note = load_owned_note(&repo, note_id, auth.user_id).await?;

    let updated = repo
        .update_position(note.id, request.pos_x, request.pos_y)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(updated))
}

/// DELETE /api/v1/notes/:note_id
///
/// Delete a note. Owner only.
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(note_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SpaceNoteRepository::new(state.pool.clone());
    let note = load_owned_note(&repo, note_id, auth.user_id).await?;

    repo.delete(note.id).await?;

    info!(note_id = %note_id, user_id = %auth.user_id, "Deleted space note");

    Ok(StatusCode::NO_CONTENT)
}

async fn load_owned_note(
    repo: &SpaceNoteRepository,
    note_id: Uuid,
    user_id: Uuid,
) -> Result<SpaceNote, ApiError> {
    let note = repo
        .find_by_id(note_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    if note.user_id != user_id {
        return Err(ApiError::Forbidden(
            "Only the owner may modify this note".to_string(),
        ));
    }

    Ok(note)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_rejects_blank_content() {
        let request = CreateSpaceNoteRequest {
            content: "  ".to_string(),
            pos_x: 0.5,
            pos_y: 0.5,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_non_finite_coordinates() {
        let request = CreateSpaceNoteRequest {
            content: "finals soon".to_string(),
            pos_x: f64::NAN,
            pos_y: 0.5,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_expiry_set_from_creation_instant() {
        let now = Utc::now();
        let expires_at = SpaceNote::expiry_for(now);
        assert!(expires_at > now);
    }
}

//! Bearer-token authentication middleware.
//!
//! Access tokens are minted by the hosted auth service; this middleware
//! verifies them against the service's public key and stores the caller's
//! identity in request extensions.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;
use shared::jwt;

/// Authenticated user identity extracted from the access token.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// Email claim, when the auth service includes it.
    pub email: Option<String>,
}

/// Middleware that requires a valid bearer token.
///
/// Rejects requests without a verifiable token; on success the [`UserAuth`]
/// identity is available to handlers via `Extension`.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return unauthorized_response("Missing or invalid Authorization header"),
    };

    let claims = match state.verifier.validate(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Token validation failed: {}", e);
            return unauthorized_response("Invalid or expired token");
        }
    };

    let user_id = match jwt::extract_user_id(&claims) {
        Ok(id) => id,
        Err(_) => return unauthorized_response("Invalid subject in token"),
    };

    req.extensions_mut().insert(UserAuth {
        user_id,
        email: claims.email,
    });
    next.run(req).await
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_user_auth, security_headers_middleware, trace_id,
};
use crate::routes::{health, members, notes, profile, spaces, study_plan, tasks};
use crate::services::{EmailService, Notifier, StudyPlanClient};
use shared::jwt::JwtVerifier;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub verifier: Arc<JwtVerifier>,
    pub notifier: Notifier,
    pub study_plan: StudyPlanClient,
}

pub fn create_app(config: Config, pool: PgPool) -> anyhow::Result<Router> {
    let verifier = Arc::new(JwtVerifier::with_leeway(
        &config.jwt.public_key,
        config.jwt.leeway_secs,
    )?);
    let notifier = Notifier::new(EmailService::new(config.email.clone()));
    let study_plan = StudyPlanClient::new(config.ai.clone())?;

    let config = Arc::new(config);
    let state = AppState {
        pool,
        config: config.clone(),
        verifier,
        notifier,
        study_plan,
    };

    Ok(build_router(state, &config))
}

/// Assembles the router from an already-built state. Split out so tests can
/// inject their own verifier and services.
pub fn build_router(state: AppState, config: &Config) -> Router {
    // CORS: open by default, restricted when origins are configured
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // All /api/v1 routes require a verified bearer token
    let authed_routes = Router::new()
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        // Spaces
        .route(
            "/api/v1/spaces",
            post(spaces::create_space).get(spaces::list_spaces),
        )
        .route("/api/v1/spaces/join", post(spaces::join_space))
        .route("/api/v1/spaces/:space_id/name", put(spaces::rename_space))
        .route("/api/v1/spaces/:space_id", delete(spaces::delete_space))
        .route("/api/v1/spaces/:space_id/leave", post(spaces::leave_space))
        // Members
        .route(
            "/api/v1/spaces/:space_id/members",
            get(members::list_members),
        )
        .route(
            "/api/v1/spaces/:space_id/members/:user_id/role",
            put(members::update_member_role),
        )
        .route(
            "/api/v1/spaces/:space_id/members/:user_id",
            delete(members::kick_member),
        )
        // Tasks
        .route(
            "/api/v1/tasks",
            post(tasks::create_personal_task).get(tasks::list_personal_tasks),
        )
        .route(
            "/api/v1/spaces/:space_id/tasks",
            post(tasks::create_space_task).get(tasks::list_space_tasks),
        )
        .route(
            "/api/v1/tasks/:task_id",
            put(tasks::update_task).delete(tasks::delete_task),
        )
        // Space notes
        .route(
            "/api/v1/notes",
            post(notes::create_note).get(notes::list_notes),
        )
        .route(
            "/api/v1/notes/:note_id/position",
            put(notes::update_note_position),
        )
        .route("/api/v1/notes/:note_id", delete(notes::delete_note))
        // Study plan
        .route("/api/v1/study-plan", post(study_plan::generate_study_plan))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(authed_routes)
        // Global middleware (bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}

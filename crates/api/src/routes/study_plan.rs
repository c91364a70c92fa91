//! Study-plan proxy route.

use axum::{
    extract::{Extension, State},
    response::IntoResponse,
    Json,
};
use domain::models::{StudyPlanRequest, StudyPlanResponse};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_study_plan_request;
use crate::middleware::UserAuth;

/// POST /api/v1/study-plan
///
/// Forward the caller's prompt to the generative endpoint and return the
/// first candidate's text. Upstream failures map to a generic 503; error
/// details stay in the logs.
pub async fn generate_study_plan(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Json(request): Json<StudyPlanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let plan = match state.study_plan.generate(request.prompt.trim()).await {
        Ok(plan) => plan,
        Err(_) => {
            record_study_plan_request("failed");
            return Err(ApiError::ServiceUnavailable(
                "Study plan service is temporarily unavailable".to_string(),
            ));
        }
    };

    record_study_plan_request("ok");
    info!(
        user_id = %auth.user_id,
        prompt_chars = request.prompt.len(),
        plan_chars = plan.len(),
        "Generated study plan"
    );

    Ok(Json(StudyPlanResponse { plan }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_blank_prompt() {
        let request = StudyPlanRequest {
            prompt: "   ".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_accepts_real_prompt() {
        let request = StudyPlanRequest {
            prompt: "Plan my week for the physics midterm".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_response_serialization() {
        let json = serde_json::to_string(&StudyPlanResponse {
            plan: "Day 1: kinematics".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"plan":"Day 1: kinematics"}"#);
    }
}

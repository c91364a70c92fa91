//! Study-plan proxy request/response models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to generate a study plan from a free-text prompt.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct StudyPlanRequest {
    #[validate(custom(function = "shared::validation::validate_prompt"))]
    pub prompt: String,
}

/// Raw model output returned to the caller. The caller is responsible for
/// parsing or displaying whatever text comes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StudyPlanResponse {
    pub plan: String,
}

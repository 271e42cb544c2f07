//! Axum route handlers for the Launch API.
//!
//! Each handler fills one prompt template with the request's fields and
//! forwards it through `safe_call_json`. The model's JSON is returned
//! verbatim — the response shape is a prompt-level convention, not a
//! validated contract.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::launch::prompts::{
    GENERATE_HYPOTHESIS_TEMPLATE, GENERATE_TASK_TEMPLATE, LEARN_AND_ITERATE_TEMPLATE,
    SELECT_LAUNCH_TYPE_TEMPLATE,
};
use crate::llm_client::prompts::fill_prompt;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypothesisRequest {
    pub product: String,
    pub audience: String,
    pub artifact: String,
    pub learning_goal: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchTypeRequest {
    pub hypothesis: String,
    pub artifact: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub hypothesis: String,
    pub launch_type: String,
    pub artifact: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnRequest {
    pub hypothesis: String,
    pub task: String,
    pub feedback: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/launch/hypothesis
///
/// Generates one testable launch hypothesis from the founder's context.
pub async fn handle_generate_hypothesis(
    State(state): State<AppState>,
    Json(request): Json<HypothesisRequest>,
) -> Result<Json<Value>, AppError> {
    require_nonempty("product", &request.product)?;
    require_nonempty("audience", &request.audience)?;
    require_nonempty("artifact", &request.artifact)?;
    require_nonempty("learningGoal", &request.learning_goal)?;

    let llm = state.llm()?;
    let prompt = fill_prompt(
        GENERATE_HYPOTHESIS_TEMPLATE,
        &[
            ("PRODUCT_DESCRIPTION", request.product.as_str()),
            ("TARGET_AUDIENCE", request.audience.as_str()),
            ("CURRENT_ARTIFACT", request.artifact.as_str()),
            ("LEARNING_GOAL", request.learning_goal.as_str()),
        ],
    );

    let result = llm.safe_call_json(&state.limiter, &prompt).await?;
    Ok(Json(result))
}

/// POST /api/v1/launch/launch-type
///
/// Picks the single launch type that tests the hypothesis fastest.
pub async fn handle_select_launch_type(
    State(state): State<AppState>,
    Json(request): Json<LaunchTypeRequest>,
) -> Result<Json<Value>, AppError> {
    require_nonempty("hypothesis", &request.hypothesis)?;
    require_nonempty("artifact", &request.artifact)?;

    let llm = state.llm()?;
    let prompt = fill_prompt(
        SELECT_LAUNCH_TYPE_TEMPLATE,
        &[
            ("HYPOTHESIS", request.hypothesis.as_str()),
            ("ARTIFACT_TYPE", request.artifact.as_str()),
        ],
    );

    let result = llm.safe_call_json(&state.limiter, &prompt).await?;
    Ok(Json(result))
}

/// POST /api/v1/launch/task
///
/// Produces one 30-minute, human-facing task for the chosen launch type.
pub async fn handle_generate_task(
    State(state): State<AppState>,
    Json(request): Json<TaskRequest>,
) -> Result<Json<Value>, AppError> {
    require_nonempty("hypothesis", &request.hypothesis)?;
    require_nonempty("launchType", &request.launch_type)?;
    require_nonempty("artifact", &request.artifact)?;

    let llm = state.llm()?;
    let prompt = fill_prompt(
        GENERATE_TASK_TEMPLATE,
        &[
            ("HYPOTHESIS", request.hypothesis.as_str()),
            ("LAUNCH_TYPE", request.launch_type.as_str()),
            ("ARTIFACT_TYPE", request.artifact.as_str()),
        ],
    );

    let result = llm.safe_call_json(&state.limiter, &prompt).await?;
    Ok(Json(result))
}

/// POST /api/v1/launch/learn
///
/// Closes the loop: analyzes the founder's report from a completed task and
/// returns the validated/invalidated verdict plus the next hypothesis.
pub async fn handle_learn_and_iterate(
    State(state): State<AppState>,
    Json(request): Json<LearnRequest>,
) -> Result<Json<Value>, AppError> {
    require_nonempty("hypothesis", &request.hypothesis)?;
    require_nonempty("task", &request.task)?;
    require_nonempty("feedback", &request.feedback)?;

    let llm = state.llm()?;
    let prompt = fill_prompt(
        LEARN_AND_ITERATE_TEMPLATE,
        &[
            ("HYPOTHESIS", request.hypothesis.as_str()),
            ("TASK_DESCRIPTION", request.task.as_str()),
            ("USER_FEEDBACK", request.feedback.as_str()),
        ],
    );

    let result = llm.safe_call_json(&state.limiter, &prompt).await?;
    Ok(Json(result))
}

fn require_nonempty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

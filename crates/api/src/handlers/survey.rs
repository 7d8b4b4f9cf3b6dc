//! Handlers for the survey form, participant session and submissions.
//!
//! The browser renders the form from [`get_form`], fetches the scenario
//! matching the chosen type or style from [`get_scenario`], and posts the
//! collected answers to [`submit`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use gongryak_core::form::{FormDefinition, SurveyAnswers, DUPLICATE_NOTICE, SUBMITTED_NOTICE};
use gongryak_core::scenario::{scenario_for_key, Scenario};
use gongryak_core::types::SessionId;
use gongryak_sheets::SubmitOutcome;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::session::SessionContext;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScenarioResponse {
    /// The key as requested.
    pub category: String,
    #[serde(flatten)]
    pub scenario: &'static Scenario,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: SessionId,
    pub already_submitted: bool,
    /// Message to show instead of the form when already submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub session_id: SessionId,
    pub category: String,
    pub submitted_at: String,
    pub notice: &'static str,
}

/// GET /api/v1/survey
pub async fn get_form(State(state): State<AppState>) -> Json<DataResponse<FormDefinition>> {
    Json(DataResponse {
        data: FormDefinition::for_variant(&state.config.survey),
    })
}

/// GET /api/v1/survey/scenario/{category}
///
/// Under type keying an unknown category yields the generic scenario; under
/// style keying it is a 404.
pub async fn get_scenario(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<impl IntoResponse> {
    let scenario = scenario_for_key(&category, state.config.survey.keying)?;

    Ok(Json(DataResponse {
        data: ScenarioResponse { category, scenario },
    }))
}

/// GET /api/v1/session
///
/// Issues the participant identifier on first call and reports whether it
/// already has a recorded submission.
pub async fn get_session(
    State(state): State<AppState>,
    ctx: SessionContext,
) -> AppResult<impl IntoResponse> {
    let already_submitted = state.sink.has_submitted(&ctx.session_id).await?;

    if ctx.issued {
        tracing::info!(session_id = %ctx.session_id, "New participant session");
    } else if already_submitted {
        tracing::info!(session_id = %ctx.session_id, "Returning participant already submitted");
    }

    Ok(Json(DataResponse {
        data: SessionResponse {
            session_id: ctx.session_id,
            already_submitted,
            notice: already_submitted.then_some(DUPLICATE_NOTICE),
        },
    }))
}

/// POST /api/v1/submissions
///
/// Validates the answers against the scenario, then hands the record to the
/// sink. Answers for an identifier that is already recorded are rejected
/// with 409 and nothing is written.
pub async fn submit(
    State(state): State<AppState>,
    ctx: SessionContext,
    payload: Result<Json<SurveyAnswers>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(answers) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let variant = &state.config.survey;
    let submitted_at = state.config.wall_clock.format(Utc::now());
    let record = answers.into_record(ctx.session_id, variant, submitted_at)?;

    match state.sink.submit(&record).await? {
        SubmitOutcome::Accepted => Ok((
            StatusCode::CREATED,
            Json(DataResponse {
                data: SubmissionReceipt {
                    session_id: record.session_id,
                    category: record.category,
                    submitted_at: record.submitted_at,
                    notice: SUBMITTED_NOTICE,
                },
            }),
        )),
        SubmitOutcome::Duplicate => Err(AppError::Duplicate),
    }
}

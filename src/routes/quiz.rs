use axum::{
    extract::{Path, Request, State},
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::dto::quiz_dto::{
    CurrentQuestionResponse, QuizStateResponse, StartQuizResponse, SubmitAnswerRequest,
    SubmitAnswerResponse, SummarizeRequest,
};
use crate::models::quiz_state::QuizState;
use crate::routes::extract::json_or_default;
use crate::AppState;

#[axum::debug_handler]
pub async fn start_quiz(State(state): State<AppState>) -> crate::error::Result<Response> {
    let outcome = state.quiz.start().await?;
    let progress = match outcome.state {
        QuizState::AwaitingQuestion { progress } => progress,
        QuizState::Finished => outcome.total,
    };
    Ok(Json(StartQuizResponse {
        token: outcome.token,
        progress,
        total: outcome.total,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn get_current_question(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Response> {
    let current = state.quiz.current_question(&token).await?;
    Ok(Json(CurrentQuestionResponse::from(current)).into_response())
}

#[axum::debug_handler]
pub async fn get_state(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Response> {
    let quiz_state = state.quiz.state(&token).await?;
    Ok(Json(QuizStateResponse {
        state: quiz_state,
        total: state.quiz.total(),
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<SubmitAnswerRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let outcome = state.quiz.submit_answer(&token, req.answer).await?;
    Ok(Json(SubmitAnswerResponse {
        next_progress: outcome.next_progress,
        finished: outcome.finished,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn get_summary(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Response> {
    let summary = state.quiz.summarize(&token, None).await?;
    Ok(Json(summary).into_response())
}

/// Summarizes, first submitting `pending_answer` if a question is still open.
/// An empty body means no pending answer.
#[axum::debug_handler]
pub async fn finish_quiz(
    State(state): State<AppState>,
    Path(token): Path<String>,
    request: Request,
) -> crate::error::Result<Response> {
    let req: SummarizeRequest = json_or_default(request).await?;
    req.validate()?;
    let summary = state.quiz.summarize(&token, req.pending_answer).await?;
    Ok(Json(summary).into_response())
}

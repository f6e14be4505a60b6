//! Cookie-driven page flow: `/` starts, `/q` shows, `/next` submits and
//! `/end` summarizes. Recoverable errors become redirects.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Deserialize;
use validator::Validate;

use crate::dto::quiz_dto::CurrentQuestionResponse;
use crate::error::{Error, Result};
use crate::routes::extract::form_or_default;
use crate::services::quiz_service::CurrentQuestion;
use crate::AppState;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AnswerForm {
    #[validate(length(max = 1024))]
    pub answer: Option<String>,
}

fn recover(err: Error) -> Result<Response> {
    match err {
        Error::SessionNotFound => Ok(Redirect::to("/").into_response()),
        Error::NoCurrentQuestion => Ok(Redirect::to("/end").into_response()),
        other => Err(other),
    }
}

fn session_token(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let token = state.cookies.token_from_headers(headers);
    if token.is_none() {
        tracing::debug!("no valid session cookie, redirecting to start");
    }
    token
}

#[axum::debug_handler]
pub async fn start_page(State(state): State<AppState>) -> Result<Response> {
    let outcome = state.quiz.start().await?;
    let cookie = state
        .cookies
        .set_cookie_header(&outcome.token)
        .ok_or_else(|| Error::Internal("failed to sign session cookie".to_string()))?;
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/q")).into_response())
}

#[axum::debug_handler]
pub async fn question_page(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let Some(token) = session_token(&state, &headers) else {
        return Ok(Redirect::to("/").into_response());
    };
    match state.quiz.current_question(&token).await {
        Ok(CurrentQuestion::Finished) => Ok(Redirect::to("/end").into_response()),
        Ok(current) => Ok(Json(CurrentQuestionResponse::from(current)).into_response()),
        Err(e) => recover(e),
    }
}

#[axum::debug_handler]
pub async fn next_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
) -> Result<Response> {
    let form: AnswerForm = form_or_default(request).await?;
    form.validate()?;
    let Some(token) = session_token(&state, &headers) else {
        return Ok(Redirect::to("/").into_response());
    };
    match state.quiz.submit_answer(&token, form.answer).await {
        Ok(outcome) if outcome.finished => Ok(Redirect::to("/end").into_response()),
        Ok(_) => Ok(Redirect::to("/q").into_response()),
        Err(e) => recover(e),
    }
}

/// `POST /end` carries the answer for the last open question; an absent
/// field or a missing body counts as an empty answer.
#[axum::debug_handler]
pub async fn finish_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
) -> Result<Response> {
    let form: AnswerForm = form_or_default(request).await?;
    form.validate()?;
    let Some(token) = session_token(&state, &headers) else {
        return Ok(Redirect::to("/").into_response());
    };
    let pending = Some(form.answer.unwrap_or_default());
    match state.quiz.summarize(&token, pending).await {
        Ok(summary) => Ok(Json(summary).into_response()),
        Err(e) => recover(e),
    }
}

#[axum::debug_handler]
pub async fn summary_page(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let Some(token) = session_token(&state, &headers) else {
        return Ok(Redirect::to("/").into_response());
    };
    tracing::debug!(token = %token, "rendering summary");
    match state.quiz.summarize(&token, None).await {
        Ok(summary) => Ok(Json(summary).into_response()),
        Err(e) => recover(e),
    }
}

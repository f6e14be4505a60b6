use std::sync::Arc;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::models::answered_record::AnsweredRecord;
use crate::models::question::Question;
use crate::models::quiz_state::QuizState;
use crate::services::scoring_service::{ScoringService, Summary};
use crate::store::SessionStore;
use crate::utils::token::generate_session_token;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartOutcome {
    pub token: String,
    pub state: QuizState,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CurrentQuestion {
    Question {
        question: Question,
        progress: u32,
        total: u32,
    },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub next_progress: u32,
    pub finished: bool,
}

/// Drives a session through the catalog: one question at a time, one
/// answer per question, then a summary.
#[derive(Clone)]
pub struct QuizService {
    catalog: Arc<Catalog>,
    store: Arc<dyn SessionStore>,
}

impl QuizService {
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn SessionStore>) -> Self {
        Self { catalog, store }
    }

    pub fn total(&self) -> u32 {
        self.catalog.len()
    }

    /// Opens a fresh session under a new token. Earlier sessions are left in
    /// the store untouched.
    pub async fn start(&self) -> Result<StartOutcome> {
        let token = generate_session_token();
        self.store.create(&token).await?;
        tracing::info!(token = %token, total = self.total(), "quiz started");
        Ok(StartOutcome {
            token,
            state: QuizState::from_progress(0, self.total()),
            total: self.total(),
        })
    }

    pub async fn state(&self, token: &str) -> Result<QuizState> {
        let progress = self.store.get_progress(token).await?;
        Ok(QuizState::from_progress(progress, self.total()))
    }

    pub async fn current_question(&self, token: &str) -> Result<CurrentQuestion> {
        let progress = self.store.get_progress(token).await?;
        match self.catalog.get(progress) {
            Some(question) => Ok(CurrentQuestion::Question {
                question: question.clone(),
                progress,
                total: self.total(),
            }),
            None => Ok(CurrentQuestion::Finished),
        }
    }

    /// Records `selected` against the current question and advances.
    ///
    /// `None` and `Some("")` are both stored as an empty answer, which is how a
    /// client reports an expired timer.
    pub async fn submit_answer(&self, token: &str, selected: Option<String>) -> Result<SubmitOutcome> {
        let progress = self.store.get_progress(token).await?;
        let question = self.catalog.get(progress).ok_or(Error::NoCurrentQuestion)?;

        let user_answer = selected.unwrap_or_default();
        tracing::debug!(
            token = %token,
            progress,
            user_answer = %user_answer,
            correct = %question.correct_answer,
            "recording answer"
        );

        let record = AnsweredRecord::snapshot(progress, question, user_answer);
        let next_progress = self.store.record_answer(token, record).await?;
        let finished = next_progress >= self.total();

        tracing::info!(token = %token, progress = next_progress, total = self.total(), finished, "answer recorded");
        Ok(SubmitOutcome {
            next_progress,
            finished,
        })
    }

    /// Builds the score summary.
    ///
    /// When `pending` is given and a question is still open, it is submitted
    /// first. On an already finished session `pending` is dropped, so finishing
    /// twice never advances twice.
    pub async fn summarize(&self, token: &str, pending: Option<String>) -> Result<Summary> {
        if let Some(answer) = pending {
            match self.submit_answer(token, Some(answer)).await {
                Ok(_) => {}
                Err(Error::NoCurrentQuestion) => {
                    tracing::debug!(token = %token, "quiz already finished, ignoring pending answer");
                }
                Err(e) => return Err(e),
            }
        }

        let records = self.store.list_answers(token).await?;
        let summary = ScoringService::summarize(&self.catalog, records);
        tracing::info!(
            token = %token,
            correct = summary.correct_count,
            total = summary.total,
            "quiz summarized"
        );
        Ok(summary)
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::Question;
use crate::models::quiz_state::QuizState;
use crate::services::quiz_service::CurrentQuestion;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartQuizResponse {
    pub token: String,
    pub progress: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub question: String,
    pub options: Vec<String>,
    pub difficulty: String,
}

impl From<Question> for QuestionView {
    fn from(q: Question) -> Self {
        Self {
            question: q.text,
            options: q.options,
            difficulty: q.difficulty,
        }
    }
}

/// Either the open question or `{"finished": true}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrentQuestionResponse {
    Question {
        question: QuestionView,
        progress: u32,
        total: u32,
        /// One-based position, for "question 3 of 15".
        number: u32,
    },
    Finished {
        finished: bool,
    },
}

impl From<CurrentQuestion> for CurrentQuestionResponse {
    fn from(current: CurrentQuestion) -> Self {
        match current {
            CurrentQuestion::Question {
                question,
                progress,
                total,
            } => CurrentQuestionResponse::Question {
                question: question.into(),
                progress,
                total,
                number: progress + 1,
            },
            CurrentQuestion::Finished => CurrentQuestionResponse::Finished { finished: true },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizStateResponse {
    #[serde(flatten)]
    pub state: QuizState,
    pub total: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(max = 1024))]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub next_progress: u32,
    pub finished: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SummarizeRequest {
    #[validate(length(max = 1024))]
    pub pending_answer: Option<String>,
}

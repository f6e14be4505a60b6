use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// A submitted answer together with the ground truth at submission time.
///
/// `user_answer` is empty when the client submitted nothing, which is how an
/// expired timer is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredRecord {
    pub question_index: u32,
    pub user_answer: String,
    pub correct_answer: String,
    pub difficulty: String,
}

impl AnsweredRecord {
    pub fn snapshot(question_index: u32, question: &Question, user_answer: String) -> Self {
        Self {
            question_index,
            user_answer,
            correct_answer: question.correct_answer.clone(),
            difficulty: question.difficulty.clone(),
        }
    }

    pub fn is_correct(&self) -> bool {
        !self.user_answer.is_empty() && self.user_answer == self.correct_answer
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuizState {
    AwaitingQuestion { progress: u32 },
    Finished,
}

impl QuizState {
    pub fn from_progress(progress: u32, total: u32) -> Self {
        if progress >= total {
            QuizState::Finished
        } else {
            QuizState::AwaitingQuestion { progress }
        }
    }
}

use std::path::Path;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::models::question::Question;

/// The fixed, ordered question set shared by every session for the lifetime
/// of the process.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Arc<[Question]>,
}

impl Catalog {
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::CatalogLoad("catalog contains no questions".to_string()));
        }
        for (idx, q) in questions.iter().enumerate() {
            if q.options.is_empty() {
                return Err(Error::CatalogLoad(format!(
                    "question {} has no options",
                    idx
                )));
            }
            if !q.options.contains(&q.correct_answer) {
                tracing::warn!(
                    index = idx,
                    question = %q.text,
                    "correct answer is not one of the listed options"
                );
            }
        }
        Ok(Self {
            questions: questions.into(),
        })
    }

    /// Parse a JSON array of questions and optionally shuffle it once.
    pub fn from_json<R: Rng + ?Sized>(raw: &str, shuffle: Option<&mut R>) -> Result<Self> {
        let mut questions: Vec<Question> = serde_json::from_str(raw)
            .map_err(|e| Error::CatalogLoad(format!("invalid catalog JSON: {}", e)))?;
        if let Some(rng) = shuffle {
            questions.shuffle(rng);
        }
        Self::new(questions)
    }

    pub async fn load(path: impl AsRef<Path>, shuffle: bool) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::CatalogLoad(format!("{}: {}", path.display(), e)))?;

        let catalog = if shuffle {
            Self::from_json(&raw, Some(&mut rand::thread_rng()))?
        } else {
            Self::from_json::<rand::rngs::ThreadRng>(&raw, None)?
        };
        tracing::info!(
            path = %path.display(),
            questions = catalog.len(),
            shuffled = shuffle,
            "question catalog loaded"
        );
        Ok(catalog)
    }

    pub fn get(&self, index: u32) -> Option<&Question> {
        self.questions.get(index as usize)
    }

    pub fn len(&self) -> u32 {
        self.questions.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

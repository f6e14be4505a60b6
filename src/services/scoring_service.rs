use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::answered_record::AnsweredRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyTally {
    pub correct: u32,
    pub total: u32,
}

/// One line of the summary page: the stored record plus the question it
/// refers to, looked up from the catalog for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedAnswer {
    pub question_index: u32,
    pub question_text: String,
    pub options: Vec<String>,
    pub user_answer: String,
    pub correct_answer: String,
    pub difficulty: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub answered_records: Vec<GradedAnswer>,
    pub correct_count: u32,
    pub total: u32,
    pub percentage: f64,
    pub by_difficulty: BTreeMap<String, DifficultyTally>,
}

pub struct ScoringService;

impl ScoringService {
    /// Scores `records` by exact string comparison against the snapshotted
    /// correct answer. An empty answer never counts.
    pub fn summarize(catalog: &Catalog, mut records: Vec<AnsweredRecord>) -> Summary {
        records.sort_by_key(|r| r.question_index);

        let mut correct_count: u32 = 0;
        let mut by_difficulty: BTreeMap<String, DifficultyTally> = BTreeMap::new();
        let mut graded = Vec::with_capacity(records.len());

        for record in records {
            let is_correct = record.is_correct();
            if is_correct {
                correct_count += 1;
            }

            let tally = by_difficulty.entry(record.difficulty.clone()).or_default();
            tally.total += 1;
            if is_correct {
                tally.correct += 1;
            }

            let (question_text, options) = match catalog.get(record.question_index) {
                Some(q) => (q.text.clone(), q.options.clone()),
                None => {
                    tracing::warn!(
                        index = record.question_index,
                        "answered question is missing from the catalog"
                    );
                    (String::new(), Vec::new())
                }
            };

            graded.push(GradedAnswer {
                question_index: record.question_index,
                question_text,
                options,
                user_answer: record.user_answer,
                correct_answer: record.correct_answer,
                difficulty: record.difficulty,
                is_correct,
            });
        }

        let total = graded.len() as u32;
        let percentage = if total == 0 {
            0.0
        } else {
            (f64::from(correct_count) / f64::from(total) * 10000.0).round() / 100.0
        };

        Summary {
            answered_records: graded,
            correct_count,
            total,
            percentage,
            by_difficulty,
        }
    }
}

//! Batch import of recorded answers (`respondent,question_id,answer_id`) for offline scoring.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::profile::{compute_profile, Profile};
use crate::questionnaire::{AnswerId, AnswerSelection, QuestionId, Questionnaire};

#[derive(Debug, thiserror::Error)]
pub enum ResponseImportError {
    #[error("failed to read responses: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid responses CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondentSelection {
    pub respondent: String,
    pub selections: AnswerSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RespondentProfile {
    pub respondent: String,
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    respondent: String,
    question_id: QuestionId,
    answer_id: AnswerId,
}

pub struct ResponseImport;

impl ResponseImport {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<RespondentSelection>, ResponseImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Groups rows per respondent in first-seen order; a repeated question keeps the last row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RespondentSelection>, ResponseImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut grouped: IndexMap<String, AnswerSelection> = IndexMap::new();
        for row in csv_reader.deserialize::<ResponseRow>() {
            let row = row?;
            grouped
                .entry(row.respondent)
                .or_default()
                .select(row.question_id, row.answer_id);
        }

        tracing::debug!(respondents = grouped.len(), "responses imported");

        Ok(grouped
            .into_iter()
            .map(|(respondent, selections)| RespondentSelection {
                respondent,
                selections,
            })
            .collect())
    }
}

pub fn score_all(
    questionnaire: &Questionnaire,
    responses: &[RespondentSelection],
) -> Vec<RespondentProfile> {
    responses
        .iter()
        .map(|response| RespondentProfile {
            respondent: response.respondent.clone(),
            profile: compute_profile(questionnaire, &response.selections),
        })
        .collect()
}

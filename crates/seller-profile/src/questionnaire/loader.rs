use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::domain::Questionnaire;

const BUILTIN_QUESTIONNAIRE: &str = include_str!("../../data/test.v1.json");

/// Failure to read or parse a questionnaire definition.
#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("failed to read questionnaire: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid questionnaire JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Questionnaire {
    /// The questionnaire bundled with the crate (`test.v1`).
    pub fn builtin() -> Result<Self, QuestionnaireError> {
        Self::from_json_str(BUILTIN_QUESTIONNAIRE)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, QuestionnaireError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, QuestionnaireError> {
        let questionnaire: Questionnaire = serde_json::from_reader(reader)?;
        tracing::debug!(
            version = questionnaire.version.as_deref().unwrap_or("unversioned"),
            types = questionnaire.types.len(),
            questions = questionnaire.questions.len(),
            "questionnaire loaded"
        );
        Ok(questionnaire)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, QuestionnaireError> {
        Self::from_reader(raw.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::TypeKey;

    #[test]
    fn builtin_questionnaire_is_well_formed() {
        let questionnaire = Questionnaire::builtin().expect("bundled questionnaire parses");

        let keys: Vec<&str> = questionnaire.types.keys().map(TypeKey::as_str).collect();
        assert_eq!(keys, vec!["A", "N", "D", "S"]);
        assert_eq!(questionnaire.questions.len(), 6);
        for question in &questionnaire.questions {
            assert_eq!(question.answers.len(), 4, "question {}", question.id);
            for answer in &question.answers {
                for key in answer.weights.keys() {
                    assert!(questionnaire.types.contains_key(key));
                }
            }
        }
        for key in questionnaire.types.keys() {
            assert!(!questionnaire.micro_feedback[key].is_empty());
        }
    }

    #[test]
    fn empty_document_yields_empty_questionnaire() {
        let questionnaire = Questionnaire::from_json_str("{}").expect("empty object parses");
        assert!(questionnaire.types.is_empty());
        assert!(questionnaire.questions.is_empty());
        assert!(questionnaire.micro_feedback.is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Questionnaire::from_json_str("{\"types\": ").expect_err("truncated JSON fails");
        assert!(matches!(err, QuestionnaireError::Json(_)));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = Questionnaire::from_path("/definitely/not/here.json")
            .expect_err("missing file fails");
        assert!(matches!(err, QuestionnaireError::Io(_)));
    }
}

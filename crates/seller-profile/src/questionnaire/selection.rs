use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::domain::{AnswerId, QuestionId};

/// The user's chosen answer per question. Re-selecting a question replaces the old choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSelection(IndexMap<QuestionId, AnswerId>);

impl AnswerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a choice, returning the answer it replaced.
    pub fn select(
        &mut self,
        question: impl Into<QuestionId>,
        answer: impl Into<AnswerId>,
    ) -> Option<AnswerId> {
        self.0.insert(question.into(), answer.into())
    }

    pub fn get(&self, question: &QuestionId) -> Option<&AnswerId> {
        self.0.get(question)
    }

    pub fn contains(&self, question: &QuestionId) -> bool {
        self.0.contains_key(question)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerId)> {
        self.0.iter()
    }
}

impl<Q, A> FromIterator<(Q, A)> for AnswerSelection
where
    Q: Into<QuestionId>,
    A: Into<AnswerId>,
{
    fn from_iter<I: IntoIterator<Item = (Q, A)>>(iter: I) -> Self {
        let mut selection = Self::new();
        for (question, answer) in iter {
            selection.select(question, answer);
        }
        selection
    }
}

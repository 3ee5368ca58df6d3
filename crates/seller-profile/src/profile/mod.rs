//! Profile scoring engine.
//!
//! [`compute_profile`] folds the weights of every selected answer into per-type totals,
//! ranks them and derives the primary type, the optional secondary type and display
//! percentages. It is a pure function: no I/O, no caching, and no input shape makes it
//! fail. Unanswered questions, stale answer ids and unregistered type keys all degrade to
//! zero or on-the-fly entries instead.

mod rules;

#[cfg(test)]
mod tests;

pub use rules::{percentage_of, SECONDARY_ADMISSION_RATIO};

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::questionnaire::{AnswerSelection, Questionnaire, TypeKey};
use rules::{admits_secondary, total_score};

/// One ranked `(type, score)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedType {
    pub key: TypeKey,
    pub score: f64,
}

/// A reported type together with its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub key: TypeKey,
    pub score: f64,
    pub percentage: i64,
}

/// Classification result for one answer selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Registry types first (declaration order), then unregistered keys as first seen.
    pub scores: IndexMap<TypeKey, f64>,
    /// Score descending; equal scores keep the order of `scores`.
    pub ranking: Vec<RankedType>,
    pub primary: Option<ProfileEntry>,
    pub secondary: Option<ProfileEntry>,
    pub percentages: IndexMap<TypeKey, i64>,
}

impl Profile {
    pub fn score(&self, key: &TypeKey) -> Option<f64> {
        self.scores.get(key).copied()
    }

    pub fn percentage(&self, key: &TypeKey) -> Option<i64> {
        self.percentages.get(key).copied()
    }

    pub fn primary_key(&self) -> Option<&TypeKey> {
        self.primary.as_ref().map(|entry| &entry.key)
    }

    pub fn secondary_key(&self) -> Option<&TypeKey> {
        self.secondary.as_ref().map(|entry| &entry.key)
    }
}

pub fn compute_profile(questionnaire: &Questionnaire, selections: &AnswerSelection) -> Profile {
    let scores = accumulate_scores(questionnaire, selections);
    let ranking = rank(&scores);

    let total = total_score(&ranking);
    let percentages: IndexMap<TypeKey, i64> = scores
        .iter()
        .map(|(key, score)| (key.clone(), percentage_of(*score, total)))
        .collect();

    let entry = |ranked: &RankedType| ProfileEntry {
        key: ranked.key.clone(),
        score: ranked.score,
        percentage: percentage_of(ranked.score, total),
    };

    let primary = ranking.first().map(entry);
    let secondary = match (ranking.first(), ranking.get(1)) {
        (Some(first), Some(second)) if admits_secondary(first.score, second.score) => {
            Some(entry(second))
        }
        _ => None,
    };

    Profile {
        scores,
        ranking,
        primary,
        secondary,
        percentages,
    }
}

fn accumulate_scores(
    questionnaire: &Questionnaire,
    selections: &AnswerSelection,
) -> IndexMap<TypeKey, f64> {
    let mut scores: IndexMap<TypeKey, f64> = questionnaire
        .types
        .keys()
        .map(|key| (key.clone(), 0.0))
        .collect();

    for question in &questionnaire.questions {
        let Some(picked) = selections.get(&question.id) else {
            continue;
        };
        let Some(answer) = question.answer(picked) else {
            tracing::trace!(question = %question.id, answer = %picked, "skipping stale selection");
            continue;
        };

        for (key, weight) in &answer.weights {
            *scores.entry(key.clone()).or_insert(0.0) += *weight;
        }
    }

    scores
}

fn rank(scores: &IndexMap<TypeKey, f64>) -> Vec<RankedType> {
    let mut ranking: Vec<RankedType> = scores
        .iter()
        .map(|(key, score)| RankedType {
            key: key.clone(),
            score: *score,
        })
        .collect();

    // stable: ties keep registry order
    ranking.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranking
}

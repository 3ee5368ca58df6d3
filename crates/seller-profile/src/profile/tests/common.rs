use indexmap::IndexMap;

use crate::questionnaire::{
    Answer, AnswerId, Question, QuestionId, Questionnaire, TypeDefinition, TypeKey, WeightMap,
};

pub(super) fn key(raw: &str) -> TypeKey {
    TypeKey::from(raw)
}

pub(super) fn weights(entries: &[(&str, f64)]) -> WeightMap {
    entries
        .iter()
        .map(|(key, weight)| (TypeKey::from(*key), *weight))
        .collect()
}

pub(super) fn answer(id: &str, entries: &[(&str, f64)]) -> Answer {
    Answer {
        id: AnswerId::from(id),
        text: format!("answer {id}"),
        weights: weights(entries),
    }
}

pub(super) fn question(id: &str, answers: Vec<Answer>) -> Question {
    Question {
        id: QuestionId::from(id),
        text: format!("question {id}"),
        answers,
    }
}

pub(super) fn questionnaire(types: &[&str], questions: Vec<Question>) -> Questionnaire {
    Questionnaire {
        version: Some("test".to_string()),
        types: types
            .iter()
            .map(|raw| {
                (
                    TypeKey::from(*raw),
                    TypeDefinition {
                        name: Some(format!("Type {raw}")),
                        ..TypeDefinition::default()
                    },
                )
            })
            .collect(),
        questions,
        micro_feedback: IndexMap::new(),
    }
}

/// Two types `X`, `Y`; one question whose answers weigh `{X: 2}` and `{Y: 1}`.
pub(super) fn single_question_xy() -> Questionnaire {
    questionnaire(
        &["X", "Y"],
        vec![question(
            "q1",
            vec![answer("a1", &[("X", 2.0)]), answer("a2", &[("Y", 1.0)])],
        )],
    )
}

/// Two questions whose first answers add up to `{X: 10, Y: 3}`.
pub(super) fn two_question_xy() -> Questionnaire {
    questionnaire(
        &["X", "Y"],
        vec![
            question(
                "q1",
                vec![
                    answer("a1", &[("X", 6.0), ("Y", 1.0)]),
                    answer("a2", &[("Y", 4.0)]),
                ],
            ),
            question(
                "q2",
                vec![
                    answer("a1", &[("X", 4.0), ("Y", 2.0)]),
                    answer("a2", &[("X", 1.0)]),
                ],
            ),
        ],
    )
}

/// A questionnaire whose single answer sets the given scores directly.
pub(super) fn with_scores(types: &[&str], scores: &[(&str, f64)]) -> Questionnaire {
    questionnaire(types, vec![question("q", vec![answer("a", scores)])])
}

use super::common::*;
use crate::profile::compute_profile;
use crate::questionnaire::{AnswerSelection, Questionnaire};

fn select(pairs: &[(&str, &str)]) -> AnswerSelection {
    pairs.iter().copied().collect()
}

#[test]
fn single_answer_yields_primary_without_secondary() {
    let questionnaire = single_question_xy();

    let profile = compute_profile(&questionnaire, &select(&[("q1", "a1")]));

    assert_eq!(profile.score(&key("X")), Some(2.0));
    assert_eq!(profile.score(&key("Y")), Some(0.0));
    let primary = profile.primary.expect("primary present");
    assert_eq!(primary.key, key("X"));
    assert_eq!(primary.score, 2.0);
    assert_eq!(primary.percentage, 100);
    assert!(profile.secondary.is_none());
}

#[test]
fn secondary_admitted_at_thirty_percent() {
    let questionnaire = two_question_xy();

    let profile = compute_profile(&questionnaire, &select(&[("q1", "a1"), ("q2", "a1")]));

    assert_eq!(profile.score(&key("X")), Some(10.0));
    assert_eq!(profile.score(&key("Y")), Some(3.0));
    assert_eq!(profile.primary_key(), Some(&key("X")));
    let secondary = profile.secondary.as_ref().expect("secondary admitted");
    assert_eq!(secondary.key, key("Y"));
    assert_eq!(secondary.percentage, 23);
    assert_eq!(profile.primary.as_ref().map(|entry| entry.percentage), Some(77));
    assert_eq!(profile.percentage(&key("X")), Some(77));
    assert_eq!(profile.percentage(&key("Y")), Some(23));
}

#[test]
fn secondary_boundary_uses_ratio_of_scores() {
    let admitted = compute_profile(
        &with_scores(&["A", "B"], &[("A", 100.0), ("B", 30.0)]),
        &select(&[("q", "a")]),
    );
    assert_eq!(admitted.secondary_key(), Some(&key("B")));

    let rejected = compute_profile(
        &with_scores(&["A", "B"], &[("A", 100.0), ("B", 29.999)]),
        &select(&[("q", "a")]),
    );
    assert!(rejected.secondary.is_none());
}

#[test]
fn non_positive_primary_blocks_secondary() {
    let zero_primary = compute_profile(&single_question_xy(), &AnswerSelection::new());
    assert_eq!(zero_primary.primary_key(), Some(&key("X")));
    assert!(zero_primary.secondary.is_none());

    let negative = compute_profile(
        &with_scores(&["A", "B"], &[("A", -1.0), ("B", -2.0)]),
        &select(&[("q", "a")]),
    );
    assert_eq!(negative.primary_key(), Some(&key("A")));
    assert!(negative.secondary.is_none());
}

#[test]
fn zero_primary_over_negative_scores_has_no_secondary() {
    let profile = compute_profile(
        &with_scores(&["A", "B", "C"], &[("B", -3.0), ("C", -1.0)]),
        &select(&[("q", "a")]),
    );
    assert_eq!(profile.primary_key(), Some(&key("A")));
    assert_eq!(profile.primary.as_ref().map(|entry| entry.score), Some(0.0));
    assert!(profile.secondary.is_none());
}

#[test]
fn percentages_follow_share_of_total() {
    let profile = compute_profile(
        &with_scores(&["A", "B"], &[("A", 3.0), ("B", 1.0)]),
        &select(&[("q", "a")]),
    );
    assert_eq!(profile.percentage(&key("A")), Some(75));
    assert_eq!(profile.percentage(&key("B")), Some(25));

    let zero = compute_profile(&with_scores(&["A", "B"], &[]), &select(&[("q", "a")]));
    assert_eq!(zero.percentage(&key("A")), Some(0));
    assert_eq!(zero.percentage(&key("B")), Some(0));
    assert_eq!(zero.primary.as_ref().map(|entry| entry.percentage), Some(0));
}

#[test]
fn half_percentages_round_away_from_zero() {
    let profile = compute_profile(
        &with_scores(&["A", "B"], &[("A", 1.0), ("B", 7.0)]),
        &select(&[("q", "a")]),
    );
    assert_eq!(profile.percentage(&key("A")), Some(13));
    assert_eq!(profile.percentage(&key("B")), Some(88));
}

#[test]
fn scores_always_cover_the_registry() {
    let questionnaire = questionnaire(
        &["A", "B", "C"],
        vec![question("q1", vec![answer("a1", &[("B", 1.0)])])],
    );

    for selection in [
        AnswerSelection::new(),
        select(&[("q1", "a1")]),
        select(&[("q1", "missing")]),
        select(&[("unknown", "a1")]),
    ] {
        let profile = compute_profile(&questionnaire, &selection);
        for registered in questionnaire.types.keys() {
            assert!(profile.scores.contains_key(registered));
            assert!(profile.percentages.contains_key(registered));
        }
        assert_eq!(profile.ranking.len(), profile.scores.len());
    }
}

#[test]
fn unanswered_and_stale_selections_contribute_nothing() {
    let questionnaire = two_question_xy();

    let partial = compute_profile(&questionnaire, &select(&[("q2", "a2")]));
    assert_eq!(partial.score(&key("X")), Some(1.0));
    assert_eq!(partial.score(&key("Y")), Some(0.0));

    let stale = compute_profile(&questionnaire, &select(&[("q1", "removed"), ("q2", "a2")]));
    assert_eq!(stale, partial);
}

#[test]
fn total_matches_sum_of_selected_weights() {
    let questionnaire = Questionnaire::builtin().expect("bundled questionnaire");
    let selection: AnswerSelection = questionnaire
        .questions
        .iter()
        .enumerate()
        .filter(|(index, _)| index % 2 == 0)
        .map(|(index, question)| {
            let answer = &question.answers[index % question.answers.len()];
            (question.id.clone(), answer.id.clone())
        })
        .collect();

    let expected: f64 = questionnaire
        .questions
        .iter()
        .filter_map(|question| {
            selection
                .get(&question.id)
                .and_then(|picked| question.answer(picked))
        })
        .flat_map(|answer| answer.weights.values())
        .sum();

    let profile = compute_profile(&questionnaire, &selection);
    let total: f64 = profile.scores.values().sum();
    assert_eq!(total, expected);
}

#[test]
fn unregistered_type_keys_are_added_after_registry() {
    let questionnaire = questionnaire(
        &["A", "B"],
        vec![
            question("q1", vec![answer("a1", &[("Z", 2.0), ("A", 1.0)])]),
            question("q2", vec![answer("a1", &[("W", 5.0), ("Z", 1.0)])]),
        ],
    );

    let profile = compute_profile(&questionnaire, &select(&[("q1", "a1"), ("q2", "a1")]));

    let keys: Vec<&str> = profile.scores.keys().map(|key| key.as_str()).collect();
    assert_eq!(keys, vec!["A", "B", "Z", "W"]);
    assert_eq!(profile.score(&key("Z")), Some(3.0));
    assert_eq!(profile.primary_key(), Some(&key("W")));
    assert_eq!(profile.secondary_key(), Some(&key("Z")));
}

#[test]
fn empty_registry_produces_empty_profile() {
    let questionnaire = Questionnaire::default();

    let profile = compute_profile(&questionnaire, &select(&[("q1", "a1")]));

    assert!(profile.scores.is_empty());
    assert!(profile.ranking.is_empty());
    assert!(profile.percentages.is_empty());
    assert!(profile.primary.is_none());
    assert!(profile.secondary.is_none());
}

#[test]
fn recomputation_is_idempotent() {
    let questionnaire = Questionnaire::builtin().expect("bundled questionnaire");
    let selection = select(&[("q1", "q1a2"), ("q2", "q2a3"), ("q4", "q4a2"), ("q6", "q6a4")]);

    let first = compute_profile(&questionnaire, &selection);
    let second = compute_profile(&questionnaire, &selection);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn percentages_round_exact_halves_upward() {
    let profile = compute_profile(
        &with_scores(&["A", "B"], &[("A", 23.0), ("B", 17.0)]),
        &select(&[("q", "a")]),
    );

    assert_eq!(profile.percentage(&key("A")), Some(58));
    assert_eq!(profile.percentage(&key("B")), Some(43));
    assert_eq!(profile.secondary.as_ref().map(|entry| entry.percentage), Some(43));
}

//! Short reaction messages shown right after an answer is picked.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::questionnaire::{Answer, Questionnaire, TypeKey, WeightMap};

/// Type with the largest weight in one answer; the first one seen wins a tie.
pub fn dominant_type(weights: &WeightMap) -> Option<&TypeKey> {
    let mut best: Option<(&TypeKey, f64)> = None;
    for (key, weight) in weights {
        match best {
            Some((_, top)) if *weight <= top => {}
            _ => best = Some((key, *weight)),
        }
    }
    best.map(|(key, _)| key)
}

/// Pick a message for the dominant type of `weights`, uniformly at random.
pub fn pick_micro_feedback<'q, R>(
    questionnaire: &'q Questionnaire,
    weights: &WeightMap,
    rng: &mut R,
) -> Option<&'q str>
where
    R: Rng + ?Sized,
{
    let top = dominant_type(weights)?;
    questionnaire
        .micro_feedback
        .get(top)?
        .choose(rng)
        .map(String::as_str)
}

impl Questionnaire {
    pub fn micro_feedback_for<R>(&self, answer: &Answer, rng: &mut R) -> Option<&str>
    where
        R: Rng + ?Sized,
    {
        pick_micro_feedback(self, &answer.weights, rng)
    }
}

//! Static questionnaire definition: type registry, questions, answers and their weights.
//!
//! The model is intentionally tolerant. Weights that are not numbers coerce to zero while
//! loading, and nothing here checks that answer ids or weight keys line up with the type
//! registry. The scoring engine skips whatever it cannot match.

pub mod domain;
mod loader;
mod selection;

pub use domain::{
    Answer, AnswerId, DiscProfile, JungProfile, Question, QuestionId, Questionnaire,
    SecondaryMix, TypeDefinition, TypeKey, TypeNarrative, WeightMap,
};
pub use loader::QuestionnaireError;
pub use selection::AnswerSelection;

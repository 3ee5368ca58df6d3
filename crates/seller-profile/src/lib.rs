pub mod config;
pub mod error;
pub mod feedback;
pub mod profile;
pub mod questionnaire;
pub mod responses;
pub mod session;
pub mod share;
pub mod telemetry;
pub mod tracking;

pub use profile::{compute_profile, Profile, ProfileEntry, RankedType};
pub use questionnaire::{
    AnswerSelection, Questionnaire, QuestionnaireError, TypeDefinition, TypeKey,
};

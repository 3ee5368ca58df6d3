use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stable key of a classification bucket (e.g. `"A"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeKey(pub String);

/// Question identifier, unique within a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

/// Answer identifier, unique within its question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerId(pub String);

macro_rules! string_key {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_key!(TypeKey);
string_key!(QuestionId);
string_key!(AnswerId);

/// Per-type contributions of a single answer, in declaration order.
pub type WeightMap = IndexMap<TypeKey, f64>;

/// Display metadata for one type. The scoring engine only ever addresses it by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disc: Option<DiscProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jung: Option<JungProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype: Option<String>,
    #[serde(default)]
    pub result: TypeNarrative,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscProfile {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JungProfile {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Result-screen narrative shown for a primary type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeNarrative {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub traps: Vec<String>,
    #[serde(default)]
    pub growth: Vec<String>,
    /// Notes keyed by the secondary type that accompanies this primary.
    #[serde(default)]
    pub secondary_mix: IndexMap<TypeKey, SecondaryMix>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondaryMix {
    #[serde(default)]
    pub adds: String,
    #[serde(default)]
    pub risk: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(default, alias = "prompt")]
    pub text: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn answer(&self, id: &AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|answer| &answer.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "deserialize_weights")]
    pub weights: WeightMap,
}

/// The whole questionnaire as shipped to clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Type registry. Declaration order breaks ranking ties.
    #[serde(default)]
    pub types: IndexMap<TypeKey, TypeDefinition>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default, rename = "microFeedback")]
    pub micro_feedback: IndexMap<TypeKey, Vec<String>>,
}

impl Questionnaire {
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    pub fn answer(&self, question_id: &QuestionId, answer_id: &AnswerId) -> Option<&Answer> {
        self.question(question_id)
            .and_then(|question| question.answer(answer_id))
    }

    pub fn type_definition(&self, key: &TypeKey) -> Option<&TypeDefinition> {
        self.types.get(key)
    }

    /// Display name of a type, falling back to its key.
    pub fn type_name<'a>(&'a self, key: &'a TypeKey) -> &'a str {
        self.types
            .get(key)
            .and_then(|definition| definition.name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(key.as_str())
    }
}

fn deserialize_weights<'de, D>(deserializer: D) -> Result<WeightMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<IndexMap<TypeKey, Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, coerce_weight(&value)))
        .collect())
}

/// Numbers pass through; booleans count as 1/0; numeric strings are parsed.
/// Everything else, including non-finite results, is worth nothing.
pub(crate) fn coerce_weight(value: &Value) -> f64 {
    let weight = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::String(raw) => raw.trim().parse::<f64>().unwrap_or(0.0),
        Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };

    if weight.is_finite() {
        weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_non_numeric_weights_to_zero() {
        assert_eq!(coerce_weight(&json!(2.5)), 2.5);
        assert_eq!(coerce_weight(&json!(-1)), -1.0);
        assert_eq!(coerce_weight(&json!(" 3 ")), 3.0);
        assert_eq!(coerce_weight(&json!(true)), 1.0);
        assert_eq!(coerce_weight(&json!("lots")), 0.0);
        assert_eq!(coerce_weight(&json!("NaN")), 0.0);
        assert_eq!(coerce_weight(&json!(null)), 0.0);
        assert_eq!(coerce_weight(&json!([1])), 0.0);
    }

    #[test]
    fn answer_without_weights_has_empty_map() {
        let answer: Answer =
            serde_json::from_value(json!({ "id": "a1", "weights": null })).expect("answer parses");
        assert!(answer.weights.is_empty());

        let answer: Answer = serde_json::from_value(json!({ "id": "a2" })).expect("answer parses");
        assert!(answer.weights.is_empty());
    }

    #[test]
    fn weights_keep_declaration_order() {
        let answer: Answer = serde_json::from_value(json!({
            "id": "a1",
            "weights": { "Y": 1, "X": "2", "Z": {} }
        }))
        .expect("answer parses");

        let keys: Vec<&str> = answer.weights.keys().map(TypeKey::as_str).collect();
        assert_eq!(keys, vec!["Y", "X", "Z"]);
        assert_eq!(answer.weights["X"], 2.0);
        assert_eq!(answer.weights["Z"], 0.0);
    }

    #[test]
    fn registry_keeps_declaration_order_from_value() {
        let questionnaire: Questionnaire = serde_json::from_value(json!({
            "types": { "S": {}, "A": {}, "N": {} },
            "microFeedback": { "N": [], "A": [] }
        }))
        .expect("questionnaire parses");

        let keys: Vec<&str> = questionnaire.types.keys().map(TypeKey::as_str).collect();
        assert_eq!(keys, vec!["S", "A", "N"]);
        let feedback: Vec<&str> = questionnaire
            .micro_feedback
            .keys()
            .map(TypeKey::as_str)
            .collect();
        assert_eq!(feedback, vec!["N", "A"]);
    }

    #[test]
    fn looks_up_questions_and_answers_by_id() {
        let questionnaire: Questionnaire = serde_json::from_value(json!({
            "questions": [
                { "id": "q1", "text": "First", "answers": [{ "id": "a1", "weights": { "X": 1 } }] },
                { "id": "q2", "prompt": "Second", "answers": [] }
            ]
        }))
        .expect("questionnaire parses");

        let second = questionnaire
            .question(&QuestionId::from("q2"))
            .expect("q2 present");
        assert_eq!(second.text, "Second");
        assert!(questionnaire.question(&QuestionId::from("q9")).is_none());

        let answer = questionnaire
            .answer(&QuestionId::from("q1"), &AnswerId::from("a1"))
            .expect("q1/a1 present");
        assert_eq!(answer.weights["X"], 1.0);
        assert!(questionnaire
            .answer(&QuestionId::from("q2"), &AnswerId::from("a1"))
            .is_none());
    }

    #[test]
    fn type_name_falls_back_to_key() {
        let mut questionnaire = Questionnaire::default();
        questionnaire.types.insert(
            TypeKey::from("A"),
            TypeDefinition {
                name: Some("Analyst".to_string()),
                ..TypeDefinition::default()
            },
        );
        questionnaire
            .types
            .insert(TypeKey::from("B"), TypeDefinition::default());

        assert_eq!(questionnaire.type_name(&TypeKey::from("A")), "Analyst");
        assert_eq!(questionnaire.type_name(&TypeKey::from("B")), "B");
        assert_eq!(questionnaire.type_name(&TypeKey::from("Q")), "Q");
    }
}

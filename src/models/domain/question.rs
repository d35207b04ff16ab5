use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::domain::question_type::QuestionType;

/// A question embedded in a quiz item. It has no lifecycle of its own.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<Value>,
    pub question_type: QuestionType,
    pub question: String,
    pub marks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuestionOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_questions: Option<Vec<SubQuestion>>,
    // opaque, never checked against the question type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<Value>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubQuestion {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mcq() -> Question {
        Question {
            question_id: None,
            qtitle: Some("Warm up".to_string()),
            section: None,
            question_type: QuestionType::Mcq,
            question: "2 + 2 = ?".to_string(),
            marks: 1.0,
            options: Some(vec![
                QuestionOption { text: "4".to_string(), is_correct: true },
                QuestionOption { text: "5".to_string(), is_correct: false },
            ]),
            sub_questions: None,
            correct_answer: Some(json!("4")),
            image_url: None,
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(mcq()).expect("question should serialize");

        assert_eq!(value["questionType"], "mcq");
        assert_eq!(value["options"][0]["isCorrect"], true);
        assert_eq!(value["correctAnswer"], "4");
        assert!(value.get("subQuestions").is_none());
    }

    #[test]
    fn image_url_is_always_written_even_when_null() {
        let value = serde_json::to_value(mcq()).expect("question should serialize");
        assert_eq!(value["imageUrl"], Value::Null);
    }

    #[test]
    fn option_defaults_is_correct_to_false() {
        let option: QuestionOption =
            serde_json::from_value(json!({ "text": "maybe" })).expect("option should parse");
        assert!(!option.is_correct);
    }
}

//! Write-time validation of quiz item payloads.
//!
//! The input is whatever JSON the caller sent. Rules run in a fixed order and
//! the first violation is returned, so the same payload always produces the
//! same error. `correctAnswer` is carried through untouched.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::domain::{
    question::{Question, QuestionOption, SubQuestion},
    question_type::QuestionType,
    quiz_item::NormalizedQuizItem,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizValidationError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("a quiz needs at least one question")]
    EmptyQuestionSet,

    #[error("question {0}: unrecognized question type '{1}'")]
    InvalidQuestionType(usize, String),

    #[error("question {0}: marks must be a number of at least 1")]
    InvalidMarks(usize),

    #[error("question {0}: choice questions need at least one option with text")]
    MissingOptions(usize),

    #[error("question {0}: picture questions need at least one sub-question")]
    MissingSubQuestions(usize),

    #[error("{0} must be {1}")]
    InvalidField(String, &'static str),
}

pub fn validate_quiz_item(payload: &Value) -> Result<NormalizedQuizItem, QuizValidationError> {
    let empty = Map::new();
    let fields = payload.as_object().unwrap_or(&empty);

    let require = |name: &str| {
        required_text(fields.get(name))
            .ok_or_else(|| QuizValidationError::MissingField(name.to_string()))
    };
    let class_name = require("className")?;
    let subject = require("subject")?;
    let book = require("book")?;
    let chapter = require("chapter")?;

    let raw_questions = match fields.get("questions") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(QuizValidationError::EmptyQuestionSet),
    };

    let questions = raw_questions
        .iter()
        .enumerate()
        .map(|(index, raw)| validate_question(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    let title = optional_string(fields.get("title"), "title")?
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NormalizedQuizItem::default_title(&chapter));
    let status = optional_bool(fields.get("status"), "status")?.unwrap_or(true);

    Ok(NormalizedQuizItem {
        class_name,
        subject,
        book,
        chapter,
        title,
        status,
        questions,
    })
}

fn validate_question(index: usize, raw: &Value) -> Result<Question, QuizValidationError> {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    let question_type = match fields.get("questionType") {
        Some(Value::String(tag)) => QuestionType::parse(tag)
            .ok_or_else(|| QuizValidationError::InvalidQuestionType(index, tag.clone()))?,
        Some(other) => {
            return Err(QuizValidationError::InvalidQuestionType(index, other.to_string()))
        }
        None => {
            return Err(QuizValidationError::InvalidQuestionType(index, "null".to_string()))
        }
    };

    let question = required_text(fields.get("question"))
        .ok_or_else(|| QuizValidationError::MissingField(format!("questions[{index}].question")))?;
    let marks = parse_marks(index, fields.get("marks"))?;

    let options = if question_type.is_choice_based() {
        Some(parse_options(index, fields.get("options"))?)
    } else {
        None
    };

    let sub_questions = if question_type.is_composite_based() {
        Some(
            parse_sub_questions(fields.get("subQuestions"))
                .ok_or(QuizValidationError::MissingSubQuestions(index))?,
        )
    } else {
        None
    };

    let qtitle = optional_string(fields.get("qtitle"), &format!("questions[{index}].qtitle"))?
        .filter(|t| !t.is_empty());
    let image_url = optional_string(fields.get("imageUrl"), &format!("questions[{index}].imageUrl"))?;
    let question_id =
        optional_string(fields.get("questionId"), &format!("questions[{index}].questionId"))?;

    Ok(Question {
        question_id,
        qtitle,
        section: fields.get("section").filter(|v| !v.is_null()).cloned(),
        question_type,
        question,
        marks,
        options,
        sub_questions,
        correct_answer: fields.get("correctAnswer").filter(|v| !v.is_null()).cloned(),
        image_url,
    })
}

/// Present, non-blank text. Numbers are accepted and rendered as text.
fn required_text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn parse_marks(index: usize, value: Option<&Value>) -> Result<f64, QuizValidationError> {
    let marks = match value {
        None | Some(Value::Null) => {
            return Err(QuizValidationError::MissingField(format!("questions[{index}].marks")))
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match marks {
        Some(m) if m.is_finite() && m >= 1.0 => Ok(m),
        _ => Err(QuizValidationError::InvalidMarks(index)),
    }
}

fn parse_options(
    index: usize,
    value: Option<&Value>,
) -> Result<Vec<QuestionOption>, QuizValidationError> {
    let items = value
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or(QuizValidationError::MissingOptions(index))?;

    items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            let option = item
                .as_object()
                .ok_or(QuizValidationError::MissingOptions(index))?;
            let text = required_text(option.get("text"))
                .ok_or(QuizValidationError::MissingOptions(index))?;
            let is_correct = optional_bool(
                option.get("isCorrect"),
                &format!("questions[{index}].options[{position}].isCorrect"),
            )?;

            Ok(QuestionOption {
                text,
                is_correct: is_correct.unwrap_or(false),
            })
        })
        .collect()
}

fn parse_sub_questions(value: Option<&Value>) -> Option<Vec<SubQuestion>> {
    let items = value?.as_array().filter(|items| !items.is_empty())?;

    items
        .iter()
        .map(|item| {
            let text = match item {
                Value::Object(sub) => required_text(sub.get("text")),
                other => required_text(Some(other)),
            }?;
            Some(SubQuestion { text })
        })
        .collect()
}

fn optional_string(value: Option<&Value>, field: &str) -> Result<Option<String>, QuizValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(_) => Err(QuizValidationError::InvalidField(field.to_string(), "a string")),
    }
}

fn optional_bool(value: Option<&Value>, field: &str) -> Result<Option<bool>, QuizValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) if s == "true" => Ok(Some(true)),
        Some(Value::String(s)) if s == "false" => Ok(Some(false)),
        Some(_) => Err(QuizValidationError::InvalidField(field.to_string(), "a boolean")),
    }
}

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::domain::question::Question;

/// A quiz as stored in the `quizitems` collection.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>, // assigned by the store on insert
    pub class_name: String,
    pub subject: String,
    pub book: String,
    pub chapter: String,
    pub title: String,
    pub status: bool,
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A validated quiz payload with defaults applied, ready to be persisted.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuizItem {
    pub class_name: String,
    pub subject: String,
    pub book: String,
    pub chapter: String,
    pub title: String,
    pub status: bool,
    pub questions: Vec<Question>,
}

impl NormalizedQuizItem {
    pub fn default_title(chapter: &str) -> String {
        format!("Quiz for {}", chapter)
    }
}

impl QuizItem {
    pub fn from_normalized(item: NormalizedQuizItem) -> Self {
        QuizItem {
            id: None,
            class_name: item.class_name,
            subject: item.subject,
            book: item.book,
            chapter: item.chapter,
            title: item.title,
            status: item.status,
            questions: item.questions,
            created_at: None,
            updated_at: None,
        }
    }

    /// Replaces every client-controlled field, keeping identity and creation time.
    pub fn replace_with(&mut self, item: NormalizedQuizItem) {
        self.class_name = item.class_name;
        self.subject = item.subject;
        self.book = item.book;
        self.chapter = item.chapter;
        self.title = item.title;
        self.status = item.status;
        self.questions = item.questions;
    }

    pub fn total_marks(&self) -> f64 {
        self.questions.iter().map(|q| q.marks).sum()
    }
}

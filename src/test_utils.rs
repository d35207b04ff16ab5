#[cfg(test)]
pub mod fixtures {
    use chrono::Utc;
    use mongodb::bson::oid::ObjectId;
    use serde_json::{json, Value};

    use crate::{
        models::domain::{
            book::BookChapter, chapter::ChapterEntry, Book, ChapterList, QuizItem,
        },
        services::quiz_validator::validate_quiz_item,
    };

    /// A valid quiz payload with one choice question and one essay, 7 marks in total.
    pub fn sample_quiz_payload() -> Value {
        json!({
            "className": "3",
            "subject": "Math",
            "book": "NCERT",
            "chapter": "Fractions",
            "questions": [
                {
                    "questionType": "mcq",
                    "question": "1/2 + 1/2 = ?",
                    "marks": 2,
                    "options": [
                        { "text": "1", "isCorrect": true },
                        { "text": "2" }
                    ]
                },
                {
                    "questionType": "essay",
                    "question": "Where do you see fractions at home?",
                    "marks": 5
                }
            ]
        })
    }

    /// The sample payload as a stored document.
    pub fn sample_quiz_item() -> QuizItem {
        let normalized = validate_quiz_item(&sample_quiz_payload())
            .expect("sample payload should validate");
        let mut item = QuizItem::from_normalized(normalized);
        let now = Utc::now();
        item.id = Some(ObjectId::new());
        item.created_at = Some(now);
        item.updated_at = Some(now);
        item
    }

    pub fn sample_book() -> Book {
        Book {
            id: Some(ObjectId::new()),
            book: "Honeydew".to_string(),
            code: "HD-8".to_string(),
            subject: "English".to_string(),
            class_name: "8".to_string(),
            chapters: vec![
                BookChapter {
                    title: "The Best Christmas Present in the World".to_string(),
                    number: Some(1),
                    description: None,
                },
                BookChapter {
                    title: "The Tsunami".to_string(),
                    number: Some(2),
                    description: None,
                },
            ],
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn sample_chapter_list() -> ChapterList {
        ChapterList {
            id: Some(ObjectId::new()),
            book: "Math Magic".to_string(),
            code: Some("MM-3".to_string()),
            subject: "Math".to_string(),
            class_name: "3".to_string(),
            chapters: vec![
                ChapterEntry {
                    chapter_name: "Where to Look From".to_string(),
                    number: Some(1),
                },
                ChapterEntry {
                    chapter_name: "Fun with Numbers".to_string(),
                    number: Some(2),
                },
            ],
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, web};

    use crate::{
        app_state::{AppState, Repositories},
        config::Config,
        db::Database,
        repositories::{
            book_repository::MockBookRepository, chapter_repository::MockChapterRepository,
            quiz_item_repository::MockQuizItemRepository, user_repository::MockUserRepository,
        },
    };

    /// Mocks with no expectations; any call on them fails the test.
    pub fn mock_repositories() -> Repositories {
        Repositories {
            users: Arc::new(MockUserRepository::new()),
            books: Arc::new(MockBookRepository::new()),
            chapters: Arc::new(MockChapterRepository::new()),
            quiz_items: Arc::new(MockQuizItemRepository::new()),
        }
    }

    pub async fn test_state(repositories: Repositories) -> web::Data<Arc<AppState>> {
        let config = Config::test_config();
        let db = Database::lazy(&config)
            .await
            .expect("lazy client should build");
        web::Data::new(Arc::new(AppState::with_repositories(
            repositories,
            db,
            config,
        )))
    }

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_sample_quiz_item_matches_payload() {
        let item = sample_quiz_item();
        assert_eq!(item.title, "Quiz for Fractions");
        assert_eq!(item.questions.len(), 2);
        assert_eq!(item.total_marks(), 7.0);
        assert!(item.id.is_some());
    }

    #[test]
    fn test_sample_catalog_fixtures() {
        assert_eq!(sample_book().chapters.len(), 2);
        assert_eq!(sample_chapter_list().subject, "Math");
    }
}

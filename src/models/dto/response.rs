use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    book::BookChapter,
    chapter::ChapterEntry,
    question::Question,
    Book, ChapterList, QuizItem, User, UserRole,
};

fn hex_id(id: Option<mongodb::bson::oid::ObjectId>) -> String {
    id.map(|oid| oid.to_hex()).unwrap_or_default()
}

/// Public view of a user. The password hash never leaves the service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: hex_id(user.id),
            username: user.username,
            role: user.role,
            status: user.status,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItemDto {
    pub id: String,
    pub class_name: String,
    pub subject: String,
    pub book: String,
    pub chapter: String,
    pub title: String,
    pub status: bool,
    pub total_marks: f64,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<QuizItem> for QuizItemDto {
    fn from(item: QuizItem) -> Self {
        QuizItemDto {
            id: hex_id(item.id),
            total_marks: item.total_marks(),
            class_name: item.class_name,
            subject: item.subject,
            book: item.book,
            chapter: item.chapter,
            title: item.title,
            status: item.status,
            questions: item.questions,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: String,
    pub book: String,
    pub code: String,
    pub subject: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub chapters: Vec<BookChapter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        BookDto {
            id: hex_id(book.id),
            book: book.book,
            code: book.code,
            subject: book.subject,
            class_name: book.class_name,
            chapters: book.chapters,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterListDto {
    pub id: String,
    pub book: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub subject: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub chapters: Vec<ChapterEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ChapterList> for ChapterListDto {
    fn from(list: ChapterList) -> Self {
        ChapterListDto {
            id: hex_id(list.id),
            book: list.book,
            code: list.code,
            subject: list.subject,
            class_name: list.class_name,
            chapters: list.chapters,
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            data,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl PaginationMetadata {
    pub fn new(total: u64, page: u64, page_size: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };

        Self {
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMetadata,
}

pub type UserResponse = ApiResponse<UserDto>;
pub type QuizItemResponse = ApiResponse<QuizItemDto>;
pub type BookResponse = ApiResponse<BookDto>;
pub type ChapterListResponse = ApiResponse<ChapterListDto>;

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_dto_hides_password() {
        let mut user = User::new("stmarys", "$argon2id$hash".to_string(), UserRole::School, true);
        let id = ObjectId::new();
        user.id = Some(id);

        let dto: UserDto = user.into();
        assert_eq!(dto.id, id.to_hex());

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "school");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_pagination_metadata_rounds_pages_up() {
        let meta = PaginationMetadata::new(21, 1, 10);
        assert_eq!(meta.total_pages, 3);

        let meta = PaginationMetadata::new(0, 1, 10);
        assert_eq!(meta.total_pages, 0);
    }
}

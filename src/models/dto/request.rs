use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{
    book::BookChapter,
    chapter::ChapterEntry,
    user::UserRole,
};

const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;
const MAX_PAGE: u64 = 100_000;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6 to 128 characters"))]
    pub password: String,

    pub role: Option<UserRole>,

    pub status: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[validate(range(min = 1, max = 100000))]
    pub page: Option<u64>,

    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u64>,
}

impl PaginationParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.page_size())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub role: Option<UserRole>,

    #[validate(range(min = 1, max = 100000))]
    pub page: Option<u64>,

    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u64>,
}

impl UserListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizItemListQuery {
    pub class_name: Option<String>,
    pub subject: Option<String>,
    pub book: Option<String>,
    pub chapter: Option<String>,
    /// Matched against the quiz title.
    pub search: Option<String>,
    pub status: Option<bool>,

    #[validate(range(min = 1, max = 100000))]
    pub page: Option<u64>,

    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u64>,
}

impl QuizItemListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookChapterInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub number: Option<i32>,
    pub description: Option<String>,
}

impl From<BookChapterInput> for BookChapter {
    fn from(input: BookChapterInput) -> Self {
        BookChapter {
            title: input.title,
            number: input.number,
            description: input.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 200))]
    pub book: String,

    #[validate(length(min = 1, max = 50))]
    pub code: String,

    #[validate(length(min = 1, max = 100))]
    pub subject: String,

    #[serde(rename = "class")]
    #[validate(length(min = 1, max = 20))]
    pub class_name: String,

    #[serde(default)]
    #[validate(nested)]
    pub chapters: Vec<BookChapterInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, max = 200))]
    pub book: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub subject: Option<String>,

    #[serde(rename = "class")]
    #[validate(length(min = 1, max = 20))]
    pub class_name: Option<String>,

    #[validate(nested)]
    pub chapters: Option<Vec<BookChapterInput>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub subject: Option<String>,
    pub book: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChapterEntryInput {
    #[validate(length(min = 1, max = 200))]
    pub chapter_name: String,
    pub number: Option<i32>,
}

impl From<ChapterEntryInput> for ChapterEntry {
    fn from(input: ChapterEntryInput) -> Self {
        ChapterEntry {
            chapter_name: input.chapter_name,
            number: input.number,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChapterListRequest {
    #[validate(length(min = 1, max = 200))]
    pub book: String,

    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub subject: String,

    #[serde(rename = "class")]
    #[validate(length(min = 1, max = 20))]
    pub class_name: String,

    #[serde(default)]
    #[validate(nested)]
    pub chapters: Vec<ChapterEntryInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateChapterListRequest {
    #[validate(length(min = 1, max = 200))]
    pub book: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub subject: Option<String>,

    #[serde(rename = "class")]
    #[validate(length(min = 1, max = 20))]
    pub class_name: Option<String>,

    #[validate(nested)]
    pub chapters: Option<Vec<ChapterEntryInput>>,
}

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{book::BookChapter, Book},
        dto::{
            request::{CatalogQuery, CreateBookRequest, UpdateBookRequest},
            response::{ApiResponse, BookDto, BookResponse, DeleteResponse},
        },
    },
    repositories::{BookRepository, CatalogFilter},
    services::db_helpers::{non_blank, parse_object_id},
};

pub struct BookService {
    repository: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_book(&self, request: CreateBookRequest) -> AppResult<BookResponse> {
        request.validate()?;

        let now = Utc::now();
        let book = Book {
            id: None,
            book: request.book.trim().to_string(),
            code: request.code.trim().to_string(),
            subject: request.subject.trim().to_string(),
            class_name: request.class_name.trim().to_string(),
            chapters: request.chapters.into_iter().map(BookChapter::from).collect(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created = self.repository.create(book).await?;
        log::info!("Created book '{}' for class {}", created.book, created.class_name);

        Ok(ApiResponse::new(created.into(), "Book created successfully"))
    }

    pub async fn list_books(&self, query: CatalogQuery) -> AppResult<Vec<BookDto>> {
        let filter = CatalogFilter {
            class_name: query.class_name,
            subject: query.subject,
            book: query.book,
        };

        let books = self.repository.find(&filter).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    pub async fn get_book(&self, id: &str) -> AppResult<BookDto> {
        let book = self.find_existing(id).await?;
        Ok(book.into())
    }

    /// Partial update: only the fields present in the request change.
    pub async fn update_book(&self, id: &str, request: UpdateBookRequest) -> AppResult<BookResponse> {
        request.validate()?;
        let mut book = self.find_existing(id).await?;

        if let Some(title) = request.book {
            book.book = title.trim().to_string();
        }
        if let Some(code) = request.code {
            book.code = code.trim().to_string();
        }
        if let Some(subject) = request.subject {
            book.subject = subject.trim().to_string();
        }
        if let Some(class_name) = request.class_name {
            book.class_name = class_name.trim().to_string();
        }
        if let Some(chapters) = request.chapters {
            book.chapters = chapters.into_iter().map(BookChapter::from).collect();
        }
        book.updated_at = Some(Utc::now());

        let updated = self.repository.replace(book).await?;
        Ok(ApiResponse::new(updated.into(), "Book updated successfully"))
    }

    pub async fn delete_book(&self, id: &str) -> AppResult<DeleteResponse> {
        let oid = parse_object_id(id)?;
        self.repository.delete(&oid).await?;

        Ok(DeleteResponse {
            message: "Book deleted successfully".to_string(),
            deleted_id: oid.to_hex(),
        })
    }

    pub async fn list_subjects(&self, class_name: Option<String>) -> AppResult<Vec<String>> {
        let class_name = non_blank(class_name.as_deref()).map(str::to_string);
        self.repository.distinct_subjects(class_name).await
    }

    async fn find_existing(&self, id: &str) -> AppResult<Book> {
        let oid = parse_object_id(id)?;
        self.repository
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book '{}' not found", id)))
    }
}

use std::sync::Arc;

use serde_json::Value;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::QuizItem,
        dto::{
            request::QuizItemListQuery,
            response::{
                ApiResponse, DeleteResponse, PaginatedResponse, PaginationMetadata, QuizItemDto,
                QuizItemResponse,
            },
        },
    },
    repositories::{QuizItemFilter, QuizItemRepository},
    services::{db_helpers::parse_object_id, quiz_validator::validate_quiz_item},
};

pub struct QuizItemService {
    repository: Arc<dyn QuizItemRepository>,
}

impl QuizItemService {
    pub fn new(repository: Arc<dyn QuizItemRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_quiz_item(&self, payload: &Value) -> AppResult<QuizItemResponse> {
        let normalized = validate_quiz_item(payload)?;
        let created = self
            .repository
            .create(QuizItem::from_normalized(normalized))
            .await?;

        log::info!(
            "Created quiz item {} with {} questions",
            created.id.map(|id| id.to_hex()).unwrap_or_default(),
            created.questions.len()
        );

        Ok(ApiResponse::new(created.into(), "Quiz created successfully"))
    }

    pub async fn get_quiz_item(&self, id: &str) -> AppResult<QuizItemDto> {
        let item = self.find_existing(id).await?;
        Ok(item.into())
    }

    pub async fn list_quiz_items(
        &self,
        query: QuizItemListQuery,
    ) -> AppResult<PaginatedResponse<QuizItemDto>> {
        query.validate()?;
        let pagination = query.pagination();

        let filter = QuizItemFilter {
            class_name: query.class_name,
            subject: query.subject,
            book: query.book,
            chapter: query.chapter,
            title: query.search,
            status: query.status,
        };

        let (items, total) = self
            .repository
            .list(&filter, pagination.offset(), pagination.page_size())
            .await?;

        Ok(PaginatedResponse {
            data: items.into_iter().map(QuizItemDto::from).collect(),
            pagination: PaginationMetadata::new(total, pagination.page(), pagination.page_size()),
        })
    }

    /// Full replacement. The payload goes through the same validation as a create.
    pub async fn update_quiz_item(&self, id: &str, payload: &Value) -> AppResult<QuizItemResponse> {
        let normalized = validate_quiz_item(payload)?;
        let mut item = self.find_existing(id).await?;

        item.replace_with(normalized);
        let updated = self.repository.replace(item).await?;

        Ok(ApiResponse::new(updated.into(), "Quiz updated successfully"))
    }

    pub async fn toggle_status(&self, id: &str) -> AppResult<QuizItemResponse> {
        let mut item = self.find_existing(id).await?;
        item.status = !item.status;

        let updated = self.repository.replace(item).await?;
        let message = format!(
            "Quiz {}",
            if updated.status { "published" } else { "unpublished" }
        );

        Ok(ApiResponse::new(updated.into(), message))
    }

    pub async fn delete_quiz_item(&self, id: &str) -> AppResult<DeleteResponse> {
        let oid = parse_object_id(id)?;
        self.repository.delete(&oid).await?;
        log::info!("Deleted quiz item {}", id);

        Ok(DeleteResponse {
            message: "Quiz deleted successfully".to_string(),
            deleted_id: oid.to_hex(),
        })
    }

    async fn find_existing(&self, id: &str) -> AppResult<QuizItem> {
        let oid = parse_object_id(id)?;
        self.repository
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz item '{}' not found", id)))
    }
}

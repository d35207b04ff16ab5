use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{chapter::ChapterEntry, ChapterList},
        dto::{
            request::{CatalogQuery, CreateChapterListRequest, UpdateChapterListRequest},
            response::{ApiResponse, ChapterListDto, ChapterListResponse, DeleteResponse},
        },
    },
    repositories::{CatalogFilter, ChapterRepository},
    services::db_helpers::parse_object_id,
};

pub struct ChapterService {
    repository: Arc<dyn ChapterRepository>,
}

impl ChapterService {
    pub fn new(repository: Arc<dyn ChapterRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_chapter_list(
        &self,
        request: CreateChapterListRequest,
    ) -> AppResult<ChapterListResponse> {
        request.validate()?;

        let now = Utc::now();
        let list = ChapterList {
            id: None,
            book: request.book.trim().to_string(),
            code: request.code.map(|code| code.trim().to_string()),
            subject: request.subject.trim().to_string(),
            class_name: request.class_name.trim().to_string(),
            chapters: request.chapters.into_iter().map(ChapterEntry::from).collect(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created = self.repository.create(list).await?;
        log::info!(
            "Created chapter list for '{}' with {} chapters",
            created.book,
            created.chapters.len()
        );

        Ok(ApiResponse::new(created.into(), "Chapters created successfully"))
    }

    pub async fn list_chapter_lists(&self, query: CatalogQuery) -> AppResult<Vec<ChapterListDto>> {
        let filter = CatalogFilter {
            class_name: query.class_name,
            subject: query.subject,
            book: query.book,
        };

        let lists = self.repository.find(&filter).await?;
        Ok(lists.into_iter().map(ChapterListDto::from).collect())
    }

    pub async fn get_chapter_list(&self, id: &str) -> AppResult<ChapterListDto> {
        let list = self.find_existing(id).await?;
        Ok(list.into())
    }

    pub async fn update_chapter_list(
        &self,
        id: &str,
        request: UpdateChapterListRequest,
    ) -> AppResult<ChapterListResponse> {
        request.validate()?;
        let mut list = self.find_existing(id).await?;

        if let Some(book) = request.book {
            list.book = book.trim().to_string();
        }
        if let Some(code) = request.code {
            list.code = Some(code.trim().to_string());
        }
        if let Some(subject) = request.subject {
            list.subject = subject.trim().to_string();
        }
        if let Some(class_name) = request.class_name {
            list.class_name = class_name.trim().to_string();
        }
        if let Some(chapters) = request.chapters {
            list.chapters = chapters.into_iter().map(ChapterEntry::from).collect();
        }
        list.updated_at = Some(Utc::now());

        let updated = self.repository.replace(list).await?;
        Ok(ApiResponse::new(updated.into(), "Chapters updated successfully"))
    }

    pub async fn delete_chapter_list(&self, id: &str) -> AppResult<DeleteResponse> {
        let oid = parse_object_id(id)?;
        self.repository.delete(&oid).await?;

        Ok(DeleteResponse {
            message: "Chapters deleted successfully".to_string(),
            deleted_id: oid.to_hex(),
        })
    }

    async fn find_existing(&self, id: &str) -> AppResult<ChapterList> {
        let oid = parse_object_id(id)?;
        self.repository
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Chapter list '{}' not found", id)))
    }
}

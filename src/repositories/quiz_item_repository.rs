use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::QuizItem,
    services::db_helpers::{non_blank, substring_pattern},
};

/// Listing filter. Text fields are case-insensitive substring matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizItemFilter {
    pub class_name: Option<String>,
    pub subject: Option<String>,
    pub book: Option<String>,
    pub chapter: Option<String>,
    pub title: Option<String>,
    pub status: Option<bool>,
}

impl QuizItemFilter {
    fn text_fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("className", non_blank(self.class_name.as_deref())),
            ("subject", non_blank(self.subject.as_deref())),
            ("book", non_blank(self.book.as_deref())),
            ("chapter", non_blank(self.chapter.as_deref())),
            ("title", non_blank(self.title.as_deref())),
        ]
    }

    pub fn to_query(&self) -> Document {
        let mut query = Document::new();
        for (field, needle) in self.text_fields() {
            if let Some(needle) = needle {
                query.insert(field, substring_pattern(needle));
            }
        }
        if let Some(status) = self.status {
            query.insert("status", status);
        }
        query
    }

    /// Same semantics as [`QuizItemFilter::to_query`], evaluated in memory.
    pub fn matches(&self, item: &QuizItem) -> bool {
        let values = [
            &item.class_name,
            &item.subject,
            &item.book,
            &item.chapter,
            &item.title,
        ];
        let text_ok = self
            .text_fields()
            .iter()
            .zip(values)
            .all(|((_, needle), value)| match needle {
                Some(needle) => value.to_lowercase().contains(&needle.to_lowercase()),
                None => true,
            });

        text_ok && self.status.map_or(true, |status| item.status == status)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizItemRepository: Send + Sync {
    async fn create(&self, item: QuizItem) -> AppResult<QuizItem>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<QuizItem>>;
    async fn list(
        &self,
        filter: &QuizItemFilter,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<QuizItem>, u64)>;
    /// Whole-document replacement; fails with `NotFound` when the id is unknown.
    async fn replace(&self, item: QuizItem) -> AppResult<QuizItem>;
    async fn delete(&self, id: &ObjectId) -> AppResult<()>;
}

pub struct MongoQuizItemRepository {
    collection: Collection<QuizItem>,
}

impl MongoQuizItemRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizitems");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizitems collection");

        let catalog_index = IndexModel::builder()
            .keys(doc! { "className": 1, "subject": 1, "book": 1, "chapter": 1 })
            .options(
                IndexOptions::builder()
                    .name("catalog_path".to_string())
                    .build(),
            )
            .build();
        let recency_index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_indexes(vec![catalog_index, recency_index])
            .await?;

        log::info!("Successfully created indexes for quizitems collection");
        Ok(())
    }
}

#[async_trait]
impl QuizItemRepository for MongoQuizItemRepository {
    async fn create(&self, mut item: QuizItem) -> AppResult<QuizItem> {
        let now = Utc::now();
        item.id = None;
        item.created_at = Some(now);
        item.updated_at = Some(now);

        let result = self.collection.insert_one(&item).await?;
        item.id = result.inserted_id.as_object_id();
        Ok(item)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<QuizItem>> {
        let item = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(item)
    }

    async fn list(
        &self,
        filter: &QuizItemFilter,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<QuizItem>, u64)> {
        let query = filter.to_query();

        let total = self.collection.count_documents(query.clone()).await?;

        let find_options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .skip(offset)
            .limit(limit as i64)
            .build();

        let cursor = self.collection.find(query).with_options(find_options).await?;
        let items: Vec<QuizItem> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn replace(&self, mut item: QuizItem) -> AppResult<QuizItem> {
        let id = item
            .id
            .ok_or_else(|| AppError::InternalError("Cannot replace a quiz item without an id".to_string()))?;
        item.updated_at = Some(Utc::now());

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &item)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Quiz item '{}' not found", id)));
        }

        Ok(item)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Quiz item '{}' not found", id)));
        }

        Ok(())
    }
}

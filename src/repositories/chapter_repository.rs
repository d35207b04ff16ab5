use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::ChapterList,
    repositories::book_repository::CatalogFilter,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChapterRepository: Send + Sync {
    async fn create(&self, list: ChapterList) -> AppResult<ChapterList>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<ChapterList>>;
    async fn find(&self, filter: &CatalogFilter) -> AppResult<Vec<ChapterList>>;
    async fn replace(&self, list: ChapterList) -> AppResult<ChapterList>;
    async fn delete(&self, id: &ObjectId) -> AppResult<()>;
}

pub struct MongoChapterRepository {
    collection: Collection<ChapterList>,
}

impl MongoChapterRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("chapters");
        Self { collection }
    }
}

#[async_trait]
impl ChapterRepository for MongoChapterRepository {
    async fn create(&self, mut list: ChapterList) -> AppResult<ChapterList> {
        let result = self.collection.insert_one(&list).await?;
        list.id = result.inserted_id.as_object_id();
        Ok(list)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<ChapterList>> {
        let list = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(list)
    }

    async fn find(&self, filter: &CatalogFilter) -> AppResult<Vec<ChapterList>> {
        let cursor = self.collection.find(filter.to_query()).await?;
        let lists: Vec<ChapterList> = cursor.try_collect().await?;
        Ok(lists)
    }

    async fn replace(&self, list: ChapterList) -> AppResult<ChapterList> {
        let id = list.id.ok_or_else(|| {
            AppError::InternalError("Cannot replace a chapter list without an id".to_string())
        })?;

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &list)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Chapter list '{}' not found", id)));
        }

        Ok(list)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Chapter list '{}' not found", id)));
        }

        Ok(())
    }
}

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::FindOptions,
    Collection,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Book,
    services::db_helpers::non_blank,
};

/// Exact-match catalog filter shared by books and chapter lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub class_name: Option<String>,
    pub subject: Option<String>,
    pub book: Option<String>,
}

impl CatalogFilter {
    pub fn to_query(&self) -> Document {
        let mut query = Document::new();
        if let Some(class_name) = non_blank(self.class_name.as_deref()) {
            query.insert("class", class_name);
        }
        if let Some(subject) = non_blank(self.subject.as_deref()) {
            query.insert("subject", subject);
        }
        if let Some(book) = non_blank(self.book.as_deref()) {
            query.insert("book", book);
        }
        query
    }

    pub fn matches(&self, class_name: &str, subject: &str, book: &str) -> bool {
        let field_ok = |wanted: Option<&str>, actual: &str| wanted.map_or(true, |w| w == actual);

        field_ok(non_blank(self.class_name.as_deref()), class_name)
            && field_ok(non_blank(self.subject.as_deref()), subject)
            && field_ok(non_blank(self.book.as_deref()), book)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn create(&self, book: Book) -> AppResult<Book>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Book>>;
    async fn find(&self, filter: &CatalogFilter) -> AppResult<Vec<Book>>;
    /// Distinct subject names, sorted.
    async fn distinct_subjects(&self, class_name: Option<String>) -> AppResult<Vec<String>>;
    async fn replace(&self, book: Book) -> AppResult<Book>;
    async fn delete(&self, id: &ObjectId) -> AppResult<()>;
}

pub struct MongoBookRepository {
    collection: Collection<Book>,
}

impl MongoBookRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("books");
        Self { collection }
    }
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn create(&self, mut book: Book) -> AppResult<Book> {
        let result = self.collection.insert_one(&book).await?;
        book.id = result.inserted_id.as_object_id();
        Ok(book)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Book>> {
        let book = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(book)
    }

    async fn find(&self, filter: &CatalogFilter) -> AppResult<Vec<Book>> {
        let find_options = FindOptions::builder()
            .sort(doc! { "class": 1, "subject": 1, "book": 1 })
            .build();

        let cursor = self
            .collection
            .find(filter.to_query())
            .with_options(find_options)
            .await?;
        let books: Vec<Book> = cursor.try_collect().await?;
        Ok(books)
    }

    async fn distinct_subjects(&self, class_name: Option<String>) -> AppResult<Vec<String>> {
        let filter = CatalogFilter {
            class_name,
            ..Default::default()
        };

        let values = self
            .collection
            .distinct("subject", filter.to_query())
            .await?;

        let mut subjects: Vec<String> = values
            .into_iter()
            .filter_map(|v| match v {
                Bson::String(s) => Some(s),
                _ => None,
            })
            .collect();
        subjects.sort();
        Ok(subjects)
    }

    async fn replace(&self, book: Book) -> AppResult<Book> {
        let id = book
            .id
            .ok_or_else(|| AppError::InternalError("Cannot replace a book without an id".to_string()))?;

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &book)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Book '{}' not found", id)));
        }

        Ok(book)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Book '{}' not found", id)));
        }

        Ok(())
    }
}

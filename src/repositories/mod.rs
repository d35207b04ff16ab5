pub mod book_repository;
pub mod chapter_repository;
pub mod quiz_item_repository;
pub mod user_repository;

pub use book_repository::{BookRepository, CatalogFilter, MongoBookRepository};
pub use chapter_repository::{ChapterRepository, MongoChapterRepository};
pub use quiz_item_repository::{MongoQuizItemRepository, QuizItemFilter, QuizItemRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

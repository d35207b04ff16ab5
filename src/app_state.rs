use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        BookRepository, ChapterRepository, MongoBookRepository, MongoChapterRepository,
        MongoQuizItemRepository, MongoUserRepository, QuizItemRepository, UserRepository,
    },
    services::{
        book_service::BookService, chapter_service::ChapterService,
        quiz_item_service::QuizItemService, user_service::UserService,
    },
};

/// Storage backends the services are built on.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub books: Arc<dyn BookRepository>,
    pub chapters: Arc<dyn ChapterRepository>,
    pub quiz_items: Arc<dyn QuizItemRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub book_service: Arc<BookService>,
    pub chapter_service: Arc<ChapterService>,
    pub quiz_item_service: Arc<QuizItemService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let quiz_item_repository = Arc::new(MongoQuizItemRepository::new(&db));
        quiz_item_repository.ensure_indexes().await?;

        let repositories = Repositories {
            users: user_repository,
            books: Arc::new(MongoBookRepository::new(&db)),
            chapters: Arc::new(MongoChapterRepository::new(&db)),
            quiz_items: quiz_item_repository,
        };

        let state = Self::with_repositories(repositories, db, config);
        state.seed_admin().await?;

        Ok(state)
    }

    pub fn with_repositories(repositories: Repositories, db: Database, config: Config) -> Self {
        Self {
            user_service: Arc::new(UserService::new(repositories.users)),
            book_service: Arc::new(BookService::new(repositories.books)),
            chapter_service: Arc::new(ChapterService::new(repositories.chapters)),
            quiz_item_service: Arc::new(QuizItemService::new(repositories.quiz_items)),
            db,
            config: Arc::new(config),
        }
    }

    async fn seed_admin(&self) -> AppResult<()> {
        match (&self.config.admin_username, &self.config.admin_password) {
            (Some(username), Some(password)) => {
                self.user_service
                    .ensure_admin(username, password.expose_secret())
                    .await
            }
            (Some(_), None) => {
                log::warn!("ADMIN_USERNAME is set without ADMIN_PASSWORD; skipping admin seed");
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

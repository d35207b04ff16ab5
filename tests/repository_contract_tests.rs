use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use quizdesk_server::{
    errors::{AppError, AppResult},
    models::{
        domain::{Book, QuizItem, User, UserRole},
        dto::request::{
            CatalogQuery, CreateBookRequest, LoginRequest, QuizItemListQuery, RegisterRequest,
            UserListQuery,
        },
    },
    repositories::{BookRepository, CatalogFilter, QuizItemFilter, QuizItemRepository, UserRepository},
    services::{
        book_service::BookService, quiz_item_service::QuizItemService,
        quiz_validator::QuizValidationError, user_service::UserService,
    },
};

fn paginate<T: Clone>(items: &[T], offset: u64, limit: u64) -> Vec<T> {
    items
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

struct InMemoryQuizItemRepository {
    items: Arc<RwLock<HashMap<ObjectId, QuizItem>>>,
}

impl InMemoryQuizItemRepository {
    fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl QuizItemRepository for InMemoryQuizItemRepository {
    async fn create(&self, mut item: QuizItem) -> AppResult<QuizItem> {
        let now = Utc::now();
        let id = ObjectId::new();
        item.id = Some(id);
        item.created_at = Some(now);
        item.updated_at = Some(now);

        self.items.write().await.insert(id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<QuizItem>> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn list(
        &self,
        filter: &QuizItemFilter,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<QuizItem>, u64)> {
        let items = self.items.read().await;
        let mut matching: Vec<QuizItem> = items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        Ok((paginate(&matching, offset, limit), total))
    }

    async fn replace(&self, mut item: QuizItem) -> AppResult<QuizItem> {
        let id = item
            .id
            .ok_or_else(|| AppError::InternalError("Cannot replace a quiz item without an id".to_string()))?;

        let mut items = self.items.write().await;
        if !items.contains_key(&id) {
            return Err(AppError::NotFound(format!("Quiz item '{}' not found", id)));
        }

        item.updated_at = Some(Utc::now());
        items.insert(id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<()> {
        if self.items.write().await.remove(id).is_none() {
            return Err(AppError::NotFound(format!("Quiz item '{}' not found", id)));
        }
        Ok(())
    }
}

struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<ObjectId, User>>>,
}

impl InMemoryUserRepository {
    fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::AlreadyExists(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }

        let id = ObjectId::new();
        user.id = Some(id);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn list(
        &self,
        role: Option<UserRole>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<User>, u64)> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users
            .values()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.username.cmp(&b.username));

        let total = matching.len() as u64;
        Ok((paginate(&matching, offset, limit), total))
    }

    async fn replace(&self, user: User) -> AppResult<User> {
        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("Cannot replace a user without an id".to_string()))?;

        let mut users = self.users.write().await;
        if !users.contains_key(&id) {
            return Err(AppError::NotFound(format!("User '{}' not found", id)));
        }
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<()> {
        if self.users.write().await.remove(id).is_none() {
            return Err(AppError::NotFound(format!("User '{}' not found", id)));
        }
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

struct InMemoryBookRepository {
    books: Arc<RwLock<HashMap<ObjectId, Book>>>,
}

impl InMemoryBookRepository {
    fn new() -> Self {
        Self {
            books: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, mut book: Book) -> AppResult<Book> {
        let id = ObjectId::new();
        book.id = Some(id);
        self.books.write().await.insert(id, book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Book>> {
        Ok(self.books.read().await.get(id).cloned())
    }

    async fn find(&self, filter: &CatalogFilter) -> AppResult<Vec<Book>> {
        let books = self.books.read().await;
        let mut matching: Vec<Book> = books
            .values()
            .filter(|b| filter.matches(&b.class_name, &b.subject, &b.book))
            .cloned()
            .collect();
        matching.sort_by(|a, b| (&a.class_name, &a.subject, &a.book).cmp(&(&b.class_name, &b.subject, &b.book)));
        Ok(matching)
    }

    async fn distinct_subjects(&self, class_name: Option<String>) -> AppResult<Vec<String>> {
        let filter = CatalogFilter {
            class_name,
            ..Default::default()
        };
        let books = self.find(&filter).await?;

        let mut subjects: Vec<String> = books.into_iter().map(|b| b.subject).collect();
        subjects.sort();
        subjects.dedup();
        Ok(subjects)
    }

    async fn replace(&self, book: Book) -> AppResult<Book> {
        let id = book
            .id
            .ok_or_else(|| AppError::InternalError("Cannot replace a book without an id".to_string()))?;

        let mut books = self.books.write().await;
        if !books.contains_key(&id) {
            return Err(AppError::NotFound(format!("Book '{}' not found", id)));
        }
        books.insert(id, book.clone());
        Ok(book)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<()> {
        if self.books.write().await.remove(id).is_none() {
            return Err(AppError::NotFound(format!("Book '{}' not found", id)));
        }
        Ok(())
    }
}

fn quiz_payload(class_name: &str, subject: &str, chapter: &str) -> Value {
    json!({
        "className": class_name,
        "subject": subject,
        "book": "NCERT",
        "chapter": chapter,
        "questions": [
            {
                "questionType": "mcq",
                "question": "Pick the even number",
                "marks": 1,
                "options": [{ "text": "3" }, { "text": "4", "isCorrect": true }]
            },
            {
                "questionType": "image",
                "question": "Label the picture",
                "marks": "2.5",
                "imageUrl": "https://cdn.example.com/leaf.png",
                "subQuestions": ["Stem", { "text": "Leaf" }]
            }
        ]
    })
}

fn book_request(book: &str, subject: &str, class_name: &str) -> CreateBookRequest {
    CreateBookRequest {
        book: book.to_string(),
        code: format!("{}-{}", subject, class_name),
        subject: subject.to_string(),
        class_name: class_name.to_string(),
        chapters: Vec::new(),
    }
}

#[tokio::test]
async fn quiz_item_lifecycle_through_service() {
    let service = QuizItemService::new(Arc::new(InMemoryQuizItemRepository::new()));

    let created = service
        .create_quiz_item(&quiz_payload("3", "Math", "Fractions"))
        .await
        .unwrap()
        .data;
    assert_eq!(created.title, "Quiz for Fractions");
    assert!(created.status);
    assert_eq!(created.total_marks, 3.5);
    assert_eq!(created.questions[1].sub_questions.as_ref().unwrap().len(), 2);

    let fetched = service.get_quiz_item(&created.id).await.unwrap();
    assert_eq!(fetched.questions, created.questions);

    let mut replacement = quiz_payload("3", "Math", "Fractions");
    replacement["title"] = json!("Fractions revision");
    replacement["questions"] = json!([
        { "questionType": "shortanswer", "question": "Write 1/2 as a decimal", "marks": 1 }
    ]);
    let updated = service
        .update_quiz_item(&created.id, &replacement)
        .await
        .unwrap()
        .data;
    assert_eq!(updated.title, "Fractions revision");
    assert_eq!(updated.questions.len(), 1);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let toggled = service.toggle_status(&created.id).await.unwrap().data;
    assert!(!toggled.status);

    service.delete_quiz_item(&created.id).await.unwrap();
    assert!(matches!(
        service.get_quiz_item(&created.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_quiz_item(&created.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn invalid_update_leaves_stored_item_untouched() {
    let service = QuizItemService::new(Arc::new(InMemoryQuizItemRepository::new()));
    let created = service
        .create_quiz_item(&quiz_payload("3", "Math", "Fractions"))
        .await
        .unwrap()
        .data;

    let mut broken = quiz_payload("3", "Math", "Fractions");
    broken["questions"][1]["subQuestions"] = json!([]);

    let result = service.update_quiz_item(&created.id, &broken).await;
    assert!(matches!(
        result,
        Err(AppError::InvalidQuiz(QuizValidationError::MissingSubQuestions(1)))
    ));

    let stored = service.get_quiz_item(&created.id).await.unwrap();
    assert_eq!(stored.questions.len(), 2);
}

#[tokio::test]
async fn quiz_item_listing_filters_and_paginates() {
    let service = QuizItemService::new(Arc::new(InMemoryQuizItemRepository::new()));
    for chapter in ["Fractions", "Decimals", "Shapes"] {
        service
            .create_quiz_item(&quiz_payload("3", "Mathematics", chapter))
            .await
            .unwrap();
    }
    service
        .create_quiz_item(&quiz_payload("4", "Science", "Plants"))
        .await
        .unwrap();

    let math = service
        .list_quiz_items(QuizItemListQuery {
            subject: Some("math".to_string()),
            page_size: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(math.pagination.total, 3);
    assert_eq!(math.pagination.total_pages, 2);
    assert_eq!(math.data.len(), 2);

    let searched = service
        .list_quiz_items(QuizItemListQuery {
            search: Some("DECIMAL".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(searched.data.len(), 1);
    assert_eq!(searched.data[0].chapter, "Decimals");

    let second_page = service
        .list_quiz_items(QuizItemListQuery {
            page: Some(3),
            page_size: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(second_page.data.is_empty());
    assert_eq!(second_page.pagination.total, 4);
}

#[tokio::test]
async fn user_registration_and_login_flow() {
    let service = UserService::new(Arc::new(InMemoryUserRepository::new()));

    let registered = service
        .register(RegisterRequest {
            username: "  stmarys ".to_string(),
            password: "secret1".to_string(),
            role: Some(UserRole::School),
            status: None,
        })
        .await
        .unwrap()
        .data;
    assert_eq!(registered.username, "stmarys");

    let duplicate = service
        .register(RegisterRequest {
            username: "stmarys".to_string(),
            password: "another1".to_string(),
            role: None,
            status: None,
        })
        .await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let login = service
        .login(LoginRequest {
            username: "stmarys".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(login.data.id, registered.id);

    service.toggle_status(&registered.id).await.unwrap();
    let inactive = service
        .login(LoginRequest {
            username: "stmarys".to_string(),
            password: "secret1".to_string(),
        })
        .await;
    assert!(matches!(inactive, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn admin_seed_and_role_listing() {
    let service = UserService::new(Arc::new(InMemoryUserRepository::new()));
    service
        .ensure_admin("admin", "correct-horse-battery")
        .await
        .unwrap();
    service
        .ensure_admin("admin", "correct-horse-battery")
        .await
        .unwrap();

    for name in ["alpha", "beta"] {
        service
            .register(RegisterRequest {
                username: name.to_string(),
                password: "secret1".to_string(),
                role: Some(UserRole::School),
                status: None,
            })
            .await
            .unwrap();
    }

    let admins = service
        .list_users(UserListQuery {
            role: Some(UserRole::Admin),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(admins.pagination.total, 1);
    assert_eq!(admins.data[0].username, "admin");

    let everyone = service.list_users(UserListQuery::default()).await.unwrap();
    assert_eq!(everyone.pagination.total, 3);

    service.delete_user(&admins.data[0].id).await.unwrap();
    let admins = service
        .list_users(UserListQuery {
            role: Some(UserRole::Admin),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(admins.pagination.total, 0);
}

#[tokio::test]
async fn catalog_filters_and_subjects() {
    let service = BookService::new(Arc::new(InMemoryBookRepository::new()));
    service.create_book(book_request("Math Magic", "Math", "3")).await.unwrap();
    service.create_book(book_request("Looking Around", "EVS", "3")).await.unwrap();
    service.create_book(book_request("Honeydew", "English", "8")).await.unwrap();
    service.create_book(book_request("Math Magic 4", "Math", "4")).await.unwrap();

    let class_three = service
        .list_books(CatalogQuery {
            class_name: Some("3".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(class_three.len(), 2);

    assert_eq!(
        service.list_subjects(Some("3".to_string())).await.unwrap(),
        vec!["EVS", "Math"]
    );
    assert_eq!(
        service.list_subjects(None).await.unwrap(),
        vec!["EVS", "English", "Math"]
    );
}

pub mod book_handler;
pub mod chapter_handler;
pub mod health_handler;
pub mod quiz_item_handler;
pub mod user_handler;

use actix_web::web;

use crate::errors::AppError;

pub use book_handler::{create_book, delete_book, get_book, list_books, list_subjects, update_book};
pub use chapter_handler::{
    create_chapter_list, delete_chapter_list, get_chapter_list, list_chapter_lists,
    update_chapter_list,
};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_item_handler::{
    create_quiz_item, delete_quiz_item, get_quiz_item, list_quiz_items, toggle_quiz_item_status,
    update_quiz_item,
};
pub use user_handler::{delete_user, list_users, login, register, toggle_user_status};

/// Body limit for quiz payloads, which embed every question.
const JSON_LIMIT: usize = 1024 * 1024;

/// Bad bodies and query strings come back in the same error shape as every other client error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(register)
        .service(login)
        .service(list_users)
        .service(toggle_user_status)
        .service(delete_user)
        .service(create_book)
        .service(list_books)
        .service(get_book)
        .service(update_book)
        .service(delete_book)
        .service(list_subjects)
        .service(create_chapter_list)
        .service(list_chapter_lists)
        .service(get_chapter_list)
        .service(update_chapter_list)
        .service(delete_chapter_list)
        .service(create_quiz_item)
        .service(list_quiz_items)
        .service(get_quiz_item)
        .service(update_quiz_item)
        .service(toggle_quiz_item_status)
        .service(delete_quiz_item);
}

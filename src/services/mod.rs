pub mod book_service;
pub mod chapter_service;
pub mod db_helpers;
pub mod quiz_item_service;
pub mod quiz_validator;
pub mod user_service;

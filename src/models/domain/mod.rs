pub mod book;
pub mod chapter;
pub mod question;
pub mod question_type;
pub mod quiz_item;
pub mod user;
pub use book::Book;
pub use chapter::ChapterList;
pub use question::Question;
pub use question_type::QuestionType;
pub use quiz_item::{NormalizedQuizItem, QuizItem};
pub use user::{User, UserRole};

mod catalog;
mod data_match;
pub mod ids;
mod question;
mod result;
mod session;

pub use catalog::{Catalog, CatalogError, QuestionBank, ResultCatalog};
pub use ids::ResultId;
pub use question::{AnswerOption, Question};
pub use result::{CallToAction, ResultEntry};
pub use session::{
    CardChoice, CompletionMethod, Phase, QuizProgress, QuizSession, Step, TransitionError,
    UNKNOWN_RESULT,
};

pub mod article_flow;
pub mod progress;

pub use article_flow::{ArticleAttempt, ArticleFlow, ArticleJob, ArticleOutcome};
pub use progress::Progress;

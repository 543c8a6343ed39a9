pub mod checkpoint_store;
pub mod retry;

pub use checkpoint_store::{CheckpointStore, CURSOR_FILE_NAME};
pub use retry::{with_retry, Attempt, Pause, RetryOutcome, RetryPolicy, TokioPause};

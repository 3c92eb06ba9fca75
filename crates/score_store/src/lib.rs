mod error;
mod paths;
mod schema;
mod store;

pub use error::StoreError;
pub use paths::{score_file_path, score_root, SCORE_DIR};
pub use schema::{ScoreEntry, ScoreGame, ScoreHeader};
pub use store::{ScoreStore, MAX_ENTRIES};

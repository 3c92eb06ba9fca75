use std::path::{Path, PathBuf};

use crate::schema::ScoreGame;

pub const SCORE_DIR: [&str; 2] = [".yos", "scores"];

#[must_use]
pub fn score_root(base: &Path) -> PathBuf {
    base.join(SCORE_DIR[0]).join(SCORE_DIR[1])
}

#[must_use]
pub fn score_file_path(root: &Path, game: ScoreGame) -> PathBuf {
    root.join(format!("{}.jsonl", game.file_stem()))
}

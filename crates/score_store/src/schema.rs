use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreGame {
    Snake,
    Tetris,
}

impl ScoreGame {
    #[must_use]
    pub fn file_stem(self) -> &'static str {
        match self {
            ScoreGame::Snake => "snake",
            ScoreGame::Tetris => "tetris",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderRecordType {
    Header,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRecordType {
    Score,
}

/// First line of every score file; the version gates the row format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreHeader {
    #[serde(rename = "type")]
    pub record_type: HeaderRecordType,
    pub version: u32,
    pub game: String,
    pub updated_at: String,
}

impl ScoreHeader {
    #[must_use]
    pub fn v1(game: impl Into<String>, updated_at: impl Into<String>) -> Self {
        Self {
            record_type: HeaderRecordType::Header,
            version: 1,
            game: game.into(),
            updated_at: updated_at.into(),
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreEntry {
    #[serde(rename = "type")]
    pub record_type: ScoreRecordType,
    pub name: String,
    pub from: String,
    pub score: u32,
}

impl ScoreEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, from: impl Into<String>, score: u32) -> Self {
        Self {
            record_type: ScoreRecordType::Score,
            name: name.into(),
            from: from.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum JsonLine {
    Header(ScoreHeader),
    Score(ScoreEntry),
}

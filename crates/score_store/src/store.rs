use std::cmp::Reverse;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::StoreError;
use crate::paths::score_file_path;
use crate::schema::{JsonLine, ScoreEntry, ScoreGame, ScoreHeader};

pub const MAX_ENTRIES: usize = 20;

/// Per-game top-20 leaderboards as versioned JSONL files under one
/// directory. Every update rewrites the whole file; the lists are small
/// and last writer wins.
pub struct ScoreStore {
    root: PathBuf,
}

impl ScoreStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads a game's leaderboard. A missing file is an empty list, not an
    /// error; a present file must carry a valid version-1 header.
    pub fn load(&self, game: ScoreGame) -> Result<Vec<ScoreEntry>, StoreError> {
        let path = score_file_path(&self.root, game);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::io("opening score file", &path, source)),
        };
        let reader = BufReader::new(file);

        let mut header: Option<ScoreHeader> = None;
        let mut entries = Vec::new();
        for (line_index, line_result) in reader.lines().enumerate() {
            let line_number = line_index + 1;
            let line = line_result
                .map_err(|source| StoreError::io_line(&path, line_number, source))?;
            let parsed = serde_json::from_str::<JsonLine>(&line)
                .map_err(|source| StoreError::json_line(&path, line_number, source))?;

            if line_number == 1 {
                match parsed {
                    JsonLine::Header(parsed_header) => {
                        validate_header(&path, line_number, game, &parsed_header)?;
                        header = Some(parsed_header);
                    }
                    JsonLine::Score(_) => {
                        return Err(StoreError::InvalidHeaderRecord {
                            path,
                            line: line_number,
                        });
                    }
                }
                continue;
            }

            match parsed {
                JsonLine::Header(_) => {
                    return Err(StoreError::InvalidScoreRecord {
                        path,
                        line: line_number,
                    });
                }
                JsonLine::Score(entry) => entries.push(entry),
            }
        }

        header.ok_or(StoreError::MissingHeader { path })?;
        // Tolerate hand-edited files: re-sort and re-bound on the way in.
        normalize(&mut entries);
        Ok(entries)
    }

    /// Inserts a finished game's score and rewrites the file. Returns the
    /// updated leaderboard; the new entry may have fallen off the bottom.
    pub fn record(
        &self,
        game: ScoreGame,
        entry: ScoreEntry,
    ) -> Result<Vec<ScoreEntry>, StoreError> {
        let mut entries = self.load(game)?;
        entries.push(entry);
        normalize(&mut entries);
        self.save(game, &entries)?;
        Ok(entries)
    }

    /// Removes one row by its position in the sorted list.
    pub fn delete(&self, game: ScoreGame, index: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        let mut entries = self.load(game)?;
        if index >= entries.len() {
            return Err(StoreError::NoSuchEntry {
                path: score_file_path(&self.root, game),
                index,
            });
        }
        entries.remove(index);
        self.save(game, &entries)?;
        Ok(entries)
    }

    /// Empties a game's leaderboard, leaving a header-only file behind.
    pub fn clear(&self, game: ScoreGame) -> Result<(), StoreError> {
        self.save(game, &[])
    }

    fn save(&self, game: ScoreGame, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)
            .map_err(|source| StoreError::io("creating score directory", &self.root, source))?;
        let path = score_file_path(&self.root, game);
        let updated_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(StoreError::ClockFormat)?;
        let header = ScoreHeader::v1(game.file_stem(), updated_at);

        let mut contents = serde_json::to_string(&header)
            .map_err(|source| StoreError::json_serialize(&path, source))?;
        contents.push('\n');
        for entry in entries {
            let line = serde_json::to_string(entry)
                .map_err(|source| StoreError::json_serialize(&path, source))?;
            contents.push_str(&line);
            contents.push('\n');
        }
        fs::write(&path, contents)
            .map_err(|source| StoreError::io("writing score file", &path, source))
    }
}

fn normalize(entries: &mut Vec<ScoreEntry>) {
    // Stable sort keeps earlier submissions ahead on ties.
    entries.sort_by_key(|entry| Reverse(entry.score));
    entries.truncate(MAX_ENTRIES);
}

fn validate_header(
    path: &Path,
    line_number: usize,
    game: ScoreGame,
    header: &ScoreHeader,
) -> Result<(), StoreError> {
    if header.version != 1 {
        return Err(StoreError::UnsupportedVersion {
            path: path.to_path_buf(),
            line: line_number,
            found: header.version,
        });
    }
    if header.game != game.file_stem() {
        return Err(StoreError::GameMismatch {
            path: path.to_path_buf(),
            found: header.game.clone(),
            expected: game.file_stem(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, ScoreStore) {
        let dir = TempDir::new().unwrap();
        let store = ScoreStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn missing_file_loads_as_an_empty_leaderboard() {
        let (_dir, store) = store();
        assert_eq!(store.load(ScoreGame::Snake).unwrap(), Vec::new());
    }

    #[test]
    fn record_then_load_round_trips() {
        let (_dir, store) = store();
        store
            .record(ScoreGame::Snake, ScoreEntry::new("Ada", "London", 120))
            .unwrap();
        let entries = store.load(ScoreGame::Snake).unwrap();
        assert_eq!(entries, vec![ScoreEntry::new("Ada", "London", 120)]);
    }

    #[test]
    fn leaderboard_stays_sorted_descending() {
        let (_dir, store) = store();
        store
            .record(ScoreGame::Tetris, ScoreEntry::new("Ada", "London", 100))
            .unwrap();
        store
            .record(ScoreGame::Tetris, ScoreEntry::new("Grace", "NYC", 300))
            .unwrap();
        let entries = store
            .record(ScoreGame::Tetris, ScoreEntry::new("Alan", "Wilmslow", 200))
            .unwrap();
        let scores: Vec<u32> = entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);
    }

    #[test]
    fn leaderboard_never_exceeds_twenty_rows() {
        let (_dir, store) = store();
        for i in 0..25u32 {
            store
                .record(ScoreGame::Snake, ScoreEntry::new("P", "Q", i * 10))
                .unwrap();
        }
        let entries = store.load(ScoreGame::Snake).unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
        // The weakest scores fell off the bottom.
        assert_eq!(entries[0].score, 240);
        assert_eq!(entries[MAX_ENTRIES - 1].score, 50);
    }

    #[test]
    fn games_have_independent_files() {
        let (_dir, store) = store();
        store
            .record(ScoreGame::Snake, ScoreEntry::new("Ada", "London", 10))
            .unwrap();
        assert_eq!(store.load(ScoreGame::Tetris).unwrap(), Vec::new());
    }

    #[test]
    fn delete_removes_exactly_one_row() {
        let (_dir, store) = store();
        store
            .record(ScoreGame::Snake, ScoreEntry::new("Ada", "London", 100))
            .unwrap();
        store
            .record(ScoreGame::Snake, ScoreEntry::new("Grace", "NYC", 300))
            .unwrap();
        let entries = store.delete(ScoreGame::Snake, 0).unwrap();
        assert_eq!(entries, vec![ScoreEntry::new("Ada", "London", 100)]);
        assert!(matches!(
            store.delete(ScoreGame::Snake, 5),
            Err(StoreError::NoSuchEntry { index: 5, .. })
        ));
    }

    #[test]
    fn clear_leaves_a_valid_empty_file() {
        let (_dir, store) = store();
        store
            .record(ScoreGame::Snake, ScoreEntry::new("Ada", "London", 100))
            .unwrap();
        store.clear(ScoreGame::Snake).unwrap();
        assert_eq!(store.load(ScoreGame::Snake).unwrap(), Vec::new());
        let path = score_file_path(store.root(), ScoreGame::Snake);
        assert!(path.exists());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let (_dir, store) = store();
        let path = score_file_path(store.root(), ScoreGame::Snake);
        fs::create_dir_all(store.root()).unwrap();
        fs::write(
            &path,
            "{\"type\":\"header\",\"version\":2,\"game\":\"snake\",\"updated_at\":\"2026-01-01T00:00:00Z\"}\n",
        )
        .unwrap();
        assert!(matches!(
            store.load(ScoreGame::Snake),
            Err(StoreError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn header_for_the_wrong_game_is_rejected() {
        let (_dir, store) = store();
        store
            .record(ScoreGame::Tetris, ScoreEntry::new("Ada", "London", 1))
            .unwrap();
        let tetris_file = score_file_path(store.root(), ScoreGame::Tetris);
        let snake_file = score_file_path(store.root(), ScoreGame::Snake);
        fs::copy(&tetris_file, &snake_file).unwrap();
        assert!(matches!(
            store.load(ScoreGame::Snake),
            Err(StoreError::GameMismatch { .. })
        ));
    }

    #[test]
    fn a_score_row_on_the_first_line_is_rejected() {
        let (_dir, store) = store();
        fs::create_dir_all(store.root()).unwrap();
        let path = score_file_path(store.root(), ScoreGame::Snake);
        fs::write(
            &path,
            "{\"type\":\"score\",\"name\":\"Ada\",\"from\":\"London\",\"score\":5}\n",
        )
        .unwrap();
        assert!(matches!(
            store.load(ScoreGame::Snake),
            Err(StoreError::InvalidHeaderRecord { line: 1, .. })
        ));
    }

    #[test]
    fn malformed_json_reports_the_line() {
        let (_dir, store) = store();
        fs::create_dir_all(store.root()).unwrap();
        let path = score_file_path(store.root(), ScoreGame::Snake);
        fs::write(
            &path,
            "{\"type\":\"header\",\"version\":1,\"game\":\"snake\",\"updated_at\":\"2026-01-01T00:00:00Z\"}\nnot json\n",
        )
        .unwrap();
        assert!(matches!(
            store.load(ScoreGame::Snake),
            Err(StoreError::JsonLineParse { line: 2, .. })
        ));
    }

    #[test]
    fn an_empty_file_is_missing_its_header() {
        let (_dir, store) = store();
        fs::create_dir_all(store.root()).unwrap();
        let path = score_file_path(store.root(), ScoreGame::Snake);
        fs::write(&path, "").unwrap();
        assert!(matches!(
            store.load(ScoreGame::Snake),
            Err(StoreError::MissingHeader { .. })
        ));
    }
}

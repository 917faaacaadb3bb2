//! Persistence gateway for board snapshots.
//!
//! The board is stored as one JSON blob plus a redundant backup copy:
//!
//! ```text
//! <data dir>/
//!   board.json          # primary snapshot
//!   board.backup.json   # redundant copy, written after the primary
//! ```
//!
//! Both `load` and `save` are total. A failed read falls back to the other
//! copy and finally to an empty board; a failed write is logged and
//! swallowed so callers stay responsive with in-memory state. Every loaded
//! payload goes through [`crate::sanitize::sanitize_state`], so a corrupt or
//! hand-edited blob degrades to a partial board instead of an error.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::BoardState;
use crate::sanitize::sanitize_state;

pub const BOARD_FILE: &str = "board.json";
pub const BACKUP_FILE: &str = "board.backup.json";
pub const BOARD_SCHEMA_VERSION: &str = "kanri.board.v1";

/// Version-wrapped snapshot as written to disk. `updated_at` breaks ties
/// when the primary and backup copies disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBoard {
    pub schema_version: String,
    pub updated_at: DateTime<Utc>,
    pub board: BoardState,
}

impl StoredBoard {
    pub fn new(board: BoardState) -> Self {
        Self {
            schema_version: BOARD_SCHEMA_VERSION.to_string(),
            updated_at: Utc::now(),
            board,
        }
    }
}

/// Blob store for board snapshots.
#[derive(Debug, Clone)]
pub struct BoardStore {
    dir: PathBuf,
}

impl BoardStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn board_path(&self) -> PathBuf {
        self.dir.join(BOARD_FILE)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.dir.join(BACKUP_FILE)
    }

    /// Load the current board. Never fails: prefers whichever of the
    /// primary/backup snapshots holds more tasks, ties broken by the most
    /// recent update timestamp, and falls back to an empty board.
    pub fn load(&self) -> BoardState {
        let primary = self.read_snapshot(&self.board_path());
        let backup = self.read_snapshot(&self.backup_path());

        match (primary, backup) {
            (Some(primary), Some(backup)) => {
                let keep_primary = match primary.board.tasks.len().cmp(&backup.board.tasks.len()) {
                    std::cmp::Ordering::Greater => true,
                    std::cmp::Ordering::Less => false,
                    std::cmp::Ordering::Equal => primary.updated_at >= backup.updated_at,
                };
                if keep_primary {
                    primary.board
                } else {
                    debug!(dir = %self.dir.display(), "backup snapshot wins over primary");
                    backup.board
                }
            }
            (Some(primary), None) => primary.board,
            (None, Some(backup)) => {
                debug!(dir = %self.dir.display(), "recovered board from backup copy");
                backup.board
            }
            (None, None) => BoardState::default(),
        }
    }

    /// Persist the board to the primary and backup files. Failures are
    /// logged and swallowed; callers continue with in-memory state.
    pub fn save(&self, board: &BoardState) {
        let stored = StoredBoard::new(board.clone());
        let json = match serde_json::to_string_pretty(&stored) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize board snapshot");
                return;
            }
        };

        for path in [self.board_path(), self.backup_path()] {
            if let Err(err) = write_atomic(&path, json.as_bytes()) {
                warn!(path = %path.display(), error = %err, "failed to write board snapshot");
            }
        }
    }

    fn read_snapshot(&self, path: &Path) -> Option<StoredBoard> {
        let content = fs::read_to_string(path).ok()?;
        let raw: Value = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "board snapshot is not valid JSON");
                return None;
            }
        };

        let updated_at = raw
            .get("updated_at")
            .and_then(Value::as_str)
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| DateTime::<Utc>::MIN_UTC);

        // Accept both the wrapped form and a bare board blob.
        let board_value = raw.get("board").unwrap_or(&raw);
        Some(StoredBoard {
            schema_version: BOARD_SCHEMA_VERSION.to_string(),
            updated_at,
            board: sanitize_state(board_value),
        })
    }
}

/// Write data using temp file + rename so readers never see partial writes.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Status, Task};
    use tempfile::TempDir;

    fn board_with_tasks(titles: &[&str]) -> BoardState {
        BoardState {
            tasks: titles
                .iter()
                .map(|title| Task::new(*title, "", Status::Todo))
                .collect(),
            ..BoardState::default()
        }
    }

    #[test]
    fn load_from_empty_dir_returns_empty_board() {
        let temp = TempDir::new().unwrap();
        let store = BoardStore::open(temp.path());
        assert_eq!(store.load(), BoardState::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = BoardStore::open(temp.path());
        let board = board_with_tasks(&["one", "two"]);
        store.save(&board);
        assert_eq!(store.load(), board);
        assert!(store.backup_path().exists());
    }

    #[test]
    fn corrupt_primary_falls_back_to_backup() {
        let temp = TempDir::new().unwrap();
        let store = BoardStore::open(temp.path());
        let board = board_with_tasks(&["survivor"]);
        store.save(&board);
        fs::write(store.board_path(), "{not json").unwrap();
        assert_eq!(store.load(), board);
    }

    #[test]
    fn snapshot_with_more_tasks_wins() {
        let temp = TempDir::new().unwrap();
        let store = BoardStore::open(temp.path());

        let bigger = StoredBoard::new(board_with_tasks(&["a", "b"]));
        let smaller = StoredBoard::new(board_with_tasks(&["a"]));
        fs::write(
            store.board_path(),
            serde_json::to_string(&smaller).unwrap(),
        )
        .unwrap();
        fs::write(
            store.backup_path(),
            serde_json::to_string(&bigger).unwrap(),
        )
        .unwrap();

        assert_eq!(store.load().tasks.len(), 2);
    }

    #[test]
    fn equal_task_counts_prefer_newer_snapshot() {
        let temp = TempDir::new().unwrap();
        let store = BoardStore::open(temp.path());

        let mut older = StoredBoard::new(board_with_tasks(&["old"]));
        older.updated_at = Utc::now() - chrono::Duration::hours(1);
        let newer = StoredBoard::new(board_with_tasks(&["new"]));

        fs::write(store.board_path(), serde_json::to_string(&older).unwrap()).unwrap();
        fs::write(store.backup_path(), serde_json::to_string(&newer).unwrap()).unwrap();

        assert_eq!(store.load().tasks[0].title, "new");
    }

    #[test]
    fn bare_unwrapped_blob_still_loads() {
        let temp = TempDir::new().unwrap();
        let store = BoardStore::open(temp.path());
        let board = board_with_tasks(&["legacy"]);
        fs::write(store.board_path(), serde_json::to_string(&board).unwrap()).unwrap();
        assert_eq!(store.load().tasks[0].title, "legacy");
    }

    #[test]
    fn save_into_unwritable_dir_is_swallowed() {
        let store = BoardStore::open("/dev/null/nope");
        store.save(&board_with_tasks(&["lost"]));
        assert_eq!(store.load(), BoardState::default());
    }
}

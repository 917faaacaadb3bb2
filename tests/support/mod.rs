use std::path::{Path, PathBuf};

use assert_cmd::Command;
use kanri::model::BoardState;
use kanri::store::BoardStore;
use tempfile::TempDir;

/// Isolated board directory for CLI tests. Every command runs with
/// `--data-dir` pointing at the temp dir so tests never touch the
/// platform data directory.
pub struct TestBoard {
    dir: TempDir,
}

impl TestBoard {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn board_path(&self) -> PathBuf {
        self.dir.path().join("board.json")
    }

    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("kanri").expect("binary");
        cmd.arg("--data-dir").arg(self.dir.path());
        cmd.args(args);
        cmd
    }

    /// Run a command, assert success, and return stdout.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self.cmd(args).assert().success();
        String::from_utf8(output.get_output().stdout.clone()).expect("utf8 stdout")
    }

    /// Run a command with `--json`, assert success, and parse the envelope.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let stdout = self.run(&full);
        serde_json::from_str(&stdout).expect("json envelope")
    }

    /// Load the persisted board through the library, bypassing the CLI.
    pub fn load_state(&self) -> BoardState {
        BoardStore::open(self.dir.path()).load()
    }
}

/// Create a task and return its id from the JSON envelope.
pub fn add_task(board: &TestBoard, args: &[&str]) -> String {
    let mut full = vec!["task", "add"];
    full.extend_from_slice(args);
    let envelope = board.run_json(&full);
    envelope["data"]["id"]
        .as_str()
        .expect("task id in envelope")
        .to_string()
}

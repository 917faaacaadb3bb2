use assert_cmd::Command;
use predicates::str::contains;

mod support;

use support::{add_task, TestBoard};

#[test]
fn kanri_help_works() {
    Command::cargo_bin("kanri")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("kanban"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "task", "board", "calendar", "stats", "activity", "msg", "doc", "settings", "reset",
    ];

    for cmd in subcommands {
        Command::cargo_bin("kanri")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn json_envelope_carries_schema_and_command() {
    let board = TestBoard::new();
    let envelope = board.run_json(&["task", "add", "smoke"]);
    assert_eq!(envelope["schema_version"], "kanri.v1");
    assert_eq!(envelope["command"], "task add");
    assert_eq!(envelope["status"], "success");
}

#[test]
fn invalid_priority_fails_with_user_error() {
    let board = TestBoard::new();
    board
        .cmd(&["task", "add", "x", "--priority", "urgent"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("invalid priority"));
}

#[test]
fn invalid_arguments_report_json_errors() {
    let board = TestBoard::new();
    let output = board
        .cmd(&["--json", "task", "add", "x", "--due", "tomorrow"])
        .assert()
        .failure()
        .code(2);
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let envelope: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["error"]["kind"], "user_error");
}

#[test]
fn quiet_suppresses_human_output() {
    let board = TestBoard::new();
    let stdout = board.run(&["--quiet", "task", "add", "silent"]);
    assert!(stdout.is_empty());
}

#[test]
fn message_send_and_list() {
    let board = TestBoard::new();
    board.run(&["msg", "send", "standup in five", "--no-reply"]);

    let envelope = board.run_json(&["msg", "list"]);
    assert_eq!(envelope["data"]["total"], 1);
    assert_eq!(envelope["data"]["messages"][0]["text"], "standup in five");
    assert_eq!(envelope["data"]["messages"][0]["sender"], "me");
}

#[test]
fn document_upload_round_trips() {
    let board = TestBoard::new();
    let file = board.path().join("notes.txt");
    std::fs::write(&file, "hello docs").unwrap();

    let envelope = board.run_json(&["doc", "add", file.to_str().unwrap()]);
    let id = envelope["data"]["id"].as_str().unwrap().to_string();

    let state = board.load_state();
    assert_eq!(state.documents.len(), 1);
    assert_eq!(state.documents[0].name, "notes.txt");
    assert!(state.documents[0].data_url.starts_with("data:text/plain;base64,"));

    board.run(&["doc", "rm", &id]);
    assert!(board.load_state().documents.is_empty());
}

#[test]
fn doc_add_missing_file_fails() {
    let board = TestBoard::new();
    board
        .cmd(&["doc", "add", "/no/such/file.txt"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn activity_list_respects_limit() {
    let board = TestBoard::new();
    for i in 0..5 {
        add_task(&board, &[&format!("task {i}")]);
    }

    let envelope = board.run_json(&["activity", "list", "--limit", "2"]);
    assert_eq!(envelope["data"]["entries"].as_array().unwrap().len(), 2);
    // Newest first.
    assert_eq!(envelope["data"]["entries"][0]["task_title"], "task 4");

    board.run(&["activity", "clear"]);
    assert!(board.load_state().activity.is_empty());
}

#[test]
fn env_var_selects_data_dir() {
    let temp = tempfile::tempdir().unwrap();
    Command::cargo_bin("kanri")
        .expect("binary")
        .env("KANRI_DATA_DIR", temp.path())
        .args(["task", "add", "from env"])
        .assert()
        .success();
    assert!(temp.path().join("board.json").exists());
}

use std::fs;

use kanri::model::Priority;

mod support;

use support::{add_task, TestBoard};

#[test]
fn corrupt_primary_snapshot_recovers_from_backup() {
    let board = TestBoard::new();
    add_task(&board, &["survivor"]);

    fs::write(board.board_path(), "{this is not json").unwrap();

    let envelope = board.run_json(&["task", "list"]);
    assert_eq!(envelope["data"]["total"], 1);
    assert_eq!(envelope["data"]["tasks"][0]["title"], "survivor");
}

#[test]
fn malformed_fields_degrade_instead_of_failing() {
    let board = TestBoard::new();

    // A hand-edited blob: one valid task, one without an id, junk scalars.
    let blob = serde_json::json!({
        "tasks": [
            {
                "id": "t1",
                "title": "kept",
                "priority": "urgent!!",
                "status": "doing",
                "due_date": "not a date",
                "tags": ["ok", 42, null]
            },
            { "title": "no id, dropped" },
            "not even an object"
        ],
        "activity": "wrong type",
        "settings": { "accent": "chartreuse" }
    });
    fs::write(board.board_path(), serde_json::to_string(&blob).unwrap()).unwrap();

    let state = board.load_state();
    assert_eq!(state.tasks.len(), 1);
    let task = &state.tasks[0];
    assert_eq!(task.title, "kept");
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.due_date, None);
    assert_eq!(task.tags, vec!["ok".to_string()]);
    assert!(state.activity.is_empty());
    assert_eq!(state.settings.accent.as_str(), "teal");
}

#[test]
fn both_snapshot_copies_are_written() {
    let board = TestBoard::new();
    add_task(&board, &["twice"]);

    assert!(board.board_path().exists());
    assert!(board.path().join("board.backup.json").exists());

    let primary = fs::read_to_string(board.board_path()).unwrap();
    let backup = fs::read_to_string(board.path().join("board.backup.json")).unwrap();
    let primary: serde_json::Value = serde_json::from_str(&primary).unwrap();
    let backup: serde_json::Value = serde_json::from_str(&backup).unwrap();
    assert_eq!(primary["board"], backup["board"]);
    assert_eq!(primary["schema_version"], "kanri.board.v1");
}

#[test]
fn bare_board_blob_without_wrapper_loads() {
    let board = TestBoard::new();
    let blob = serde_json::json!({
        "tasks": [{ "id": "t1", "title": "legacy import" }]
    });
    fs::write(board.board_path(), serde_json::to_string(&blob).unwrap()).unwrap();

    let envelope = board.run_json(&["task", "list"]);
    assert_eq!(envelope["data"]["tasks"][0]["title"], "legacy import");
}

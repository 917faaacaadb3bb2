//! Recovery of untrusted persisted payloads.
//!
//! Stored blobs may come from older versions, hand edits, or partial
//! writes. [`sanitize_state`] walks the raw JSON field by field: malformed
//! scalars fall back to their documented defaults, array elements that fail
//! the shape check are dropped, and the result is always a structurally
//! valid [`BoardState`]. For well-formed input the round trip
//! `sanitize(serialize(state)) == state` holds.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::model::{
    Accent, ActivityAction, ActivityItem, AppSettings, BoardState, ChatMessage, DocumentItem,
    Priority, Sender, Status, Task, ACTIVITY_CAP, DEFAULT_PROJECT,
};

pub fn sanitize_state(value: &Value) -> BoardState {
    let Some(root) = value.as_object() else {
        return BoardState::default();
    };

    let tasks = array_items(root.get("tasks"), sanitize_task);
    let mut activity = array_items(root.get("activity"), sanitize_activity);
    activity.truncate(ACTIVITY_CAP);

    BoardState {
        tasks,
        activity,
        messages: array_items(root.get("messages"), sanitize_message),
        documents: array_items(root.get("documents"), sanitize_document),
        settings: sanitize_settings(root.get("settings")),
    }
}

fn array_items<T>(value: Option<&Value>, item: fn(&Value) -> Option<T>) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(item).collect())
        .unwrap_or_default()
}

fn sanitize_task(value: &Value) -> Option<Task> {
    let obj = value.as_object()?;
    let id = required_string(obj.get("id"))?;
    let title = required_string(obj.get("title"))?;

    let project = string_or_default(obj.get("project"), DEFAULT_PROJECT);
    let project = if project.trim().is_empty() {
        DEFAULT_PROJECT.to_string()
    } else {
        project
    };

    Some(Task {
        id,
        project,
        title,
        description: string_or_default(obj.get("description"), ""),
        priority: obj
            .get("priority")
            .and_then(Value::as_str)
            .and_then(Priority::parse)
            .unwrap_or_default(),
        due_date: obj
            .get("due_date")
            .and_then(Value::as_str)
            .and_then(parse_date),
        tags: obj
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        status: obj
            .get("status")
            .and_then(Value::as_str)
            .and_then(Status::parse)
            .unwrap_or_default(),
        created_at: datetime_or_now(obj.get("created_at")),
        favorite: obj.get("favorite").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn sanitize_activity(value: &Value) -> Option<ActivityItem> {
    let obj = value.as_object()?;
    let id = required_string(obj.get("id"))?;
    let action = obj
        .get("action")
        .and_then(Value::as_str)
        .and_then(parse_activity_action)?;

    Some(ActivityItem {
        id,
        action,
        task_title: string_or_default(obj.get("task_title"), ""),
        timestamp: datetime_or_now(obj.get("timestamp")),
        details: obj
            .get("details")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn sanitize_message(value: &Value) -> Option<ChatMessage> {
    let obj = value.as_object()?;
    let id = required_string(obj.get("id"))?;
    let text = obj.get("text").and_then(Value::as_str)?.to_string();

    Some(ChatMessage {
        id,
        sender: match obj.get("sender").and_then(Value::as_str) {
            Some("teammate") => Sender::Teammate,
            _ => Sender::Me,
        },
        text,
        timestamp: datetime_or_now(obj.get("timestamp")),
    })
}

fn sanitize_document(value: &Value) -> Option<DocumentItem> {
    let obj = value.as_object()?;
    let id = required_string(obj.get("id"))?;
    let name = required_string(obj.get("name"))?;
    let data_url = required_string(obj.get("data_url"))?;

    Some(DocumentItem {
        id,
        name,
        mime_type: string_or_default(obj.get("mime_type"), "application/octet-stream"),
        size: obj.get("size").and_then(Value::as_u64).unwrap_or(0),
        uploaded_at: datetime_or_now(obj.get("uploaded_at")),
        data_url,
    })
}

fn sanitize_settings(value: Option<&Value>) -> AppSettings {
    let defaults = AppSettings::default();
    let Some(obj) = value.and_then(Value::as_object) else {
        return defaults;
    };

    AppSettings {
        compact_cards: obj
            .get("compact_cards")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.compact_cards),
        show_completed: obj
            .get("show_completed")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.show_completed),
        accent: obj
            .get("accent")
            .and_then(Value::as_str)
            .and_then(Accent::parse)
            .unwrap_or(defaults.accent),
    }
}

fn parse_activity_action(value: &str) -> Option<ActivityAction> {
    match value {
        "created" => Some(ActivityAction::Created),
        "edited" => Some(ActivityAction::Edited),
        "moved" => Some(ActivityAction::Moved),
        "deleted" => Some(ActivityAction::Deleted),
        "favorited" => Some(ActivityAction::Favorited),
        "message" => Some(ActivityAction::Message),
        "document" => Some(ActivityAction::Document),
        _ => None,
    }
}

fn required_string(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?;
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn string_or_default(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

fn datetime_or_now(value: Option<&Value>) -> DateTime<Utc> {
    value
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    raw.trim().parse().ok()
}

//! Board entities for kanri.
//!
//! The aggregate root is [`BoardState`]: tasks, the capped activity log,
//! chat messages, uploaded documents, and UI settings. All mutation goes
//! through the reducer in [`crate::reducer`]; nothing here mutates state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Maximum number of activity log entries kept, newest first.
pub const ACTIVITY_CAP: usize = 50;

/// Project label applied when a task is created with a blank project.
pub const DEFAULT_PROJECT: &str = "General";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Todo,
    Doing,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }

    /// Column label as shown in move details, e.g. "TODO".
    pub fn label(&self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::Doing => "DOING",
            Status::Done => "DONE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Some(Status::Todo),
            "doing" => Some(Status::Doing),
            "done" => Some(Status::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub project: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub favorite: bool,
}

impl Task {
    /// Build a new task. Assigns the id and creation timestamp; blank
    /// projects fall back to [`DEFAULT_PROJECT`]. Title validation happens
    /// at the call site so the error can be surfaced to the user.
    pub fn new(title: impl Into<String>, project: impl Into<String>, status: Status) -> Self {
        let project = project.into();
        let project = if project.trim().is_empty() {
            DEFAULT_PROJECT.to_string()
        } else {
            project
        };
        Self {
            id: Ulid::new().to_string(),
            project,
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            due_date: None,
            tags: Vec::new(),
            status,
            created_at: Utc::now(),
            favorite: false,
        }
    }
}

/// Split a comma-separated tag input into trimmed, non-empty tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Created,
    Edited,
    Moved,
    Deleted,
    Favorited,
    Message,
    Document,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityItem {
    pub id: String,
    pub action: ActivityAction,
    pub task_title: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ActivityItem {
    pub fn new(action: ActivityAction, task_title: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            action,
            task_title: task_title.into(),
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    #[default]
    Me,
    Teammate,
}

impl Sender {
    /// Label used in activity entries for sent messages.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::Me => "You",
            Sender::Teammate => "Teammate",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentItem {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
    pub data_url: String,
}

impl DocumentItem {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        data_url: impl Into<String>,
    ) -> Self {
        Self {
            id: Ulid::new().to_string(),
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            uploaded_at: Utc::now(),
            data_url: data_url.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    #[default]
    Teal,
    Blue,
    Orange,
}

impl Accent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accent::Teal => "teal",
            Accent::Blue => "blue",
            Accent::Orange => "orange",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "teal" => Some(Accent::Teal),
            "blue" => Some(Accent::Blue),
            "orange" => Some(Accent::Orange),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppSettings {
    #[serde(default)]
    pub compact_cards: bool,
    #[serde(default = "default_show_completed")]
    pub show_completed: bool,
    #[serde(default)]
    pub accent: Accent,
}

fn default_show_completed() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            compact_cards: false,
            show_completed: default_show_completed(),
            accent: Accent::default(),
        }
    }
}

/// Partial settings update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compact_cards: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<Accent>,
}

impl AppSettings {
    pub fn merged(&self, patch: SettingsPatch) -> Self {
        Self {
            compact_cards: patch.compact_cards.unwrap_or(self.compact_cards),
            show_completed: patch.show_completed.unwrap_or(self.show_completed),
            accent: patch.accent.unwrap_or(self.accent),
        }
    }
}

/// Aggregate board state. Owned by the reducer; the store only ever
/// reads and writes whole snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BoardState {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub activity: Vec<ActivityItem>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub documents: Vec<DocumentItem>,
    #[serde(default)]
    pub settings: AppSettings,
}

//! State transitions for the board.
//!
//! [`reduce`] is the single mutation path: given a snapshot and an action it
//! returns the next snapshot, never touching the input. Persistence is the
//! caller's job after each transition. Activity-producing transitions
//! prepend an entry and truncate the log to [`ACTIVITY_CAP`].

use crate::model::{
    ActivityAction, ActivityItem, BoardState, ChatMessage, DocumentItem, SettingsPatch, Status,
    Task, ACTIVITY_CAP,
};

/// Every mutation the presentation layer may dispatch.
#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the whole state, typically with a freshly loaded snapshot.
    Load(BoardState),
    CreateTask(Task),
    EditTask(Task),
    DeleteTask { id: String },
    MoveTask { id: String, status: Status },
    ToggleFavorite { id: String },
    ClearActivity,
    RemoveActivity { id: String },
    AddMessage(ChatMessage),
    AddDocument(DocumentItem),
    RemoveDocument { id: String },
    UpdateSettings(SettingsPatch),
    /// Clear tasks and activity; messages, documents and settings survive.
    Reset,
}

pub fn reduce(state: &BoardState, action: Action) -> BoardState {
    match action {
        Action::Load(next) => next,
        Action::CreateTask(task) => {
            let mut next = state.clone();
            let entry = ActivityItem::new(ActivityAction::Created, &task.title);
            next.tasks.insert(0, task);
            push_activity(&mut next, entry);
            next
        }
        Action::EditTask(task) => {
            let Some(index) = state.tasks.iter().position(|t| t.id == task.id) else {
                return state.clone();
            };
            let mut next = state.clone();
            // Identity and creation time never change on edit.
            let mut edited = task;
            edited.created_at = next.tasks[index].created_at;
            let title = edited.title.clone();
            next.tasks[index] = edited;
            push_activity(&mut next, ActivityItem::new(ActivityAction::Edited, title));
            next
        }
        Action::DeleteTask { id } => {
            let Some(index) = state.tasks.iter().position(|t| t.id == id) else {
                return state.clone();
            };
            let mut next = state.clone();
            let removed = next.tasks.remove(index);
            push_activity(
                &mut next,
                ActivityItem::new(ActivityAction::Deleted, removed.title),
            );
            next
        }
        Action::MoveTask { id, status } => {
            let Some(index) = state.tasks.iter().position(|t| t.id == id) else {
                return state.clone();
            };
            let from = state.tasks[index].status;
            if from == status {
                return state.clone();
            }
            let mut next = state.clone();
            next.tasks[index].status = status;
            let entry = ActivityItem::new(ActivityAction::Moved, next.tasks[index].title.clone())
                .with_details(format!("{} -> {}", from.label(), status.label()));
            push_activity(&mut next, entry);
            next
        }
        Action::ToggleFavorite { id } => {
            let Some(index) = state.tasks.iter().position(|t| t.id == id) else {
                return state.clone();
            };
            let mut next = state.clone();
            next.tasks[index].favorite = !next.tasks[index].favorite;
            let details = if next.tasks[index].favorite {
                "Added to favorites"
            } else {
                "Removed from favorites"
            };
            let entry =
                ActivityItem::new(ActivityAction::Favorited, next.tasks[index].title.clone())
                    .with_details(details);
            push_activity(&mut next, entry);
            next
        }
        Action::ClearActivity => {
            let mut next = state.clone();
            next.activity.clear();
            next
        }
        Action::RemoveActivity { id } => {
            let mut next = state.clone();
            next.activity.retain(|entry| entry.id != id);
            next
        }
        Action::AddMessage(message) => {
            let mut next = state.clone();
            let entry = ActivityItem::new(ActivityAction::Message, message.sender.label())
                .with_details(message.text.clone());
            next.messages.push(message);
            push_activity(&mut next, entry);
            next
        }
        Action::AddDocument(doc) => {
            let mut next = state.clone();
            let entry = ActivityItem::new(ActivityAction::Document, &doc.name)
                .with_details("Document uploaded");
            next.documents.insert(0, doc);
            push_activity(&mut next, entry);
            next
        }
        Action::RemoveDocument { id } => {
            let mut next = state.clone();
            next.documents.retain(|doc| doc.id != id);
            next
        }
        Action::UpdateSettings(patch) => {
            let mut next = state.clone();
            next.settings = next.settings.merged(patch);
            next
        }
        Action::Reset => {
            let mut next = state.clone();
            next.tasks.clear();
            next.activity.clear();
            next
        }
    }
}

fn push_activity(state: &mut BoardState, entry: ActivityItem) {
    state.activity.insert(0, entry);
    state.activity.truncate(ACTIVITY_CAP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Sender};

    fn created(title: &str) -> BoardState {
        reduce(
            &BoardState::default(),
            Action::CreateTask(Task::new(title, "", Status::Todo)),
        )
    }

    #[test]
    fn create_prepends_task_and_logs() {
        let state = created("First");
        let state = reduce(
            &state,
            Action::CreateTask(Task::new("Second", "", Status::Doing)),
        );
        assert_eq!(state.tasks[0].title, "Second");
        assert_eq!(state.tasks[1].title, "First");
        assert_eq!(state.activity[0].action, ActivityAction::Created);
        assert_eq!(state.activity[0].task_title, "Second");
    }

    #[test]
    fn edit_replaces_fields_but_keeps_identity() {
        let state = created("Draft");
        let original = state.tasks[0].clone();
        let mut update = original.clone();
        update.title = "Final".to_string();
        update.priority = Priority::High;
        update.created_at = chrono::Utc::now();
        let state = reduce(&state, Action::EditTask(update));
        assert_eq!(state.tasks[0].title, "Final");
        assert_eq!(state.tasks[0].id, original.id);
        assert_eq!(state.tasks[0].created_at, original.created_at);
        assert_eq!(state.activity[0].action, ActivityAction::Edited);
    }

    #[test]
    fn edit_unknown_id_is_noop() {
        let state = created("Draft");
        let mut ghost = state.tasks[0].clone();
        ghost.id = "missing".to_string();
        let next = reduce(&state, Action::EditTask(ghost));
        assert_eq!(next, state);
    }

    #[test]
    fn move_updates_status_and_details() {
        let state = created("Ship it");
        let id = state.tasks[0].id.clone();
        let state = reduce(
            &state,
            Action::MoveTask {
                id,
                status: Status::Done,
            },
        );
        assert_eq!(state.tasks[0].status, Status::Done);
        assert_eq!(state.activity[0].action, ActivityAction::Moved);
        assert_eq!(state.activity[0].details.as_deref(), Some("TODO -> DONE"));
    }

    #[test]
    fn move_to_same_status_produces_no_activity() {
        let state = created("Hold");
        let id = state.tasks[0].id.clone();
        let next = reduce(
            &state,
            Action::MoveTask {
                id,
                status: Status::Todo,
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn move_missing_id_is_noop() {
        let state = created("Hold");
        let next = reduce(
            &state,
            Action::MoveTask {
                id: "nope".to_string(),
                status: Status::Done,
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn delete_removes_task_and_logs_title() {
        let state = created("Obsolete");
        let id = state.tasks[0].id.clone();
        let state = reduce(&state, Action::DeleteTask { id });
        assert!(state.tasks.is_empty());
        assert_eq!(state.activity[0].action, ActivityAction::Deleted);
        assert_eq!(state.activity[0].task_title, "Obsolete");
    }

    #[test]
    fn delete_missing_id_leaves_activity_untouched() {
        let state = created("Keep");
        let next = reduce(
            &state,
            Action::DeleteTask {
                id: "missing".to_string(),
            },
        );
        assert_eq!(next.activity, state.activity);
        assert_eq!(next.tasks.len(), 1);
    }

    #[test]
    fn toggle_favorite_flips_and_logs_direction() {
        let state = created("Star me");
        let id = state.tasks[0].id.clone();
        let state = reduce(&state, Action::ToggleFavorite { id: id.clone() });
        assert!(state.tasks[0].favorite);
        assert_eq!(
            state.activity[0].details.as_deref(),
            Some("Added to favorites")
        );
        let state = reduce(&state, Action::ToggleFavorite { id });
        assert!(!state.tasks[0].favorite);
        assert_eq!(
            state.activity[0].details.as_deref(),
            Some("Removed from favorites")
        );
    }

    #[test]
    fn activity_log_is_capped_oldest_evicted() {
        let mut state = BoardState::default();
        for i in 0..=ACTIVITY_CAP {
            state = reduce(
                &state,
                Action::CreateTask(Task::new(format!("task {i}"), "", Status::Todo)),
            );
        }
        assert_eq!(state.activity.len(), ACTIVITY_CAP);
        // Newest first; the very first entry ("task 0") fell off.
        assert_eq!(state.activity[0].task_title, format!("task {ACTIVITY_CAP}"));
        assert!(state
            .activity
            .iter()
            .all(|entry| entry.task_title != "task 0"));
    }

    #[test]
    fn messages_log_sender_label_and_text() {
        let state = reduce(
            &BoardState::default(),
            Action::AddMessage(ChatMessage::new(Sender::Me, "hello")),
        );
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.activity[0].action, ActivityAction::Message);
        assert_eq!(state.activity[0].task_title, "You");
        assert_eq!(state.activity[0].details.as_deref(), Some("hello"));
    }

    #[test]
    fn documents_prepend_and_remove_by_id() {
        let state = reduce(
            &BoardState::default(),
            Action::AddDocument(DocumentItem::new("a.txt", "text/plain", 3, "data:,a")),
        );
        let state = reduce(
            &state,
            Action::AddDocument(DocumentItem::new("b.txt", "text/plain", 3, "data:,b")),
        );
        assert_eq!(state.documents[0].name, "b.txt");
        assert_eq!(state.activity[0].details.as_deref(), Some("Document uploaded"));

        let id = state.documents[0].id.clone();
        let state = reduce(&state, Action::RemoveDocument { id });
        assert_eq!(state.documents.len(), 1);
        assert_eq!(state.documents[0].name, "a.txt");
    }

    #[test]
    fn clear_and_remove_activity() {
        let state = created("One");
        let entry_id = state.activity[0].id.clone();
        let removed = reduce(&state, Action::RemoveActivity { id: entry_id });
        assert!(removed.activity.is_empty());

        let cleared = reduce(&state, Action::ClearActivity);
        assert!(cleared.activity.is_empty());
        assert_eq!(cleared.tasks.len(), 1);
    }

    #[test]
    fn reset_keeps_messages_documents_settings() {
        let state = created("Gone");
        let state = reduce(
            &state,
            Action::AddMessage(ChatMessage::new(Sender::Teammate, "hi")),
        );
        let state = reduce(
            &state,
            Action::UpdateSettings(SettingsPatch {
                compact_cards: Some(true),
                ..SettingsPatch::default()
            }),
        );
        let state = reduce(&state, Action::Reset);
        assert!(state.tasks.is_empty());
        assert!(state.activity.is_empty());
        assert_eq!(state.messages.len(), 1);
        assert!(state.settings.compact_cards);
    }

    #[test]
    fn reduce_never_mutates_input() {
        let state = created("Immutable");
        let before = state.clone();
        let _ = reduce(
            &state,
            Action::CreateTask(Task::new("Another", "", Status::Todo)),
        );
        assert_eq!(state, before);
    }
}

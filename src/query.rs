//! Derived views over a board snapshot.
//!
//! Every function here is pure: it takes an explicit task slice plus
//! parameters and returns a fresh collection. Nothing reads ambient state.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Priority, Status, Task};

fn normalize_text(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// Compare by due date. Tasks without a due date sort after every dated
/// task under both directions; the direction only applies when both dates
/// are present. Ties break by creation time ascending, always.
fn compare_due(left: &Task, right: &Task, direction: SortDirection) -> Ordering {
    match (left.due_date, right.due_date) {
        (Some(a), Some(b)) => {
            let ordered = match direction {
                SortDirection::Ascending => a.cmp(&b),
                SortDirection::Descending => b.cmp(&a),
            };
            ordered.then_with(|| left.created_at.cmp(&right.created_at))
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => left.created_at.cmp(&right.created_at),
    }
}

/// Case-insensitive title search plus optional exact priority filter,
/// sorted by the due-date comparator above.
pub fn filter_and_sort_tasks(
    tasks: &[Task],
    search: &str,
    priority: Option<Priority>,
    direction: SortDirection,
) -> Vec<Task> {
    let needle = normalize_text(search);
    let mut matched: Vec<Task> = tasks
        .iter()
        .filter(|task| needle.is_empty() || normalize_text(&task.title).contains(&needle))
        .filter(|task| priority.map(|p| task.priority == p).unwrap_or(true))
        .cloned()
        .collect();
    matched.sort_by(|a, b| compare_due(a, b, direction));
    matched
}

/// New list with only the matching task's status replaced; order and all
/// other fields preserved.
pub fn move_task_status(tasks: &[Task], id: &str, status: Status) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                let mut moved = task.clone();
                moved.status = status;
                moved
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Top-level workspace sections, each applying an implicit task filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Home,
    MyTasks,
    Inbox,
    Portfolios,
    Goals,
    Favorites,
}

impl Section {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "home" => Some(Section::Home),
            "my_tasks" | "my-tasks" => Some(Section::MyTasks),
            "inbox" => Some(Section::Inbox),
            "portfolios" => Some(Section::Portfolios),
            "goals" => Some(Section::Goals),
            "favorites" => Some(Section::Favorites),
            _ => None,
        }
    }
}

/// The active view: section plus an optionally selected project.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    pub section: Section,
    pub project: Option<String>,
}

impl ViewScope {
    pub fn section(section: Section) -> Self {
        Self {
            section,
            project: None,
        }
    }

    fn admits(&self, task: &Task) -> bool {
        match self.section {
            Section::Home | Section::MyTasks | Section::Goals => true,
            Section::Inbox => task.status == Status::Todo || task.priority == Priority::High,
            Section::Favorites => task.favorite,
            Section::Portfolios => match &self.project {
                Some(project) => normalize_text(&task.project) == normalize_text(project),
                None => true,
            },
        }
    }
}

/// Restrict an already filtered and sorted list to the active section.
pub fn scope_tasks(tasks: Vec<Task>, scope: &ViewScope) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| scope.admits(task))
        .collect()
}

/// The three fixed kanban lanes, relative order preserved.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardColumns {
    pub todo: Vec<Task>,
    pub doing: Vec<Task>,
    pub done: Vec<Task>,
}

pub fn group_by_status(tasks: &[Task]) -> BoardColumns {
    let mut columns = BoardColumns::default();
    for task in tasks {
        match task.status {
            Status::Todo => columns.todo.push(task.clone()),
            Status::Doing => columns.doing.push(task.clone()),
            Status::Done => columns.done.push(task.clone()),
        }
    }
    columns
}

/// Calendar buckets keyed by exact due date; tasks without a due date
/// appear in no bucket.
pub fn bucket_by_due_date(tasks: &[Task]) -> BTreeMap<NaiveDate, Vec<Task>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        if let Some(date) = task.due_date {
            buckets.entry(date).or_default().push(task.clone());
        }
    }
    buckets
}

/// Summary counts over a task scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub total: usize,
    pub todo: usize,
    pub doing: usize,
    pub done: usize,
    pub favorites: usize,
}

pub fn summarize(tasks: &[Task]) -> BoardSummary {
    let mut summary = BoardSummary::default();
    for task in tasks {
        summary.total += 1;
        match task.status {
            Status::Todo => summary.todo += 1,
            Status::Doing => summary.doing += 1,
            Status::Done => summary.done += 1,
        }
        if task.favorite {
            summary.favorites += 1;
        }
    }
    summary
}

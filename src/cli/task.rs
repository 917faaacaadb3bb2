//! kanri task command implementations.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::cli::{load_context, BoardContext};
use crate::error::{Error, Result};
use crate::model::{parse_tags, Priority, Status, Task};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::query::{filter_and_sort_tasks, scope_tasks, Section, SortDirection, ViewScope};
use crate::reducer::Action;

pub struct AddOptions {
    pub title: String,
    pub project: Option<String>,
    pub description: Option<String>,
    pub priority: String,
    pub due: Option<String>,
    pub tags: Option<String>,
    pub status: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub project: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub clear_due: bool,
    pub tags: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct MvOptions {
    pub id: String,
    pub status: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct FavOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub search: Option<String>,
    pub priority: Option<String>,
    pub sort: String,
    pub section: Option<String>,
    pub project: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct TaskCreatedOutput {
    id: String,
    status: Status,
    priority: Priority,
    project: String,
}

#[derive(Serialize)]
struct TaskOutput {
    task: Task,
}

#[derive(Serialize)]
struct TaskListOutput {
    total: usize,
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct NoopOutput {
    id: String,
    changed: bool,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    if options.title.trim().is_empty() {
        return Err(Error::EmptyTitle);
    }
    let priority = parse_priority(&options.priority)?;
    let status = parse_status(&options.status)?;
    let due_date = options.due.as_deref().map(parse_due).transpose()?;

    let mut ctx = load_context(options.data_dir.as_deref());
    let mut task = Task::new(
        options.title.trim(),
        options.project.unwrap_or_default(),
        status,
    );
    task.description = options.description.unwrap_or_default();
    task.priority = priority;
    task.due_date = due_date;
    task.tags = options.tags.as_deref().map(parse_tags).unwrap_or_default();

    let output = TaskCreatedOutput {
        id: task.id.clone(),
        status: task.status,
        priority: task.priority,
        project: task.project.clone(),
    };
    let mut human = HumanOutput::new("Task created");
    human.push_summary("ID", output.id.clone());
    human.push_summary("Title", task.title.clone());
    human.push_summary("Status", task.status.as_str());
    human.push_summary("Priority", task.priority.as_str());

    ctx.dispatch(Action::CreateTask(task));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task add",
        &output,
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    if let Some(title) = &options.title {
        if title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }
    }
    let priority = options.priority.as_deref().map(parse_priority).transpose()?;
    let due_date = options.due.as_deref().map(parse_due).transpose()?;

    let mut ctx = load_context(options.data_dir.as_deref());
    let Some(current) = ctx.state.tasks.iter().find(|t| t.id == options.id).cloned() else {
        return missing_task(&options.id, "task edit", options.json, options.quiet);
    };

    let mut edited = current;
    if let Some(title) = options.title {
        edited.title = title.trim().to_string();
    }
    if let Some(project) = options.project {
        edited.project = if project.trim().is_empty() {
            crate::model::DEFAULT_PROJECT.to_string()
        } else {
            project
        };
    }
    if let Some(description) = options.description {
        edited.description = description;
    }
    if let Some(priority) = priority {
        edited.priority = priority;
    }
    if options.clear_due {
        edited.due_date = None;
    } else if let Some(due) = due_date {
        edited.due_date = Some(due);
    }
    if let Some(tags) = options.tags.as_deref() {
        edited.tags = parse_tags(tags);
    }

    let output = TaskOutput {
        task: edited.clone(),
    };
    let mut human = HumanOutput::new("Task edited");
    human.push_summary("ID", edited.id.clone());
    human.push_summary("Title", edited.title.clone());

    ctx.dispatch(Action::EditTask(edited));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task edit",
        &output,
        Some(&human),
    )
}

pub fn run_mv(options: MvOptions) -> Result<()> {
    let status = parse_status(&options.status)?;
    let mut ctx = load_context(options.data_dir.as_deref());

    let Some(task) = ctx.state.tasks.iter().find(|t| t.id == options.id) else {
        return missing_task(&options.id, "task mv", options.json, options.quiet);
    };
    let from = task.status;
    let title = task.title.clone();

    let mut human = HumanOutput::new("Task moved");
    human.push_summary("ID", options.id.clone());
    human.push_summary("Title", title);
    if from == status {
        human.push_warning(format!("task is already in {}", status.as_str()));
    } else {
        human.push_summary("Move", format!("{} -> {}", from.label(), status.label()));
    }

    ctx.dispatch(Action::MoveTask {
        id: options.id.clone(),
        status,
    });

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task mv",
        &NoopOutput {
            id: options.id,
            changed: from != status,
        },
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut ctx = load_context(options.data_dir.as_deref());
    let found = ctx.state.tasks.iter().any(|t| t.id == options.id);
    if !found {
        return missing_task(&options.id, "task rm", options.json, options.quiet);
    }

    ctx.dispatch(Action::DeleteTask {
        id: options.id.clone(),
    });

    let mut human = HumanOutput::new("Task deleted");
    human.push_summary("ID", options.id.clone());
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task rm",
        &NoopOutput {
            id: options.id,
            changed: true,
        },
        Some(&human),
    )
}

pub fn run_fav(options: FavOptions) -> Result<()> {
    let mut ctx = load_context(options.data_dir.as_deref());
    let Some(task) = ctx.state.tasks.iter().find(|t| t.id == options.id) else {
        return missing_task(&options.id, "task fav", options.json, options.quiet);
    };
    let now_favorite = !task.favorite;

    ctx.dispatch(Action::ToggleFavorite {
        id: options.id.clone(),
    });

    let mut human = HumanOutput::new("Favorite toggled");
    human.push_summary("ID", options.id.clone());
    human.push_summary("Favorite", now_favorite.to_string());
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task fav",
        &NoopOutput {
            id: options.id,
            changed: true,
        },
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.data_dir.as_deref());
    let tasks = select_tasks(
        &ctx,
        options.search.as_deref(),
        options.priority.as_deref(),
        &options.sort,
        options.section.as_deref(),
        options.project.as_deref(),
    )?;

    let output = TaskListOutput {
        total: tasks.len(),
        tasks: tasks.clone(),
    };

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Total", tasks.len().to_string());
    for task in &tasks {
        human.push_detail(format_task_line(task));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task list",
        &output,
        Some(&human),
    )
}

/// Shared view pipeline: filter + sort, then section scope, then the
/// show-completed toggle from settings.
pub(crate) fn select_tasks(
    ctx: &BoardContext,
    search: Option<&str>,
    priority: Option<&str>,
    sort: &str,
    section: Option<&str>,
    project: Option<&str>,
) -> Result<Vec<Task>> {
    let priority = priority.map(parse_priority).transpose()?;
    let direction = SortDirection::parse(sort).ok_or_else(|| {
        Error::InvalidArgument(format!("invalid sort '{sort}' (expected asc|desc)"))
    })?;

    let mut tasks = filter_and_sort_tasks(
        &ctx.state.tasks,
        search.unwrap_or(""),
        priority,
        direction,
    );

    let scope = match section {
        Some(raw) => {
            let section = Section::parse(raw).ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "invalid section '{raw}' (expected home|my_tasks|inbox|portfolios|goals|favorites)"
                ))
            })?;
            Some(ViewScope {
                section,
                project: project.map(str::to_string),
            })
        }
        // A bare --project behaves like the portfolios section.
        None => project.map(|project| ViewScope {
            section: Section::Portfolios,
            project: Some(project.to_string()),
        }),
    };
    if let Some(scope) = scope {
        tasks = scope_tasks(tasks, &scope);
    }

    if !ctx.state.settings.show_completed {
        tasks.retain(|task| task.status != Status::Done);
    }

    Ok(tasks)
}

pub(crate) fn format_task_line(task: &Task) -> String {
    let mut line = format!(
        "[{}][{}] {} {}",
        task.status.as_str(),
        task.priority.as_str(),
        task.id,
        task.title
    );
    if let Some(due) = task.due_date {
        line.push_str(&format!(" (due: {due})"));
    }
    if task.favorite {
        line.push_str(" *");
    }
    line
}

pub(crate) fn parse_priority(raw: &str) -> Result<Priority> {
    Priority::parse(raw).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "invalid priority '{raw}' (expected low|medium|high)"
        ))
    })
}

pub(crate) fn parse_status(raw: &str) -> Result<Status> {
    Status::parse(raw).ok_or_else(|| {
        Error::InvalidArgument(format!("invalid status '{raw}' (expected todo|doing|done)"))
    })
}

fn parse_due(raw: &str) -> Result<NaiveDate> {
    raw.trim().parse().map_err(|_| {
        Error::InvalidArgument(format!("invalid due date '{raw}' (expected YYYY-MM-DD)"))
    })
}

/// Missing ids are no-ops per the board contract; surface a warning so the
/// user still gets feedback, but exit successfully.
fn missing_task(id: &str, command: &str, json: bool, quiet: bool) -> Result<()> {
    let mut human = HumanOutput::new("No change");
    human.push_warning(format!("no task with id {id}; nothing changed"));
    emit_success(
        OutputOptions { json, quiet },
        command,
        &NoopOutput {
            id: id.to_string(),
            changed: false,
        },
        Some(&human),
    )
}

//! Board-level views: columns, calendar buckets, summary counts, reset.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{load_context, task};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::query::{bucket_by_due_date, group_by_status, summarize, BoardColumns, BoardSummary};
use crate::reducer::Action;

pub struct BoardOptions {
    pub search: Option<String>,
    pub priority: Option<String>,
    pub sort: String,
    pub section: Option<String>,
    pub project: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct CalendarOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct StatsOptions {
    pub project: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ResetOptions {
    pub yes: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct BoardOutput {
    columns: BoardColumns,
}

#[derive(Serialize)]
struct CalendarDay {
    date: String,
    tasks: Vec<String>,
}

#[derive(Serialize)]
struct CalendarOutput {
    days: Vec<CalendarDay>,
}

#[derive(Serialize)]
struct StatsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<String>,
    summary: BoardSummary,
}

#[derive(Serialize)]
struct ResetOutput {
    reset: bool,
}

pub fn run_board(options: BoardOptions) -> Result<()> {
    let ctx = load_context(options.data_dir.as_deref());
    let tasks = task::select_tasks(
        &ctx,
        options.search.as_deref(),
        options.priority.as_deref(),
        &options.sort,
        options.section.as_deref(),
        options.project.as_deref(),
    )?;
    let columns = group_by_status(&tasks);

    let mut human = HumanOutput::new("Board");
    human.push_summary("Todo", columns.todo.len().to_string());
    human.push_summary("Doing", columns.doing.len().to_string());
    human.push_summary("Done", columns.done.len().to_string());
    for (label, lane) in [
        ("todo", &columns.todo),
        ("doing", &columns.doing),
        ("done", &columns.done),
    ] {
        for task in lane {
            human.push_detail(format!("{label}: {} {}", task.id, task.title));
        }
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "board",
        &BoardOutput { columns },
        Some(&human),
    )
}

pub fn run_calendar(options: CalendarOptions) -> Result<()> {
    let ctx = load_context(options.data_dir.as_deref());
    let buckets = bucket_by_due_date(&ctx.state.tasks);

    let days: Vec<CalendarDay> = buckets
        .iter()
        .map(|(date, tasks)| CalendarDay {
            date: date.to_string(),
            tasks: tasks.iter().map(|task| task.title.clone()).collect(),
        })
        .collect();

    let mut human = HumanOutput::new("Calendar");
    human.push_summary("Days", days.len().to_string());
    for day in &days {
        human.push_detail(format!("{}: {}", day.date, day.tasks.join(", ")));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "calendar",
        &CalendarOutput { days },
        Some(&human),
    )
}

pub fn run_stats(options: StatsOptions) -> Result<()> {
    let ctx = load_context(options.data_dir.as_deref());
    let summary = match options.project.as_deref() {
        Some(project) => {
            let needle = project.trim().to_ascii_lowercase();
            let scoped: Vec<_> = ctx
                .state
                .tasks
                .iter()
                .filter(|task| task.project.trim().to_ascii_lowercase() == needle)
                .cloned()
                .collect();
            summarize(&scoped)
        }
        None => summarize(&ctx.state.tasks),
    };

    let mut human = HumanOutput::new("Stats");
    if let Some(project) = &options.project {
        human.push_summary("Project", project.clone());
    }
    human.push_summary("Total", summary.total.to_string());
    human.push_summary("Todo", summary.todo.to_string());
    human.push_summary("Doing", summary.doing.to_string());
    human.push_summary("Done", summary.done.to_string());
    human.push_summary("Favorites", summary.favorites.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "stats",
        &StatsOutput {
            project: options.project,
            summary,
        },
        Some(&human),
    )
}

pub fn run_reset(options: ResetOptions) -> Result<()> {
    if !options.yes {
        return Err(Error::InvalidArgument(
            "reset clears tasks and activity; pass --yes to confirm".to_string(),
        ));
    }

    let mut ctx = load_context(options.data_dir.as_deref());
    ctx.dispatch(Action::Reset);

    let human = HumanOutput::new("Board reset (tasks and activity cleared)");
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "reset",
        &ResetOutput { reset: true },
        Some(&human),
    )
}

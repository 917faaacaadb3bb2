//! kanri activity command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::load_context;
use crate::error::Result;
use crate::model::ActivityItem;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::reducer::Action;

pub struct ListOptions {
    pub limit: Option<usize>,
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

pub struct ClearOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ActivityListOutput {
    total: usize,
    entries: Vec<ActivityItem>,
}

#[derive(Serialize)]
struct ActivityChangeOutput {
    remaining: usize,
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.data_dir.as_deref());
    let mut entries = ctx.state.activity.clone();
    if let Some(limit) = options.limit {
        entries.truncate(limit);
    }

    let mut human = HumanOutput::new("Activity");
    human.push_summary("Total", entries.len().to_string());
    for entry in &entries {
        let mut line = format!(
            "{} {:?} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.action,
            entry.task_title
        );
        if let Some(details) = &entry.details {
            line.push_str(&format!(" ({details})"));
        }
        human.push_detail(line);
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "activity list",
        &ActivityListOutput {
            total: entries.len(),
            entries,
        },
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut ctx = load_context(options.data_dir.as_deref());
    ctx.dispatch(Action::RemoveActivity { id: options.id });

    let remaining = ctx.state.activity.len();
    let mut human = HumanOutput::new("Activity entry removed");
    human.push_summary("Remaining", remaining.to_string());
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "activity rm",
        &ActivityChangeOutput { remaining },
        Some(&human),
    )
}

pub fn run_clear(options: ClearOptions) -> Result<()> {
    let mut ctx = load_context(options.data_dir.as_deref());
    ctx.dispatch(Action::ClearActivity);

    let human = HumanOutput::new("Activity log cleared");
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "activity clear",
        &ActivityChangeOutput { remaining: 0 },
        Some(&human),
    )
}

//! kanri settings command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::load_context;
use crate::error::{Error, Result};
use crate::model::{Accent, AppSettings, SettingsPatch};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::reducer::Action;

pub struct ShowOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct SetOptions {
    pub compact_cards: Option<bool>,
    pub show_completed: Option<bool>,
    pub accent: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct SettingsOutput {
    settings: AppSettings,
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let ctx = load_context(options.data_dir.as_deref());
    let settings = ctx.state.settings;

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "settings show",
        &SettingsOutput { settings },
        Some(&settings_human(&settings, "Settings")),
    )
}

pub fn run_set(options: SetOptions) -> Result<()> {
    let accent = options
        .accent
        .as_deref()
        .map(|raw| {
            Accent::parse(raw).ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "invalid accent '{raw}' (expected teal|blue|orange)"
                ))
            })
        })
        .transpose()?;

    let mut ctx = load_context(options.data_dir.as_deref());
    ctx.dispatch(Action::UpdateSettings(SettingsPatch {
        compact_cards: options.compact_cards,
        show_completed: options.show_completed,
        accent,
    }));

    let settings = ctx.state.settings;
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "settings set",
        &SettingsOutput { settings },
        Some(&settings_human(&settings, "Settings updated")),
    )
}

fn settings_human(settings: &AppSettings, header: &str) -> HumanOutput {
    let mut human = HumanOutput::new(header);
    human.push_summary("Compact cards", settings.compact_cards.to_string());
    human.push_summary("Show completed", settings.show_completed.to_string());
    human.push_summary("Accent", settings.accent.as_str());
    human
}

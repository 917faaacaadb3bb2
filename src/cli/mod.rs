//! Command-line interface for kanri
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand group is defined in its own submodule. Commands follow
//! the same shape: load the board snapshot, dispatch actions through the
//! reducer, persist the result, emit a human or JSON summary.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::model::BoardState;
use crate::reducer::{reduce, Action};
use crate::store::BoardStore;

mod activity;
mod board;
mod chat;
mod doc;
mod settings;
mod task;

/// kanri - local-first kanban board
///
/// Maintains a locally persisted board of tasks, activity, chat messages
/// and documents, with filtered/sorted/grouped views over it.
#[derive(Parser, Debug)]
#[command(name = "kanri")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory for board data (defaults to the platform data dir)
    #[arg(long, global = true, env = "KANRI_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Show the kanban board columns
    Board {
        /// Substring to match against task titles
        #[arg(long)]
        search: Option<String>,

        /// Only tasks with this priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Sort direction by due date: asc or desc
        #[arg(long, default_value = "asc")]
        sort: String,

        /// Active section: home, my_tasks, inbox, portfolios, goals, favorites
        #[arg(long)]
        section: Option<String>,

        /// Active project (scopes the portfolios section)
        #[arg(long)]
        project: Option<String>,
    },

    /// Group tasks by due date for a calendar view
    Calendar,

    /// Summary counts for the board or one project
    Stats {
        /// Restrict counts to one project
        #[arg(long)]
        project: Option<String>,
    },

    /// Activity log management
    #[command(subcommand)]
    Activity(ActivityCommands),

    /// Chat messages
    #[command(subcommand)]
    Msg(MsgCommands),

    /// Uploaded documents
    #[command(subcommand)]
    Doc(DocCommands),

    /// Board settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Clear tasks and activity (messages, documents, settings survive)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    Add {
        /// Task title
        title: String,

        /// Project label (defaults to "General")
        #[arg(long)]
        project: Option<String>,

        /// Longer description
        #[arg(long)]
        description: Option<String>,

        /// Priority: low, medium, high
        #[arg(long, default_value = "medium")]
        priority: String,

        /// Due date, ISO format (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// Initial column: todo, doing, done
        #[arg(long, default_value = "todo")]
        status: String,
    },

    /// Edit task fields (identity and creation time are preserved)
    Edit {
        /// Task id
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        project: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,

        /// Comma-separated tags (replaces the existing tags)
        #[arg(long)]
        tags: Option<String>,
    },

    /// Move a task to another column
    Mv {
        /// Task id
        id: String,

        /// Target column: todo, doing, done
        status: String,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: String,
    },

    /// Toggle a task's favorite flag
    Fav {
        /// Task id
        id: String,
    },

    /// List tasks, filtered and sorted
    List {
        /// Substring to match against task titles
        #[arg(long)]
        search: Option<String>,

        /// Only tasks with this priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Sort direction by due date: asc or desc
        #[arg(long, default_value = "asc")]
        sort: String,

        /// Active section: home, my_tasks, inbox, portfolios, goals, favorites
        #[arg(long)]
        section: Option<String>,

        /// Active project (scopes the portfolios section)
        #[arg(long)]
        project: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ActivityCommands {
    /// Show the activity log, newest first
    List {
        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Remove one activity entry
    Rm {
        /// Activity entry id
        id: String,
    },

    /// Empty the activity log
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum MsgCommands {
    /// Send a chat message (a teammate auto-reply follows unless disabled)
    Send {
        /// Message text
        text: String,

        /// Do not schedule the teammate auto-reply
        #[arg(long)]
        no_reply: bool,
    },

    /// Show all chat messages
    List,
}

#[derive(Subcommand, Debug)]
pub enum DocCommands {
    /// Upload a file as a document (stored as a data URL)
    Add {
        /// File to upload
        file: PathBuf,

        /// Document name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Remove a document
    Rm {
        /// Document id
        id: String,
    },

    /// List uploaded documents
    List,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Update settings (unset flags keep their current value)
    Set {
        #[arg(long)]
        compact_cards: Option<bool>,

        #[arg(long)]
        show_completed: Option<bool>,

        /// Accent color: teal, blue, orange
        #[arg(long)]
        accent: Option<String>,
    },
}

/// Loaded board context shared by every command.
pub(crate) struct BoardContext {
    pub config: Config,
    pub store: BoardStore,
    pub state: BoardState,
}

pub(crate) fn load_context(data_dir: Option<&Path>) -> BoardContext {
    let config = Config::load_from_dir(Path::new("."));
    let dir = config.data_dir(data_dir);
    let store = BoardStore::open(&dir);

    let mut state = store.load();
    // Fresh boards pick up the configured default settings.
    if !store.board_path().exists() && !store.backup_path().exists() {
        state.settings = config.defaults.settings();
    }

    BoardContext {
        config,
        store,
        state,
    }
}

impl BoardContext {
    /// Run one transition and persist the result.
    pub(crate) fn dispatch(&mut self, action: Action) {
        self.state = reduce(&self.state, action);
        self.store.save(&self.state);
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let data_dir = self.data_dir;
        match self.command {
            Commands::Task(cmd) => match cmd {
                TaskCommands::Add {
                    title,
                    project,
                    description,
                    priority,
                    due,
                    tags,
                    status,
                } => task::run_add(task::AddOptions {
                    title,
                    project,
                    description,
                    priority,
                    due,
                    tags,
                    status,
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Edit {
                    id,
                    title,
                    project,
                    description,
                    priority,
                    due,
                    clear_due,
                    tags,
                } => task::run_edit(task::EditOptions {
                    id,
                    title,
                    project,
                    description,
                    priority,
                    due,
                    clear_due,
                    tags,
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Mv { id, status } => task::run_mv(task::MvOptions {
                    id,
                    status,
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Rm { id } => task::run_rm(task::RmOptions {
                    id,
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Fav { id } => task::run_fav(task::FavOptions {
                    id,
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::List {
                    search,
                    priority,
                    sort,
                    section,
                    project,
                } => task::run_list(task::ListOptions {
                    search,
                    priority,
                    sort,
                    section,
                    project,
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Board {
                search,
                priority,
                sort,
                section,
                project,
            } => board::run_board(board::BoardOptions {
                search,
                priority,
                sort,
                section,
                project,
                data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Calendar => board::run_calendar(board::CalendarOptions {
                data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Stats { project } => board::run_stats(board::StatsOptions {
                project,
                data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Reset { yes } => board::run_reset(board::ResetOptions {
                yes,
                data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Activity(cmd) => match cmd {
                ActivityCommands::List { limit } => {
                    activity::run_list(activity::ListOptions {
                        limit,
                        data_dir,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
                ActivityCommands::Rm { id } => activity::run_rm(activity::RmOptions {
                    id,
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                ActivityCommands::Clear => activity::run_clear(activity::ClearOptions {
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Msg(cmd) => match cmd {
                MsgCommands::Send { text, no_reply } => chat::run_send(chat::SendOptions {
                    text,
                    no_reply,
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                MsgCommands::List => chat::run_list(chat::ListOptions {
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Doc(cmd) => match cmd {
                DocCommands::Add { file, name } => doc::run_add(doc::AddOptions {
                    file,
                    name,
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                DocCommands::Rm { id } => doc::run_rm(doc::RmOptions {
                    id,
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                DocCommands::List => doc::run_list(doc::ListOptions {
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Settings(cmd) => match cmd {
                SettingsCommands::Show => settings::run_show(settings::ShowOptions {
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                SettingsCommands::Set {
                    compact_cards,
                    show_completed,
                    accent,
                } => settings::run_set(settings::SetOptions {
                    compact_cards,
                    show_completed,
                    accent,
                    data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
        }
    }
}

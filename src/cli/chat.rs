//! kanri msg command implementations.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::cli::load_context;
use crate::error::Result;
use crate::model::{ChatMessage, Sender};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::reducer::{reduce, Action};
use crate::reply::{schedule_auto_reply, BlockingScheduler};

pub struct SendOptions {
    pub text: String,
    pub no_reply: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct MsgSentOutput {
    id: String,
    replied: bool,
}

#[derive(Serialize)]
struct MsgListOutput {
    total: usize,
    messages: Vec<ChatMessage>,
}

pub fn run_send(options: SendOptions) -> Result<()> {
    let mut ctx = load_context(options.data_dir.as_deref());
    let message = ChatMessage::new(Sender::Me, options.text.clone());
    let id = message.id.clone();
    ctx.dispatch(Action::AddMessage(message));

    let reply = !options.no_reply && ctx.config.chat.auto_reply;
    if reply {
        let delay = Duration::from_millis(ctx.config.chat.reply_delay_ms);
        let store = ctx.store.clone();
        schedule_auto_reply(&BlockingScheduler, delay, &options.text, move |reply| {
            // Re-read the snapshot: a reset or another process may have
            // changed the board while the delay elapsed.
            let state = store.load();
            let state = reduce(&state, Action::AddMessage(reply));
            store.save(&state);
        });
    }

    let mut human = HumanOutput::new("Message sent");
    human.push_summary("ID", id.clone());
    if reply {
        human.push_detail("teammate replied");
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "msg send",
        &MsgSentOutput { id, replied: reply },
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.data_dir.as_deref());
    let messages = ctx.state.messages.clone();

    let mut human = HumanOutput::new("Messages");
    human.push_summary("Total", messages.len().to_string());
    for message in &messages {
        human.push_detail(format!(
            "{} {}: {}",
            message.timestamp.format("%Y-%m-%d %H:%M"),
            message.sender.label(),
            message.text
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "msg list",
        &MsgListOutput {
            total: messages.len(),
            messages,
        },
        Some(&human),
    )
}

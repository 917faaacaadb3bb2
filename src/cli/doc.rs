//! kanri doc command implementations.
//!
//! `doc add` performs the file-to-data-URL conversion at the CLI boundary;
//! the core only ever stores the resulting string.

use std::path::{Path, PathBuf};

use base64::Engine;
use serde::Serialize;

use crate::cli::load_context;
use crate::error::{Error, Result};
use crate::model::DocumentItem;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::reducer::Action;

pub struct AddOptions {
    pub file: PathBuf,
    pub name: Option<String>,
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

pub struct ListOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct DocAddedOutput {
    id: String,
    name: String,
    mime_type: String,
    size: u64,
}

#[derive(Serialize)]
struct DocListEntry {
    id: String,
    name: String,
    mime_type: String,
    size: u64,
}

#[derive(Serialize)]
struct DocListOutput {
    total: usize,
    documents: Vec<DocListEntry>,
}

#[derive(Serialize)]
struct DocRemovedOutput {
    id: String,
    removed: bool,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    if !options.file.is_file() {
        return Err(Error::FileNotFound(options.file));
    }
    let bytes = std::fs::read(&options.file)?;
    let name = options.name.unwrap_or_else(|| {
        options
            .file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string())
    });
    let mime_type = mime_for(&options.file);
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    let data_url = format!("data:{mime_type};base64,{encoded}");

    let doc = DocumentItem::new(&name, &mime_type, bytes.len() as u64, data_url);
    let output = DocAddedOutput {
        id: doc.id.clone(),
        name: doc.name.clone(),
        mime_type: doc.mime_type.clone(),
        size: doc.size,
    };

    let mut ctx = load_context(options.data_dir.as_deref());
    ctx.dispatch(Action::AddDocument(doc));

    let mut human = HumanOutput::new("Document uploaded");
    human.push_summary("ID", output.id.clone());
    human.push_summary("Name", output.name.clone());
    human.push_summary("Type", output.mime_type.clone());
    human.push_summary("Size", format!("{} bytes", output.size));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "doc add",
        &output,
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut ctx = load_context(options.data_dir.as_deref());
    let existed = ctx.state.documents.iter().any(|doc| doc.id == options.id);
    ctx.dispatch(Action::RemoveDocument {
        id: options.id.clone(),
    });

    let mut human = HumanOutput::new(if existed {
        "Document removed"
    } else {
        "No change"
    });
    if !existed {
        human.push_warning(format!("no document with id {}; nothing changed", options.id));
    }
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "doc rm",
        &DocRemovedOutput {
            id: options.id,
            removed: existed,
        },
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.data_dir.as_deref());
    let documents: Vec<DocListEntry> = ctx
        .state
        .documents
        .iter()
        .map(|doc| DocListEntry {
            id: doc.id.clone(),
            name: doc.name.clone(),
            mime_type: doc.mime_type.clone(),
            size: doc.size,
        })
        .collect();

    let mut human = HumanOutput::new("Documents");
    human.push_summary("Total", documents.len().to_string());
    for doc in &documents {
        human.push_detail(format!(
            "{} {} ({}, {} bytes)",
            doc.id, doc.name, doc.mime_type, doc.size
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "doc list",
        &DocListOutput {
            total: documents.len(),
            documents,
        },
        Some(&human),
    )
}

fn mime_for(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_lookup_by_extension() {
        assert_eq!(mime_for(Path::new("notes.md")), "text/markdown");
        assert_eq!(mime_for(Path::new("IMG.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("blob")), "application/octet-stream");
    }
}

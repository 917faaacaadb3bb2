//! kanri - Local-first Kanban Board Library
//!
//! This library provides the core functionality for the kanri CLI tool:
//! a pure state reducer over a locally persisted board of tasks, activity,
//! chat messages and documents, plus the derived views a kanban UI needs.
//!
//! # Core Concepts
//!
//! - **BoardState**: the aggregate snapshot; the reducer owns all mutation
//! - **Actions**: the complete mutation vocabulary of the board
//! - **Derived views**: filtered/sorted lists, columns, calendar buckets,
//!   section scopes and summary counts, all pure functions of a snapshot
//! - **Sanitization**: untrusted persisted blobs recover field by field
//! - **Blob store**: primary + backup snapshots, total load/save
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `kanri.toml`
//! - `error`: error types and result aliases
//! - `model`: board entities and the aggregate state
//! - `output`: human and JSON output envelopes
//! - `query`: pure derived-view functions
//! - `reducer`: state transitions
//! - `reply`: chat auto-reply scheduling
//! - `sanitize`: recovery of untrusted persisted payloads
//! - `store`: board snapshot persistence

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod query;
pub mod reducer;
pub mod reply;
pub mod sanitize;
pub mod store;

pub use error::{Error, Result};

//! CLI command handlers

pub mod commands;

pub use commands::{check, summarize, watch};

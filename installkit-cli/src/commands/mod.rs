//! CLI command handlers.

pub mod common;
pub mod download;
pub mod install;

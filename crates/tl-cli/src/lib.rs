//! Interaction timeline CLI library.
//!
//! This crate provides the CLI interface for building and inspecting timelines.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, PipelineArgs};
pub use config::Config;

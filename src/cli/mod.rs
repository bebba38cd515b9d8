//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for GraphVault using
//! clap. An external scheduler invokes `graphvault backup` once per
//! activation; the other commands exist for operators.

pub mod commands;

use clap::{Parser, Subcommand};

/// GraphVault - Microsoft Graph tenant configuration backup
#[derive(Parser, Debug)]
#[command(name = "graphvault")]
#[command(version, about, long_about = None)]
#[command(author = "GraphVault Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "graphvault.toml", env = "GRAPHVAULT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GRAPHVAULT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a backup of the configured resource catalog
    Backup(commands::backup::BackupArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

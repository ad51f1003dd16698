//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Meridian using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Meridian - country and exchange-rate refresh pipeline
#[derive(Parser, Debug)]
#[command(name = "meridian")]
#[command(version, about, long_about = None)]
#[command(author = "Meridian Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "meridian.toml", env = "MERIDIAN_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MERIDIAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch countries and exchange rates, upsert them and render the summary image
    Refresh(commands::refresh::RefreshArgs),

    /// Show the number of countries and the last refresh time
    Status(commands::status::StatusArgs),

    /// List countries with optional filters and sorting
    List(commands::countries::ListArgs),

    /// Show one country by name
    Show(commands::countries::ShowArgs),

    /// Delete one country by name
    Delete(commands::countries::DeleteArgs),

    /// Re-render the summary image from stored data
    Render(commands::render::RenderArgs),

    /// Print the path of the summary image
    Image(commands::image::ImageArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

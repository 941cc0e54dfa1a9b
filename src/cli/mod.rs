//! Command-line interface.
//!
//! A single `serve` command (the default) plus configuration overrides that
//! win over the file and environment layers.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, Settings};

#[derive(Debug, Parser)]
#[command(name = "larder", version, about = "Backend data service for a household food inventory")]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "LARDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server (the default when no command is given).
    Serve,
}

/// Loads settings and applies CLI overrides on top.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = load_settings(cli.config.as_deref())?;

    if let Some(level) = &cli.log_level {
        settings.logger.level = level.clone();
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn log_level_override_wins() {
        let cli = Cli {
            config: None,
            log_level: Some("debug".to_string()),
            command: None,
        };
        let settings = load_and_merge_config(&cli).unwrap();
        assert_eq!(settings.logger.level, "debug");
    }
}

//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Taleweaver - safe, interactive stories for children
#[derive(Parser, Debug)]
#[command(name = "taleweaver")]
#[command(about = "Interactive children's storytelling with a safety judge in the loop", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tell a story interactively
    Tell {
        /// Configuration file (defaults to bundled, home and ./taleweaver.toml layers)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Model identifier, overriding the configuration
        #[arg(long)]
        model: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tell_with_overrides() {
        let cli = Cli::parse_from([
            "taleweaver",
            "tell",
            "--config",
            "stories.toml",
            "--model",
            "gpt-4o-mini",
            "-v",
        ]);
        assert!(cli.verbose);
        let Commands::Tell { config, model } = cli.command;
        assert_eq!(config, Some(PathBuf::from("stories.toml")));
        assert_eq!(model.as_deref(), Some("gpt-4o-mini"));
    }
}

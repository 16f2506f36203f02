//! Taleweaver CLI binary.
//!
//! Runs the interactive storytelling console against an OpenAI-compatible
//! backend.

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, tell_story};

    // Secrets may live in a local .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    taleweaver::init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Tell { config, model } => {
            tell_story(config.as_deref(), model).await?;
        }
    }

    Ok(())
}

//! Interactive story command handler.

use std::path::Path;
use taleweaver::{OpenAiClient, StoryConsole, StorySession, TaleweaverConfig, TaleweaverResult};
use tokio::io::BufReader;
use tracing::{debug, info};

/// Load configuration, connect to the backend and run the console on stdin/stdout.
pub async fn tell_story(config_path: Option<&Path>, model: Option<String>) -> TaleweaverResult<()> {
    let mut config = match config_path {
        Some(path) => TaleweaverConfig::from_file(path)?,
        None => TaleweaverConfig::load()?,
    };
    if let Some(model) = model {
        let backend = config.backend().clone().with_model(model);
        config = config.with_backend(backend);
    }
    debug!(?config, "Configuration loaded");

    let backend = config.backend();
    let driver = OpenAiClient::from_env(backend.api_key_env(), backend.model())?
        .with_endpoint(backend.base_url());
    info!(model = %backend.model(), endpoint = %backend.base_url(), "Backend ready");

    let session = StorySession::from_driver(driver, &config)?;
    let mut console = StoryConsole::new(
        session,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    );
    console.run().await
}

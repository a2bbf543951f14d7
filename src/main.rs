use std::error::Error;
use std::sync::Arc;

use soundscape_api::{server, Config, SoundscapeGenerator};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    let generator = SoundscapeGenerator::new(
        Arc::new(config.text_model()),
        Arc::new(config.image_client()),
        config.soundscape_variant,
    );

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        model = %config.gemini_model,
        variant = %config.soundscape_variant,
        "soundscape server listening"
    );

    server::serve(listener, generator).await?;
    Ok(())
}

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use mockall::mock;
use soundscape_api::{error::Result, server, ImageGenerator, SoundscapeGenerator, TextGenerator};
use tokio::net::TcpListener;

mock! {
    pub Text {}

    #[async_trait]
    impl TextGenerator for Text {
        async fn generate_text(&self, instruction: &str) -> Result<String>;
    }
}

mock! {
    pub Image {}

    #[async_trait]
    impl ImageGenerator for Image {
        async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>>;
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Runs the soundscape server around `generator` and returns its base URL.
pub async fn spawn_app(generator: SoundscapeGenerator) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve(listener, generator));
    format!("http://{addr}")
}

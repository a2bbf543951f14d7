mod common;

use std::sync::Arc;

use common::{spawn_app, MockImage, MockText};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};
use soundscape_api::{SoundscapeError, SoundscapeGenerator, SoundscapeVariant};

async fn app(text: MockText, image: MockImage, variant: SoundscapeVariant) -> String {
    spawn_app(SoundscapeGenerator::new(
        Arc::new(text),
        Arc::new(image),
        variant,
    ))
    .await
}

async fn post_raw(base_url: &str, body: &'static str) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base_url}/api/generate"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

async fn post(base_url: &str, body: Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base_url}/api/generate"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn invalid_prompts_are_rejected_without_upstream_calls() {
    let mut text = MockText::new();
    let mut image = MockImage::new();
    text.expect_generate_text().never();
    image.expect_generate_image().never();
    let base_url = app(text, image, SoundscapeVariant::Overlay).await;

    let bodies = [
        json!({}),
        json!({ "prompt": null }),
        json!({ "prompt": 7 }),
        json!({ "prompt": ["rain"] }),
        json!({ "prompt": "" }),
        json!({ "prompt": " \t\n " }),
        json!(["a calm lake"]),
        json!("a calm lake"),
        json!(42),
    ];
    for body in bodies {
        let (status, payload) = post(&base_url, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(payload, json!({ "error": "A valid prompt is required." }));
    }
}

#[tokio::test]
async fn unreadable_bodies_are_generic_server_errors() {
    let mut text = MockText::new();
    let mut image = MockImage::new();
    text.expect_generate_text().never();
    image.expect_generate_image().never();
    let base_url = app(text, image, SoundscapeVariant::Overlay).await;

    for body in ["not json at all", "null", ""] {
        let (status, payload) = post_raw(&base_url, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{body:?}");
        assert_eq!(
            payload,
            json!({ "error": "An unexpected error occurred while generating the soundscape." })
        );
    }
}

#[tokio::test]
async fn overlay_response_merges_image_and_model_fields() {
    let mut text = MockText::new();
    let mut image = MockImage::new();
    image
        .expect_generate_image()
        .returning(|_| Ok(vec![0x1, 0x2, 0x3]));
    text.expect_generate_text().returning(|_| {
        Ok("```json\n{\"sounds\":[\"crackling-fireplace.mp3\",\"heavy-rain.mp3\"],\"p5Code\":\"function sketchSetup(p) {} function sketchDraw(p) { p.clear(); }\"}\n```".into())
    });
    let base_url = app(text, image, SoundscapeVariant::Overlay).await;

    let (status, payload) = post(&base_url, json!({ "prompt": "a quiet library" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        payload,
        json!({
            "imageBase64": "AQID",
            "sounds": ["crackling-fireplace.mp3", "heavy-rain.mp3"],
            "p5Code": "function sketchSetup(p) {} function sketchDraw(p) { p.clear(); }"
        })
    );
}

#[tokio::test]
async fn rainy_library_palette_scenario() {
    let mut text = MockText::new();
    let mut image = MockImage::new();
    image.expect_generate_image().never();
    text.expect_generate_text().returning(|_| {
        Ok("```json\n{\"sounds\":[\"heavy-rain.mp3\"],\"colors\":[\"#112233\",\"#445566\",\"#778899\"]}\n```".into())
    });
    let base_url = app(text, image, SoundscapeVariant::Palette).await;

    let (status, payload) = post(&base_url, json!({ "prompt": "rainy library" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        payload,
        json!({
            "sounds": ["heavy-rain.mp3"],
            "colors": ["#112233", "#445566", "#778899"]
        })
    );
}

#[tokio::test]
async fn image_service_outage_is_a_generic_server_error() {
    let mut text = MockText::new();
    let mut image = MockImage::new();
    image.expect_generate_image().returning(|_| {
        Err(SoundscapeError::ImageStatus {
            status: StatusCode::SERVICE_UNAVAILABLE,
        })
    });
    text.expect_generate_text().never();
    let base_url = app(text, image, SoundscapeVariant::Overlay).await;

    let (status, payload) = post(&base_url, json!({ "prompt": "a calm lake" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        payload,
        json!({ "error": "An unexpected error occurred while generating the soundscape." })
    );
}

#[tokio::test]
async fn non_json_model_output_is_reported_as_invalid_ai_response() {
    let mut text = MockText::new();
    let mut image = MockImage::new();
    image.expect_generate_image().returning(|_| Ok(vec![0x1]));
    text.expect_generate_text()
        .returning(|_| Ok("I cannot help with that".into()));
    let base_url = app(text, image, SoundscapeVariant::Overlay).await;

    let (status, payload) = post(&base_url, json!({ "prompt": "a calm lake" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        payload,
        json!({ "error": "The AI returned an invalid response. Please try a different prompt." })
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let base_url = app(MockText::new(), MockImage::new(), SoundscapeVariant::Overlay).await;

    let payload: Value = reqwest::get(format!("{base_url}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(payload, json!({ "status": "ok" }));
}

use axum::http::StatusCode;
use axum::http::header;
use axum_test::TestServer;
use serde_json::Value;
use serde_json::json;

use crate::app;
use crate::auth;
use crate::cfg;
use crate::core;

const TEST_SECRET: &str = "test__secret__key__for__jwt__testing";
const TEST_USERNAME: &str = "campaign_editor";

fn default_settings() -> cfg::AppSettings {
    cfg::AppSettings {
        jwt: cfg::JwtSettings {
            access_token_expiry: 3600,
        },
        ..Default::default()
    }
}

fn create_test_server(settings: cfg::AppSettings) -> TestServer {
    let jwt = auth::JwtContext::new(&settings.jwt, TEST_SECRET).unwrap();
    let http_client = reqwest::Client::builder().build().unwrap();
    let context = core::Context::new(jwt, http_client, settings);
    let router = app::create_router(context);
    TestServer::new(router).unwrap()
}

/// Mint a token the way the account service would, with the shared secret.
fn bearer_header() -> String {
    let settings = default_settings();
    let jwt = auth::JwtContext::new(&settings.jwt, TEST_SECRET).unwrap();
    let token = auth::generate_access_token(&jwt, 7, TEST_USERNAME).unwrap();
    format!("Bearer {token}")
}

#[tokio::test]
async fn test_showcase_is_public_and_static() {
    let server = create_test_server(default_settings());

    let first = server.get("/ai").await;
    first.assert_status(StatusCode::OK);

    let body: Value = first.json();
    assert_eq!(body["text"], "💆‍♀️ מבצע עיסוי לחג במיוחד בשבילך!");
    assert_eq!(
        body["posters"],
        json!(["poster1.png", "poster2.png", "poster3.png", "poster4.png", "poster5.png"])
    );

    // the payload is fixed, repeated calls return identical bytes
    let second = server.get("/ai").await;
    second.assert_status(StatusCode::OK);
    assert_eq!(first.text(), second.text());
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(default_settings());
    let response = server.get("/health").await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_posters_are_served() {
    let server = create_test_server(default_settings());

    let response = server.get("/posters/poster1.png").await;
    response.assert_status(StatusCode::OK);
    let content_type = response.header(header::CONTENT_TYPE);
    assert_eq!(content_type.to_str().unwrap(), "image/png");

    let missing = server.get("/posters/nope.png").await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_texts_without_token() {
    let server = create_test_server(default_settings());

    let response = server
        .post("/api/ai/texts")
        .json(&json!({ "prompt": "מבצע קיץ" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_texts_with_invalid_token() {
    let server = create_test_server(default_settings());

    let response = server
        .post("/api/ai/texts")
        .add_header(header::AUTHORIZATION, "Bearer invalid_token")
        .json(&json!({ "prompt": "מבצע קיץ" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_texts_empty_prompt() {
    let server = create_test_server(default_settings());

    let response = server
        .post("/api/ai/texts")
        .add_header(header::AUTHORIZATION, bearer_header())
        .json(&json!({ "prompt": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({ "texts": ["", "", ""] }));
}

#[tokio::test]
async fn test_texts_whitespace_prompt() {
    let server = create_test_server(default_settings());

    let response = server
        .post("/api/ai/texts")
        .add_header(header::AUTHORIZATION, bearer_header())
        .json(&json!({ "prompt": "   \t  " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({ "texts": ["", "", ""] }));
}

#[tokio::test]
async fn test_texts_missing_prompt_field() {
    let server = create_test_server(default_settings());

    let response = server
        .post("/api/ai/texts")
        .add_header(header::AUTHORIZATION, bearer_header())
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_texts_malformed_body_treated_as_empty() {
    let server = create_test_server(default_settings());

    let response = server
        .post("/api/ai/texts")
        .add_header(header::AUTHORIZATION, bearer_header())
        .text("not json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({ "texts": ["", "", ""] }));
}

#[tokio::test]
async fn test_texts_returns_three_variants() {
    let server = create_test_server(default_settings());

    let response = server
        .post("/api/ai/texts")
        .add_header(header::AUTHORIZATION, bearer_header())
        .json(&json!({ "prompt": "מבצע קיץ" }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "texts": [
                "מבצע קיץ 😊 נשמח לראות אותך! לפרטים נוספים השיבי להודעה.",
                "מבצע קיץ ✨ תזכורת קצרה — מחכים לך, יש שאלות? אנחנו כאן.",
                "מבצע קיץ 🙌 אל תפספס/י! שמרי מקום והצטרפי אלינו."
            ]
        })
    );
}

#[tokio::test]
async fn test_texts_prompt_is_trimmed() {
    let server = create_test_server(default_settings());

    let response = server
        .post("/api/ai/texts")
        .add_header(header::AUTHORIZATION, bearer_header())
        .json(&json!({ "prompt": "  חג שמח  " }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    let texts = body["texts"].as_array().unwrap();
    assert_eq!(texts.len(), 3);
    for text in texts {
        assert!(text.as_str().unwrap().starts_with("חג שמח "));
    }
}

#[tokio::test]
async fn test_generate_without_token() {
    let server = create_test_server(default_settings());

    let response = server
        .post("/api/ai/generate")
        .json(&json!({ "prompt": "מבצע קיץ" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_generate_campaign_draft() {
    let server = create_test_server(default_settings());

    let prompt = "הצטרפו למסיבת הפתיחה ביום חמישי";
    let response = server
        .post("/api/ai/generate")
        .add_header(header::AUTHORIZATION, bearer_header())
        .json(&json!({ "prompt": prompt }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["subject"], "עדכון חשוב לגבי האירוע");
    assert_eq!(body["message_text"], prompt);

    let options = body["content_options"].as_array().unwrap();
    assert_eq!(options.len(), 3);
    // SMS option: the prompt is short, so it is passed through as-is
    assert_eq!(options[0], prompt);
    // WhatsApp option: casual wrapper around the prompt
    assert!(options[1].as_str().unwrap().contains(prompt));
    assert!(options[1].as_str().unwrap().contains("😊"));
    // Email option: formal greeting and signature
    assert!(options[2].as_str().unwrap().starts_with("שלום רב,"));
    assert!(options[2].as_str().unwrap().contains(prompt));
}

#[tokio::test]
async fn test_generate_campaign_draft_empty_prompt() {
    let server = create_test_server(default_settings());

    let response = server
        .post("/api/ai/generate")
        .add_header(header::AUTHORIZATION, bearer_header())
        .json(&json!({}))
        .await;

    // an empty prompt falls back to the default draft rather than erroring
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["subject"], "עדכון חשוב לגבי האירוע");
    assert_eq!(body["content_options"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_generate_sms_option_truncated() {
    let server = create_test_server(default_settings());

    let prompt = "ב".repeat(200);
    let response = server
        .post("/api/ai/generate")
        .add_header(header::AUTHORIZATION, bearer_header())
        .json(&json!({ "prompt": prompt }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    let sms = body["content_options"][0].as_str().unwrap();
    assert_eq!(sms.chars().count(), 160);
    assert!(sms.ends_with("..."));
}

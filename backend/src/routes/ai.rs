use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use crate::core;
use crate::services::texts;

#[derive(Debug, Default, Deserialize)]
pub struct TextsRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,

    pub tone: Option<String>, // "friendly" / "formal"...

    pub language: Option<String>, // "he" / "ar" / "en"
}

/// Legacy showcase payload; the old frontend widget still polls this.
#[allow(clippy::unused_async)]
pub async fn showcase() -> impl IntoResponse {
    Json(json!({
        "text": "💆‍♀️ מבצע עיסוי לחג במיוחד בשבילך!",
        "posters": ["poster1.png", "poster2.png", "poster3.png", "poster4.png", "poster5.png"]
    }))
}

/// Generate the three message variants for a prompt.
///
/// The old clients send all kinds of bodies here, so a parse failure is
/// treated as an empty prompt rather than rejected with a 4xx.
pub async fn generate_texts(State(context): State<core::ArcContext>, body: Bytes) -> impl IntoResponse {
    let request: TextsRequest = serde_json::from_slice(&body).unwrap_or_default();
    let prompt = request.prompt.as_deref().unwrap_or_default().trim().to_string();

    if prompt.is_empty() {
        tracing::info!("Texts requested with an empty prompt");
        return (StatusCode::BAD_REQUEST, Json(json!({ "texts": ["", "", ""] })));
    }

    tracing::info!(prompt_chars = prompt.chars().count(), "Generating message variants");
    let generated = texts::generate_texts(&context, &prompt).await;
    (StatusCode::OK, Json(json!({ "texts": generated })))
}

/// Generate a campaign draft: subject, base message and the
/// channel-flavored content options.
pub async fn generate_campaign(
    State(context): State<core::ArcContext>,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse {
    let prompt = request.prompt.as_deref().unwrap_or_default().trim().to_string();
    let tone = request.tone.as_deref().unwrap_or("friendly");
    let language = request.language.as_deref().unwrap_or("he");

    tracing::info!(tone, language, "Generating campaign draft");
    let draft = texts::generate_campaign_draft(&context, &prompt, tone, language).await;
    Json(draft)
}

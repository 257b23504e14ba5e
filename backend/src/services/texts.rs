use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core;

/// Suffix templates appended to the trimmed prompt when remote generation is
/// disabled or fails. The campaign editor renders these as the three
/// selectable message variants, so the wording must stay stable.
const VARIANT_SUFFIXES: [&str; 3] = [
    " 😊 נשמח לראות אותך! לפרטים נוספים השיבי להודעה.",
    " ✨ תזכורת קצרה — מחכים לך, יש שאלות? אנחנו כאן.",
    " 🙌 אל תפספס/י! שמרי מקום והצטרפי אלינו.",
];

/// SMS delivery is limited to 160 characters by the messaging provider.
const SMS_MAX_CHARS: usize = 160;

const DEFAULT_SUBJECT: &str = "עדכון חשוב לגבי האירוע";
const DEFAULT_DRAFT_PROMPT: &str = "צור הודעה לאירוע";

/// Instructions sent to the generation webhook together with the user idea.
/// The model is asked to answer with a single JSON object: {"texts":[...]}.
const TEXTS_INSTRUCTIONS: &str = "אתה כותב הודעות שיווקיות קצרות בעברית למשתתפים באירוע.\n\
    תחזיר בדיוק 3 אפשרויות שונות בסגנון: 1) מקצועי ומכובד 2) חברתי וחם 3) קליל ואנרגטי.\n\
    כל אפשרות 2-3 משפטים, בלי קישורים, בלי פרטי קשר ובלי חתימה.\n\
    החזר JSON בלבד בפורמט: {\"texts\":[\"...\",\"...\",\"...\"]}";

/// Instructions for the campaign draft flow. The reply JSON carries the
/// subject, the base message and the three channel-flavored options.
const DRAFT_INSTRUCTIONS: &str = "You are an assistant that writes marketing/event messages in Hebrew.\n\
    Generate 3 different content options based on the user's request:\n\
    1. SMS: short and direct (max 160 chars)\n\
    2. WhatsApp: friendly and casual, with emojis\n\
    3. Email: formal, detailed and structured\n\
    Return JSON only with this structure:\n\
    {\"subject\":\"...\",\"messageText\":\"...\",\"suggestedTemplateCode\":\"DESIGN_1\",\"contentOptions\":[\"...\",\"...\",\"...\"]}";

/// A campaign message draft with channel-flavored content options
/// (SMS, WhatsApp, Email).
#[derive(Debug, Serialize)]
pub struct CampaignDraft {
    pub subject: String,
    pub message_text: String,
    pub suggested_template_code: String,
    pub content_options: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WebhookReply {
    reply: String,
}

/// Produce the three message variants for a non-empty, trimmed prompt.
/// Uses the generation webhook when one is configured; any failure falls
/// back silently to the built-in templates.
pub async fn generate_texts(context: &core::Context, prompt: &str) -> [String; 3] {
    if context.settings.generator.webhook_url.is_empty() {
        return template_texts(prompt);
    }

    let message = format!("{TEXTS_INSTRUCTIONS}\n\nרעיון מהמשתמש: {prompt}");
    match call_webhook(context, &message).await.as_deref().and_then(parse_texts_reply) {
        Some(texts) => texts,
        None => {
            tracing::debug!("falling back to the built-in text templates");
            template_texts(prompt)
        }
    }
}

/// The stubbed generation path: the trimmed prompt plus a fixed suffix,
/// one variant per template.
#[must_use]
pub fn template_texts(prompt: &str) -> [String; 3] {
    VARIANT_SUFFIXES.map(|suffix| format!("{prompt}{suffix}"))
}

/// Produce a campaign draft for the given prompt. Tone and language only
/// steer the generation webhook; the built-in fallback ignores them.
pub async fn generate_campaign_draft(
    context: &core::Context,
    prompt: &str,
    tone: &str,
    language: &str,
) -> CampaignDraft {
    let prompt = if prompt.is_empty() { DEFAULT_DRAFT_PROMPT } else { prompt };
    if context.settings.generator.webhook_url.is_empty() {
        return template_draft(prompt);
    }

    let message = format!("{DRAFT_INSTRUCTIONS}\n\nUser request: {prompt}\nTone: {tone}\nLanguage: {language}");
    let reply = call_webhook(context, &message).await;
    match reply.as_deref().and_then(|raw| parse_draft_reply(raw, prompt)) {
        Some(draft) => draft,
        None => {
            tracing::debug!("falling back to the built-in draft templates");
            template_draft(prompt)
        }
    }
}

#[must_use]
pub(crate) fn template_draft(prompt: &str) -> CampaignDraft {
    let base = if prompt.is_empty() { DEFAULT_SUBJECT } else { prompt };
    CampaignDraft {
        subject: DEFAULT_SUBJECT.to_string(),
        message_text: base.to_string(),
        suggested_template_code: "DESIGN_2".to_string(),
        content_options: channel_options(base).to_vec(),
    }
}

/// The three channel renderings of a base message: SMS, WhatsApp, Email.
fn channel_options(base: &str) -> [String; 3] {
    [
        truncate_chars(base, SMS_MAX_CHARS),
        format!("היי! {base} 😊\n\nנשמח לראותך באירוע!\nלשאלות - השיבי להודעה"),
        format!(
            "שלום רב,\n\nרצינו לעדכן אותך לגבי האירוע: {base}\n\n\
             לפרטים נוספים והשארת שאלות, אנא השיבו להודעה זו.\n\nבברכה,\nצוות האירוע"
        ),
    ]
}

async fn call_webhook(context: &core::Context, message: &str) -> Option<String> {
    let generator = &context.settings.generator;
    let request = context
        .http_client
        .post(&generator.webhook_url)
        .timeout(Duration::from_secs(generator.request_timeout))
        .json(&json!({ "message": message }));

    let response = match request.send().await.and_then(reqwest::Response::error_for_status) {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("generator webhook request failed: {e}");
            return None;
        }
    };

    match response.json::<WebhookReply>().await {
        Ok(reply) => Some(reply.reply),
        Err(e) => {
            tracing::debug!("generator webhook returned an unexpected payload: {e}");
            None
        }
    }
}

/// Parse the `{"texts":[...]}` object out of a webhook reply.
/// Returns `None` unless three non-blank strings are present.
pub(crate) fn parse_texts_reply(raw: &str) -> Option<[String; 3]> {
    let value: serde_json::Value = serde_json::from_str(extract_json(raw)?).ok()?;
    let items = value.get("texts")?.as_array()?;
    let texts: Vec<String> = items
        .iter()
        .filter_map(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
        .collect();
    if texts.len() < 3 {
        return None;
    }
    let mut texts = texts.into_iter();
    Some([texts.next()?, texts.next()?, texts.next()?])
}

/// Parse a draft reply, filling the channel options from the base message
/// when the model returned fewer than three.
pub(crate) fn parse_draft_reply(raw: &str, prompt: &str) -> Option<CampaignDraft> {
    let value: serde_json::Value = serde_json::from_str(extract_json(raw)?).ok()?;

    let message_text = value
        .get("messageText")
        .and_then(serde_json::Value::as_str)
        .map_or(prompt, str::trim)
        .to_string();

    let subject = value
        .get("subject")
        .and_then(serde_json::Value::as_str)
        .map_or(DEFAULT_SUBJECT, str::trim)
        .to_string();

    let suggested_template_code = value
        .get("suggestedTemplateCode")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("DESIGN_1")
        .to_string();

    let mut content_options: Vec<String> = value
        .get("contentOptions")
        .and_then(serde_json::Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|option| !option.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default();

    if content_options.len() < 3 {
        content_options = channel_options(&message_text).to_vec();
    }
    content_options.truncate(3);

    Some(CampaignDraft {
        subject,
        message_text,
        suggested_template_code,
        content_options,
    })
}

/// Truncate to `max` characters, replacing the tail with an ellipsis.
/// Counts characters rather than bytes; the texts are mostly Hebrew.
#[must_use]
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{head}...")
}

// The model sometimes wraps the JSON object in prose; take the outermost braces.
fn extract_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

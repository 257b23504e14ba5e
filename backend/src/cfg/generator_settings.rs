use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GeneratorSettings {
    /// Webhook that proxies the text-generation model.
    /// An empty URL disables remote generation and the built-in
    /// templates are used instead.
    #[serde(default)]
    pub webhook_url: String,

    #[serde(default)]
    pub request_timeout: u64, // In seconds
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            request_timeout: 10,
        }
    }
}

use serde::{Deserialize, Serialize};

// Tokens are minted by the account service with the same HMAC secret;
// this service only needs the expiry for validation leeway and for the
// tokens generated in tests.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct JwtSettings {
    #[serde(default)]
    pub access_token_expiry: i64, // In seconds (e.g., 15 minutes = 900)
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            access_token_expiry: 15 * 60, // 15 minutes
        }
    }
}

use crate::auth;
use crate::cfg;

pub type ArcContext = std::sync::Arc<Context>;

#[derive(Clone)]
pub struct Context {
    pub jwt: auth::JwtContext,
    pub settings: cfg::AppSettings,
    pub http_client: reqwest::Client,
}

impl Context {
    #[must_use]
    pub fn new(jwt: auth::JwtContext, http_client: reqwest::Client, settings: cfg::AppSettings) -> ArcContext {
        Self {
            jwt,
            settings,
            http_client,
        }
        .into()
    }
}

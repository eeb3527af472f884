pub mod anthropic;
pub mod google;
pub mod oauth;

pub use anthropic::AnthropicClient;
pub use google::GoogleClient;
pub use oauth::GoogleCredentials;

use url::Url;

use crate::error::Result;

/// Base URLs of every upstream service the heartbeat talks to.
///
/// Directory-style bases end in `/` so that [`Url::join`] appends to them.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub google_token: Url,
    pub google_calendar: Url,
    pub gmail: Url,
    pub anthropic: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        let parse = |s: &str| Url::parse(s).expect("static endpoint URL");
        Self {
            google_token: parse("https://oauth2.googleapis.com/token"),
            google_calendar: parse("https://www.googleapis.com/calendar/v3/"),
            gmail: parse("https://gmail.googleapis.com/gmail/v1/"),
            anthropic: parse("https://api.anthropic.com/"),
        }
    }
}

impl Endpoints {
    /// Route every service through one host, mirroring the real path layout.
    pub fn with_base(base: &str) -> Result<Self> {
        let base = Url::parse(base)?;
        Ok(Self {
            google_token: base.join("token")?,
            google_calendar: base.join("calendar/v3/")?,
            gmail: base.join("gmail/v1/")?,
            anthropic: base.clone(),
        })
    }
}

/// Generation API key, checked under both accepted variable names.
pub fn anthropic_api_key_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    anthropic::API_KEY_VARS
        .into_iter()
        .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
}

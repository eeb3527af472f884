//! OAuth2 refresh-token grant.
//!
//! A heartbeat runs unattended (cron, CI), so there is no browser flow here:
//! the long-lived refresh token and client credentials come from the
//! environment and are exchanged for a short-lived access token per check.

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{CoreError, OAuthError, Result};

pub const REFRESH_TOKEN_VAR: &str = "GOOGLE_OAUTH_REFRESH_TOKEN";
pub const CLIENT_ID_VAR: &str = "GOOGLE_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "GOOGLE_CLIENT_SECRET";

/// Google OAuth client credentials plus a refresh token.
#[derive(Clone)]
pub struct GoogleCredentials {
    pub refresh_token: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleCredentials")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl GoogleCredentials {
    /// Read all three variables from the process environment.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Returns `None` unless all three values are present and non-empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Some(Self {
            refresh_token: get(REFRESH_TOKEN_VAR)?,
            client_id: get(CLIENT_ID_VAR)?,
            client_secret: get(CLIENT_SECRET_VAR)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Exchange a refresh token for a fresh access token.
pub async fn refresh_token(
    client: &Client,
    token_url: &Url,
    credentials: &GoogleCredentials,
) -> Result<OAuthTokens> {
    let params = [
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("refresh_token", credentials.refresh_token.as_str()),
        ("grant_type", "refresh_token"),
    ];

    let resp = client.post(token_url.clone()).form(&params).send().await?;
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let message = CoreError::api("Google OAuth", status.as_u16(), &body).to_string();
        return Err(OAuthError::TokenRefreshFailed(message).into());
    }

    let tokens: OAuthTokens = serde_json::from_str(&body)?;
    if tokens.access_token.is_empty() {
        return Err(OAuthError::TokenRefreshFailed("empty access_token in response".into()).into());
    }
    tracing::debug!(
        expires_in = ?tokens.expires_in,
        scope = ?tokens.scope,
        "refreshed Google access token"
    );
    Ok(tokens)
}

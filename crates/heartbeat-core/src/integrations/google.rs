//! Google Calendar + Gmail read access.
//!
//! Read-only: lists upcoming events from the primary calendar and looks up
//! unread/important inbox messages. Each client instance holds one access
//! token obtained from the refresh-token grant.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::oauth::{self, GoogleCredentials};
use super::Endpoints;
use crate::error::{CoreError, Result};

/// A calendar event as returned by `events.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: EventTime,
}

/// Start or end of an event. Timed events carry `dateTime`, all-day
/// events carry only `date`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl EventTime {
    /// Raw start string, preferring `dateTime` over `date`.
    pub fn raw(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<CalendarEvent>,
}

/// Result of `users.messages.list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageList {
    #[serde(default)]
    pub result_size_estimate: u64,
    #[serde(default)]
    pub messages: Vec<MessageRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageRef {
    pub id: String,
}

/// Result of a `format=metadata` message lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageMetadata {
    #[serde(default)]
    payload: MessagePayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MessagePayload {
    #[serde(default)]
    headers: Vec<MessageHeader>,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageHeader {
    name: String,
    value: String,
}

impl MessageMetadata {
    /// Header value by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.payload
            .headers
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.value.as_str())
    }
}

/// Authenticated Google API client.
pub struct GoogleClient {
    http: Client,
    calendar_base: Url,
    gmail_base: Url,
    access_token: String,
}

impl GoogleClient {
    /// Refresh an access token and return a ready client.
    pub async fn connect(
        http: &Client,
        endpoints: &Endpoints,
        credentials: &GoogleCredentials,
    ) -> Result<Self> {
        let tokens = oauth::refresh_token(http, &endpoints.google_token, credentials).await?;
        Ok(Self {
            http: http.clone(),
            calendar_base: endpoints.google_calendar.clone(),
            gmail_base: endpoints.gmail.clone(),
            access_token: tokens.access_token,
        })
    }

    /// Fetch single (expanded) events from the primary calendar between
    /// `time_min` and `time_max`, ordered by start time.
    pub async fn list_events(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
        max_results: u32,
    ) -> Result<Vec<CalendarEvent>> {
        let url = self.calendar_base.join("calendars/primary/events")?;
        let max_results = max_results.to_string();
        let req = self.http.get(url).query(&[
            ("timeMin", time_min.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("timeMax", time_max.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("maxResults", max_results),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ]);
        let list: EventList = self.send_json("Google Calendar", req).await?;
        Ok(list.items)
    }

    /// Run a Gmail search query against the authenticated mailbox.
    pub async fn list_messages(&self, query: &str, max_results: u32) -> Result<MessageList> {
        let url = self.gmail_base.join("users/me/messages")?;
        let max_results = max_results.to_string();
        let req = self
            .http
            .get(url)
            .query(&[("q", query), ("maxResults", max_results.as_str())]);
        self.send_json("Gmail", req).await
    }

    /// Metadata-only lookup of one message, restricted to `headers`.
    pub async fn message_metadata(&self, id: &str, headers: &[&str]) -> Result<MessageMetadata> {
        let url = self.gmail_base.join(&format!("users/me/messages/{id}"))?;
        let mut query = vec![("format", "metadata")];
        query.extend(headers.iter().map(|h| ("metadataHeaders", *h)));
        let req = self.http.get(url).query(&query);
        self.send_json("Gmail", req).await
    }

    async fn send_json<T: DeserializeOwned>(&self, service: &str, req: RequestBuilder) -> Result<T> {
        let resp = req.bearer_auth(&self.access_token).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(CoreError::api(service, status.as_u16(), &body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

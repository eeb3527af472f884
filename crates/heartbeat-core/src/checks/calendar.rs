//! Upcoming events from the primary Google Calendar.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use super::CheckContext;
use crate::error::Result;
use crate::integrations::google::{CalendarEvent, GoogleClient};
use crate::integrations::GoogleCredentials;
use crate::outcome::Outcome;

const MAX_EVENTS: u32 = 20;

pub async fn check(ctx: &CheckContext<'_>) -> Outcome {
    let Some(credentials) = ctx.google else {
        return Outcome::Skipped(
            "Calendar check skipped (OAuth credentials not configured).".to_string(),
        );
    };
    match fetch(ctx, credentials).await {
        Ok(events) => Outcome::Success(render(&events)),
        Err(e) => {
            tracing::warn!(error = %e, "calendar check failed");
            Outcome::Failed(format!("Calendar check failed: {e}"))
        }
    }
}

async fn fetch(ctx: &CheckContext<'_>, credentials: &GoogleCredentials) -> Result<Vec<CalendarEvent>> {
    let client = GoogleClient::connect(ctx.http, ctx.endpoints, credentials).await?;
    let (time_min, time_max) = window(Utc::now());
    let events = client.list_events(time_min, time_max, MAX_EVENTS).await?;
    tracing::debug!(count = events.len(), "fetched calendar events");
    Ok(events)
}

/// From `now` until 23:59 of the following day (UTC).
pub fn window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let end_of_tomorrow = (now + Duration::days(1))
        .date_naive()
        .and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default())
        .and_utc();
    (now, end_of_tomorrow)
}

/// `HH:MM` for timed starts (chars 12-16 of the ISO timestamp),
/// `All Day` for date-only starts.
pub fn time_label(start: &str) -> &str {
    if start.contains('T') {
        start.get(11..16).unwrap_or(start)
    } else {
        "All Day"
    }
}

pub fn format_event(event: &CalendarEvent) -> String {
    let label = event.start.raw().map(time_label).unwrap_or("All Day");
    let title = event.summary.as_deref().unwrap_or("No title");
    format!("- **{label}** - {title}")
}

pub fn render(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "## Calendar\n\nNo events today or tomorrow.".to_string();
    }
    let mut lines = vec!["## Calendar\n".to_string()];
    lines.extend(events.iter().map(format_event));
    lines.join("\n")
}

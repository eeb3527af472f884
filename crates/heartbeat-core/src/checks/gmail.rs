//! Unread and important inbox mail.

use super::CheckContext;
use crate::error::Result;
use crate::integrations::{GoogleClient, GoogleCredentials};
use crate::outcome::Outcome;

const UNREAD_QUERY: &str = "is:unread in:inbox";
const IMPORTANT_QUERY: &str = "is:unread is:important in:inbox";
const MAX_IMPORTANT: usize = 5;

/// Sender/subject pair of one important message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailLine {
    pub sender: String,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSummary {
    pub unread: u64,
    pub important: Vec<MailLine>,
}

pub async fn check(ctx: &CheckContext<'_>) -> Outcome {
    let Some(credentials) = ctx.google else {
        return Outcome::Skipped(
            "Gmail check skipped (OAuth credentials not configured).".to_string(),
        );
    };
    match fetch(ctx, credentials).await {
        Ok(summary) => Outcome::Success(render(&summary)),
        Err(e) => {
            tracing::warn!(error = %e, "gmail check failed");
            Outcome::Failed(format!("Gmail check failed: {e}"))
        }
    }
}

async fn fetch(ctx: &CheckContext<'_>, credentials: &GoogleCredentials) -> Result<MailSummary> {
    let client = GoogleClient::connect(ctx.http, ctx.endpoints, credentials).await?;

    // Inbox only, so promotions/social/updates are not counted.
    let unread = client.list_messages(UNREAD_QUERY, 1).await?.result_size_estimate;

    let important_refs = client
        .list_messages(IMPORTANT_QUERY, MAX_IMPORTANT as u32)
        .await?
        .messages;

    let mut important = Vec::with_capacity(important_refs.len().min(MAX_IMPORTANT));
    for msg in important_refs.iter().take(MAX_IMPORTANT) {
        let meta = client
            .message_metadata(&msg.id, &["Subject", "From"])
            .await?;
        important.push(MailLine {
            sender: display_sender(meta.header("From").unwrap_or("Unknown")),
            subject: meta.header("Subject").unwrap_or("No subject").to_string(),
        });
    }

    tracing::debug!(unread, important = important.len(), "fetched gmail summary");
    Ok(MailSummary { unread, important })
}

/// Reduce `"Jane Doe" <jane@example.com>` to `Jane Doe`. Senders without
/// an angle-bracket address pass through unchanged.
pub fn display_sender(from: &str) -> String {
    match from.split_once('<') {
        Some((name, _)) => name.trim().trim_matches('"').to_string(),
        None => from.to_string(),
    }
}

pub fn render(summary: &MailSummary) -> String {
    let mut lines = vec![format!("## Email\n\n- **{}** unread emails", summary.unread)];
    if !summary.important.is_empty() {
        lines.push(format!(
            "- **{}** marked important:\n",
            summary.important.len()
        ));
        lines.extend(
            summary
                .important
                .iter()
                .map(|m| format!("  - **{}**: {}", m.sender, m.subject)),
        );
    }
    lines.join("\n")
}

//! Check providers.
//!
//! Each provider gathers one category of state and renders it as markdown.
//! Providers never return errors: failures surface as [`Outcome::Skipped`]
//! or [`Outcome::Failed`] so one broken integration cannot abort a run.

pub mod calendar;
pub mod gmail;
pub mod inbox;
pub mod todos;

use std::fmt;
use std::str::FromStr;

use crate::integrations::{Endpoints, GoogleCredentials};
use crate::outcome::Outcome;
use crate::storage::Layout;

/// Everything a provider may read. Built once per run.
pub struct CheckContext<'a> {
    pub layout: &'a Layout,
    pub google: Option<&'a GoogleCredentials>,
    pub http: &'a reqwest::Client,
    pub endpoints: &'a Endpoints,
}

/// The known check providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Todos,
    Inbox,
    Calendar,
    Gmail,
}

impl CheckKind {
    pub const ALL: [CheckKind; 4] = [
        CheckKind::Todos,
        CheckKind::Inbox,
        CheckKind::Calendar,
        CheckKind::Gmail,
    ];

    /// Config name (`"todos"`, `"gmail"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            CheckKind::Todos => "todos",
            CheckKind::Inbox => "inbox",
            CheckKind::Calendar => "calendar",
            CheckKind::Gmail => "gmail",
        }
    }

    /// Config name with its first letter upper-cased, used as the dry-run
    /// section heading.
    pub fn title(self) -> String {
        let mut chars = self.name().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Section written in place of the real check during a dry run.
    pub fn dry_run_placeholder(self) -> Outcome {
        Outcome::Skipped(format!(
            "## {}\n\n[DRY RUN - would check {}]",
            self.title(),
            self.name()
        ))
    }

    pub async fn run(self, ctx: &CheckContext<'_>) -> Outcome {
        match self {
            CheckKind::Todos => todos::check(&ctx.layout.todo_dir()),
            CheckKind::Inbox => inbox::check(&ctx.layout.inbox_dir()),
            CheckKind::Calendar => calendar::check(ctx).await,
            CheckKind::Gmail => gmail::check(ctx).await,
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCheck(pub String);

impl fmt::Display for UnknownCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown check: {}", self.0)
    }
}

impl std::error::Error for UnknownCheck {}

impl FromStr for CheckKind {
    type Err = UnknownCheck;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownCheck(s.to_string()))
    }
}

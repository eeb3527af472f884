//! The check -> summarize -> assemble pipeline.

use std::path::PathBuf;

use chrono::NaiveDate;
use reqwest::Client;

use crate::checks::{CheckContext, CheckKind};
use crate::error::Result;
use crate::integrations::{anthropic_api_key_from_lookup, Endpoints, GoogleCredentials};
use crate::outcome::Outcome;
use crate::report::Report;
use crate::storage::{Config, Layout};
use crate::summary::{Summarizer, DRY_RUN_SUMMARY};

/// Secrets captured from the environment once, at startup.
#[derive(Clone, Default)]
pub struct Environment {
    pub google: Option<GoogleCredentials>,
    pub anthropic_api_key: Option<String>,
}

impl Environment {
    pub fn capture() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            google: GoogleCredentials::from_lookup(&lookup),
            anthropic_api_key: anthropic_api_key_from_lookup(&lookup),
        }
    }
}

/// Progress events emitted while a run walks the configured checks, in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    Running(CheckKind),
    Finished(CheckKind, &'a Outcome),
    Unknown(&'a str),
    Summarizing,
}

/// What one run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub date: NaiveDate,
    pub path: PathBuf,
    pub bytes: usize,
    pub checks: Vec<(CheckKind, Outcome)>,
    /// Configured names that matched no provider.
    pub unknown: Vec<String>,
    pub summary: Outcome,
}

pub struct Heartbeat {
    layout: Layout,
    config: Config,
    env: Environment,
    endpoints: Endpoints,
    http: Client,
}

impl Heartbeat {
    pub fn new(layout: Layout, config: Config, env: Environment) -> Self {
        Self {
            layout,
            config,
            env,
            endpoints: Endpoints::default(),
            http: Client::new(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Run every configured check, summarize, and write the report for
    /// `date`. In a dry run nothing is read or fetched; placeholders are
    /// written instead.
    ///
    /// # Errors
    ///
    /// Only fails if the report cannot be written.
    pub async fn run(&self, date: NaiveDate, dry_run: bool) -> Result<RunReport> {
        self.run_with_progress(date, dry_run, |_| {}).await
    }

    /// Same as [`Heartbeat::run`], reporting each step to `on_progress` as
    /// it happens.
    pub async fn run_with_progress(
        &self,
        date: NaiveDate,
        dry_run: bool,
        mut on_progress: impl FnMut(Progress<'_>),
    ) -> Result<RunReport> {
        let ctx = CheckContext {
            layout: &self.layout,
            google: self.env.google.as_ref(),
            http: &self.http,
            endpoints: &self.endpoints,
        };

        let mut checks = Vec::with_capacity(self.config.checks.len());
        let mut unknown = Vec::new();
        for name in &self.config.checks {
            let Ok(kind) = name.parse::<CheckKind>() else {
                tracing::warn!(check = %name, "unknown check, skipping");
                on_progress(Progress::Unknown(name));
                unknown.push(name.clone());
                continue;
            };
            tracing::info!(check = %kind, dry_run, "running check");
            on_progress(Progress::Running(kind));
            let outcome = if dry_run {
                kind.dry_run_placeholder()
            } else {
                kind.run(&ctx).await
            };
            tracing::debug!(check = %kind, status = outcome.status(), "check finished");
            on_progress(Progress::Finished(kind, &outcome));
            checks.push((kind, outcome));
        }

        let sections: Vec<String> = checks.iter().map(|(_, o)| o.text().to_string()).collect();
        let summary = if dry_run {
            Outcome::Skipped(DRY_RUN_SUMMARY.to_string())
        } else {
            on_progress(Progress::Summarizing);
            self.summarizer().summarize(&sections).await
        };

        let report = Report {
            date,
            summary: summary.text().to_string(),
            sections,
        };
        let (path, bytes) = report.write(&self.layout)?;

        Ok(RunReport {
            date,
            path,
            bytes,
            checks,
            unknown,
            summary,
        })
    }

    fn summarizer(&self) -> Summarizer {
        Summarizer::new(
            &self.http,
            &self.endpoints,
            self.env.anthropic_api_key.clone(),
            self.layout.prompt_path(),
            &self.config,
        )
    }
}

//! JSON-based heartbeat configuration.
//!
//! Stores:
//! - Which checks run, in which order
//! - Which post-check actions run (currently only `summarize`)
//! - Model id and token ceiling for the overnight summary
//! - Monthly spend budget
//!
//! Configuration is read from `<root>/.claude/heartbeat-config.json`.
//! Every field is optional and falls back to its default individually,
//! including fields inside nested objects.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Action name that enables the AI summary.
pub const SUMMARIZE_ACTION: &str = "summarize";

/// Summary model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvernightConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens_per_run")]
    pub max_tokens_per_run: u32,
}

/// Monthly spend budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    #[serde(default = "default_monthly_limit_usd")]
    pub monthly_limit_usd: f64,
    #[serde(default = "default_alert_at_percent")]
    pub alert_at_percent: u32,
}

/// Heartbeat configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Check names, run in this order.
    #[serde(default = "default_checks")]
    pub checks: Vec<String>,
    #[serde(default = "default_actions")]
    pub actions: Vec<String>,
    #[serde(default)]
    pub overnight: OvernightConfig,
    #[serde(default)]
    pub budget: BudgetConfig,
}

// Default functions
fn default_checks() -> Vec<String> {
    ["todos", "inbox", "calendar", "gmail"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_actions() -> Vec<String> {
    vec![SUMMARIZE_ACTION.to_string()]
}
fn default_model() -> String {
    "claude-haiku-4-5-20251001".into()
}
fn default_max_tokens_per_run() -> u32 {
    4000
}
fn default_monthly_limit_usd() -> f64 {
    10.0
}
fn default_alert_at_percent() -> u32 {
    80
}

impl Default for OvernightConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens_per_run: default_max_tokens_per_run(),
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            monthly_limit_usd: default_monthly_limit_usd(),
            alert_at_percent: default_alert_at_percent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            checks: default_checks(),
            actions: default_actions(),
            overnight: OvernightConfig::default(),
            budget: BudgetConfig::default(),
        }
    }
}

impl Config {
    /// Load from `path`, or return defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or is not
    /// valid JSON for this shape. There is no fallback in that case: a
    /// present-but-broken file is ambiguous about which checks to run.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        Self::from_json(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a JSON document over the defaults.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Whether the AI summary action is enabled.
    pub fn summarize_enabled(&self) -> bool {
        self.actions.iter().any(|a| a == SUMMARIZE_ACTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.checks, vec!["todos", "inbox", "calendar", "gmail"]);
        assert_eq!(cfg.actions, vec!["summarize"]);
        assert_eq!(cfg.overnight.model, "claude-haiku-4-5-20251001");
        assert_eq!(cfg.overnight.max_tokens_per_run, 4000);
        assert_eq!(cfg.budget.monthly_limit_usd, 10.0);
        assert_eq!(cfg.budget.alert_at_percent, 80);
        assert!(cfg.summarize_enabled());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = Config::load(&temp.path().join("heartbeat-config.json")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn top_level_keys_replace_defaults() {
        let cfg = Config::from_json(r#"{"checks": ["inbox"]}"#).unwrap();
        assert_eq!(cfg.checks, vec!["inbox"]);
        assert_eq!(cfg.actions, vec!["summarize"]);
    }

    #[test]
    fn nested_override_keeps_sibling_defaults() {
        let cfg = Config::from_json(r#"{"overnight": {"model": "claude-sonnet-4-5"}}"#).unwrap();
        assert_eq!(cfg.overnight.model, "claude-sonnet-4-5");
        assert_eq!(cfg.overnight.max_tokens_per_run, 4000);

        let cfg = Config::from_json(r#"{"budget": {"alert_at_percent": 50}}"#).unwrap();
        assert_eq!(cfg.budget.alert_at_percent, 50);
        assert_eq!(cfg.budget.monthly_limit_usd, 10.0);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = Config::from_json(r#"{"schedule": "0 6 * * *", "overnight": {"temperature": 1}}"#)
            .unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn empty_actions_disable_summary() {
        let cfg = Config::from_json(r#"{"actions": []}"#).unwrap();
        assert!(!cfg.summarize_enabled());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("heartbeat-config.json");
        std::fs::write(&path, "{ checks: [todos ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
        assert!(err.to_string().contains("heartbeat-config.json"));
    }

    #[test]
    fn wrong_value_type_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("heartbeat-config.json");
        std::fs::write(&path, r#"{"checks": "todos"}"#).unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::ParseFailed { .. })
        ));
    }
}

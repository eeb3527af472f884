//! # Heartbeat Core Library
//!
//! A scheduled "heartbeat" gathers small pieces of personal-productivity
//! state and writes a short daily markdown briefing.
//!
//! ## Architecture
//!
//! - **Storage**: root-path [`Layout`] and the JSON [`Config`]
//! - **Checks**: todo folder, inbox folder, Google Calendar, Gmail; each
//!   returns an [`Outcome`] and never aborts the run
//! - **Summary**: optional AI summary over all check sections
//! - **Report**: dated markdown file, one per day
//!
//! [`Heartbeat`] wires these into one sequential pipeline.

pub mod checks;
pub mod error;
pub mod heartbeat;
pub mod integrations;
pub mod outcome;
pub mod report;
pub mod storage;
pub mod summary;

pub use checks::CheckKind;
pub use error::{ConfigError, CoreError, OAuthError};
pub use heartbeat::{Environment, Heartbeat, Progress, RunReport};
pub use integrations::Endpoints;
pub use outcome::Outcome;
pub use report::Report;
pub use storage::{Config, Layout};

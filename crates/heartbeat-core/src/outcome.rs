use std::fmt;

/// Result of one check provider or of the summary step.
///
/// Every variant carries the markdown (or one-line explanation) that goes
/// into the report, so a run always has something to write. The tag lets
/// callers tell "nothing to report" apart from "this integration is broken".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Skipped(String),
    Failed(String),
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Outcome::Success(text) | Outcome::Skipped(text) | Outcome::Failed(text) => text,
        }
    }

    /// Short status label for progress output.
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "ok",
            Outcome::Skipped(_) => "skipped",
            Outcome::Failed(_) => "failed",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

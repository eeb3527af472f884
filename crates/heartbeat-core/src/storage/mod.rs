mod config;

pub use config::{BudgetConfig, Config, OvernightConfig};

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Marker directory that identifies a project root.
const ROOT_MARKER: &str = ".claude";

/// Well-known paths under a project root.
///
/// Every component receives its paths from here; nothing derives them from
/// the executable location, so a whole run can be pointed at a temp dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walk up from `start` to the first ancestor containing `.claude/`.
    /// Falls back to `start` itself when no ancestor has one.
    pub fn detect(start: &Path) -> Self {
        let root = start
            .ancestors()
            .find(|dir| dir.join(ROOT_MARKER).is_dir())
            .unwrap_or(start);
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(ROOT_MARKER).join("heartbeat-config.json")
    }

    pub fn prompt_path(&self) -> PathBuf {
        self.root.join(ROOT_MARKER).join("heartbeat-prompt.md")
    }

    pub fn todo_dir(&self) -> PathBuf {
        self.root.join("todo")
    }

    pub fn inbox_dir(&self) -> PathBuf {
        self.root.join("!inbox")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join("briefing")
    }

    /// `briefing/heartbeat-YYYY-MM-DD.md`; one file per calendar day.
    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.output_dir()
            .join(format!("heartbeat-{}.md", date.format("%Y-%m-%d")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn report_path_is_keyed_by_date() {
        let layout = Layout::new("/brain");
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            layout.report_path(date),
            PathBuf::from("/brain/briefing/heartbeat-2026-03-07.md")
        );
    }

    #[test]
    fn detect_finds_nearest_marked_ancestor() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".claude")).unwrap();
        let nested = temp.path().join("projects").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        let layout = Layout::detect(&nested);
        assert_eq!(layout.root(), temp.path());
    }

    #[test]
    fn detect_falls_back_to_start_dir() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::detect(temp.path());
        assert_eq!(layout.root(), temp.path());
    }
}

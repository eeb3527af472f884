//! Daily briefing document.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::Result;
use crate::storage::Layout;
use crate::summary::SECTION_SEPARATOR;

/// One day's briefing: summary first, then check sections in run order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub date: NaiveDate,
    pub summary: String,
    pub sections: Vec<String>,
}

impl Report {
    pub fn render(&self) -> String {
        let mut output = format!("# Heartbeat - {}\n\n", self.date.format("%Y-%m-%d"));
        output.push_str(&format!("## Summary\n\n{}{SECTION_SEPARATOR}", self.summary));
        output.push_str(&self.sections.join(SECTION_SEPARATOR));
        output.push('\n');
        output
    }

    /// Write to the dated path under the output dir, replacing any earlier
    /// report for the same day. Returns the path and byte size written.
    pub fn write(&self, layout: &Layout) -> Result<(PathBuf, usize)> {
        std::fs::create_dir_all(layout.output_dir())?;
        let path = layout.report_path(self.date);
        let content = self.render();
        std::fs::write(&path, &content)?;
        tracing::info!(path = %path.display(), bytes = content.len(), "wrote heartbeat report");
        Ok((path, content.len()))
    }
}

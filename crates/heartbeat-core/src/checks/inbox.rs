//! Inbox folder scan: files waiting to be processed.

use std::io;
use std::path::Path;

use crate::outcome::Outcome;

pub fn check(dir: &Path) -> Outcome {
    if !dir.is_dir() {
        return Outcome::Skipped("No inbox folder found.".to_string());
    }
    match collect(dir) {
        Ok(names) if names.is_empty() => Outcome::Success("Inbox is empty.".to_string()),
        Ok(names) => Outcome::Success(render(&names)),
        Err(e) => Outcome::Failed(format!("Inbox check failed: {e}")),
    }
}

/// Sorted names of regular, non-hidden files in `dir`.
pub fn collect(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_file() && !name.starts_with('.') {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn render(names: &[String]) -> String {
    let lines: Vec<String> = names.iter().map(|name| format!("- {name}")).collect();
    format!(
        "## Inbox ({} unprocessed)\n\n{}",
        names.len(),
        lines.join("\n")
    )
}

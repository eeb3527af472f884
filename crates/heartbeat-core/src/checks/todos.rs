//! Todo folder scan.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::outcome::Outcome;

/// Folder-level instructions file, never a todo item.
const RESERVED_FILE: &str = "CLAUDE.md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub label: String,
    pub file_name: String,
}

/// List `*.md` files in `dir`, labelled by their first line.
pub fn check(dir: &Path) -> Outcome {
    if !dir.is_dir() {
        return Outcome::Skipped("No todo folder found.".to_string());
    }
    match collect(dir) {
        Ok(items) if items.is_empty() => Outcome::Success("No todo items.".to_string()),
        Ok(items) => Outcome::Success(render(&items)),
        Err(e) => Outcome::Failed(format!("Todos check failed: {e}")),
    }
}

pub fn collect(dir: &Path) -> io::Result<Vec<TodoItem>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let is_markdown = path.extension().is_some_and(|ext| ext == "md");
        if is_markdown && path.is_file() && file_name != RESERVED_FILE {
            files.push((file_name, path));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    files
        .into_iter()
        .map(|(file_name, path)| {
            Ok(TodoItem {
                label: first_line_label(&path)?,
                file_name,
            })
        })
        .collect()
}

fn first_line_label(path: &Path) -> io::Result<String> {
    let mut line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut line)?;
    Ok(strip_heading(&line).to_string())
}

/// Trim, then drop any leading `#`/space run (`"## Buy milk"` -> `"Buy milk"`).
pub fn strip_heading(line: &str) -> &str {
    line.trim().trim_start_matches(['#', ' '])
}

fn render(items: &[TodoItem]) -> String {
    let lines: Vec<String> = items
        .iter()
        .map(|item| format!("- {} ({})", item.label, item.file_name))
        .collect();
    format!("## Todo Items\n\n{}", lines.join("\n"))
}

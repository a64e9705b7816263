use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::SolutionEntry;
use crate::error::{Error, Result};

/// Grammar every project declaration line must match.
pub const PROJECT_LINE_PATTERN: &str =
    r#"Project\("[^"]+"\)\s*=\s*"([^"]+)",\s*"([^"]+)",\s*"[^"]+""#;

/// Prefix marking a line as an attempted project declaration.
const DECLARATION_PREFIX: &str = "Project(";

static PROJECT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{PROJECT_LINE_PATTERN})$"))
        .expect("project line grammar is a valid regex")
});

/// Parse the solution file at `path` into its member projects, in file order.
pub fn parse(path: &Path) -> Result<Vec<SolutionEntry>> {
    let bytes = std::fs::read(path).map_err(|e| Error::not_found(path, e))?;
    parse_str(&String::from_utf8_lossy(&bytes), path)
}

/// Parse solution text; `path` is only used for error messages.
pub fn parse_str(text: &str, path: &Path) -> Result<Vec<SolutionEntry>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut entries = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if !line.starts_with(DECLARATION_PREFIX) {
            continue;
        }

        let captures = PROJECT_LINE.captures(line).ok_or_else(|| Error::MalformedSolution {
            path: path.to_path_buf(),
            line: index + 1,
            pattern: PROJECT_LINE_PATTERN,
        })?;

        entries.push(SolutionEntry::new(&captures[1], &captures[2]));
    }

    tracing::debug!(
        "Found {} project declaration(s) in {}",
        entries.len(),
        path.display()
    );
    Ok(entries)
}

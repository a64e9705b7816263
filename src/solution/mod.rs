//! Solution (`.sln`) parsing.
//!
//! A solution file is line-oriented. Only project declarations are modelled:
//!
//! ```text
//! Project("{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}") = "MyLibrary", "MyLibrary\MyLibrary.csproj", "{2DC8C0A6-...}"
//! ```
//!
//! Lines that begin with `Project(` must match the full declaration grammar;
//! every other line (global sections, `ProjectSection(...)`, `EndProject`,
//! comments) is ignored.

mod parser;

pub use parser::{PROJECT_LINE_PATTERN, parse, parse_str};

/// One member project listed by a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionEntry {
    /// Display name, used for module names and keys.
    pub name: String,
    /// Solution-relative path to the project file, with either separator.
    pub path: String,
}

impl SolutionEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

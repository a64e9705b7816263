//! Error types for solution bootstrapping.
//!
//! Every variant is fatal to the current build invocation. Per-entry data
//! problems (a missing source file, an unsupported output type) are logged
//! and skipped instead of surfacing here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while deriving the module tree.
#[derive(Debug, Error)]
pub enum Error {
    /// A required file could not be opened.
    #[error("Unable to open {}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A solution line that starts a project declaration does not match the grammar.
    #[error("Expected the line {line} of {} to match the regular expression {pattern}", .path.display())]
    MalformedSolution {
        path: PathBuf,
        line: usize,
        pattern: &'static str,
    },

    /// A project file element lacks a required attribute.
    #[error("Missing attribute \"{attribute}\" in element <{element}> of {} at line {line}", .path.display())]
    MalformedProject {
        path: PathBuf,
        element: String,
        attribute: &'static str,
        line: usize,
    },

    /// The project file is not well-formed XML.
    #[error("Malformed XML in {}: {message}", .path.display())]
    MalformedXml { path: PathBuf, message: String },

    /// More than one solution file and no explicit choice.
    #[error(
        "Found several .sln files in {} ({}). Please set \"{key}\" to explicitly tell which one to use.",
        .dir.display(),
        .candidates.join(", ")
    )]
    AmbiguousSolution {
        dir: PathBuf,
        candidates: Vec<String>,
        key: &'static str,
    },

    /// Two module discovery mechanisms were configured at once.
    #[error("Do not use the Visual Studio bootstrapper and set the \"{key}\" property at the same time.")]
    ConflictingConfiguration { key: &'static str },

    /// A configuration value is unusable.
    #[error("Invalid value for the \"{key}\" property: {message}")]
    Configuration { key: &'static str, message: String },

    /// The solution produced no module.
    #[error("No Visual Studio projects were found in {}.", .solution.display())]
    NoModulesFound { solution: PathBuf },

    /// IO failure other than opening a file (e.g. listing a directory).
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a not-found error for a path that failed to open.
    pub fn not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::NotFound {
            path: path.into(),
            source,
        }
    }

    /// Create a not-found error for a path known to be absent.
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::not_found(path, std::io::Error::from(std::io::ErrorKind::NotFound))
    }

    /// Create a malformed XML error.
    pub fn xml(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedXml {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

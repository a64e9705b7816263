//! Build artifact resolution.
//!
//! Given a parsed project, find the compiled assembly that best represents it:
//!
//! 1. `OutputType` and `AssemblyName` must both be known, and the output type
//!    must map to an extension (`Library` → `dll`, `Exe`/`WinExe` → `exe`).
//! 2. An explicit output path override wins unconditionally.
//! 3. Otherwise every declared output path is probed; among the existing
//!    candidates the most recently modified one is picked, the first declared
//!    one on ties.

mod locator;

pub use locator::{ArtifactLocator, extension};

use std::path::{Path, PathBuf};

use crate::project::ProjectModel;

/// Seam between the model builder and artifact resolution.
pub trait LocateArtifact: Sync {
    /// Resolve the artifact of the project named `project_name` declared by `project_file`.
    ///
    /// Returns `None` when nothing suitable exists; this is never an error.
    fn locate(
        &self,
        project_name: &str,
        project_file: &Path,
        project: &ProjectModel,
    ) -> Option<PathBuf>;
}

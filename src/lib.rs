//! # vsproject-base
//!
//! Derives an analysis module tree from a Visual Studio solution and its
//! member project files, and resolves each project's build artifact.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! builder   → ModelBuilder: solution → one Module per project, into a ModuleSink
//!   ↓
//! artifact  → ArtifactLocator: ProjectModel + disk state → assembly path
//!   ↓
//! project   → quick-xml reader for .csproj/.vbproj
//! solution  → line grammar for .sln
//!   ↓
//! config    → Settings store, property keys, typed BootstrapConfig
//!   ↓
//! base      → Name escaping, path helpers, constants
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use vsproject::{ModelBuilder, RootModule, Settings};
//!
//! let settings = Settings::new().with("sonar.visualstudio.testProjectPattern", ".*Tests");
//! let mut root = RootModule::new("org:solution", "/src/solution", "/src/solution/.work");
//! let emitted = ModelBuilder::new(&settings).build(&mut root)?;
//! println!("{emitted} module(s)");
//! for module in root.modules() {
//!     println!("{} -> {}", module.key, module.base_dir.display());
//! }
//! # Ok::<_, vsproject::Error>(())
//! ```

// ============================================================================
// MODULES (dependency order: base → config → solution/project → artifact → builder)
// ============================================================================

/// Foundation helpers: name escaping, paths, constants
pub mod base;

/// Configuration: key/value settings and typed views
pub mod config;

/// Error taxonomy
pub mod error;

/// Solution file parsing
pub mod solution;

/// Project file parsing
pub mod project;

/// Build artifact resolution
pub mod artifact;

/// Module tree synthesis
pub mod builder;

pub use artifact::{ArtifactLocator, LocateArtifact};
pub use base::escape_project_name;
pub use builder::{ModelBuilder, Module, ModuleSink, RootModule};
pub use config::{BootstrapConfig, LocatorConfig, Settings};
pub use error::{Error, Result};
pub use project::{OutputConfiguration, ProjectModel};
pub use solution::SolutionEntry;

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

/// The host's root module, as seen by the builder.
pub trait ModuleSink {
    fn key(&self) -> &str;
    fn base_dir(&self) -> &Path;
    fn work_dir(&self) -> &Path;
    /// Drop any source and test files registered on the root itself.
    fn reset_sources_and_tests(&mut self);
    /// Attach a fully built child module.
    fn add_module(&mut self, module: Module);
}

/// One synthesized analysis module, handed to the sink once complete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    pub key: String,
    pub name: String,
    pub base_dir: PathBuf,
    pub work_dir: PathBuf,
    pub source_files: IndexSet<PathBuf>,
    pub test_files: IndexSet<PathBuf>,
    pub properties: IndexMap<String, String>,
}

impl Module {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            base_dir: base_dir.into(),
            work_dir: work_dir.into(),
            ..Default::default()
        }
    }

    pub fn add_source(&mut self, path: impl Into<PathBuf>) {
        self.source_files.insert(path.into());
    }

    pub fn add_test(&mut self, path: impl Into<PathBuf>) {
        self.test_files.insert(path.into());
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

/// In-memory [`ModuleSink`] for hosts without their own tree, and for tests.
#[derive(Debug, Clone, Default)]
pub struct RootModule {
    key: String,
    base_dir: PathBuf,
    work_dir: PathBuf,
    source_files: IndexSet<PathBuf>,
    test_files: IndexSet<PathBuf>,
    modules: Vec<Module>,
}

impl RootModule {
    pub fn new(
        key: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            key: key.into(),
            base_dir: base_dir.into(),
            work_dir: work_dir.into(),
            ..Default::default()
        }
    }

    pub fn add_source(&mut self, path: impl Into<PathBuf>) {
        self.source_files.insert(path.into());
    }

    pub fn add_test(&mut self, path: impl Into<PathBuf>) {
        self.test_files.insert(path.into());
    }

    pub fn source_files(&self) -> &IndexSet<PathBuf> {
        &self.source_files
    }

    pub fn test_files(&self) -> &IndexSet<PathBuf> {
        &self.test_files
    }

    /// Child modules in emission order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, key: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.key == key)
    }
}

impl ModuleSink for RootModule {
    fn key(&self) -> &str {
        &self.key
    }

    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn reset_sources_and_tests(&mut self) {
        self.source_files.clear();
        self.test_files.clear();
    }

    fn add_module(&mut self, module: Module) {
        self.modules.push(module);
    }
}

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use regex::Regex;

use super::sink::{Module, ModuleSink};
use crate::artifact::{ArtifactLocator, LocateArtifact};
use crate::base::constants::{SOLUTION_EXTENSION, is_supported_project_path, properties};
use crate::base::{absolute, escape_project_name, is_within, resolve_relative};
use crate::config::{BootstrapConfig, KeyStrategy, Settings, keys};
use crate::error::{Error, Result};
use crate::project;
use crate::solution::{self, SolutionEntry};

/// Builds one module per accepted solution project into a [`ModuleSink`].
pub struct ModelBuilder<'a> {
    settings: &'a Settings,
    config: BootstrapConfig,
}

/// Values shared by every entry of one build.
struct BuildContext<'a> {
    solution_file: &'a Path,
    solution_dir: &'a Path,
    key_prefix: &'a str,
    work_dir_prefix: String,
    root_work_dir: &'a Path,
    test_pattern: Option<&'a Regex>,
    locator: &'a dyn LocateArtifact,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            config: BootstrapConfig::from_settings(settings),
        }
    }

    /// Build with the default [`ArtifactLocator`].
    ///
    /// Returns the number of modules emitted; `0` when the bootstrapper is
    /// skipped or no solution file exists.
    pub fn build(&self, root: &mut dyn ModuleSink) -> Result<usize> {
        let locator = ArtifactLocator::new(self.config.locator.clone());
        self.build_with(root, &locator)
    }

    /// Build using a caller-supplied artifact locator.
    pub fn build_with(&self, root: &mut dyn ModuleSink, locator: &dyn LocateArtifact) -> Result<usize> {
        if self.config.skip {
            tracing::info!(
                "Skipping the Visual Studio bootstrapper because \"{}\" is set to \"true\"",
                keys::SKIP
            );
            return Ok(0);
        }

        let Some(solution_file) = self.solution_file(root.base_dir())? else {
            tracing::info!("No Visual Studio solution file found.");
            return Ok(0);
        };
        tracing::info!(
            "Using the following Visual Studio solution: {}",
            absolute(&solution_file).display()
        );

        if self.config.modules_configured {
            return Err(Error::ConflictingConfiguration { key: keys::MODULES });
        }

        let test_pattern = self.config.test_project_regex()?;

        root.reset_sources_and_tests();

        let entries = solution::parse(&solution_file)?;
        let solution_dir = solution_file.parent().unwrap_or(Path::new(""));
        let root_key = root.key().to_string();
        let root_work_dir = root.work_dir().to_path_buf();

        let context = BuildContext {
            solution_file: &solution_file,
            solution_dir,
            key_prefix: module_key_prefix(&root_key, self.config.key_strategy),
            work_dir_prefix: root_key.replace(':', "_"),
            root_work_dir: &root_work_dir,
            test_pattern: test_pattern.as_ref(),
            locator,
        };

        // Entries are prepared in parallel; emission keeps solution order.
        let modules = entries
            .par_iter()
            .map(|entry| self.prepare(&context, entry))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let mut emitted = 0;
        for module in modules.into_iter().flatten() {
            tracing::debug!("Adding module {}", module.key);
            root.add_module(module);
            emitted += 1;
        }

        if emitted == 0 {
            return Err(Error::NoModulesFound {
                solution: solution_file,
            });
        }
        Ok(emitted)
    }

    /// The explicit solution file, or the single `.sln` in `base_dir`.
    fn solution_file(&self, base_dir: &Path) -> Result<Option<PathBuf>> {
        if let Some(solution) = self.config.solution.as_deref() {
            let path = resolve_relative(base_dir, solution);
            if !path.is_file() {
                return Err(Error::missing(path));
            }
            return Ok(Some(path));
        }

        let entries = std::fs::read_dir(base_dir).map_err(|e| Error::io(base_dir, e))?;
        let mut found = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io(base_dir, e))?.path();
            let is_solution = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(SOLUTION_EXTENSION));
            if is_solution && path.is_file() {
                found.push(path);
            }
        }
        found.sort();

        match found.len() {
            0 => Ok(None),
            1 => Ok(found.pop()),
            _ => Err(Error::AmbiguousSolution {
                dir: absolute(base_dir),
                candidates: found
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .collect(),
                key: keys::SOLUTION,
            }),
        }
    }

    /// Turn one solution entry into a module, or `None` when it is skipped.
    fn prepare(&self, context: &BuildContext<'_>, entry: &SolutionEntry) -> Result<Option<Module>> {
        let escaped = escape_project_name(&entry.name);

        if !is_supported_project_path(&entry.path) {
            tracing::info!("Skipping the unsupported project type: {}", entry.path);
            return Ok(None);
        }
        if self.config.is_skipped(&escaped) {
            tracing::info!(
                "Skipping the project \"{}\" because it is listed in the property \"{}\".",
                escaped,
                keys::SKIPPED_PROJECTS
            );
            return Ok(None);
        }

        let project_file = resolve_relative(context.solution_dir, &entry.path);
        if !project_file.is_file() {
            tracing::warn!(
                "Unable to find the Visual Studio project file {}",
                absolute(&project_file).display()
            );
            return Ok(None);
        }

        let project = project::parse(&project_file)?;
        let project_dir = project_file.parent().unwrap_or(context.solution_dir);

        let mut module = Module::new(
            format!("{}:{}", context.key_prefix, escaped),
            entry.name.clone(),
            absolute(project_dir),
            context
                .root_work_dir
                .join(format!("{}_{}", context.work_dir_prefix, escaped)),
        );

        let is_test = context
            .test_pattern
            .is_some_and(|re| re.is_match(&entry.name));
        for file in &project.files {
            let path = resolve_relative(project_dir, file);
            if !path.is_file() {
                tracing::warn!(
                    "Cannot find the file {} of project {}",
                    absolute(&path).display(),
                    entry.name
                );
            } else if !is_within(&path, project_dir) {
                tracing::warn!(
                    "Skipping the file {} of project {} located outside of the source directory.",
                    absolute(&path).display(),
                    entry.name
                );
            } else if is_test {
                module.add_test(absolute(&path));
            } else {
                module.add_source(absolute(&path));
            }
        }

        let prefix = format!("{escaped}.");
        for (key, value) in self.settings.with_prefix(&prefix) {
            module.set_property(key, value);
        }

        if let Some(assembly) = context.locator.locate(&entry.name, &project_file, &project) {
            let assembly = absolute(&assembly).display().to_string();
            module.set_property(properties::CS_FXCOP_ASSEMBLY, assembly.clone());
            module.set_property(properties::VBNET_FXCOP_ASSEMBLY, assembly);
        }

        module.set_property(
            properties::RESHARPER_SOLUTION_FILE,
            absolute(context.solution_file).display().to_string(),
        );
        module.set_property(properties::RESHARPER_PROJECT_NAME, entry.name.clone());
        module.set_property(
            properties::STYLECOP_PROJECT_FILE_PATH,
            absolute(&project_file).display().to_string(),
        );

        Ok(Some(module))
    }
}

/// Root key used as the module key prefix.
fn module_key_prefix(root_key: &str, strategy: KeyStrategy) -> &str {
    if strategy == KeyStrategy::Safe {
        return root_key;
    }

    match root_key.find(':') {
        Some(i) => {
            let unsafe_key = &root_key[..i];
            tracing::warn!(
                "Unset the deprecated unnecessary property \"{}\" used to analyze this project. You will need to update the project key from the unsafe \"{}\" value to \"{}\".",
                keys::PROJECT_KEY_STRATEGY,
                unsafe_key,
                root_key
            );
            unsafe_key
        }
        None => {
            tracing::warn!(
                "Unset the deprecated unnecessary property \"{}\" used to analyze this project. Unsetting it will not affect this particular project.",
                keys::PROJECT_KEY_STRATEGY
            );
            root_key
        }
    }
}

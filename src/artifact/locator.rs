use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use super::LocateArtifact;
use crate::base::{native_path, resolve_relative};
use crate::config::{LocatorConfig, keys};
use crate::project::ProjectModel;

/// File extension produced by an MSBuild output type, compared case-insensitively.
pub fn extension(output_type: &str) -> Option<&'static str> {
    match output_type.to_ascii_lowercase().as_str() {
        "library" => Some("dll"),
        "exe" | "winexe" => Some("exe"),
        _ => None,
    }
}

/// A probed file that exists on disk.
#[derive(Debug)]
struct Candidate {
    path: PathBuf,
    /// Milliseconds since the Unix epoch.
    last_modified: u128,
}

/// Resolves build artifacts from on-disk state.
#[derive(Debug, Clone, Default)]
pub struct ArtifactLocator {
    config: LocatorConfig,
}

impl ArtifactLocator {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    fn candidates(&self, file_name: &str, project_dir: &Path, project: &ProjectModel) -> Vec<Candidate> {
        let filter = self.build_filter();
        if filter.is_some() {
            tracing::warn!(
                "The properties \"{}\" and \"{}\" are deprecated. The latest generated assembly is now picked up for analysis by default instead.",
                keys::BUILD_CONFIGURATION,
                keys::BUILD_PLATFORM
            );
        }

        project
            .configurations
            .iter()
            .filter(|configuration| {
                filter.is_none_or(|(build_configuration, build_platform)| {
                    configuration.condition.contains(build_configuration)
                        && configuration.condition.contains(build_platform)
                })
            })
            .filter_map(|configuration| {
                let path = resolve_relative(project_dir, &configuration.output_path).join(file_name);
                let metadata = std::fs::metadata(&path).ok().filter(|m| m.is_file())?;
                let last_modified = metadata
                    .modified()
                    .ok()
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .map(|d| d.as_millis())
                    .unwrap_or_default();
                Some(Candidate {
                    path,
                    last_modified,
                })
            })
            .collect()
    }

    /// The deprecated configuration/platform filter, only when both are set.
    fn build_filter(&self) -> Option<(&str, &str)> {
        Some((
            self.config.build_configuration.as_deref()?,
            self.config.build_platform.as_deref()?,
        ))
    }
}

impl LocateArtifact for ArtifactLocator {
    fn locate(
        &self,
        project_name: &str,
        project_file: &Path,
        project: &ProjectModel,
    ) -> Option<PathBuf> {
        let (Some(output_type), Some(assembly_name)) =
            (project.output_type.as_deref(), project.assembly_name.as_deref())
        else {
            tracing::debug!("Project {project_name} declares no output type or assembly name");
            return None;
        };

        let Some(extension) = extension(output_type) else {
            tracing::debug!("Project {project_name} has the unsupported output type {output_type}");
            return None;
        };
        let file_name = format!("{assembly_name}.{extension}");

        if let Some(output_path) = self.config.output_path.as_deref() {
            tracing::info!(
                "Using the assembly output path specified using the property \"{}\" set to: {}",
                keys::OUTPUT_PATH,
                output_path
            );
            return Some(native_path(output_path).join(file_name));
        }

        let project_dir = project_file.parent().unwrap_or(Path::new(""));
        let mut best: Option<Candidate> = None;
        for candidate in self.candidates(&file_name, project_dir, project) {
            if best
                .as_ref()
                .is_none_or(|b| candidate.last_modified > b.last_modified)
            {
                best = Some(candidate);
            }
        }

        if best.is_none() {
            tracing::debug!("No assembly {file_name} found for project {project_name}");
        }
        best.map(|candidate| candidate.path)
    }
}

//! Property keys read from [`Settings`](super::Settings).

/// Solution file to use, relative to the root base directory.
pub const SOLUTION: &str = "sonar.visualstudio.solution";
/// Disables the bootstrapper entirely.
pub const SKIP: &str = "sonar.visualstudio.skip";
/// Directory overriding the discovered assembly output paths.
pub const OUTPUT_PATH: &str = "sonar.visualstudio.outputPath";
/// Deprecated build configuration filter.
pub const BUILD_CONFIGURATION: &str = "sonar.dotnet.buildConfiguration";
/// Deprecated build platform filter.
pub const BUILD_PLATFORM: &str = "sonar.dotnet.buildPlatform";
/// Regular expression matching test project names.
pub const TEST_PROJECT_PATTERN: &str = "sonar.visualstudio.testProjectPattern";
/// Comma separated escaped project names to ignore.
pub const SKIPPED_PROJECTS: &str = "sonar.visualstudio.skippedProjects";
/// Deprecated module key strategy (`unsafe`).
pub const PROJECT_KEY_STRATEGY: &str = "sonar.visualstudio.projectKeyStrategy";
/// Generic module list; must not be combined with solution bootstrapping.
pub const MODULES: &str = "sonar.modules";

pub const LEGACY_SOLUTION: &str = "sonar.dotnet.visualstudio.solution.file";
pub const LEGACY_OUTPUT_PATH: &str = "sonar.dotnet.assemblies";

/// Preferred keys paired with the legacy key they replace.
pub const LEGACY_KEYS: &[(&str, &str)] = &[
    (SOLUTION, LEGACY_SOLUTION),
    (OUTPUT_PATH, LEGACY_OUTPUT_PATH),
];

/// Legacy key for a preferred key, if any.
pub fn legacy_key(preferred: &str) -> Option<&'static str> {
    LEGACY_KEYS
        .iter()
        .find(|(key, _)| *key == preferred)
        .map(|(_, legacy)| *legacy)
}

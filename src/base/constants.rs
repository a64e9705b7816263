//! Domain constants shared across modules.

/// Extension of solution files, without the dot.
pub const SOLUTION_EXTENSION: &str = "sln";

/// Project file extensions that produce a module.
pub const PROJECT_EXTENSIONS: &[&str] = &["csproj", "vbproj"];

/// Properties set on each emitted module for downstream analyzers.
pub mod properties {
    /// C# FxCop assembly path.
    pub const CS_FXCOP_ASSEMBLY: &str = "sonar.cs.fxcop.assembly";
    /// VB.NET FxCop assembly path.
    pub const VBNET_FXCOP_ASSEMBLY: &str = "sonar.vbnet.fxcop.assembly";
    /// ReSharper solution file.
    pub const RESHARPER_SOLUTION_FILE: &str = "sonar.resharper.solutionFile";
    /// ReSharper project name.
    pub const RESHARPER_PROJECT_NAME: &str = "sonar.resharper.projectName";
    /// StyleCop project file.
    pub const STYLECOP_PROJECT_FILE_PATH: &str = "sonar.stylecop.projectFilePath";
}

/// Check whether a solution entry path names a supported project file.
pub fn is_supported_project_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    PROJECT_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

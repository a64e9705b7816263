//! Project file (`.csproj` / `.vbproj`) parsing.
//!
//! Only the handful of MSBuild elements the bootstrapper needs are read:
//!
//! ```xml
//! <Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
//!   <PropertyGroup>
//!     <OutputType>Library</OutputType>
//!     <AssemblyName>MyLibrary</AssemblyName>
//!     <OutputPath>bin\Debug\</OutputPath>
//!   </PropertyGroup>
//!   <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Release|AnyCPU' ">
//!     <OutputPath>bin\Release\</OutputPath>
//!   </PropertyGroup>
//!   <ItemGroup>
//!     <Compile Include="Properties\AssemblyInfo.cs" />
//!   </ItemGroup>
//! </Project>
//! ```
//!
//! Paths are returned verbatim; separator conversion happens when they are
//! resolved against the filesystem.

mod parser;

pub use parser::{parse, parse_bytes};

/// One output path, paired with the condition of the property group declaring it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfiguration {
    /// Raw MSBuild condition, or empty for an unconditional group.
    pub condition: String,
    /// Project-relative output directory.
    pub output_path: String,
}

impl OutputConfiguration {
    pub fn new(condition: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            output_path: output_path.into(),
        }
    }
}

/// Everything extracted from a single project file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectModel {
    /// `Compile` item paths, in document order.
    pub files: Vec<String>,
    /// Output kind such as `Library`, `Exe` or `WinExe`; not validated here.
    pub output_type: Option<String>,
    /// Assembly base name, without extension.
    pub assembly_name: Option<String>,
    /// Output paths in document order.
    pub configurations: Vec<OutputConfiguration>,
}

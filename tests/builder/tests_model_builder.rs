#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};

use rstest::rstest;
use vsproject::config::keys;
use vsproject::{Error, LocateArtifact, ModelBuilder, ModuleSink, ProjectModel, Settings};

use crate::helpers::source_fixtures::ProjectSpec;
use crate::helpers::workspace::{ROOT_KEY, Workspace};

/// Locator that reports a fixed assembly for one project file name.
struct FixedArtifact {
    project_file_name: &'static str,
    assembly: PathBuf,
}

impl LocateArtifact for FixedArtifact {
    fn locate(&self, _: &str, project_file: &Path, _: &ProjectModel) -> Option<PathBuf> {
        (project_file.file_name()? == self.project_file_name).then(|| self.assembly.clone())
    }
}

fn build(workspace: &Workspace, settings: &Settings) -> (vsproject::RootModule, vsproject::Result<usize>) {
    let mut root = workspace.root_module();
    let result = ModelBuilder::new(settings).build(&mut root);
    (root, result)
}

#[test]
fn test_single_solution() {
    let workspace = Workspace::single_solution();
    let mut root = workspace.root_module();
    root.add_source(workspace.path("stale.cs"));

    let locator = FixedArtifact {
        project_file_name: "MyLibrary.csproj",
        assembly: PathBuf::from("/drop/MyLibrary.dll"),
    };
    let emitted = ModelBuilder::new(&Settings::new())
        .build_with(&mut root, &locator)
        .unwrap();

    assert_eq!(emitted, 2);
    assert!(root.source_files().is_empty(), "root sources are reset");

    let library = &root.modules()[0];
    assert_eq!(library.key, "solution:key:MyLibrary");
    assert_eq!(library.name, "MyLibrary");
    assert_eq!(library.base_dir, workspace.path("MyLibrary"));
    assert_eq!(library.work_dir, workspace.path(".work").join("solution_key_MyLibrary"));
    assert_eq!(
        library.source_files.iter().collect::<Vec<_>>(),
        vec![&workspace.path("MyLibrary").join("Adder.cs")]
    );
    assert!(library.test_files.is_empty());
    assert_eq!(library.property("sonar.cs.fxcop.assembly"), Some("/drop/MyLibrary.dll"));
    assert_eq!(library.property("sonar.vbnet.fxcop.assembly"), Some("/drop/MyLibrary.dll"));
    assert_eq!(
        library.property("sonar.resharper.solutionFile"),
        Some(workspace.path("solution.sln").display().to_string().as_str())
    );
    assert_eq!(library.property("sonar.resharper.projectName"), Some("MyLibrary"));
    assert_eq!(
        library.property("sonar.stylecop.projectFilePath"),
        Some(
            workspace
                .path("MyLibrary")
                .join("MyLibrary.csproj")
                .display()
                .to_string()
                .as_str()
        )
    );

    let tests = &root.modules()[1];
    assert_eq!(tests.key, "solution:key:MyLibraryTest");
    assert_eq!(tests.source_files.len(), 1);
    assert_eq!(tests.property("sonar.cs.fxcop.assembly"), None);
    assert_eq!(tests.property("sonar.vbnet.fxcop.assembly"), None);
    assert_eq!(tests.property("sonar.resharper.projectName"), Some("MyLibraryTest"));
}

#[test]
fn test_test_project_pattern_classifies_files() {
    let workspace = Workspace::single_solution();
    let settings = Settings::new().with(keys::TEST_PROJECT_PATTERN, ".*Test");
    let (root, result) = build(&workspace, &settings);
    assert_eq!(result.unwrap(), 2);

    let library = &root.modules()[0];
    assert_eq!(library.source_files.len(), 1);
    assert!(library.test_files.is_empty());

    let tests = &root.modules()[1];
    assert!(tests.source_files.is_empty());
    assert_eq!(
        tests.test_files.iter().collect::<Vec<_>>(),
        vec![&workspace.path("MyLibraryTest").join("AdderTest.cs")]
    );
}

#[test]
fn test_several_solutions_are_ambiguous() {
    let workspace = Workspace::new();
    workspace.solution("solution.sln", &[]);
    workspace.solution("solution_without_tests.sln", &[]);

    let (root, result) = build(&workspace, &Settings::new());
    match result.unwrap_err() {
        Error::AmbiguousSolution { candidates, key, .. } => {
            assert_eq!(candidates, vec!["solution.sln", "solution_without_tests.sln"]);
            assert_eq!(key, keys::SOLUTION);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(root.modules().is_empty());
}

#[test]
fn test_explicit_solution_resolves_ambiguity() {
    let workspace = Workspace::single_solution();
    workspace.solution(
        "solution_without_tests.sln",
        &[("MyLibrary", "MyLibrary\\MyLibrary.csproj")],
    );

    let settings = Settings::new().with(keys::SOLUTION, "solution_without_tests.sln");
    let (root, result) = build(&workspace, &settings);
    assert_eq!(result.unwrap(), 1);
    assert_eq!(root.modules()[0].key, "solution:key:MyLibrary");
}

#[test]
fn test_legacy_solution_key_is_honored() {
    let workspace = Workspace::single_solution();
    workspace.solution(
        "solution_without_tests.sln",
        &[("MyLibrary", "MyLibrary\\MyLibrary.csproj")],
    );

    let settings = Settings::new().with(keys::LEGACY_SOLUTION, "solution_without_tests.sln");
    let (_, result) = build(&workspace, &settings);
    assert_eq!(result.unwrap(), 1);
}

#[test]
fn test_explicit_solution_must_exist() {
    let workspace = Workspace::single_solution();
    let settings = Settings::new().with(keys::SOLUTION, "non_existing.sln");

    let (_, result) = build(&workspace, &settings);
    let err = result.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert!(err.to_string().contains("non_existing.sln"));
}

#[test]
fn test_no_solution_is_a_no_op() {
    let workspace = Workspace::new();
    workspace.write("readme.txt", "nothing here");

    let (root, result) = build(&workspace, &Settings::new());
    assert_eq!(result.unwrap(), 0);
    assert!(root.modules().is_empty());
}

#[test]
fn test_skip_flag() {
    let workspace = Workspace::single_solution();
    let settings = Settings::new().with(keys::SKIP, "true");

    let (root, result) = build(&workspace, &settings);
    assert_eq!(result.unwrap(), 0);
    assert!(root.modules().is_empty());
}

#[test]
fn test_modules_property_conflicts() {
    let workspace = Workspace::single_solution();
    let settings = Settings::new().with(keys::MODULES, "a,b");

    let (root, result) = build(&workspace, &settings);
    let err = result.unwrap_err();
    assert!(matches!(err, Error::ConflictingConfiguration { key: "sonar.modules" }));
    assert_eq!(
        err.to_string(),
        "Do not use the Visual Studio bootstrapper and set the \"sonar.modules\" property at the same time."
    );
    assert!(root.modules().is_empty());
}

#[test]
fn test_no_projects_found() {
    let workspace = Workspace::new();
    workspace.solution("solution.sln", &[("Solution Items", "Solution Items")]);

    let (_, result) = build(&workspace, &Settings::new());
    assert!(matches!(result.unwrap_err(), Error::NoModulesFound { .. }));
}

#[test]
fn test_missing_project_file_is_skipped() {
    let workspace = Workspace::new();
    workspace.solution("solution.sln", &[("Gone", "Gone\\Gone.csproj")]);
    let (_, result) = build(&workspace, &Settings::new());
    assert!(matches!(result.unwrap_err(), Error::NoModulesFound { .. }));

    workspace.solution(
        "solution.sln",
        &[("Gone", "Gone\\Gone.csproj"), ("Here", "Here\\Here.csproj")],
    );
    workspace.project("Here/Here.csproj", &ProjectSpec::files(&["A.cs"]));
    let (root, result) = build(&workspace, &Settings::new());
    assert_eq!(result.unwrap(), 1);
    assert_eq!(root.modules()[0].name, "Here");
}

#[rstest]
#[case("Database\\Database.sqlproj")]
#[case("Native\\Native.vcxproj")]
#[case("Solution Items")]
fn test_unsupported_project_types_are_skipped(#[case] path: &str) {
    let workspace = Workspace::single_solution();
    workspace.solution(
        "solution.sln",
        &[("Other", path), ("MyLibrary", "MyLibrary\\MyLibrary.csproj")],
    );

    let (root, result) = build(&workspace, &Settings::new());
    assert_eq!(result.unwrap(), 1);
    assert_eq!(root.modules()[0].name, "MyLibrary");
}

#[test]
fn test_vbproj_is_supported() {
    let workspace = Workspace::new();
    workspace.solution("solution.sln", &[("VbLib", "VbLib/VbLib.vbproj")]);
    workspace.project("VbLib/VbLib.vbproj", &ProjectSpec::files(&["Module1.vb"]));

    let (root, result) = build(&workspace, &Settings::new());
    assert_eq!(result.unwrap(), 1);
    assert_eq!(root.modules()[0].source_files.len(), 1);
}

#[test]
fn test_skipped_projects_use_escaped_names() {
    let workspace = Workspace::new();
    workspace.solution(
        "solution.sln",
        &[
            ("My Library", "Lib\\Lib.csproj"),
            ("Tools", "Tools\\Tools.csproj"),
        ],
    );
    workspace.project("Lib/Lib.csproj", &ProjectSpec::files(&["A.cs"]));
    workspace.project("Tools/Tools.csproj", &ProjectSpec::files(&["B.cs"]));

    let settings = Settings::new().with(keys::SKIPPED_PROJECTS, "My_Library");
    let (root, result) = build(&workspace, &settings);
    assert_eq!(result.unwrap(), 1);
    assert_eq!(root.modules()[0].key, format!("{ROOT_KEY}:Tools"));
}

#[test]
fn test_accented_names_are_escaped_in_keys() {
    let workspace = Workspace::new();
    workspace.solution("solution.sln", &[("héhé über", "P\\P.csproj")]);
    workspace.project("P/P.csproj", &ProjectSpec::files(&["A.cs"]));

    let (root, result) = build(&workspace, &Settings::new());
    assert_eq!(result.unwrap(), 1);
    let module = &root.modules()[0];
    assert_eq!(module.key, "solution:key:hehe_uber");
    assert_eq!(module.name, "héhé über");
    assert_eq!(
        module.work_dir,
        workspace.path(".work").join("solution_key_hehe_uber")
    );
}

#[test]
fn test_missing_and_outside_files_are_excluded() {
    let workspace = Workspace::new();
    workspace.solution("solution.sln", &[("P", "P\\P.csproj")]);
    workspace.write("Outside.cs", "// outside");
    workspace.project(
        "P/P.csproj",
        &ProjectSpec::files(&["Inside.cs", "..\\Outside.cs", "Missing.cs", "Sub\\Nested.cs"]),
    );
    std::fs::remove_file(workspace.path("P/Missing.cs")).unwrap();

    let settings = Settings::new().with(keys::TEST_PROJECT_PATTERN, "P");
    let (root, result) = build(&workspace, &settings);
    assert_eq!(result.unwrap(), 1);

    let module = &root.modules()[0];
    assert!(module.source_files.is_empty());
    let tests: Vec<_> = module.test_files.iter().cloned().collect();
    assert_eq!(
        tests,
        vec![
            workspace.path("P").join("Inside.cs"),
            workspace.path("P").join("Sub").join("Nested.cs"),
        ]
    );
}

#[test]
fn test_module_properties_are_forwarded() {
    let workspace = Workspace::single_solution();
    let settings = Settings::new()
        .with("MyLibrary.sonar.cs.fxcop.timeout", "60")
        .with("MyLibraryTest.sonar.exclusions", "**/Generated/*")
        .with("MyLibraryX.ignored", "x");

    let (root, result) = build(&workspace, &settings);
    result.unwrap();

    let library = &root.modules()[0];
    assert_eq!(library.property("sonar.cs.fxcop.timeout"), Some("60"));
    assert_eq!(library.property("sonar.exclusions"), None);
    assert_eq!(library.property("ignored"), None);

    let tests = &root.modules()[1];
    assert_eq!(tests.property("sonar.exclusions"), Some("**/Generated/*"));
}

#[test]
fn test_malformed_project_aborts_the_build() {
    let workspace = Workspace::single_solution();
    workspace.write(
        "MyLibraryTest/MyLibraryTest.csproj",
        "<Project>\n  <ItemGroup>\n    <Compile />\n  </ItemGroup>\n</Project>",
    );

    let (root, result) = build(&workspace, &Settings::new());
    assert!(matches!(
        result.unwrap_err(),
        Error::MalformedProject { line: 3, .. }
    ));
    assert!(root.modules().is_empty(), "no partial module tree");
}

#[test]
fn test_malformed_solution_aborts_the_build() {
    let workspace = Workspace::new();
    workspace.write(
        "solution.sln",
        "Microsoft Visual Studio Solution File\nProject(\"{G}\") = \"Broken\"\n",
    );

    let (_, result) = build(&workspace, &Settings::new());
    assert!(matches!(
        result.unwrap_err(),
        Error::MalformedSolution { line: 2, .. }
    ));
}

#[test]
fn test_emission_order_follows_solution() {
    let workspace = Workspace::new();
    let names = ["Zeta", "Alpha", "Mid", "Beta", "Omega", "Gamma"];
    let projects: Vec<(String, String)> = names
        .iter()
        .map(|n| (n.to_string(), format!("{n}\\{n}.csproj")))
        .collect();
    let pairs: Vec<(&str, &str)> = projects
        .iter()
        .map(|(n, p)| (n.as_str(), p.as_str()))
        .collect();
    workspace.solution("solution.sln", &pairs);
    for name in names {
        workspace.project(&format!("{name}/{name}.csproj"), &ProjectSpec::files(&["A.cs"]));
    }

    let (root, result) = build(&workspace, &Settings::new());
    assert_eq!(result.unwrap(), names.len());
    let emitted: Vec<_> = root.modules().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(emitted, names);
}

#[test]
fn test_root_accessors_are_used_for_keys() {
    let workspace = Workspace::single_solution();
    let mut root = vsproject::RootModule::new("org:team:sln", workspace.root(), "/w");
    ModelBuilder::new(&Settings::new()).build(&mut root).unwrap();

    assert_eq!(root.key(), "org:team:sln");
    assert_eq!(root.modules()[0].key, "org:team:sln:MyLibrary");
    assert_eq!(
        root.modules()[0].work_dir,
        Path::new("/w").join("org_team_sln_MyLibrary")
    );
}

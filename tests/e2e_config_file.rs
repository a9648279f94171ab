/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
mod test_utilities;

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::Path;
use test_utilities::fixtures::TestProject;

// ============================================================================
// Helper Functions
// ============================================================================

/// Create a project with two native modules and one plain JS package.
fn create_test_project() -> TestProject {
    let project = TestProject::new(&[
        ("expo-camera", "^15"),
        ("expo-web-only", "^1"),
        ("lodash", "^4"),
    ]);
    project.install_module("expo-camera", &["apple", "android"]);
    project.install_module("expo-web-only", &["web"]);
    project.install("lodash", "4.17.21", &[]);
    project
}

/// Write a config file at the specified path.
fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn auto_config_path(project: &TestProject) -> std::path::PathBuf {
    project.root().join("autolink-resolver.config.yml")
}

fn view_names(stdout: &[u8], view: &str) -> Vec<String> {
    let json: serde_json::Value = serde_json::from_slice(stdout).unwrap();
    json["views"][view]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect()
}

// ============================================================================
// Config File Auto-Discovery Tests
// ============================================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_exclude() {
        let project = create_test_project();
        write_config(
            &auto_config_path(&project),
            r#"
exclude:
  - lodash
"#,
        );

        let output = cargo_bin_cmd!("autolink-resolver")
            .args(["-p", project.path_str()])
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(
            view_names(&output.stdout, "all"),
            vec!["expo-camera", "expo-web-only"]
        );
        // stderr should mention auto-discovery
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Auto-discovered config file"));
    }

    #[test]
    fn test_auto_discovery_applies_format() {
        let project = create_test_project();
        write_config(&auto_config_path(&project), "format: markdown\n");

        let output = cargo_bin_cmd!("autolink-resolver")
            .args(["-p", project.path_str()])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("# Autolinking Dependency Resolution"));
    }

    #[test]
    fn test_auto_discovery_applies_platforms() {
        let project = create_test_project();
        write_config(
            &auto_config_path(&project),
            r#"
platforms:
  - web
"#,
        );

        let output = cargo_bin_cmd!("autolink-resolver")
            .args(["-p", project.path_str()])
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(view_names(&output.stdout, "web"), vec!["expo-web-only"]);
    }

    #[test]
    fn test_no_config_file_runs_normally() {
        let project = create_test_project();

        let output = cargo_bin_cmd!("autolink-resolver")
            .args(["-p", project.path_str()])
            .output()
            .unwrap();

        assert!(output.status.success());
        // Default format is JSON with a single unfiltered view
        assert_eq!(view_names(&output.stdout, "all").len(), 3);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("Auto-discovered config file"));
    }

    #[test]
    fn test_no_config_flag_skips_discovery() {
        let project = create_test_project();
        write_config(&auto_config_path(&project), "format: markdown\n");

        let output = cargo_bin_cmd!("autolink-resolver")
            .args(["-p", project.path_str(), "--no-config"])
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(view_names(&output.stdout, "all").len(), 3);
    }

    #[test]
    fn test_dependency_policy_from_config() {
        let project = create_test_project();
        write_config(
            &auto_config_path(&project),
            r#"
dependency_policy:
  excluded_patterns:
    - "expo-web-*"
"#,
        );

        let output = cargo_bin_cmd!("autolink-resolver")
            .args(["-p", project.path_str()])
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(
            view_names(&output.stdout, "all"),
            vec!["expo-camera", "lodash"]
        );
    }
}

// ============================================================================
// Explicit Config Path (`--config`) Tests
// ============================================================================

mod explicit_config_tests {
    use super::*;

    #[test]
    fn test_explicit_config_path_loads_successfully() {
        let project = create_test_project();

        // Place config at a custom path (not auto-discovery name)
        let config_path = project.outside("custom-config.yml");
        write_config(
            &config_path,
            r#"
include:
  - lodash
"#,
        );

        let output = cargo_bin_cmd!("autolink-resolver")
            .args([
                "-p",
                project.path_str(),
                "-c",
                config_path.to_str().unwrap(),
            ])
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(view_names(&output.stdout, "all"), vec!["lodash"]);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Loaded config from:"));
    }

    #[test]
    fn test_explicit_config_nonexistent_file_error() {
        let project = create_test_project();
        cargo_bin_cmd!("autolink-resolver")
            .args(["-p", project.path_str(), "-c", "nonexistent-config.yml"])
            .assert()
            .code(3); // ApplicationError
    }

    #[test]
    fn test_invalid_config_value_error() {
        let project = create_test_project();
        write_config(&auto_config_path(&project), "max_depth: 0\n");

        cargo_bin_cmd!("autolink-resolver")
            .args(["-p", project.path_str()])
            .assert()
            .code(3);
    }

    #[test]
    fn test_unknown_field_warns() {
        let project = create_test_project();
        write_config(&auto_config_path(&project), "check_cve: true\n");

        let output = cargo_bin_cmd!("autolink-resolver")
            .args(["-p", project.path_str()])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Unknown config field 'check_cve'"));
    }
}

// ============================================================================
// CLI + Config Merge Tests
// ============================================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_cli_format_overrides_config() {
        let project = create_test_project();
        write_config(&auto_config_path(&project), "format: markdown\n");

        let output = cargo_bin_cmd!("autolink-resolver")
            .args(["-p", project.path_str(), "-f", "json"])
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(view_names(&output.stdout, "all").len(), 3);
    }

    #[test]
    fn test_cli_platforms_replace_config_platforms() {
        let project = create_test_project();
        write_config(&auto_config_path(&project), "platforms: [web]\n");

        let output = cargo_bin_cmd!("autolink-resolver")
            .args(["-p", project.path_str(), "--platform", "android"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let views = json["views"].as_object().unwrap();
        assert_eq!(views.keys().collect::<Vec<_>>(), vec!["android"]);
    }

    #[test]
    fn test_config_fail_on_duplicates() {
        let project = create_test_project();
        let dir = project.install("parent", "1.0.0", &[("lodash", "^3")]);
        test_utilities::fixtures::write_package(
            &dir.join("node_modules/lodash"),
            "lodash",
            "3.10.1",
            &[],
        );
        fs::write(
            project.root().join("package.json"),
            r#"{"name": "app", "dependencies": {"lodash": "^4", "parent": "^1"}}"#,
        )
        .unwrap();
        write_config(&auto_config_path(&project), "fail_on_duplicates: true\n");

        cargo_bin_cmd!("autolink-resolver")
            .args(["-p", project.path_str()])
            .assert()
            .code(1);
    }
}

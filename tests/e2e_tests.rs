//! End-to-end tests for the types-publisher CLI
//!
//! These tests verify:
//! - Text and JSON plan output against an offline registry cache
//! - Offline runs leave the cache file untouched
//! - Exit codes are correct for various scenarios

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PACKAGE_INDEX: &str = r#"{
    "typings": [
        {"name": "node", "libraryName": "Node.js", "major": 20, "minor": 1}
    ],
    "notNeededPackages": [
        {"name": "left-pad", "libraryName": "left-pad", "asOfVersion": "1.3.0", "sourceRepoURL": "https://github.com/left-pad/left-pad"},
        {"name": "moment", "libraryName": "Moment", "asOfVersion": "2.14.0", "sourceRepoURL": "https://github.com/moment/moment"},
        {"name": "angular", "libraryName": "Angular", "asOfVersion": "1.8.0", "sourceRepoURL": "https://github.com/angular/angular.js"}
    ]
}"#;

const REGISTRY_CACHE: &str = r#"{
    "@types%2fleft-pad": {
        "dist-tags": {"latest": "1.3.0"},
        "time": {"created": "2016-01-01T00:00:00.000Z", "1.3.0": "2021-01-01T00:00:00.000Z"},
        "versions": {"1.3.0": {}}
    },
    "@types%2fmoment": {
        "dist-tags": {"latest": "2.13.0"},
        "time": {"2.13.0": "2017-01-01T00:00:00.000Z"},
        "versions": {"2.13.0": {}}
    },
    "@types%2fangular": {
        "dist-tags": {"latest": "1.8.0"},
        "time": {"1.8.0": "2020-01-01T00:00:00.000Z"},
        "versions": {"1.8.0": {"deprecated": "Angular provides its own types."}}
    }
}"#;

const VERSIONS: &str = r#"{
    "changedTypings": [
        {"id": {"name": "node", "version": {"major": 20, "minor": 1}}, "version": "20.1.4", "latestVersion": "20.1.4"}
    ],
    "changedNotNeededPackages": ["left-pad", "moment", "angular"]
}"#;

/// Create a directory holding an index, a diff and a registry cache
fn create_test_project() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("index.json"), PACKAGE_INDEX).unwrap();
    fs::write(temp_dir.path().join("versions.json"), VERSIONS).unwrap();
    fs::write(temp_dir.path().join("cache.json"), REGISTRY_CACHE).unwrap();
    temp_dir
}

/// Offline invocation over the test project
fn offline_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("types-publisher").unwrap();
    cmd.current_dir(temp_dir.path())
        .env_remove("RUST_LOG")
        .args(["--packages", "index.json", "--cache-file", "cache.json", "--offline"]);
    cmd
}

mod text_output_tests {
    use super::*;

    #[test]
    fn test_text_plan() {
        let temp_dir = create_test_project();

        offline_cmd(&temp_dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("Typings to publish (1):"))
            .stdout(predicate::str::contains("@types/node"))
            .stdout(predicate::str::contains("Deprecations (2):"))
            .stdout(predicate::str::contains("1.3.0 -> 1.3.1 (retry)"))
            .stdout(predicate::str::contains("2.14.0"))
            .stdout(predicate::str::contains("@types/angular").not())
            .stdout(predicate::str::contains(
                "Summary: 3 publishes (1 typings, 2 deprecations, 1 retried)",
            ));
    }

    #[test]
    fn test_verbose_lists_already_deprecated() {
        let temp_dir = create_test_project();

        offline_cmd(&temp_dir)
            .arg("--verbose")
            .assert()
            .success()
            .stdout(predicate::str::contains("Already deprecated (1):"))
            .stdout(predicate::str::contains("@types/angular"))
            .stderr(predicate::str::contains(
                "Deprecation of 1.3.0 failed, instead using 1.3.1.",
            ));
    }

    #[test]
    fn test_quiet_mode() {
        let temp_dir = create_test_project();

        let output = offline_cmd(&temp_dir).arg("-q").output().unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(stdout.lines().count(), 1);
        assert!(stdout.starts_with("Summary:"));
    }

    #[test]
    fn test_offline_leaves_cache_file_untouched() {
        let temp_dir = create_test_project();

        offline_cmd(&temp_dir).assert().success();

        let cache = fs::read_to_string(temp_dir.path().join("cache.json")).unwrap();
        assert_eq!(cache, REGISTRY_CACHE);
    }
}

mod json_output_tests {
    use super::*;

    #[test]
    fn test_json_output_schema() {
        let temp_dir = create_test_project();

        let output = offline_cmd(&temp_dir).arg("--json").output().unwrap();
        assert!(output.status.success());

        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");

        assert_eq!(json["summary"]["publishes"], 3);
        assert_eq!(json["summary"]["retries"], 1);
        assert_eq!(json["summary"]["alreadyDeprecated"], 1);

        let typings = json["typings"].as_array().unwrap();
        assert_eq!(typings[0]["name"], "@types/node");
        assert_eq!(typings[0]["version"], "20.1.4");

        let not_needed = json["notNeeded"].as_array().unwrap();
        assert_eq!(not_needed.len(), 2);
        assert_eq!(not_needed[0]["action"], "retry");
        assert_eq!(not_needed[0]["version"], "1.3.1");
        assert_eq!(not_needed[0]["failedVersion"], "1.3.0");
        assert_eq!(not_needed[1]["action"], "deprecate");
    }
}

mod exit_code_tests {
    use super::*;

    #[test]
    fn test_exit_code_help() {
        Command::cargo_bin("types-publisher")
            .unwrap()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--packages"));
    }

    #[test]
    fn test_exit_code_version() {
        Command::cargo_bin("types-publisher")
            .unwrap()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_exit_code_unknown_package() {
        let temp_dir = create_test_project();
        fs::write(
            temp_dir.path().join("versions.json"),
            r#"{"changedTypings": [], "changedNotNeededPackages": ["ghost"]}"#,
        )
        .unwrap();

        offline_cmd(&temp_dir)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error:"))
            .stderr(predicate::str::contains("ghost"));
    }

    #[test]
    fn test_exit_code_missing_index() {
        let temp_dir = create_test_project();

        Command::cargo_bin("types-publisher")
            .unwrap()
            .current_dir(temp_dir.path())
            .args(["--packages", "missing.json", "--offline"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn test_exit_code_offline_without_cache() {
        let temp_dir = create_test_project();

        Command::cargo_bin("types-publisher")
            .unwrap()
            .current_dir(temp_dir.path())
            .args(["--packages", "index.json", "--offline"])
            .assert()
            .code(1);
    }

    #[test]
    fn test_exit_code_missing_packages_arg() {
        Command::cargo_bin("types-publisher")
            .unwrap()
            .assert()
            .failure();
    }
}

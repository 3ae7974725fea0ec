//! Tests for the rexm binary.
//!
//! These tests exercise the compiled binary using assert_cmd against a
//! miniature raylib tree.

use assert_cmd::Command;
use predicates::prelude::*;
use rexm_test_utils::collection::EXAMPLES_DIR;
use rexm_test_utils::{TestCollection, TestExample};

/// Get a Command for the rexm binary with no configuration from the
/// environment.
fn rexm_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rexm"));
    for key in [
        "REXM_CONFIG",
        "REXM_EXAMPLES_BASE_PATH",
        "REXM_EXAMPLES_WEB_PATH",
        "REXM_EXAMPLES_TEMPLATE_FILE_PATH",
        "REXM_EXAMPLES_TEMPLATE_SCREENSHOT_PATH",
        "REXM_EXAMPLES_COLLECTION_FILE_PATH",
        "REXM_EXAMPLES_VS2022_SLN_FILE",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

fn rexm_in(tree: &TestCollection) -> Command {
    let config = tree.write_config_file();
    let mut cmd = rexm_cmd();
    cmd.arg("--config").arg(config);
    cmd
}

// ============================================================================
// Help and configuration
// ============================================================================

#[test]
fn test_help_output() {
    rexm_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("raylib examples collection"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_missing_configuration_exits_with_one() {
    rexm_cmd()
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("REXM_EXAMPLES_BASE_PATH"));
}

#[test]
fn test_missing_examples_root_is_fatal() {
    let tree = TestCollection::new();
    let config = tree.write_config_file();
    std::fs::remove_dir_all(tree.path(EXAMPLES_DIR)).unwrap();

    rexm_cmd()
        .arg("--config")
        .arg(config)
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("examples root not found"));
}

#[test]
fn test_environment_configuration() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));

    rexm_cmd()
        .env("REXM_EXAMPLES_BASE_PATH", tree.path(EXAMPLES_DIR))
        .env("REXM_EXAMPLES_WEB_PATH", tree.path("raylib.com/examples"))
        .env(
            "REXM_EXAMPLES_TEMPLATE_FILE_PATH",
            tree.path("raylib/examples/examples_template.c"),
        )
        .env(
            "REXM_EXAMPLES_TEMPLATE_SCREENSHOT_PATH",
            tree.path("raylib/examples/examples_template.png"),
        )
        .env(
            "REXM_EXAMPLES_COLLECTION_FILE_PATH",
            tree.path("raylib/examples/examples_list.txt"),
        )
        .env(
            "REXM_EXAMPLES_VS2022_SLN_FILE",
            tree.path("raylib/projects/VS2022/raylib.sln"),
        )
        .arg("validate")
        .assert()
        .success();

    tree.assert_file_exists(&format!("{EXAMPLES_DIR}/examples_validation.md"));
}

// ============================================================================
// validate / update
// ============================================================================

#[test]
fn test_validate_writes_both_reports() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));

    rexm_in(&tree)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 1 examples have issues"));

    tree.assert_file_contains("reports/examples_validation.md", "core_basic_window");
    tree.assert_file_contains("reports/examples_issues.md", "core_basic_window");
}

#[test]
fn test_validate_json_output() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));
    tree.add(&TestExample::new("shapes_basic_shapes"));

    let output = rexm_in(&tree).args(["validate", "--json"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["success"], true);
    assert_eq!(report["examples"].as_array().map(Vec::len), Some(2));
    assert_eq!(report["examples"][0]["name"], "core_basic_window");
}

#[test]
fn test_update_regenerates_artifacts_without_toolchain() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));

    rexm_in(&tree)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("web output not rebuilt"));

    tree.assert_file_contains(&format!("{EXAMPLES_DIR}/Makefile"), "core/core_basic_window");
    tree.assert_file_contains(&format!("{EXAMPLES_DIR}/README.md"), "core_basic_window");
    tree.assert_file_exists("reports/examples_issues.md");
}

// ============================================================================
// create / rename / remove / build
// ============================================================================

#[test]
fn test_create_then_remove() {
    let tree = TestCollection::new();

    rexm_in(&tree)
        .args(["create", "text_hello_world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created text_hello_world"));
    tree.assert_file_exists(&format!("{EXAMPLES_DIR}/text/text_hello_world.c"));

    rexm_in(&tree)
        .args(["remove", "text_hello_world"])
        .assert()
        .success();
    tree.assert_file_not_exists(&format!("{EXAMPLES_DIR}/text/text_hello_world.c"));
}

#[test]
fn test_add_resolves_relative_paths() {
    let tree = TestCollection::new();
    let example = TestExample::new("shapes_bouncing_ball");
    tree.write("incoming/shapes_bouncing_ball.c", &example.source());

    rexm_in(&tree)
        .current_dir(tree.root())
        .args(["add", "incoming/shapes_bouncing_ball.c"])
        .assert()
        .success();

    tree.assert_file_exists(&format!("{EXAMPLES_DIR}/shapes/shapes_bouncing_ball.c"));
    assert!(tree.store().contains(&example.store_line()));
}

#[test]
fn test_add_missing_file_fails() {
    let tree = TestCollection::new();

    rexm_in(&tree)
        .current_dir(tree.root())
        .args(["add", "incoming/core_nothing_here.c"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("core_nothing_here.c"));
}

#[test]
fn test_create_with_unknown_category_fails() {
    let tree = TestCollection::new();

    rexm_in(&tree)
        .args(["create", "widgets_button"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unknown category"))
        .stderr(predicate::str::contains("Could not create widgets_button"));
}

#[test]
fn test_rename_unknown_example_fails() {
    let tree = TestCollection::new();

    rexm_in(&tree)
        .args(["rename", "core_missing", "core_other"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_build_without_toolchain_fails() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));

    rexm_in(&tree)
        .args(["build", "core_basic_window"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("rexm-no-such-make-command"));
}

#[test]
fn test_testlog_writes_platform_report() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));
    tree.write(
        &format!("{EXAMPLES_DIR}/core/logs/core_basic_window.build.log"),
        "core_basic_window.c:3:1: warning: unused variable 'x'\n",
    );

    rexm_in(&tree)
        .args(["testlog", "core"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 1 tested examples have issues"));

    let platform = rexm_core::testing::host_platform();
    let report = format!("reports/{}", rexm_core::testing::testing_report_file(platform));
    tree.assert_file_contains(&report, "| core_basic_window");
    tree.assert_file_contains(&report, &format!("## Tested Platform: {platform}"));
}

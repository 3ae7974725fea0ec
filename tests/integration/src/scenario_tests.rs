//! Scenarios that cross the store, the synchronizer and the engine
//!
//! Each test starts from a tree that is damaged or hand-edited in one
//! specific way and checks what update or validate makes of it.

use pretty_assertions::assert_eq;
use rexm_core::{Engine, EngineConfig, Severity};
use rexm_test_utils::collection::{EXAMPLES_DIR, SOLUTION_FILE, STORE_FILE};
use rexm_test_utils::{TestCollection, TestExample};

#[test]
fn test_store_comments_and_malformed_lines_survive_update() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));
    let mut store = tree.store();
    store.push_str("core;core_half_written;★☆☆☆\n");
    tree.write(STORE_FILE, &store);

    let report = tree.engine().update();

    assert!(report.success);
    assert_eq!(tree.store(), store);
    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning && d.message.contains("skipped"))
    );
    assert_eq!(report.examples.len(), 1);
}

#[test]
fn test_hand_written_build_file_text_is_kept() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("shaders_basic_lighting"));

    assert!(tree.engine().update().success);

    let makefile = tree.read(&format!("{EXAMPLES_DIR}/Makefile"));
    assert!(makefile.starts_with("# raylib examples Makefile\nCC = gcc\n\n#EXAMPLES_LIST_START\n"));
    assert!(makefile.ends_with("#EXAMPLES_LIST_END\n\nCURRENT_MAKEFILE = $(lastword $(MAKEFILE_LIST))\n"));
    assert!(makefile.contains("SHADERS = \\\n    shaders/shaders_basic_lighting\n"));
}

#[test]
fn test_second_update_is_a_no_op() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));
    tree.add(&TestExample::new("text_font_spritefont").resource("resources/custom_mecha.png"));

    let first = tree.engine().update();
    assert!(first.success);
    assert!(!first.actions.is_empty());

    let second = tree.engine().update();
    assert!(second.success);
    assert!(second.actions.is_empty(), "{:?}", second.actions);
    assert!(second.diagnostics.is_empty(), "{:?}", second.diagnostics);
}

#[test]
fn test_examples_found_on_disk_are_fully_integrated() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));
    tree.add_files_only(&TestExample::new("models_loading_gltf").stars(2));

    let report = tree.engine().update();

    assert!(report.success);
    assert!(tree.store().contains("models;models_loading_gltf;★★☆☆;1.0;1.0;\"Ray\";@raysan5"));
    assert_eq!(report.issues().count(), 0);
    tree.assert_file_exists("raylib/projects/VS2022/examples/models_loading_gltf.vcxproj");
}

#[test]
fn test_crlf_solution_keeps_its_line_endings() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("audio_sound_loading"));
    let crlf = tree.read(SOLUTION_FILE).replace('\n', "\r\n");
    tree.write(SOLUTION_FILE, &crlf);

    assert!(tree.engine().update().success);

    let solution = tree.read(SOLUTION_FILE);
    assert!(solution.contains("\"audio_sound_loading\""));
    assert!(!solution.replace("\r\n", "").contains('\n'));
}

#[test]
fn test_engine_from_config_file() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));
    let path = tree.write_config_file();

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.make_command, "rexm-no-such-make-command");
    assert_eq!(config.reports_dir().as_str(), rexm_fs::NormalizedPath::new(tree.path("reports")).as_str());

    let engine = Engine::new(config).unwrap();
    let report = engine.validate();
    assert!(report.success);
    assert_eq!(report.examples.len(), 1);

    // Web builds fail without a toolchain but never fail an update
    let updated = engine.update();
    assert!(updated.success);
    assert!(
        updated
            .diagnostics
            .iter()
            .any(|d| d.message.starts_with("web output not rebuilt"))
    );
}

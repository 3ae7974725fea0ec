//! End-to-end lifecycle of an examples collection
//!
//! Exercises the complete flow on one tree: update -> create -> add ->
//! rename -> remove -> validate, checking the store, the generated
//! artifacts and the reports after each step.

use pretty_assertions::assert_eq;
use rexm_core::{ExampleRecord, OperationReport, ReportFilter, render_report};
use rexm_fs::NormalizedPath;
use rexm_test_utils::collection::{EXAMPLES_DIR, SOLUTION_FILE, WEB_DATA_FILE, WEB_DIR};
use rexm_test_utils::{FakeBuilder, TestCollection, TestExample};

fn assert_ok(report: &OperationReport) {
    assert!(report.success, "operation failed: {:#?}", report.diagnostics);
}

fn names(records: &[ExampleRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

fn issues(report: &OperationReport) -> Vec<String> {
    report
        .issues()
        .map(|r| format!("{}: {}", r.name, r.status))
        .collect()
}

#[test]
fn test_full_lifecycle() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));
    tree.add(&TestExample::new("shapes_basic_shapes").stars(2));
    tree.add(&TestExample::new("audio_module_playing").resource("resources/country.mp3"));
    let builder = FakeBuilder::new();
    let engine = tree.engine_with(builder.clone());

    // 1. A hand-maintained tree is brought in sync
    let updated = engine.update();
    assert_ok(&updated);
    assert!(issues(&updated).is_empty(), "{:?}", issues(&updated));
    assert_eq!(
        builder.built(),
        vec!["core_basic_window", "shapes_basic_shapes", "audio_module_playing"]
    );

    // 2. A new example from the template
    assert_ok(&engine.create("core_input_gestures"));

    // 3. An example written elsewhere
    let incoming = TestExample::new("textures_sprite_anim").stars(3).resource("resources/scarfy.png");
    tree.write("incoming/textures_sprite_anim.c", &incoming.source());
    tree.write_bytes("incoming/textures_sprite_anim.png", b"scarfy screenshot");
    tree.write("incoming/resources/scarfy.png", "scarfy");
    assert_ok(&engine.add(&NormalizedPath::new(tree.path("incoming/textures_sprite_anim.c"))));

    // 4. Moved to another category
    assert_ok(&engine.rename("shapes_basic_shapes", "models_basic_shapes"));

    // 5. Dropped
    assert_ok(&engine.remove("audio_module_playing"));

    let validated = engine.validate();
    assert_ok(&validated);
    assert_eq!(
        names(&validated.examples),
        vec![
            "core_basic_window",
            "core_input_gestures",
            "textures_sprite_anim",
            "models_basic_shapes",
        ]
    );
    // Only the created example still carries the template screenshot
    assert_eq!(issues(&validated), vec!["core_input_gestures: invalid screenshot"]);

    let makefile = tree.read(&format!("{EXAMPLES_DIR}/Makefile"));
    assert!(makefile.contains("CORE = \\\n    core/core_basic_window \\\n    core/core_input_gestures\n"));
    assert!(makefile.contains("MODELS = \\\n    models/models_basic_shapes\n"));
    assert!(!makefile.contains("SHAPES"));
    assert!(!makefile.contains("audio"));

    let readme = tree.read(&format!("{EXAMPLES_DIR}/README.md"));
    assert!(readme.contains("## EXAMPLES COLLECTION [TOTAL: 4]"));
    assert!(readme.contains("### category: shapes [0]"));

    let web_data = tree.read(WEB_DATA_FILE);
    assert!(web_data.contains("exampleEntry('⭐️⭐️⭐️☆', 'textures', 'sprite_anim')"));
    assert!(web_data.contains("exampleEntry('⭐️⭐️☆☆', 'models', 'basic_shapes')"));

    let solution = tree.read(SOLUTION_FILE);
    for name in names(&validated.examples) {
        assert!(solution.contains(&format!("\"{name}\"")), "{name} not in solution");
    }
    assert!(!solution.contains("audio_module_playing"));
    assert!(!solution.contains("shapes_basic_shapes"));

    assert!(tree.exists(&format!("{WEB_DIR}/textures/textures_sprite_anim.data")));
    assert!(!tree.exists(&format!("{WEB_DIR}/audio/audio_module_playing.html")));
    assert!(!tree.exists(&format!("{WEB_DIR}/shapes/shapes_basic_shapes.html")));
}

#[test]
fn test_reports_from_update() {
    let tree = TestCollection::new();
    let clean = TestExample::new("core_basic_window");
    let broken = TestExample::new("text_font_loading");
    tree.add(&clean);
    tree.add(&broken);
    std::fs::remove_file(tree.example_path(&broken, "png")).unwrap();

    let report = tree.engine().update();
    assert_ok(&report);

    let full = render_report(&report.examples, ReportFilter::All);
    let only_issues = render_report(&report.examples, ReportFilter::IssuesOnly);

    assert!(full.starts_with("# EXAMPLES COLLECTION - VALIDATION REPORT\n"));
    assert!(full.contains(" - [PNG]   : Missing screenshot .png\n"));
    assert!(full.contains("| core_basic_window "));
    assert!(full.contains("| text_font_loading "));
    assert!(!only_issues.contains("| core_basic_window "));

    let row = only_issues
        .lines()
        .find(|l| l.starts_with("| text_font_loading "))
        .unwrap();
    assert_eq!(row.matches('❌').count(), 1);

    // The update itself asked for a screenshot
    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.subject == "text_font_loading" && d.message == "missing screenshot")
    );
}

#[test]
fn test_report_json_shape() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));

    let report = tree.engine().validate();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["examples"][0]["category"], "core");
    assert_eq!(json["examples"][0]["name"], "core_basic_window");
    assert!(json["diagnostics"].as_array().unwrap().is_empty());
}

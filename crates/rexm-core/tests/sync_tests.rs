//! Tests for artifact regeneration

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rexm_blocks::{MarkerPair, replace_region};
use rexm_core::sync::{Artifact, render_build_list, render_web_data, render_web_rules};
use rexm_core::{Category, Collection, Severity, Synchronizer};
use rexm_test_utils::collection::{EXAMPLES_DIR, WEB_DATA_FILE};
use rexm_test_utils::{TestCollection, TestExample};

fn collection(text: &str) -> Collection {
    Collection::parse(text).collection
}

#[test]
fn test_build_list_region_for_two_core_examples() {
    let markers = MarkerPair::new("#LIST_START", "#LIST_END");
    let artifact = "CC = gcc\n#LIST_START\nstale entries\n#LIST_END\nall: $(CORE)\n";
    let examples = collection(concat!(
        "core;core_b;★☆☆☆;1.0;1.0;\"Ray\";@raysan5\n",
        "core;core_a;★☆☆☆;1.0;1.0;\"Ray\";@raysan5\n",
    ));

    let updated = replace_region(artifact, markers, &render_build_list(&examples)).unwrap();
    assert_eq!(
        updated,
        "CC = gcc\n#LIST_START\nCORE = \\\n    core/core_a \\\n    core/core_b\n#LIST_END\nall: $(CORE)\n"
    );
}

#[test]
fn test_build_list_snapshot() {
    let examples = collection(concat!(
        "shapes;shapes_logo_raylib;★☆☆☆;1.0;1.0;\"Ray\";@raysan5\n",
        "core;core_input_keys;★☆☆☆;1.0;1.0;\"Ray\";@raysan5\n",
        "core;core_basic_window;★☆☆☆;1.0;1.0;\"Ray\";@raysan5\n",
        "others;others_rlgl_standalone;★★★★;1.0;4.0;\"Ray\";@raysan5\n",
    ));
    insta::assert_snapshot!(render_build_list(&examples), @r"
CORE = \
    core/core_basic_window \
    core/core_input_keys

SHAPES = \
    shapes/shapes_logo_raylib

OTHERS = \
    others/others_rlgl_standalone
");
}

#[test]
fn test_web_rules_preload_resources_and_skip_others() {
    let mut examples = collection(concat!(
        "shaders;shaders_grayscale;★★☆☆;1.0;4.0;\"Ray\";@raysan5\n",
        "others;others_rlgl_standalone;★★★★;1.0;4.0;\"Ray\";@raysan5\n",
    ));
    for record in examples.records_mut() {
        if record.category == Category::Shaders {
            record.resources = vec!["resources/shaders/glsl%i/grayscale.fs".to_string()];
        }
    }

    let rules = render_web_rules(&examples);
    assert!(rules.contains("SHADERS = \\\n    shaders/shaders_grayscale\n"));
    assert!(rules.contains(
        "shaders/shaders_grayscale: shaders/shaders_grayscale.c\n\t$(CC) -o $@$(EXT) $< $(CFLAGS) $(INCLUDE_PATHS) $(LDFLAGS) $(LDLIBS) -D$(PLATFORM) \\\n    --preload-file shaders/resources/shaders/glsl100/grayscale.fs@resources/shaders/glsl100/grayscale.fs"
    ));
    assert!(rules.contains("all: $(CORE) $(SHAPES) $(TEXTURES) $(TEXT) $(MODELS) $(SHADERS) $(AUDIO)\n"));
    assert!(!rules.contains("others"));
    assert!(!rules.contains("OTHERS"));
}

#[test]
fn test_web_data_last_entry_closes_array() {
    let examples = collection(concat!(
        "core;core_basic_window;★☆☆☆;1.0;1.0;\"Ray\";@raysan5\n",
        "audio;audio_module_playing;★★☆☆;1.5;3.5;\"Ray\";@raysan5\n",
        "others;others_rlgl_standalone;★★★★;1.0;4.0;\"Ray\";@raysan5\n",
    ));
    assert_eq!(
        render_web_data(&examples),
        "\n    var exampleData = [\n        exampleEntry('⭐️☆☆☆', 'core', 'basic_window'),\n        exampleEntry('⭐️⭐️☆☆', 'audio', 'module_playing')];\n"
    );
}

fn arbitrary_collection() -> impl Strategy<Value = Collection> {
    prop::collection::vec(
        (prop::sample::select(Category::ALL.to_vec()), "[a-z]{1,10}", 0u8..=4),
        0..25,
    )
    .prop_map(|entries| {
        let text: String = entries
            .into_iter()
            .map(|(category, suffix, stars)| {
                let stars = usize::from(stars);
                format!(
                    "{category};{category}_{suffix};{}{};1.0;2.0;\"Ray\";@raysan5\n",
                    "★".repeat(stars),
                    "☆".repeat(4 - stars)
                )
            })
            .collect();
        Collection::parse(&text).collection
    })
}

proptest! {
    #[test]
    fn test_regeneration_is_idempotent(examples in arbitrary_collection()) {
        for artifact in Artifact::ALL {
            let markers = artifact.markers();
            let content = format!(
                "hand written\r\n{}\nold body\n{}\ntrailer\n",
                markers.start, markers.end
            );
            let body = artifact.render(&examples);
            let once = replace_region(&content, markers, &body).unwrap();
            let twice = replace_region(&once, markers, &body).unwrap();
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.starts_with("hand written\r\n"));
            prop_assert!(once.ends_with("trailer\n"));
        }
    }

    #[test]
    fn test_rendered_regions_list_every_covered_record(examples in arbitrary_collection()) {
        for artifact in Artifact::ALL {
            let body = artifact.render(&examples);
            for record in examples.records() {
                prop_assert_eq!(artifact.lists(&body, record), artifact.covers(record));
            }
        }
    }
}

#[test]
fn test_sync_all_keeps_hand_written_text() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));
    let config = tree.config();
    let fs = rexm_fs::LocalFs::new();
    let synchronizer = Synchronizer::new(&fs, &config);
    let mut examples = collection(&tree.store());

    let report = synchronizer.sync_all(&mut examples);
    assert!(report.success, "{:?}", report.diagnostics);
    assert_eq!(report.actions.len(), 4);

    let readme = tree.read(&format!("{EXAMPLES_DIR}/README.md"));
    assert!(readme.starts_with("# raylib examples\n\nHand-written introduction.\n\n## EXAMPLES COLLECTION [TOTAL: 1]\n"));
    assert!(readme.contains("[core_basic_window](core/core_basic_window.c)"));
    assert!(readme.ends_with("<!-- EXAMPLES_COLLECTION_END -->\n\nHand-written footer.\n"));

    // A second pass has nothing to do
    let again = synchronizer.sync_all(&mut examples);
    assert!(again.success);
    assert!(again.actions.is_empty());
}

#[test]
fn test_missing_sentinel_fails_only_that_artifact() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));
    tree.write(&format!("{EXAMPLES_DIR}/Makefile"), "CC = gcc\n#EXAMPLES_LIST_START\n");
    let config = tree.config();
    let fs = rexm_fs::LocalFs::new();
    let mut examples = collection(&tree.store());

    let report = Synchronizer::new(&fs, &config).sync_all(&mut examples);

    assert!(!report.success);
    let errors: Vec<_> = report.diagnostics.iter().filter(|d| d.is_error()).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].subject.ends_with("Makefile"));
    // Untouched on failure
    assert_eq!(tree.read(&format!("{EXAMPLES_DIR}/Makefile")), "CC = gcc\n#EXAMPLES_LIST_START\n");
    // The others were still regenerated
    tree.assert_file_contains(&format!("{EXAMPLES_DIR}/Makefile.Web"), "core/core_basic_window");
    tree.assert_file_contains(WEB_DATA_FILE, "exampleEntry('⭐️☆☆☆', 'core', 'basic_window')");
}

#[test]
fn test_missing_web_data_file_is_a_warning() {
    let tree = TestCollection::new();
    tree.add(&TestExample::new("core_basic_window"));
    std::fs::remove_file(tree.path(WEB_DATA_FILE)).unwrap();
    let config = tree.config();
    let fs = rexm_fs::LocalFs::new();
    let mut examples = collection(&tree.store());

    let report = Synchronizer::new(&fs, &config).sync_all(&mut examples);

    assert!(report.success);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].severity, Severity::Warning);
    tree.assert_file_not_exists(WEB_DATA_FILE);
}

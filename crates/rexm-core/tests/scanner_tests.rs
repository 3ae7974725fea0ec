//! Tests for resource path extraction

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rexm_core::resources::{self, MAX_RESOURCE_PATH_LEN};
use rstest::rstest;

#[test]
fn test_export_destination_is_not_a_resource() {
    let source = r#"
    Texture2D logo = LoadTexture("shapes/resources/logo.png");
    Image img = LoadImageFromTexture(logo);
    ExportImage(img, "out/cap.png");
"#;
    assert_eq!(resources::scan(source), vec!["shapes/resources/logo.png"]);
}

#[test]
fn test_results_are_deduplicated_in_first_seen_order() {
    let source = r#"
    Sound fx = LoadSound("resources/sound.wav");
    Music music = LoadMusicStream("resources/country.mp3");
    Sound again = LoadSound("resources/sound.wav");
"#;
    assert_eq!(
        resources::scan(source),
        vec!["resources/sound.wav", "resources/country.mp3"]
    );
}

#[test]
fn test_placeholder_paths_are_returned_unexpanded() {
    let source = r#"Shader shader = LoadShader(0, TextFormat("resources/shaders/glsl%i/grayscale.fs", GLSL_VERSION));"#;
    let found = resources::scan(source);
    assert_eq!(found, vec!["resources/shaders/glsl%i/grayscale.fs"]);

    assert_eq!(
        resources::expand_all(&found[0]),
        vec![
            "resources/shaders/glsl100/grayscale.fs",
            "resources/shaders/glsl120/grayscale.fs",
            "resources/shaders/glsl330/grayscale.fs",
        ]
    );
    assert_eq!(
        resources::expand_web(&found[0]),
        "resources/shaders/glsl100/grayscale.fs"
    );
}

#[rstest]
#[case(r#"TakeScreenshot("screenshot.png");"#)]
#[case(r#"SaveFileText("resources/notes.txt", text);"#)]
#[case(r#"ExportWave(wave, "recorded.wav");"#)]
#[case(r#"TraceLog("saved.png");"#)]
#[case(r#"DrawText("no extension here", 10, 10, 20, DARKGRAY);"#)]
#[case(r#"LoadTexture("");"#)]
fn test_non_resources_are_ignored(#[case] source: &str) {
    assert!(resources::scan(source).is_empty(), "{source}");
}

#[test]
fn test_extension_match_ignores_case() {
    assert_eq!(
        resources::scan(r#"LoadTexture("resources/LOGO.PNG");"#),
        vec!["resources/LOGO.PNG"]
    );
}

#[test]
fn test_overlong_literals_are_ignored() {
    let long = format!("{}.png", "a".repeat(MAX_RESOURCE_PATH_LEN));
    assert!(resources::scan(&format!("LoadTexture(\"{long}\");")).is_empty());
}

fn source_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|p| format!("LoadTexture(\"resources/{p}.png\");\n")),
        "[a-z]{1,8}".prop_map(|p| format!("LoadSound(\"resources/{p}.wav\");\n")),
        "[a-z]{1,8}".prop_map(|p| format!("ExportImage(image, \"{p}.png\");\n")),
        "[a-z ]{0,16}".prop_map(|t| format!("DrawText(\"{t}\", 10, 10, 20, GRAY);\n")),
        Just("LoadShader(0, \"resources/glsl%i/base.vs\");\n".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_scan_is_deterministic_and_duplicate_free(
        fragments in prop::collection::vec(source_fragment(), 0..30)
    ) {
        let source = fragments.concat();
        let first = resources::scan(&source);
        let second = resources::scan(&source);
        prop_assert_eq!(&first, &second);

        let mut unique = first.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), first.len());
    }
}

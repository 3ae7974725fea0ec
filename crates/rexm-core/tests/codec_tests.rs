//! Tests for the store line codec and collection loading

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rexm_core::collection::MAX_EXAMPLES;
use rexm_core::record::RecordParseError;
use rexm_core::{Category, Collection, ExampleRecord};
use rstest::rstest;

#[test]
fn test_parse_basic_window_line() {
    let line = "core;core_basic_window;★★☆☆;1.0;1.0;\"Ray\";@raysan5";
    let record = ExampleRecord::parse_line(line).unwrap();

    assert_eq!(record.category, Category::Core);
    assert_eq!(record.name, "core_basic_window");
    assert_eq!(record.stars, 2);
    assert_eq!(record.version_created.as_str(), "1.0");
    assert_eq!(record.version_updated.as_str(), "1.0");
    assert_eq!(record.author, "Ray");
    assert_eq!(record.author_handle, "raysan5");
    assert_eq!(record.to_line(), line);
}

#[test]
fn test_unknown_glyphs_count_as_unfilled() {
    let record =
        ExampleRecord::parse_line("shapes;shapes_lines_bezier;★⭐☆x;1.7;1.7;\"Ray\";@raysan5").unwrap();
    assert_eq!(record.stars, 1);
    // Serialization normalizes the glyphs
    assert!(record.to_line().contains(";★☆☆☆;"));
}

#[rstest]
#[case("core;core_basic_window;★☆☆☆;1.0;1.0;\"Ray\"", "fields")]
#[case("core;core_basic_window;★☆☆☆;1.0;1.0;\"Ray\";@raysan5;extra", "fields")]
#[case("widgets;widgets_button;★☆☆☆;1.0;1.0;\"Ray\";@raysan5", "category")]
#[case("core;core basic;★☆☆☆;1.0;1.0;\"Ray\";@raysan5", "name")]
#[case("core;core_basic_window;★★★★★;1.0;1.0;\"Ray\";@raysan5", "stars")]
#[case("core;core_basic_window;★☆☆☆;one;1.0;\"Ray\";@raysan5", "version")]
fn test_malformed_lines_are_rejected(#[case] line: &str, #[case] reason: &str) {
    let err = ExampleRecord::parse_line(line).unwrap_err();
    let matches = match reason {
        "fields" => matches!(err, RecordParseError::FieldCount { .. }),
        "category" => matches!(err, RecordParseError::UnknownCategory { .. }),
        "name" => matches!(err, RecordParseError::InvalidName { .. }),
        "stars" => matches!(err, RecordParseError::TooManyStars { .. }),
        _ => matches!(err, RecordParseError::InvalidVersion { .. }),
    };
    assert!(matches, "unexpected error for {reason}: {err:?}");
}

#[test]
fn test_load_skips_malformed_lines_and_continues() {
    let text = "\
# header comment
core;core_basic_window;★☆☆☆;1.0;1.0;\"Ray\";@raysan5
core;core_broken;★☆☆☆;1.0
shapes;shapes_basic_shapes;★☆☆☆;1.0;4.2;\"Ray\";@raysan5
";
    let loaded = Collection::parse(text);

    assert_eq!(loaded.collection.len(), 2);
    assert!(loaded.collection.contains("shapes_basic_shapes"));
    assert_eq!(loaded.diagnostics.len(), 1);
    assert!(!loaded.diagnostics[0].is_error());
    // Comments and malformed lines survive a rewrite
    assert_eq!(loaded.collection.render(), text);
}

#[test]
fn test_duplicate_names_are_dropped_on_load() {
    let loaded = Collection::parse(concat!(
        "core;core_basic_window;★☆☆☆;1.0;1.0;\"Ray\";@raysan5\n",
        "core;core_basic_window;★★☆☆;1.0;1.0;\"Ray\";@raysan5\n",
    ));
    assert_eq!(loaded.collection.len(), 1);
    assert_eq!(loaded.collection.get("core_basic_window").unwrap().stars, 1);
    assert_eq!(loaded.diagnostics.len(), 1);
}

#[rstest]
#[case::at_limit(MAX_EXAMPLES, 0)]
#[case::over_limit(MAX_EXAMPLES + 1, 1)]
fn test_collection_size_ceiling(#[case] count: usize, #[case] expected: usize) {
    let text: String = (0..count)
        .map(|index| format!("core;core_example_{index};★☆☆☆;1.0;1.0;\"Ray\";@raysan5\n"))
        .collect();
    let loaded = Collection::parse(&text);

    // Records past the ceiling are still loaded, only reported
    assert_eq!(loaded.collection.len(), count);
    assert_eq!(loaded.diagnostics.len(), expected);
    if let Some(diagnostic) = loaded.diagnostics.first() {
        assert!(!diagnostic.is_error());
        assert!(diagnostic.message.contains(&MAX_EXAMPLES.to_string()));
    }
}

fn record_line() -> impl Strategy<Value = String> {
    (
        prop::sample::select(Category::ALL.to_vec()),
        "[a-z0-9_]{1,20}",
        0u8..=4,
        "[0-9]{1,2}\\.[0-9]{1,2}",
        "[0-9]{1,2}\\.[0-9]{1,2}",
        "[A-Za-z][A-Za-z .]{0,20}",
        "[A-Za-z0-9_-]{1,16}",
    )
        .prop_map(|(category, suffix, stars, created, updated, author, handle)| {
            let stars = usize::from(stars);
            format!(
                "{category};{category}_{suffix};{}{};{created};{updated};\"{author}\";@{handle}",
                "★".repeat(stars),
                "☆".repeat(4 - stars)
            )
        })
}

proptest! {
    #[test]
    fn test_serialize_is_left_inverse_of_parse(line in record_line()) {
        let record = ExampleRecord::parse_line(&line).unwrap();
        prop_assert_eq!(record.to_line(), line);
    }

    #[test]
    fn test_loaded_names_are_unique(lines in prop::collection::vec(record_line(), 0..40)) {
        let loaded = Collection::parse(&lines.join("\n"));
        let mut names: Vec<&str> = loaded.collection.records().map(|r| r.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), total);
    }
}

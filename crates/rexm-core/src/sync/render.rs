//! Region bodies for each derived artifact
//!
//! Every renderer is a pure function of the collection. Resource lists
//! must already be populated on the records for the web build rules.

use crate::category::Category;
use crate::collection::Collection;
use crate::record::{DISPLAY_STAR, ExampleRecord, render_stars};
use crate::resources;

/// Build list: one variable per category, entries sorted by name.
///
/// Categories without examples are skipped.
///
/// # Example
///
/// ```
/// use rexm_core::{Collection, sync::render_build_list};
///
/// let loaded = Collection::parse(concat!(
///     "core;core_b;★☆☆☆;1.0;1.0;\"Ray\";@raysan5\n",
///     "core;core_a;★☆☆☆;1.0;1.0;\"Ray\";@raysan5\n",
/// ));
/// assert_eq!(
///     render_build_list(&loaded.collection),
///     "\nCORE = \\\n    core/core_a \\\n    core/core_b\n"
/// );
/// ```
pub fn render_build_list(collection: &Collection) -> String {
    render_variables(collection, Category::ALL.into_iter())
}

/// Web build rules: variables, aggregate targets, then one compile rule per
/// example. `others` is left out entirely.
pub fn render_web_rules(collection: &Collection) -> String {
    let mut out = render_variables(collection, Category::web_built());
    // render_variables leaves the body ending in a single newline
    out.push('\n');

    out.push_str("# Default target entry\n");
    let all: Vec<String> = Category::web_built()
        .map(|c| format!("$({})", c.variable_name()))
        .collect();
    out.push_str(&format!("all: {}\n\n", all.join(" ")));
    for category in Category::web_built() {
        out.push_str(&format!("{}: $({})\n", category, category.variable_name()));
    }
    out.push('\n');

    for category in Category::web_built() {
        let examples = collection.sorted_by_category(category);
        if examples.is_empty() {
            continue;
        }
        out.push_str(&format!("# Compile {} examples\n", category.variable_name()));
        for record in examples {
            out.push_str(&compile_rule(record));
        }
    }

    trim_trailing_blank(out)
}

fn compile_rule(record: &ExampleRecord) -> String {
    let stem = record.relative_stem();
    let mut rule = format!("{stem}: {stem}.c\n");
    rule.push_str("\t$(CC) -o $@$(EXT) $< $(CFLAGS) $(INCLUDE_PATHS) $(LDFLAGS) $(LDLIBS) -D$(PLATFORM)");

    if record.resources.is_empty() {
        rule.push_str("\n\n");
        return rule;
    }

    for path in &record.resources {
        let path = resources::expand_web(path);
        rule.push_str(&format!(
            " \\\n    --preload-file {}/{path}@{path}",
            record.category
        ));
    }
    rule.push_str("\n\n");
    rule
}

fn render_variables(collection: &Collection, categories: impl Iterator<Item = Category>) -> String {
    let mut out = String::from("\n");

    for category in categories {
        let examples = collection.sorted_by_category(category);
        if examples.is_empty() {
            continue;
        }
        let entries: Vec<String> = examples
            .iter()
            .map(|r| format!("    {}", r.relative_stem()))
            .collect();
        out.push_str(&format!(
            "{} = \\\n{}\n\n",
            category.variable_name(),
            entries.join(" \\\n")
        ));
    }

    trim_trailing_blank(out)
}

/// Generated blocks are separated by blank lines; the region itself ends
/// with exactly one newline before the end sentinel.
fn trim_trailing_blank(mut out: String) -> String {
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

/// README listing: total, then per category a heading, description and
/// table in collection order.
pub fn render_readme(collection: &Collection) -> String {
    let mut out = format!(" [TOTAL: {}]\n", collection.len());

    for category in Category::ALL {
        let examples = collection.by_category(category);
        out.push_str(&format!(
            "\n### category: {} [{}]\n\n{}\n\n",
            category,
            examples.len(),
            category.description()
        ));
        out.push_str("|  example  | image  | difficulty<br>level | version<br>created | last version<br>updated | original<br>developer |\n");
        out.push_str("|-----------|--------|:-------------------:|:------------------:|:-----------------------:|:----------------------|\n");

        for record in examples {
            out.push_str(&readme_row(record));
        }
    }

    out.push_str("\nSome example missing? As always, contributions are welcome, feel free to send new examples!\n");
    out.push_str("Here is an [examples template](examples_template.c) with instructions to start with!\n");
    out
}

/// Row fragment the validator looks for in the README.
pub(crate) fn readme_link(record: &ExampleRecord) -> String {
    format!("[{}]({}.c)", record.name, record.relative_stem())
}

fn readme_row(record: &ExampleRecord) -> String {
    let stem = record.relative_stem();
    let author = if record.author_handle.is_empty() {
        record.author.clone()
    } else {
        format!("[{}](https://github.com/{})", record.author, record.author_handle)
    };
    format!(
        "| {} | <img src=\"{stem}.png\" alt=\"{}\" width=\"80\"> | {} | {} | {} | {author} |\n",
        readme_link(record),
        record.name,
        render_stars(record.stars, DISPLAY_STAR),
        record.version_created,
        record.version_updated,
    )
}

/// Web data array: web-built categories in order, names without their
/// category prefix. The last entry closes the array.
pub fn render_web_data(collection: &Collection) -> String {
    let entries: Vec<String> = Category::web_built()
        .flat_map(|category| collection.by_category(category))
        .map(|record| {
            format!(
                "        exampleEntry('{}', {})",
                render_stars(record.stars, DISPLAY_STAR),
                web_data_key(record)
            )
        })
        .collect();

    if entries.is_empty() {
        return "\n    var exampleData = [];\n".to_string();
    }
    format!("\n    var exampleData = [\n{}];\n", entries.join(",\n"))
}

/// `'core', 'basic_window'`, the part of an entry identifying the example.
pub(crate) fn web_data_key(record: &ExampleRecord) -> String {
    format!("'{}', '{}'", record.category, record.short_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collection(text: &str) -> Collection {
        let loaded = Collection::parse(text);
        assert!(loaded.diagnostics.is_empty(), "{:?}", loaded.diagnostics);
        loaded.collection
    }

    const TWO_CATEGORIES: &str = concat!(
        "core;core_input_keys;★☆☆☆;1.0;1.0;\"Ray\";@raysan5\n",
        "core;core_basic_window;★☆☆☆;1.0;1.0;\"Ray\";@raysan5\n",
        "others;others_rlgl;★★★★;1.0;4.0;\"Ray\";@raysan5\n",
    );

    #[test]
    fn test_build_list_sorts_and_skips_empty() {
        assert_eq!(
            render_build_list(&collection(TWO_CATEGORIES)),
            concat!(
                "\n",
                "CORE = \\\n",
                "    core/core_basic_window \\\n",
                "    core/core_input_keys\n",
                "\n",
                "OTHERS = \\\n",
                "    others/others_rlgl\n",
            )
        );
    }

    #[test]
    fn test_web_rules_preload_resources() {
        let mut c = collection(TWO_CATEGORIES);
        if let Some(record) = c.get_mut("core_input_keys") {
            record.resources = vec![
                "resources/a.png".to_string(),
                "resources/glsl%i/b.fs".to_string(),
            ];
        }
        let rules = render_web_rules(&c);

        assert!(!rules.contains("OTHERS"));
        assert!(rules.contains("all: $(CORE) $(SHAPES) $(TEXTURES) $(TEXT) $(MODELS) $(SHADERS) $(AUDIO)\n"));
        assert!(rules.contains(concat!(
            "core/core_basic_window: core/core_basic_window.c\n",
            "\t$(CC) -o $@$(EXT) $< $(CFLAGS) $(INCLUDE_PATHS) $(LDFLAGS) $(LDLIBS) -D$(PLATFORM)\n\n",
        )));
        assert!(rules.ends_with(concat!(
            "core/core_input_keys: core/core_input_keys.c\n",
            "\t$(CC) -o $@$(EXT) $< $(CFLAGS) $(INCLUDE_PATHS) $(LDFLAGS) $(LDLIBS) -D$(PLATFORM) \\\n",
            "    --preload-file core/resources/a.png@resources/a.png \\\n",
            "    --preload-file core/resources/glsl100/b.fs@resources/glsl100/b.fs\n",
        )));
    }

    #[test]
    fn test_readme_keeps_collection_order() {
        let readme = render_readme(&collection(TWO_CATEGORIES));
        let keys = readme.find("[core_input_keys]").unwrap();
        let window = readme.find("[core_basic_window]").unwrap();
        assert!(keys < window);
        assert!(readme.starts_with(" [TOTAL: 3]\n\n### category: core [2]\n"));
        assert!(readme.contains("### category: shapes [0]"));
        assert!(readme.contains(
            "| [others_rlgl](others/others_rlgl.c) | <img src=\"others/others_rlgl.png\" alt=\"others_rlgl\" width=\"80\"> | ⭐️⭐️⭐️⭐️ | 1.0 | 4.0 | [Ray](https://github.com/raysan5) |\n"
        ));
    }

    #[test]
    fn test_web_data_closes_array_on_last_entry() {
        let data = render_web_data(&collection(TWO_CATEGORIES));
        assert_eq!(
            data,
            concat!(
                "\n    var exampleData = [\n",
                "        exampleEntry('⭐️☆☆☆', 'core', 'input_keys'),\n",
                "        exampleEntry('⭐️☆☆☆', 'core', 'basic_window')];\n",
            )
        );
    }

    #[test]
    fn test_web_data_empty() {
        let data = render_web_data(&collection("others;others_rlgl;★★★★;1.0;4.0;\"Ray\";@raysan5\n"));
        assert_eq!(data, "\n    var exampleData = [];\n");
    }
}

//! [`TestExample`]: one example described once, rendered as store line and source.

/// Metadata of a fixture example.
///
/// The rendered source header and store line agree, so a fresh example
/// validates without `INCONSISTENT_INFO`.
#[derive(Debug, Clone)]
pub struct TestExample {
    pub name: String,
    pub stars: u8,
    pub created: String,
    pub updated: String,
    pub author: String,
    pub handle: String,
    /// Paths loaded by the source, relative to the category directory
    pub resources: Vec<String>,
}

impl TestExample {
    /// One-star example by Ray (@raysan5), created and updated with 1.0.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            stars: 1,
            created: "1.0".to_string(),
            updated: "1.0".to_string(),
            author: "Ray".to_string(),
            handle: "raysan5".to_string(),
            resources: Vec::new(),
        }
    }

    pub fn stars(mut self, stars: u8) -> Self {
        self.stars = stars;
        self
    }

    pub fn versions(mut self, created: &str, updated: &str) -> Self {
        self.created = created.to_string();
        self.updated = updated.to_string();
        self
    }

    pub fn author(mut self, author: &str, handle: &str) -> Self {
        self.author = author.to_string();
        self.handle = handle.to_string();
        self
    }

    pub fn resource(mut self, path: &str) -> Self {
        self.resources.push(path.to_string());
        self
    }

    /// Category tag taken from the name prefix.
    pub fn category(&self) -> &str {
        self.name.split('_').next().unwrap_or(&self.name)
    }

    /// `basic_window` for `core_basic_window`.
    pub fn short_name(&self) -> &str {
        self.name
            .split_once('_')
            .map(|(_, rest)| rest)
            .unwrap_or(&self.name)
    }

    /// `category/name`
    pub fn stem(&self) -> String {
        format!("{}/{}", self.category(), self.name)
    }

    fn glyphs(&self, filled: &str) -> String {
        let stars = usize::from(self.stars.min(4));
        format!("{}{}", filled.repeat(stars), "☆".repeat(4 - stars))
    }

    pub fn store_line(&self) -> String {
        format!(
            "{};{};{};{};{};\"{}\";@{}",
            self.category(),
            self.name,
            self.glyphs("★"),
            self.created,
            self.updated,
            self.author,
            self.handle
        )
    }

    pub fn source(&self) -> String {
        let title = self.short_name().replace('_', " ");
        let mut source = format!(
            "/*******************************************************************************************
*
*   raylib [{category}] example - {title}
*
*   Example complexity rating: [{glyphs}] {stars}/4
*
*   Example originally created with raylib {created}, last time updated with raylib {updated}
*
*   Example licensed under an unmodified zlib/libpng license, which is an OSI-certified,
*   BSD-like license that allows static linking with closed source software
*
*   Copyright (c) 2014-2025 {author} (@{handle})
*
********************************************************************************************/

#include \"raylib.h\"

int main(void)
{{
    const int screenWidth = 800;
    const int screenHeight = 450;

    InitWindow(screenWidth, screenHeight, \"raylib [{category}] example - {title}\");
",
            category = self.category(),
            glyphs = self.glyphs("★"),
            stars = self.stars,
            created = self.created,
            updated = self.updated,
            author = self.author,
            handle = self.handle,
        );
        for resource in &self.resources {
            source.push_str(&format!("    Texture2D texture = LoadTexture(\"{resource}\");\n"));
        }
        source.push_str("\n    CloseWindow();\n\n    return 0;\n}\n");
        source
    }
}

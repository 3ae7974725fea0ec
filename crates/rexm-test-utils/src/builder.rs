//! [`FakeBuilder`]: stands in for `make` and `make -f Makefile.Web`.

use std::fs;
use std::sync::{Arc, Mutex};

use rexm_core::{Error, ExampleRecord, Result, WebBuilder};
use rexm_fs::NormalizedPath;

/// Html produced by the fake build, carrying every shell placeholder.
pub const SHELL_HTML: &str = r#"<!doctype html>
<html lang="en-us">
<head>
    <title>raylib web game</title>
    <meta name="title" content="raylib web game">
    <meta name="description" content="New raylib web videogame, developed using raylib videogames library">
    <meta property="og:site_name" content="raylib - example">
    <meta property="og:image" content="https://www.raylib.com/common/raylib_logo.png">
    <meta property="og:url" content="https://www.raylib.com/games.html">
</head>
<body>
    <input type="button" value="SOURCE" onclick="window.open('https://github.com/raysan5/raylib', '_blank')">
</body>
</html>
"#;

/// Writes placeholder output next to the example source and remembers
/// which examples it was asked to build.
///
/// Clones share the list of built examples, so a test can keep one clone
/// and hand the other to the engine.
#[derive(Debug, Clone, Default)]
pub struct FakeBuilder {
    built: Arc<Mutex<Vec<String>>>,
    desktop_built: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl FakeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder whose every build fails like a missing toolchain.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Names of the examples built for the web so far, in order.
    pub fn built(&self) -> Vec<String> {
        self.built.lock().map(|b| b.clone()).unwrap_or_default()
    }

    /// Names of the examples built for the desktop so far, in order.
    pub fn desktop_built(&self) -> Vec<String> {
        self.desktop_built.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

impl WebBuilder for FakeBuilder {
    fn build(&self, examples_root: &NormalizedPath, record: &ExampleRecord) -> Result<()> {
        if let Ok(mut built) = self.built.lock() {
            built.push(record.name.clone());
        }
        if self.fail {
            return Err(Error::BuildFailed {
                command: format!("make {}", record.relative_stem()),
                code: Some(2),
                stderr: "emcc: command not found".to_string(),
            });
        }

        let stem = examples_root.join(&record.relative_stem()).to_native();
        let write = |extension: &str, content: &[u8]| {
            fs::write(stem.with_extension(extension), content)
                .map_err(|e| rexm_fs::Error::io(stem.with_extension(extension), e))
        };
        write("html", SHELL_HTML.as_bytes())?;
        write("wasm", b"\0asm")?;
        write("js", b"var Module = {};")?;
        if !record.resources.is_empty() {
            write("data", b"packed resources")?;
        }
        Ok(())
    }

    fn build_desktop(&self, _examples_root: &NormalizedPath, record: &ExampleRecord) -> Result<()> {
        if let Ok(mut built) = self.desktop_built.lock() {
            built.push(record.name.clone());
        }
        if self.fail {
            return Err(Error::BuildFailed {
                command: format!("make {} PLATFORM=PLATFORM_DESKTOP", record.relative_stem()),
                code: Some(2),
                stderr: "gcc: command not found".to_string(),
            });
        }
        Ok(())
    }
}

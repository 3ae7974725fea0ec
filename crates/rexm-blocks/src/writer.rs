//! Rewriting generated regions.

use rexm_fs::{FileSystem, NormalizedPath};

use crate::error::Result;
use crate::parser::{MarkerPair, find_region};

/// Replaces the body of the region delimited by `markers`.
///
/// Both sentinels and everything outside them are kept verbatim, so
/// replacing with the same body twice yields identical output.
///
/// # Errors
/// Propagates `Error::SentinelNotFound` / `Error::SentinelOrder` from
/// [`find_region`]; the content is never modified in that case.
///
/// # Example
/// ```
/// use rexm_blocks::{MarkerPair, replace_region};
///
/// let markers = MarkerPair::new("#LIST_START", "#LIST_END");
/// let content = "head\n#LIST_START\nold\n#LIST_END\ntail";
/// let updated = replace_region(content, markers, "\nnew\n").unwrap();
/// assert_eq!(updated, "head\n#LIST_START\nnew\n#LIST_END\ntail");
/// ```
pub fn replace_region(content: &str, markers: MarkerPair<'_>, body: &str) -> Result<String> {
    let region = find_region(content, markers)?;

    let mut result =
        String::with_capacity(content.len() - (region.body_end - region.body_start) + body.len());
    result.push_str(&content[..region.body_start]);
    result.push_str(body);
    result.push_str(&content[region.body_end..]);
    Ok(result)
}

/// Regenerates the region of a file in place.
///
/// The file is only written when the new content differs.
///
/// # Returns
/// `true` when the file changed.
pub fn update_file(
    fs: &dyn FileSystem,
    path: &NormalizedPath,
    markers: MarkerPair<'_>,
    body: &str,
) -> Result<bool> {
    let current = fs.read_text(path)?;
    let updated = replace_region(&current, markers, body)?;

    if updated == current {
        tracing::debug!(path = %path, "Generated region already up to date");
        return Ok(false);
    }

    fs.write_text(path, &updated)?;
    tracing::debug!(path = %path, "Generated region rewritten");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const LIST: MarkerPair<'static> = MarkerPair::new("#LIST_START", "#LIST_END");

    #[test]
    fn test_replace_keeps_outside_text() {
        let content = "CFLAGS = -Wall\r\n#LIST_START\nstale\n#LIST_END\n\nall: $(CORE)\n";
        let updated = replace_region(content, LIST, "\nfresh\n").unwrap();
        assert_eq!(
            updated,
            "CFLAGS = -Wall\r\n#LIST_START\nfresh\n#LIST_END\n\nall: $(CORE)\n"
        );
    }

    #[test]
    fn test_replace_is_idempotent() {
        let content = "#LIST_START\nstale\n#LIST_END";
        let once = replace_region(content, LIST, "\nfresh\n").unwrap();
        let twice = replace_region(&once, LIST, "\nfresh\n").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_replace_without_sentinels_fails() {
        let result = replace_region("plain text", LIST, "\nfresh\n");
        assert!(matches!(result, Err(Error::SentinelNotFound { .. })));
    }
}

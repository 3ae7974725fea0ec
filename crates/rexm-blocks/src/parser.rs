//! Locating generated regions inside artifact text.

use crate::error::{Error, Result};

/// The literal start and end sentinels delimiting a generated region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair<'a> {
    pub start: &'a str,
    pub end: &'a str,
}

impl<'a> MarkerPair<'a> {
    pub const fn new(start: &'a str, end: &'a str) -> Self {
        Self { start, end }
    }
}

/// Byte offsets of a region body inside some content.
///
/// `body_start` is the first byte after the start sentinel, `body_end` is
/// the first byte of the end sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub body_start: usize,
    pub body_end: usize,
}

/// Finds the region delimited by `markers`.
///
/// The end sentinel is searched only after the start sentinel.
///
/// # Arguments
/// * `content` - The artifact text
/// * `markers` - The sentinel pair to look for
///
/// # Returns
/// The byte offsets of the region body.
///
/// # Errors
/// Returns `Error::SentinelNotFound` when either sentinel is missing, and
/// `Error::SentinelOrder` when the end sentinel only occurs before the start.
///
/// # Example
/// ```
/// use rexm_blocks::{MarkerPair, find_region};
///
/// let content = "head\n#LIST_START\nold\n#LIST_END\ntail";
/// let region = find_region(content, MarkerPair::new("#LIST_START", "#LIST_END")).unwrap();
/// assert_eq!(&content[region.body_start..region.body_end], "\nold\n");
/// ```
pub fn find_region(content: &str, markers: MarkerPair<'_>) -> Result<Region> {
    let start = content
        .find(markers.start)
        .ok_or_else(|| Error::SentinelNotFound {
            sentinel: markers.start.to_string(),
        })?;
    let body_start = start + markers.start.len();

    match content[body_start..].find(markers.end) {
        Some(offset) => Ok(Region {
            body_start,
            body_end: body_start + offset,
        }),
        None if content[..start].contains(markers.end) => Err(Error::SentinelOrder {
            start: markers.start.to_string(),
            end: markers.end.to_string(),
        }),
        None => Err(Error::SentinelNotFound {
            sentinel: markers.end.to_string(),
        }),
    }
}

/// Returns the current region body.
pub fn region_body<'c>(content: &'c str, markers: MarkerPair<'_>) -> Result<&'c str> {
    let region = find_region(content, markers)?;
    Ok(&content[region.body_start..region.body_end])
}

/// Checks whether both sentinels are present in the right order.
pub fn has_region(content: &str, markers: MarkerPair<'_>) -> bool {
    find_region(content, markers).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: MarkerPair<'static> = MarkerPair::new("#LIST_START", "#LIST_END");

    #[test]
    fn test_find_region_empty_body() {
        let content = "#LIST_START#LIST_END";
        let region = find_region(content, LIST).unwrap();
        assert_eq!(region.body_start, region.body_end);
    }

    #[test]
    fn test_missing_start_sentinel() {
        let err = find_region("no markers\n#LIST_END", LIST).unwrap_err();
        assert!(matches!(err, Error::SentinelNotFound { sentinel } if sentinel == "#LIST_START"));
    }

    #[test]
    fn test_missing_end_sentinel() {
        let err = find_region("#LIST_START\nbody", LIST).unwrap_err();
        assert!(matches!(err, Error::SentinelNotFound { sentinel } if sentinel == "#LIST_END"));
    }

    #[test]
    fn test_end_before_start() {
        let err = find_region("#LIST_END\n#LIST_START\n", LIST).unwrap_err();
        assert!(matches!(err, Error::SentinelOrder { .. }));
    }

    #[test]
    fn test_region_body() {
        let content = "a\n#LIST_START\nCORE = \\\n#LIST_END\nb";
        assert_eq!(region_body(content, LIST).unwrap(), "\nCORE = \\\n");
        assert!(has_region(content, LIST));
    }
}

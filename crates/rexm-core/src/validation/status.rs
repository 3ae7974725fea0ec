//! Per-example validation flags

use std::fmt;

use serde::Serialize;

/// Independent integrity-check results for one example, OR-combined.
///
/// Zero means the example is fully consistent. Bit positions match the
/// historic numeric report codes so old reports stay comparable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ValidationStatus(u32);

impl ValidationStatus {
    pub const MISSING_SOURCE: Self = Self(1 << 0);
    pub const MISSING_SCREENSHOT: Self = Self(1 << 1);
    pub const INVALID_SCREENSHOT: Self = Self(1 << 2);
    pub const MISSING_RESOURCES: Self = Self(1 << 3);
    pub const MISSING_PROJECT: Self = Self(1 << 4);
    pub const NOT_IN_SOLUTION: Self = Self(1 << 5);
    pub const NOT_IN_BUILD_LIST: Self = Self(1 << 6);
    pub const NOT_IN_WEB_BUILD_LIST: Self = Self(1 << 7);
    pub const NOT_IN_README: Self = Self(1 << 8);
    pub const NOT_IN_WEB_DATA: Self = Self(1 << 9);
    pub const INCONSISTENT_INFO: Self = Self(1 << 10);
    pub const MISSING_WEB_OUTPUT: Self = Self(1 << 11);
    pub const MISSING_WEB_METADATA: Self = Self(1 << 12);
    pub const INVALID_CATEGORY: Self = Self(1 << 13);
    pub const NOT_IN_PROJECT: Self = Self(1 << 14);
    pub const TOO_MANY_RESOURCES: Self = Self(1 << 15);

    /// Every flag with its report label, in bit order.
    pub const FLAGS: [(Self, &'static str); 16] = [
        (Self::MISSING_SOURCE, "missing source"),
        (Self::MISSING_SCREENSHOT, "missing screenshot"),
        (Self::INVALID_SCREENSHOT, "invalid screenshot"),
        (Self::MISSING_RESOURCES, "missing resources"),
        (Self::MISSING_PROJECT, "missing IDE project"),
        (Self::NOT_IN_SOLUTION, "not in IDE solution"),
        (Self::NOT_IN_BUILD_LIST, "not in Makefile"),
        (Self::NOT_IN_WEB_BUILD_LIST, "not in Makefile.Web"),
        (Self::NOT_IN_README, "not in README"),
        (Self::NOT_IN_WEB_DATA, "not in web data file"),
        (Self::INCONSISTENT_INFO, "inconsistent header info"),
        (Self::MISSING_WEB_OUTPUT, "missing web output"),
        (Self::MISSING_WEB_METADATA, "missing web metadata"),
        (Self::INVALID_CATEGORY, "invalid category"),
        (Self::NOT_IN_PROJECT, "not in IDE project"),
        (Self::TOO_MANY_RESOURCES, "too many resources"),
    ];

    /// Flags an `update` can repair by regenerating listings.
    pub const LISTINGS: Self = Self(
        Self::NOT_IN_BUILD_LIST.0
            | Self::NOT_IN_WEB_BUILD_LIST.0
            | Self::NOT_IN_README.0
            | Self::NOT_IN_WEB_DATA.0,
    );

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_clean(self) -> bool {
        self.0 == 0
    }

    /// Whether every flag of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    /// Whether any flag of `other` is set.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub fn set(&mut self, other: Self, value: bool) {
        if value {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }

    /// Labels of the set flags, in bit order.
    pub fn labels(self) -> Vec<&'static str> {
        Self::FLAGS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, label)| *label)
            .collect()
    }

    pub fn missing_source(self) -> bool {
        self.contains(Self::MISSING_SOURCE)
    }

    pub fn missing_screenshot(self) -> bool {
        self.contains(Self::MISSING_SCREENSHOT)
    }

    pub fn invalid_screenshot(self) -> bool {
        self.contains(Self::INVALID_SCREENSHOT)
    }

    pub fn missing_resources(self) -> bool {
        self.contains(Self::MISSING_RESOURCES)
    }

    pub fn missing_project(self) -> bool {
        self.contains(Self::MISSING_PROJECT)
    }

    pub fn not_in_solution(self) -> bool {
        self.contains(Self::NOT_IN_SOLUTION)
    }

    pub fn not_in_build_list(self) -> bool {
        self.contains(Self::NOT_IN_BUILD_LIST)
    }

    pub fn not_in_web_build_list(self) -> bool {
        self.contains(Self::NOT_IN_WEB_BUILD_LIST)
    }

    pub fn not_in_readme(self) -> bool {
        self.contains(Self::NOT_IN_README)
    }

    pub fn not_in_web_data(self) -> bool {
        self.contains(Self::NOT_IN_WEB_DATA)
    }

    pub fn inconsistent_info(self) -> bool {
        self.contains(Self::INCONSISTENT_INFO)
    }

    pub fn missing_web_output(self) -> bool {
        self.contains(Self::MISSING_WEB_OUTPUT)
    }

    pub fn missing_web_metadata(self) -> bool {
        self.contains(Self::MISSING_WEB_METADATA)
    }

    pub fn invalid_category(self) -> bool {
        self.contains(Self::INVALID_CATEGORY)
    }

    pub fn not_in_project(self) -> bool {
        self.contains(Self::NOT_IN_PROJECT)
    }

    pub fn too_many_resources(self) -> bool {
        self.contains(Self::TOO_MANY_RESOURCES)
    }
}

impl std::ops::BitOr for ValidationStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ValidationStatus {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            f.write_str("ok")
        } else {
            f.write_str(&self.labels().join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_distinct_bits() {
        let mut seen = 0u32;
        for (flag, _) in ValidationStatus::FLAGS {
            assert_eq!(flag.bits().count_ones(), 1);
            assert_eq!(seen & flag.bits(), 0);
            seen |= flag.bits();
        }
    }

    #[test]
    fn test_insert_and_remove() {
        let mut status = ValidationStatus::empty();
        status.insert(ValidationStatus::MISSING_SCREENSHOT);
        status |= ValidationStatus::NOT_IN_README;
        assert!(status.missing_screenshot());
        assert!(status.not_in_readme());
        assert!(!status.missing_source());

        status.remove(ValidationStatus::LISTINGS);
        assert_eq!(status, ValidationStatus::MISSING_SCREENSHOT);
        assert_eq!(status.bits(), 2);
    }

    #[test]
    fn test_empty_flag_is_never_contained() {
        assert!(!ValidationStatus::empty().contains(ValidationStatus::empty()));
    }

    #[test]
    fn test_display_lists_labels() {
        let status = ValidationStatus::MISSING_SOURCE | ValidationStatus::INVALID_CATEGORY;
        assert_eq!(status.to_string(), "missing source, invalid category");
        assert_eq!(ValidationStatus::default().to_string(), "ok");
    }
}

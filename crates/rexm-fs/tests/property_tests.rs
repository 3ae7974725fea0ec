use proptest::prelude::*;
use rexm_fs::NormalizedPath;

proptest! {
    #[test]
    fn test_normalization_removes_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));

        let roundtripped = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, roundtripped);
    }

    #[test]
    fn test_with_extension_keeps_stem(stem in "[a-z_]{1,24}", ext in "[a-z]{1,4}") {
        let path = NormalizedPath::new(format!("examples/core/{stem}.c"));
        let swapped = path.with_extension(&ext);
        prop_assert_eq!(swapped.file_stem(), Some(stem.as_str()));
        prop_assert_eq!(swapped.extension(), Some(ext.as_str()));
    }
}

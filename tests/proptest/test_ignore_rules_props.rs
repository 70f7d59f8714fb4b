//! Property-based tests for the dump ignore rules

use opskit::dump::{IgnoreRules, BINARY_EXTENSIONS, IGNORED_DIRS};
use proptest::prelude::*;

fn mixed_case(s: &str, mask: &[bool]) -> String {
    s.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
        .collect()
}

proptest! {
    #[test]
    fn test_binary_extension_any_case(
        stem in "[a-zA-Z0-9_-]{1,20}",
        index in 0usize..BINARY_EXTENSIONS.len(),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let rules = IgnoreRules::default();
        let name = format!("{}{}", stem, mixed_case(BINARY_EXTENSIONS[index], &mask));
        prop_assert!(rules.is_binary(&name), "{} should be binary", name);
    }

    #[test]
    fn test_text_extensions_kept(
        stem in "[a-zA-Z0-9_-]{1,20}",
        ext in prop::sample::select(vec!["rs", "md", "js", "ts", "json", "toml", "py", "txt"]),
    ) {
        let rules = IgnoreRules::default();
        let name = format!("{}.{}", stem, ext);
        prop_assert!(!rules.skips_file(&name));
    }

    #[test]
    fn test_dir_rules_are_exact_names(
        index in 0usize..IGNORED_DIRS.len(),
        suffix in "[a-z0-9]{1,5}",
    ) {
        let rules = IgnoreRules::default();
        prop_assert!(rules.is_ignored_dir(IGNORED_DIRS[index]));
        let longer = format!("{}{}", IGNORED_DIRS[index], suffix);
        prop_assert!(!rules.is_ignored_dir(&longer));
    }
}

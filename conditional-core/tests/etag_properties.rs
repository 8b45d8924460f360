//! Property tests for entity-tag scanning and comparison.

use conditional_core::{EntityTag, scan, strong_match, weak_match};
use proptest::prelude::*;

/// Opaque tag content: `etagc` characters, including some obs-text.
fn opaque() -> impl Strategy<Value = String> {
    "[!#-~\u{80}-\u{ff}]{0,16}"
}

fn tag() -> impl Strategy<Value = String> {
    (any::<bool>(), opaque()).prop_map(|(weak, opaque)| {
        if weak {
            format!("W/\"{opaque}\"")
        } else {
            format!("\"{opaque}\"")
        }
    })
}

proptest! {
    #[test]
    fn scan_consumes_a_prefix_of_the_trimmed_input(input in ".{0,32}") {
        if let Some((tag, rest)) = scan(&input) {
            let trimmed = input.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
            prop_assert_eq!(format!("{tag}{rest}"), trimmed);
            prop_assert!(EntityTag::parse(tag.as_str()).is_ok());
        }
    }

    #[test]
    fn scan_accepts_generated_tags(tag in tag(), rest in "[ ,]{0,3}") {
        let input = format!("{tag}{rest}");
        let (scanned, _) = scan(&input).expect("generated tag must scan");
        prop_assert_eq!(scanned.as_str(), tag.as_str());
    }

    #[test]
    fn strong_tags_strongly_match_themselves(opaque in opaque()) {
        let tag = format!("\"{opaque}\"");
        prop_assert!(strong_match(&tag, &tag));
    }

    #[test]
    fn weak_tags_never_strongly_match(opaque in opaque(), other in tag()) {
        let tag = format!("W/\"{opaque}\"");
        prop_assert!(!strong_match(&tag, &tag));
        prop_assert!(!strong_match(&tag, &other));
    }

    #[test]
    fn weak_match_ignores_weakness(opaque in opaque()) {
        let strong = format!("\"{opaque}\"");
        let weak = format!("W/\"{opaque}\"");
        prop_assert!(weak_match(&weak, &strong));
        prop_assert!(weak_match(&strong, &weak));
        prop_assert!(weak_match(&weak, &weak));
    }
}

#[test]
fn weak_match_examples() {
    assert!(weak_match("", ""));
    assert!(weak_match("W/\"x\"", "\"x\""));
    assert!(!weak_match("\"x\"", "\"y\""));
}

//! Property tests for the expansion pipeline

use proptest::prelude::*;

use emx::emx::{expand, Mode};

proptest! {
    // Two runs over the same abbreviation must render identical output,
    // including tab-stop numbering.
    #[test]
    fn expand_is_deterministic(
        parent in "[a-z]{1,8}",
        child in "[a-z]{1,8}",
        class in "[a-z]{1,6}",
        count in 1usize..5,
    ) {
        let abbreviation = format!("{parent}>{child}.{class}$*{count}");

        let first = expand(Mode::Xml, &abbreviation, "  ", 0, true, "$").unwrap();
        let second = expand(Mode::Xml, &abbreviation, "  ", 0, true, "$").unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            first.matches(&format!("<{child} class=\"{class}1\"")).count(),
            1
        );
    }

    // Arbitrary printable input either expands or reports a parse error,
    // never panics.
    #[test]
    fn expand_never_panics(input in "[ -~]{0,24}") {
        let _ = expand(Mode::Html, &input, "  ", 1, true, "$");
        let _ = expand(Mode::Xml, &input, "", 0, false, "");
    }

    // Sibling repetition multiplies elements without reordering them.
    #[test]
    fn repeat_count_matches_output(count in 1usize..8) {
        let abbreviation = format!("ul>li*{count}");
        let got = expand(Mode::Html, &abbreviation, "", 0, false, "").unwrap();

        prop_assert_eq!(got.matches("<li>").count(), count);
        prop_assert_eq!(got.matches("</li>").count(), count);
        prop_assert!(got.starts_with("<ul>"));
        prop_assert!(got.ends_with("</ul>"));
    }
}

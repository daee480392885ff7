//! Attribute, class/id and text value objects
//!
//! These carry the raw content scanned out of an abbreviation plus the
//! metadata needed to resolve it at render time: numbering directives on
//! ids and classes, tab-stop slots on empty attribute values, and the
//! `lorem` filler keyword on attribute values and text content.

use serde::Serialize;

use crate::emx::elem::TabStops;

/// Compute the numbering suffix for one occurrence of a repeated sibling.
///
/// `idx` is the 1-based position within the repetition group, `group_size`
/// the size of that group. `numbering` is the run of `$` characters from the
/// abbreviation; its length is the zero-pad width. When no numbering was
/// requested (forward, start 1, no `$` run) the suffix is empty.
pub fn number(idx: usize, group_size: usize, start: i64, reverse: bool, numbering: &str) -> String {
    debug_assert!(idx >= 1, "numbering index is 1-based");

    if !reverse && start == 1 && numbering.is_empty() {
        return String::new();
    }

    let count = if reverse {
        group_size as i64 - idx as i64 + start
    } else {
        idx as i64 + start - 1
    };

    let width = numbering.chars().count().max(1);

    format!("{count:0width$}")
}

/// An id or class fragment with an optional numbering directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttrValue {
    pub value: String,
    pub numbering: String,
    pub start: i64,
    pub reverse: bool,
}

impl AttrValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            numbering: String::new(),
            start: 1,
            reverse: false,
        }
    }

    pub fn with_numbering(
        value: impl Into<String>,
        numbering: impl Into<String>,
        start: i64,
        reverse: bool,
    ) -> Self {
        Self {
            value: value.into(),
            numbering: numbering.into(),
            start,
            reverse,
        }
    }

    /// The rendered value: raw content plus the numbering suffix for the
    /// given repetition context.
    pub fn resolve(&self, num: usize, sibling_count: usize) -> String {
        format!(
            "{}{}",
            self.value,
            number(num, sibling_count, self.start, self.reverse, &self.numbering)
        )
    }
}

/// A tag attribute as scanned from `[name=value]` notation.
///
/// An attribute without `=` renders as a bare name. An attribute whose value
/// is empty resolves to its default value plus a tab-stop slot, so every
/// empty-valued attribute becomes an editable cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attr {
    pub name: String,
    pub value: String,
    pub default_value: String,
    pub has_equal_sign: bool,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            default_value: String::new(),
            has_equal_sign: true,
        }
    }

    /// An attribute that renders its default value when the user supplied
    /// none, e.g. `href` defaulting to `https://`.
    pub fn with_default(name: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            default_value: default_value.into(),
            has_equal_sign: true,
        }
    }

    /// A valueless attribute such as `disabled`, rendered without `="…"`.
    pub fn without_equal_sign(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            default_value: String::new(),
            has_equal_sign: false,
        }
    }

    /// The rendered value. Empty values become the default value followed by
    /// a tab-stop slot; values starting with the lorem keyword become filler
    /// text.
    pub fn resolve(&self, stops: &mut TabStops, tab_stop_wrapper: &str) -> String {
        if self.value.is_empty() {
            return format!("{}{}", self.default_value, stops.placeholder(tab_stop_wrapper));
        }

        lorem_or_verbatim(&self.value)
    }
}

/// Free-form text content attached to a tag via `{…}` notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    value: String,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The rendered content, with the lorem keyword expanded to filler text.
    pub fn resolve(&self) -> String {
        lorem_or_verbatim(&self.value)
    }
}

const LOREM_KEYWORD: &str = "lorem";
const DEFAULT_WORD_COUNT: usize = 5;

/// Expand a value carrying the lorem keyword into filler text; anything else
/// passes through verbatim. An optional digit suffix selects the word count,
/// e.g. `lorem12`.
fn lorem_or_verbatim(value: &str) -> String {
    match value.strip_prefix(LOREM_KEYWORD) {
        Some(suffix) => {
            let words = if suffix.is_empty() {
                DEFAULT_WORD_COUNT
            } else {
                suffix.parse().unwrap_or(DEFAULT_WORD_COUNT)
            };

            lipsum::lipsum(words)
        }
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::no_numbering(1, false, "", &["", "", ""])]
    #[case::forward(1, false, "$", &["1", "2", "3"])]
    #[case::reverse(1, true, "$", &["3", "2", "1"])]
    #[case::reverse_start_3(3, true, "$", &["5", "4", "3"])]
    #[case::reverse_start_11(11, true, "$", &["13", "12", "11"])]
    #[case::padded_start_8(8, false, "$$", &["08", "09", "10"])]
    fn test_number_truth_table(
        #[case] start: i64,
        #[case] reverse: bool,
        #[case] numbering: &str,
        #[case] want: &[&str],
    ) {
        let group_size = want.len();

        for (i, expected) in want.iter().enumerate() {
            let got = number(i + 1, group_size, start, reverse, numbering);
            assert_eq!(&got, expected, "index {}", i + 1);
        }
    }

    #[test]
    fn test_number_start_only_forces_numbering() {
        // An explicit start value produces a suffix even without a $ run.
        assert_eq!(number(1, 3, 2, false, ""), "2");
        assert_eq!(number(3, 3, 2, false, ""), "4");
    }

    #[test]
    fn test_attr_value_resolve_appends_suffix() {
        let value = AttrValue::with_numbering("item", "$$", 1, false);
        assert_eq!(value.resolve(2, 5), "item02");

        let plain = AttrValue::new("item");
        assert_eq!(plain.resolve(2, 5), "item");
    }

    #[test]
    fn test_attr_resolve_empty_value_without_wrapper() {
        let mut stops = TabStops::new();
        let attr = Attr::new("href", "");

        assert_eq!(attr.resolve(&mut stops, ""), "");
    }

    #[test]
    fn test_attr_resolve_empty_value_with_wrapper() {
        let mut stops = TabStops::new();
        let attr = Attr::new("href", "");

        assert_eq!(attr.resolve(&mut stops, "$"), "$STOP1$");
    }

    #[test]
    fn test_attr_resolve_default_value_precedes_stop() {
        let mut stops = TabStops::new();
        let attr = Attr::with_default("href", "https://");

        assert_eq!(attr.resolve(&mut stops, "$"), "https://$STOP1$");
    }

    #[test]
    fn test_attr_resolve_verbatim_value() {
        let mut stops = TabStops::new();
        let attr = Attr::new("style", "color: red;");

        assert_eq!(attr.resolve(&mut stops, "$"), "color: red;");
    }

    #[rstest]
    #[case::bare_keyword("lorem", 5)]
    #[case::explicit_count("lorem3", 3)]
    #[case::large_count("lorem12", 12)]
    #[case::malformed_count("loremipsum", 5)]
    fn test_lorem_word_count(#[case] value: &str, #[case] words: usize) {
        let text = Text::new(value);
        assert_eq!(text.resolve().split_whitespace().count(), words);
    }

    #[test]
    fn test_text_passes_through_plain_values() {
        let text = Text::new("Hello, World!");
        assert_eq!(text.resolve(), "Hello, World!");
        assert!(!text.is_empty());
        assert!(Text::new("").is_empty());
    }
}

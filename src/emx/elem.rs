//! Element tree and markup renderer
//!
//! The builder materializes subjects into [`Elem`] nodes; this module
//! serializes them to text. Rendering decisions per element: short-tag
//! eligibility (self-closing XML tags, HTML void elements), indentation and
//! multi-line layout, and tab-stop placeholder insertion for editor
//! integration.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::emx::attr::{Attr, AttrValue, Text};
use crate::emx::Mode;

/// HTML elements that never take a closing tag.
static VOID_HTML_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "br", "hr", "img", "input", "link", "meta", "area", "base", "col", "command", "embed",
        "keygen", "param", "source", "video", "audio", "track", "wbr",
    ])
});

/// Configuration for one render invocation.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub mode: Mode,
    /// One indentation level; empty disables indentation.
    pub indentation: String,
    /// Indentation depth of the outermost elements.
    pub start_depth: usize,
    pub multiline: bool,
    /// Characters wrapped around tab-stop names; empty disables tab stops.
    pub tab_stop_wrapper: String,
}

/// Monotonic tab-stop numbering, scoped to a single render invocation so
/// concurrent or repeated expansions never observe each other's counters.
#[derive(Debug)]
pub struct TabStops {
    next: usize,
}

impl TabStops {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// The next placeholder, `wrapper + STOPn + wrapper`. An empty wrapper
    /// yields an empty string and leaves the counter untouched.
    pub fn placeholder(&mut self, wrapper: &str) -> String {
        if wrapper.is_empty() {
            return String::new();
        }

        let n = self.next;
        self.next += 1;

        format!("{wrapper}STOP{n}{wrapper}")
    }
}

impl Default for TabStops {
    fn default() -> Self {
        Self::new()
    }
}

/// One concrete output element. `num` is the element's 1-based position
/// among its repeated siblings and `sibling_count` the size of that
/// repetition group; together they are the numbering context for the id and
/// class values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Elem {
    pub name: String,
    pub id: Option<AttrValue>,
    pub classes: Vec<AttrValue>,
    pub attributes: Vec<Attr>,
    pub text: Option<Text>,
    pub num: usize,
    pub sibling_count: usize,
    pub children: Vec<Elem>,
}

impl Elem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            text: None,
            num: 1,
            sibling_count: 1,
            children: Vec::new(),
        }
    }

    fn text_is_empty(&self) -> bool {
        self.text.as_ref().map_or(true, Text::is_empty)
    }

    fn text_value(&self) -> String {
        self.text.as_ref().map(Text::resolve).unwrap_or_default()
    }

    fn is_empty_tag(&self) -> bool {
        self.children.is_empty() && self.text_is_empty()
    }

    fn is_short_tag(&self, mode: Mode) -> bool {
        if !self.is_empty_tag() {
            return false;
        }

        match mode {
            Mode::Xml => true,
            Mode::Html | Mode::Htmx => VOID_HTML_TAGS.contains(self.name.as_str()),
        }
    }

    /// The resolved id value, empty when no id was set.
    pub fn resolved_id(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.resolve(self.num, self.sibling_count))
            .unwrap_or_default()
    }

    /// The space-joined resolved class list, in declaration order.
    pub fn resolved_class(&self) -> String {
        self.classes
            .iter()
            .map(|class| class.resolve(self.num, self.sibling_count))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn render_attributes(&self, stops: &mut TabStops, wrapper: &str) -> String {
        self.attributes
            .iter()
            .map(|attr| {
                if attr.has_equal_sign {
                    format!("{}=\"{}\"", attr.name, attr.resolve(stops, wrapper))
                } else {
                    attr.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Serialize this element and its subtree into `out`.
    pub fn render(
        &self,
        out: &mut String,
        settings: &RenderSettings,
        depth: usize,
        stops: &mut TabStops,
    ) {
        let short_tag = self.is_short_tag(settings.mode) && settings.tab_stop_wrapper.is_empty();
        let xml_short_tag = short_tag && settings.mode == Mode::Xml;
        let empty_tag = self.is_empty_tag();

        let indent = if settings.indentation.is_empty() {
            String::new()
        } else {
            settings.indentation.repeat(depth)
        };

        // a nameless element is a bare text fragment
        if self.name.is_empty() {
            self.render_text(out, &indent, "", settings.multiline);

            return;
        }

        self.render_opening_tag(out, settings, &indent, xml_short_tag, stops);

        if settings.multiline && (!empty_tag || short_tag) {
            out.push('\n');
        }

        if !short_tag {
            self.render_text(out, &indent, &settings.indentation, settings.multiline);
            self.render_tab_stop(out, &settings.tab_stop_wrapper, stops);

            for child in &self.children {
                child.render(out, settings, depth + 1, stops);
            }

            self.render_closing_tag(out, &indent, settings.multiline, empty_tag);
        }
    }

    fn render_opening_tag(
        &self,
        out: &mut String,
        settings: &RenderSettings,
        indent: &str,
        xml_short_tag: bool,
        stops: &mut TabStops,
    ) {
        if settings.multiline {
            out.push_str(indent);
        }

        out.push('<');
        out.push_str(&self.name);

        let id = self.resolved_id();
        if !id.is_empty() {
            out.push_str(" id=\"");
            out.push_str(&id);
            out.push('"');
        }

        if !self.attributes.is_empty() {
            out.push(' ');
            out.push_str(&self.render_attributes(stops, &settings.tab_stop_wrapper));
        }

        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&self.resolved_class());
            out.push('"');
        }

        if xml_short_tag {
            out.push_str(" /");
        }

        out.push('>');
    }

    fn render_text(&self, out: &mut String, indent: &str, extra_indent: &str, multiline: bool) {
        if self.text_is_empty() || !multiline {
            out.push_str(&self.text_value());

            return;
        }

        out.push_str(indent);
        out.push_str(extra_indent);
        out.push_str(&self.text_value());
        out.push('\n');
    }

    fn render_tab_stop(&self, out: &mut String, wrapper: &str, stops: &mut TabStops) {
        // a placeholder only makes sense where no children will render
        if !self.children.is_empty() {
            return;
        }

        out.push_str(&stops.placeholder(wrapper));
    }

    fn render_closing_tag(&self, out: &mut String, indent: &str, multiline: bool, empty_tag: bool) {
        if multiline && !empty_tag {
            out.push_str(indent);
        }

        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');

        if multiline {
            out.push('\n');
        }
    }
}

/// Render a sequence of elements under `settings`, with a fresh tab-stop
/// counter. The output is trimmed of surrounding whitespace and newlines.
pub fn render_elements(elems: &[Elem], settings: &RenderSettings) -> String {
    let mut out = String::new();
    let mut stops = TabStops::new();

    for elem in elems {
        elem.render(&mut out, settings, settings.start_depth, &mut stops);
    }

    out.trim_matches(|c| matches!(c, '\n' | '\t' | '\r' | ' '))
        .to_string()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn settings(mode: Mode, multiline: bool, wrapper: &str) -> RenderSettings {
        RenderSettings {
            mode,
            indentation: if multiline { "  ".to_string() } else { String::new() },
            start_depth: 0,
            multiline,
            tab_stop_wrapper: wrapper.to_string(),
        }
    }

    fn render_one(elem: &Elem, settings: &RenderSettings) -> String {
        render_elements(std::slice::from_ref(elem), settings)
    }

    #[test]
    fn test_tab_stops_count_from_one() {
        let mut stops = TabStops::new();

        assert_eq!(stops.placeholder("$$"), "$$STOP1$$");
        assert_eq!(stops.placeholder("$$"), "$$STOP2$$");
        assert_eq!(stops.placeholder(""), "");
        assert_eq!(stops.placeholder("$$"), "$$STOP3$$");
    }

    #[test]
    fn test_render_nameless_element_is_text_only() {
        let mut elem = Elem::new("");
        elem.text = Some(Text::new("foo"));

        assert_eq!(render_one(&elem, &settings(Mode::Html, false, "")), "foo");
        assert_eq!(render_one(&Elem::new(""), &settings(Mode::Html, false, "")), "");
    }

    #[rstest]
    #[case::html_div(Mode::Html, "div", "<div></div>")]
    #[case::xml_div(Mode::Xml, "div", "<div />")]
    #[case::html_br(Mode::Html, "br", "<br>")]
    #[case::xml_br(Mode::Xml, "br", "<br />")]
    #[case::html_input(Mode::Html, "input", "<input>")]
    fn test_render_short_tags(#[case] mode: Mode, #[case] name: &str, #[case] want: &str) {
        let elem = Elem::new(name);

        assert_eq!(render_one(&elem, &settings(mode, false, "")), want);
    }

    #[test]
    fn test_render_wrapper_forces_full_form() {
        let elem = Elem::new("br");

        assert_eq!(
            render_one(&elem, &settings(Mode::Xml, false, "$")),
            "<br>$STOP1$</br>"
        );
    }

    #[test]
    fn test_render_attribute_order_id_attrs_class() {
        let mut elem = Elem::new("div");
        elem.id = Some(AttrValue::new("foo"));
        elem.classes = vec![AttrValue::new("bar"), AttrValue::new("baz")];
        elem.attributes = vec![
            Attr::new("style", "background-color: red;"),
            Attr::new("hello", "bye"),
        ];
        elem.text = Some(Text::new("Hello, World!"));

        assert_eq!(
            render_one(&elem, &settings(Mode::Html, false, "")),
            "<div id=\"foo\" style=\"background-color: red;\" hello=\"bye\" class=\"bar baz\">Hello, World!</div>"
        );
    }

    #[test]
    fn test_render_equal_sign_less_attribute() {
        let mut elem = Elem::new("select");
        elem.attributes = vec![Attr::new("name", "x"), Attr::without_equal_sign("disabled")];

        assert_eq!(
            render_one(&elem, &settings(Mode::Html, false, "")),
            "<select name=\"x\" disabled></select>"
        );
    }

    #[test]
    fn test_render_empty_attribute_value_tab_stop() {
        let mut elem = Elem::new("a");
        elem.attributes = vec![Attr::new("href", "")];

        assert_eq!(
            render_one(&elem, &settings(Mode::Html, false, "$")),
            "<a href=\"$STOP1$\">$STOP2$</a>"
        );
        assert_eq!(
            render_one(&elem, &settings(Mode::Html, false, "")),
            "<a href=\"\"></a>"
        );
    }

    #[test]
    fn test_render_numbered_classes_use_sibling_context() {
        let mut elem = Elem::new("div");
        elem.classes = vec![AttrValue::with_numbering("item", "$$", 1, false)];
        elem.num = 2;
        elem.sibling_count = 3;

        assert_eq!(
            render_one(&elem, &settings(Mode::Html, false, "")),
            "<div class=\"item02\"></div>"
        );
    }

    #[test]
    fn test_render_multiline_nested() {
        let mut inner = Elem::new("li");
        inner.text = Some(Text::new("one"));

        let mut elem = Elem::new("ul");
        elem.children = vec![inner];

        assert_eq!(
            render_one(&elem, &settings(Mode::Html, true, "")),
            "<ul>\n  <li>\n    one\n  </li>\n</ul>"
        );
    }

    #[test]
    fn test_render_multiline_empty_element_stays_inline() {
        let elem = Elem::new("p");

        assert_eq!(render_one(&elem, &settings(Mode::Html, true, "")), "<p></p>");
    }

    #[test]
    fn test_render_start_depth_indents_children() {
        let mut settings = settings(Mode::Xml, true, "");
        settings.start_depth = 2;

        let mut elem = Elem::new("root");
        elem.children = vec![Elem::new("leaf")];

        assert_eq!(
            render_one(&elem, &settings),
            "<root>\n      <leaf />\n    </root>"
        );
    }

    #[test]
    fn test_render_is_deterministic_across_calls() {
        let mut elem = Elem::new("ul");
        elem.children = vec![Elem::new("li"), Elem::new("li")];
        let settings = settings(Mode::Html, true, "$");

        let first = render_one(&elem, &settings);
        let second = render_one(&elem, &settings);

        assert_eq!(first, second);
        assert!(first.contains("$STOP1$"));
        assert!(first.contains("$STOP2$"));
        assert!(!first.contains("$STOP3$"));
    }
}

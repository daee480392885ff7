//! End-to-end expansion tests
//!
//! Each case drives the whole pipeline (tokenize → rewrite → build →
//! render) through `expand` and checks the exact output text.

use rstest::rstest;

use emx::emx::{expand, ErrorKind, Mode};

#[rstest]
#[case::html_class(Mode::Html, "p.foo", "<p class=\"foo\"></p>")]
#[case::xml_class(Mode::Xml, "p.foo", "<p class=\"foo\" />")]
#[case::html_void(Mode::Html, "br", "<br>")]
#[case::id_and_text(Mode::Html, "span#x{hi}", "<span id=\"x\">hi</span>")]
#[case::siblings(Mode::Html, "p+p", "<p></p><p></p>")]
#[case::repeat(
    Mode::Html,
    "ul>li*5",
    "<ul><li></li><li></li><li></li><li></li><li></li></ul>"
)]
#[case::numbered_repeat(
    Mode::Html,
    "ul>li.item$*3",
    "<ul><li class=\"item1\"></li><li class=\"item2\"></li><li class=\"item3\"></li></ul>"
)]
#[case::reverse_padded(
    Mode::Html,
    "div.div$$@-*3",
    "<div class=\"div03\"></div><div class=\"div02\"></div><div class=\"div01\"></div>"
)]
#[case::ascend(
    Mode::Html,
    "div+div>p>span+em^bq",
    "<div></div><div><p><span></span><em></em></p><blockquote></blockquote></div>"
)]
fn test_expand_single_line(#[case] mode: Mode, #[case] abbreviation: &str, #[case] want: &str) {
    let got = expand(mode, abbreviation, "", 0, false, "").unwrap();

    assert_eq!(got, want);
}

#[test]
fn test_expand_group_repeat_xml() {
    let got = expand(Mode::Xml, "(a+b)*2", "", 0, false, "").unwrap();

    assert_eq!(got, "<a /><b /><a /><b />");
}

#[test]
fn test_expand_xml_multiline_with_tab_stops() {
    let got = expand(
        Mode::Xml,
        "collection[foo=bar]>item*3+item[bar=]",
        "  ",
        2,
        true,
        "$",
    )
    .unwrap();

    let want = "<collection foo=\"bar\">\n      \
                <item>$STOP1$</item>\n      \
                <item>$STOP2$</item>\n      \
                <item>$STOP3$</item>\n      \
                <item bar=\"$STOP4$\">$STOP5$</item>\n    \
                </collection>";
    assert_eq!(got, want);
}

#[test]
fn test_expand_html_multiline_with_snippets() {
    let got = expand(
        Mode::Html,
        "div.container>h1.h1+ul.list>li.item#item$$*3^a:blank.button+br",
        "  ",
        2,
        true,
        "",
    )
    .unwrap();

    let want = "<div class=\"container\">\n      \
                <h1 class=\"h1\"></h1>\n      \
                <ul class=\"list\">\n        \
                <li id=\"item01\" class=\"item\"></li>\n        \
                <li id=\"item02\" class=\"item\"></li>\n        \
                <li id=\"item03\" class=\"item\"></li>\n      \
                </ul>\n      \
                <a href=\"https://\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"button\"></a>\n      \
                <br>\n    \
                </div>";
    assert_eq!(got, want);
}

#[test]
fn test_expand_table_snippet_numbering_and_filler() {
    let abbreviation = "body[x-data=lorem3]>(table.table$@>\
                        (thead>tr.class$$@-3>th#th.col$@*4{lorem2})+\
                        (tbody>tr.row$@1*3>td*4{lorem10})+\
                        (tfoot>tr>td*4{lorem2}))*2";

    let got = expand(Mode::Html, abbreviation, "  ", 1, true, "$$$").unwrap();

    // the filler keyword itself never reaches the output
    assert!(!got.contains("x-data=\"lorem3\""));
    assert!(got.contains("<body x-data=\""));

    assert!(got.contains("<table class=\"table1\">"));
    assert!(got.contains("<table class=\"table2\">"));
    assert!(!got.contains("<table class=\"table3\">"));

    // reverse numbering resolves against the enclosing group repetition
    assert!(got.contains("<tr class=\"class04\">"));
    assert!(got.contains("<tr class=\"class03\">"));
    assert!(!got.contains("<tr class=\"class05\">"));

    assert!(got.contains("<tr class=\"row1\">"));
    assert!(got.contains("<tr class=\"row2\">"));
    assert!(got.contains("<tr class=\"row3\">"));

    assert!(got.contains("<th id=\"th\" class=\"col1\">"));
    assert!(got.contains("<th id=\"th\" class=\"col4\">"));
    assert!(!got.contains("<th id=\"th\" class=\"col5\">"));

    assert!(got.contains("$$$STOP1$$$"));
    assert!(got.contains("</body>"));
    assert!(got.contains('\n'));
}

#[test]
fn test_expand_empty_attribute_value_tab_stop() {
    let got = expand(Mode::Html, "a[href=]", "", 0, false, "$").unwrap();
    assert_eq!(got, "<a href=\"$STOP1$\">$STOP2$</a>");

    let got = expand(Mode::Html, "a[href=]", "", 0, false, "").unwrap();
    assert_eq!(got, "<a href=\"\"></a>");
}

#[test]
fn test_expand_htmx_mode() {
    let got = expand(Mode::Htmx, "button:post", "", 0, false, "").unwrap();

    assert_eq!(
        got,
        "<button hx-post=\"https://\" hx-trigger=\"click\" hx-target=\"\" \
         hx-swap=\"innerHTML\"></button>"
    );
}

#[rstest]
#[case::dangling_star("div*", ErrorKind::InputTooShort, 3)]
#[case::unclosed_attr_list("div[a=1", ErrorKind::DirectiveClosingMissing, 3)]
#[case::unclosed_text("div{hi", ErrorKind::DirectiveClosingMissing, 3)]
#[case::stray_group_close("div)p", ErrorKind::UnexpectedGroupClosing, 3)]
#[case::unclosed_group("(div", ErrorKind::DirectiveClosingMissing, 4)]
#[case::duplicate_id("div#a#b", ErrorKind::DuplicateId, 5)]
#[case::double_plus("div++p", ErrorKind::UnexpectedDirective, 4)]
#[case::bare_at("div.x@", ErrorKind::InputTooShort, 6)]
#[case::empty_input("", ErrorKind::InputTooShort, 0)]
fn test_expand_error_offsets(
    #[case] abbreviation: &str,
    #[case] kind: ErrorKind,
    #[case] offset: usize,
) {
    let err = expand(Mode::Html, abbreviation, "", 0, false, "").unwrap_err();

    assert_eq!(err.kind, kind, "{abbreviation}");
    assert_eq!(err.offset, offset, "{abbreviation}");
}

#[test]
fn test_expand_snapshot_inline() {
    let got = expand(Mode::Html, "form>input:email+btn:s{Send}", "", 0, false, "").unwrap();

    insta::assert_snapshot!(
        got,
        @r#"<form action="post"><input type="email" name=""><button type="submit">Send</button></form>"#
    );
}

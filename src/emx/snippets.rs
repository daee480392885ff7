//! Tag-abbreviation table and default-attribute scaffolding
//!
//! Applied once between parsing and building: short tag names are expanded
//! to their full form (`bq` → `blockquote`) and well-known tags receive
//! fallback attributes (`a` → `href="#"`). Fallback attributes are only
//! added when the user didn't already write an attribute of that name.
//!
//! Based on <https://github.com/emmetio/emmet/blob/master/src/snippets/html.json>.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::emx::attr::Attr;
use crate::emx::token::{Subject, SubjectTree, TagNode};
use crate::emx::Mode;

static HTML_TAG_ABBREVIATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("bq", "blockquote"),
        ("fig", "figure"),
        ("figc", "figcaption"),
        ("pic", "picture"),
        ("ifr", "iframe"),
        ("emb", "embed"),
        ("obj", "object"),
        ("cap", "caption"),
        ("colg", "colgroup"),
        ("fst", "fieldset"),
        ("btn", "button"),
        ("optg", "optgroup"),
        ("tarea", "textarea"),
        ("leg", "legend"),
        ("sect", "section"),
        ("art", "article"),
        ("hdr", "header"),
        ("ftr", "footer"),
        ("adr", "address"),
        ("dlg", "dialog"),
        ("str", "strong"),
        ("prog", "progress"),
        ("mn", "main"),
        ("tem", "template"),
        ("fset", "fieldset"),
        ("datal", "datalist"),
        ("kg", "keygen"),
        ("out", "output"),
        ("det", "details"),
        ("sum", "summary"),
        ("cmd", "command"),
    ])
});

/// Rewrite every tag in the tree according to the mode's snippet tables.
/// XML mode performs no rewriting.
pub fn rewrite(tree: &mut SubjectTree, mode: Mode) {
    if mode == Mode::Xml {
        return;
    }

    for node in tree.nodes_mut() {
        if let Subject::Tag(tag) = node {
            apply_snippets(tag, mode);
        }
    }
}

fn apply_snippets(tag: &mut TagNode, mode: Mode) {
    if let Some(&mapped) = HTML_TAG_ABBREVIATIONS.get(tag.name.as_str()) {
        tag.name = mapped.to_string();
    }

    if mode == Mode::Htmx {
        apply_htmx_snippets(tag);
    }

    apply_html_snippets(tag);
}

fn apply_htmx_snippets(tag: &mut TagNode) {
    match tag.name.as_str() {
        "a:get" | "a:post" | "a:put" | "a:patch" | "a:delete" => {
            let method = tag.name["a:".len()..].to_string();
            tag.name = "a".to_string();
            tag.fallback_attribute(Attr::with_default("href", "https://"));
            tag.fallback_attribute(Attr::with_default(format!("hx-{method}"), "https://"));
            tag.fallback_attribute(Attr::new("hx-trigger", "click"));
            tag.fallback_attribute(Attr::with_default("hx-target", ""));
            tag.fallback_attribute(Attr::new("hx-swap", "innerHTML"));
        }
        "button:get" | "button:post" | "button:put" | "button:patch" | "button:delete" => {
            let method = tag.name["button:".len()..].to_string();
            tag.name = "button".to_string();
            tag.fallback_attribute(Attr::with_default(format!("hx-{method}"), "https://"));
            tag.fallback_attribute(Attr::new("hx-trigger", "click"));
            tag.fallback_attribute(Attr::with_default("hx-target", ""));
            tag.fallback_attribute(Attr::new("hx-swap", "innerHTML"));
        }
        "input:q" | "input:search" => {
            tag.name = "input".to_string();
            tag.fallback_attribute(Attr::new("name", "q"));
            tag.fallback_attribute(Attr::new("type", "search"));
            tag.fallback_attribute(Attr::with_default("hx-get", ""));
            tag.fallback_attribute(Attr::with_default("hx-trigger", "keyup changed delay:500ms"));
            tag.fallback_attribute(Attr::with_default("hx-target", ""));
            tag.fallback_attribute(Attr::new("hx-swap", "innerHTML"));
            tag.fallback_attribute(Attr::with_default("placeholder", ""));
        }
        "script:htmx" => {
            tag.name = "script".to_string();
            tag.fallback_attribute(Attr::with_default("src", "https://unpkg.com/htmx.org@1.9.10"));
        }
        _ => {}
    }
}

fn apply_html_snippets(tag: &mut TagNode) {
    match tag.name.as_str() {
        "a" => {
            tag.fallback_attribute(Attr::with_default("href", "#"));
        }
        "a:blank" => {
            tag.name = "a".to_string();
            tag.fallback_attribute(Attr::with_default("href", "https://"));
            tag.fallback_attribute(Attr::new("target", "_blank"));
            tag.fallback_attribute(Attr::new("rel", "noopener noreferrer"));
        }
        "a:link" => {
            tag.name = "a".to_string();
            tag.fallback_attribute(Attr::with_default("href", "https://"));
        }
        "a:mail" => {
            tag.name = "a".to_string();
            tag.fallback_attribute(Attr::with_default("href", "mailto:"));
        }
        "a:tel" => {
            tag.name = "a".to_string();
            tag.fallback_attribute(Attr::with_default("href", "tel:+"));
        }
        "abbr" | "acr" | "acronym" => {
            tag.name = "abbr".to_string();
            tag.fallback_attribute(Attr::new("title", ""));
        }
        "bdo" => {
            tag.fallback_attribute(Attr::new("dir", ""));
        }
        "bdo:r" => {
            tag.name = "bdo".to_string();
            tag.fallback_attribute(Attr::new("dir", "rtl"));
        }
        "bdo:l" => {
            tag.name = "bdo".to_string();
            tag.fallback_attribute(Attr::new("dir", "ltr"));
        }
        "link" => {
            tag.fallback_attribute(Attr::new("rel", "stylesheet"));
            tag.fallback_attribute(Attr::new("href", ""));
        }
        "link:css" => {
            tag.name = "link".to_string();
            tag.fallback_attribute(Attr::new("rel", "stylesheet"));
            tag.fallback_attribute(Attr::new("href", "style.css"));
        }
        "link:print" => {
            tag.name = "link".to_string();
            tag.fallback_attribute(Attr::new("rel", "stylesheet"));
            tag.fallback_attribute(Attr::new("href", "style.css"));
            tag.fallback_attribute(Attr::new("media", "print"));
        }
        "link:favicon" => {
            tag.name = "link".to_string();
            tag.fallback_attribute(Attr::new("rel", "shortcut icon"));
            tag.fallback_attribute(Attr::new("type", "image/x-icon"));
            tag.fallback_attribute(Attr::new("href", "favicon.ico"));
        }
        "link:mf" | "link:manifest" => {
            tag.name = "link".to_string();
            tag.fallback_attribute(Attr::new("rel", "manifest"));
            tag.fallback_attribute(Attr::new("href", "manifest.json"));
        }
        "link:touch" => {
            tag.name = "link".to_string();
            tag.fallback_attribute(Attr::new("rel", "apple-touch-icon"));
            tag.fallback_attribute(Attr::new("href", "favicon.png"));
        }
        "link:rss" => {
            tag.name = "link".to_string();
            tag.fallback_attribute(Attr::new("rel", "alternate"));
            tag.fallback_attribute(Attr::new("type", "application/rss+xml"));
            tag.fallback_attribute(Attr::new("title", "RSS"));
            tag.fallback_attribute(Attr::new("href", "rss.xml"));
        }
        "link:atom" => {
            tag.name = "link".to_string();
            tag.fallback_attribute(Attr::new("rel", "alternate"));
            tag.fallback_attribute(Attr::new("type", "application/atom+xml"));
            tag.fallback_attribute(Attr::new("title", "Atom"));
            tag.fallback_attribute(Attr::new("href", "atom.xml"));
        }
        "link:im" | "link:import" => {
            tag.name = "link".to_string();
            tag.fallback_attribute(Attr::new("rel", "import"));
            tag.fallback_attribute(Attr::new("href", "component.html"));
        }
        "meta:utf" => {
            tag.name = "meta".to_string();
            tag.fallback_attribute(Attr::new("http-equiv", "Content-Type"));
            tag.fallback_attribute(Attr::new("content", "text/html;charset=UTF-8"));
        }
        "meta:vp" => {
            tag.name = "meta".to_string();
            tag.fallback_attribute(Attr::new("name", "viewport"));
            tag.fallback_attribute(Attr::new(
                "content",
                "width=device-width, user-scalable=no, initial-scale=1.0, maximum-scale=1.0, minimum-scale=1.0",
            ));
        }
        "meta:compat" => {
            tag.name = "meta".to_string();
            tag.fallback_attribute(Attr::new("http-equiv", "X-UA-Compatible"));
            tag.fallback_attribute(Attr::new("content", "IE=7"));
        }
        "script:src" => {
            tag.name = "script".to_string();
            tag.fallback_attribute(Attr::new("src", ""));
        }
        "img" => {
            tag.fallback_attribute(Attr::new("src", ""));
            tag.fallback_attribute(Attr::new("alt", ""));
        }
        "img:s" | "img:srcset" | "ri:d" | "ri:dpr" => {
            tag.name = "img".to_string();
            tag.fallback_attribute(Attr::new("srcset", ""));
            tag.fallback_attribute(Attr::new("src", ""));
            tag.fallback_attribute(Attr::new("alt", ""));
        }
        "img:z" | "img:sizes" | "ri:v" | "ri:viewport" => {
            tag.name = "img".to_string();
            tag.fallback_attribute(Attr::new("sizes", ""));
            tag.fallback_attribute(Attr::new("srcset", ""));
            tag.fallback_attribute(Attr::new("src", ""));
            tag.fallback_attribute(Attr::new("alt", ""));
        }
        "src" => {
            tag.name = "source".to_string();
        }
        "src:sc" | "source:src" => {
            tag.name = "source".to_string();
            tag.fallback_attribute(Attr::new("src", ""));
            tag.fallback_attribute(Attr::new("type", ""));
        }
        "src:s" | "source:srcset" => {
            tag.name = "source".to_string();
            tag.fallback_attribute(Attr::new("srcset", ""));
        }
        "src:t" | "source:type" => {
            tag.name = "source".to_string();
            tag.fallback_attribute(Attr::with_default("type", "image/"));
        }
        "src:z" | "source:sizes" => {
            tag.name = "source".to_string();
            tag.fallback_attribute(Attr::new("sizes", ""));
            tag.fallback_attribute(Attr::new("srcset", ""));
        }
        "src:m" | "source:media" => {
            tag.name = "source".to_string();
            tag.fallback_attribute(Attr::with_default("media", "(min-width: )"));
            tag.fallback_attribute(Attr::new("srcset", ""));
        }
        "src:mt" | "source:media:type" => {
            tag.name = "source".to_string();
            tag.fallback_attribute(Attr::with_default("media", "(min-width: )"));
            tag.fallback_attribute(Attr::new("srcset", ""));
            tag.fallback_attribute(Attr::with_default("type", "image/"));
        }
        "src:mz" | "source:media:sizes" => {
            tag.name = "source".to_string();
            tag.fallback_attribute(Attr::with_default("media", "(min-width: )"));
            tag.fallback_attribute(Attr::new("sizes", ""));
            tag.fallback_attribute(Attr::new("srcset", ""));
        }
        "src:zt" | "source:sizes:type" => {
            tag.name = "source".to_string();
            tag.fallback_attribute(Attr::new("sizes", ""));
            tag.fallback_attribute(Attr::new("srcset", ""));
            tag.fallback_attribute(Attr::with_default("type", "image/"));
        }
        "iframe" => {
            tag.fallback_attribute(Attr::new("src", ""));
            tag.fallback_attribute(Attr::with_default("frameborder", "0"));
        }
        "embed" => {
            tag.fallback_attribute(Attr::new("src", ""));
            tag.fallback_attribute(Attr::new("type", ""));
        }
        "object" => {
            tag.fallback_attribute(Attr::new("data", ""));
            tag.fallback_attribute(Attr::new("type", ""));
        }
        "map" => {
            tag.fallback_attribute(Attr::new("name", ""));
        }
        "area" | "area:d" | "area:c" | "area:r" | "area:p" => {
            tag.fallback_attribute(Attr::new("coords", ""));
            tag.fallback_attribute(Attr::new("href", ""));
            tag.fallback_attribute(Attr::new("alt", ""));

            let shape = match tag.name.as_str() {
                "area:d" => "default",
                "area:c" => "circle",
                "area:r" => "rect",
                "area:p" => "poly",
                _ => "",
            };
            tag.fallback_attribute(Attr::new("shape", shape));

            tag.name = "area".to_string();
        }
        "form" => {
            tag.fallback_attribute(Attr::with_default("action", "post"));
        }
        "form:get" => {
            tag.name = "form".to_string();
            tag.fallback_attribute(Attr::new("action", ""));
            tag.fallback_attribute(Attr::new("method", "get"));
        }
        "form:post" => {
            tag.name = "form".to_string();
            tag.fallback_attribute(Attr::new("action", ""));
            tag.fallback_attribute(Attr::new("method", "post"));
        }
        "label" => {
            tag.fallback_attribute(Attr::new("for", ""));
        }
        "input" => {
            tag.fallback_attribute(Attr::new("type", "text"));
            tag.fallback_attribute(Attr::new("name", ""));
        }
        "input:h" | "input:hidden" => {
            input_with_type(tag, "hidden");
        }
        "input:t" | "input:text" => {
            input_with_type(tag, "text");
        }
        "input:search" => {
            input_with_type(tag, "search");
        }
        "input:email" => {
            input_with_type(tag, "email");
        }
        "input:url" => {
            input_with_type(tag, "url");
        }
        "input:p" | "input:password" => {
            input_with_type(tag, "password");
        }
        "input:datetime" => {
            input_with_type(tag, "datetime");
        }
        "input:date" => {
            input_with_type(tag, "date");
        }
        "input:datetime-local" => {
            input_with_type(tag, "datetime-local");
        }
        "input:month" => {
            input_with_type(tag, "month");
        }
        "input:week" => {
            input_with_type(tag, "week");
        }
        "input:time" => {
            input_with_type(tag, "time");
        }
        "input:tel" => {
            input_with_type(tag, "tel");
            tag.fallback_attribute(Attr::new("pattern", "[0-9]{3}-[0-9]{2}-[0-9]{3}"));
        }
        "input:number" => {
            input_with_type(tag, "number");
            tag.fallback_attribute(Attr::new("min", ""));
            tag.fallback_attribute(Attr::with_default("max", ""));
        }
        "input:color" => {
            tag.name = "input".to_string();
            tag.fallback_attribute(Attr::new("type", "color"));
            tag.fallback_attribute(Attr::new("value", ""));
            tag.fallback_attribute(Attr::new("name", ""));
        }
        "input:c" | "input:checkbox" => {
            tag.name = "input".to_string();
            tag.fallback_attribute(Attr::new("type", "checkbox"));
            tag.fallback_attribute(Attr::new("value", ""));
            tag.fallback_attribute(Attr::new("name", ""));
        }
        "input:r" | "input:radio" => {
            tag.name = "input".to_string();
            tag.fallback_attribute(Attr::new("type", "radio"));
            tag.fallback_attribute(Attr::new("value", ""));
            tag.fallback_attribute(Attr::new("name", ""));
        }
        "input:range" => {
            input_with_type(tag, "range");
            tag.fallback_attribute(Attr::new("min", ""));
            tag.fallback_attribute(Attr::new("max", ""));
        }
        "input:f" | "input:file" => {
            input_with_type(tag, "file");
        }
        "input:s" | "input:submit" => {
            tag.name = "input".to_string();
            tag.fallback_attribute(Attr::new("type", "submit"));
            tag.fallback_attribute(Attr::new("value", ""));
        }
        "input:i" | "input:image" => {
            tag.name = "input".to_string();
            tag.fallback_attribute(Attr::new("type", "image"));
            tag.fallback_attribute(Attr::new("alt", ""));
            tag.fallback_attribute(Attr::new("src", ""));
        }
        "input:b" | "input:btn" | "input:button" => {
            tag.name = "input".to_string();
            tag.fallback_attribute(Attr::new("type", "button"));
            tag.fallback_attribute(Attr::new("value", ""));
        }
        "input:reset" => {
            tag.name = "input".to_string();
            tag.fallback_attribute(Attr::new("type", "reset"));
        }
        "select" => {
            tag.fallback_attribute(Attr::new("name", ""));
        }
        "select:d" | "select:disabled" => {
            tag.name = "select".to_string();
            tag.fallback_attribute(Attr::new("name", ""));
            tag.fallback_attribute(Attr::without_equal_sign("disabled"));
        }
        "opt" | "option" => {
            tag.name = "option".to_string();
            tag.fallback_attribute(Attr::new("value", ""));
        }
        "textarea" => {
            tag.fallback_attribute(Attr::new("name", ""));
            tag.fallback_attribute(Attr::new("cols", ""));
            tag.fallback_attribute(Attr::new("rows", ""));
        }
        "marquee" => {
            tag.fallback_attribute(Attr::new("behavior", ""));
            tag.fallback_attribute(Attr::new("direction", ""));
        }
        "menu:c" => {
            tag.name = "menu".to_string();
            tag.fallback_attribute(Attr::new("type", "context"));
        }
        "menu:t" => {
            tag.name = "menu".to_string();
            tag.fallback_attribute(Attr::new("type", "toolbar"));
        }
        "video" => {
            tag.fallback_attribute(Attr::new("src", ""));
        }
        "audio" => {
            tag.fallback_attribute(Attr::new("src", ""));
        }
        "btn:s" | "button:s" | "button:submit" => {
            tag.name = "button".to_string();
            tag.fallback_attribute(Attr::new("type", "submit"));
        }
        "btn:r" | "button:l" | "button:reset" => {
            tag.name = "button".to_string();
            tag.fallback_attribute(Attr::new("type", "reset"));
        }
        "btn:b" | "button:b" | "button:button" => {
            tag.name = "button".to_string();
            tag.fallback_attribute(Attr::new("type", "button"));
        }
        "btn:d" | "button:d" | "button:disabled" => {
            tag.name = "button".to_string();
            tag.fallback_attribute(Attr::without_equal_sign("disabled"));
        }
        "fst:d" | "fset:d" | "fieldset:d" | "fieldset:disabled" => {
            tag.name = "fieldset".to_string();
            tag.fallback_attribute(Attr::without_equal_sign("disabled"));
        }
        "data" => {
            tag.fallback_attribute(Attr::new("value", ""));
        }
        "meter" => {
            tag.fallback_attribute(Attr::new("value", ""));
        }
        "time" => {
            tag.fallback_attribute(Attr::new("datetime", ""));
        }
        _ => {}
    }
}

fn input_with_type(tag: &mut TagNode, input_type: &str) {
    tag.name = "input".to_string();
    tag.fallback_attribute(Attr::new("type", input_type));
    tag.fallback_attribute(Attr::new("name", ""));
}

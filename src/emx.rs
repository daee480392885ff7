//! Main module for emx library functionality
//!
//! The pipeline is a pure string-to-string transformation:
//! raw abbreviation → [`lexer::tokenize`] → subject tree →
//! [`snippets::rewrite`] → [`build::build`] → element tree →
//! [`elem::render_elements`] → markup text.

use std::fmt;
use std::str::FromStr;

pub mod attr;
pub mod build;
pub mod elem;
pub mod error;
pub mod lexer;
pub mod snippets;
pub mod token;

pub use attr::{number, Attr, AttrValue, Text};
pub use build::build;
pub use elem::{render_elements, Elem, RenderSettings, TabStops};
pub use error::{ErrorKind, ParseError};
pub use lexer::tokenize;
pub use snippets::rewrite;
pub use token::{Directive, GroupNode, NodeId, Subject, SubjectTree, TagNode};

/// Output dialect. Htmx renders like HTML but applies an additional snippet
/// set during the rewrite pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Html,
    Xml,
    Htmx,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Html => write!(f, "html"),
            Mode::Xml => write!(f, "xml"),
            Mode::Htmx => write!(f, "htmx"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Mode::Html),
            "xml" => Ok(Mode::Xml),
            "htmx" => Ok(Mode::Htmx),
            other => Err(format!("unknown mode '{other}'")),
        }
    }
}

/// Expand an abbreviation into markup.
///
/// `indentation` is one indentation level (empty disables indentation),
/// `start_depth` the indentation level of the outermost elements, and
/// `tab_stop_wrapper` the characters wrapped around editor tab-stop names
/// (empty disables tab stops). The first malformed token aborts with a
/// [`ParseError`] carrying the rune offset of the failure.
pub fn expand(
    mode: Mode,
    abbreviation: &str,
    indentation: &str,
    start_depth: usize,
    multiline: bool,
    tab_stop_wrapper: &str,
) -> Result<String, ParseError> {
    let elems = expand_to_elements(mode, abbreviation)?;

    let settings = RenderSettings {
        mode,
        indentation: indentation.to_string(),
        start_depth,
        multiline,
        tab_stop_wrapper: tab_stop_wrapper.to_string(),
    };

    Ok(render_elements(&elems, &settings))
}

/// Run the pipeline up to the built element tree, without rendering. This is
/// the hook for callers that want a structural view of the expansion (e.g.
/// the CLI's JSON output).
pub fn expand_to_elements(mode: Mode, abbreviation: &str) -> Result<Vec<Elem>, ParseError> {
    let mut tree = tokenize(abbreviation)?;
    rewrite(&mut tree, mode);

    Ok(build(&tree))
}

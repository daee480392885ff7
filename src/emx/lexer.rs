//! Scanner and tree assembly for abbreviation strings
//!
//! The abbreviation grammar is a handful of small, interacting sub-grammars
//! (tag names, class/id tokens, numbering directives, attribute lists,
//! repeat counts, brace-delimited text). Each sub-scanner consumes runes
//! from the front of a slice and reports how many it consumed, so failure
//! offsets stay exact all the way up through nested groups.
//!
//! [`tokenize`] drives the scanners: it parses one subject, then repeated
//! (directive, subject) pairs, attaching each new subject to the
//! [`SubjectTree`] according to the directive semantics (`+` sibling,
//! `>` child, `^` run ascend, `)` group close).

use crate::emx::attr::{Attr, AttrValue, Text};
use crate::emx::error::{ErrorKind, ParseError};
use crate::emx::token::{Directive, GroupNode, NodeId, Subject, SubjectTree, TagNode};

fn allowed_class_name(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn allowed_html_tag_name(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

// The snippet grammar (`input:text`, `a:blank`) relies on `:` being part of
// a tag name, so the XML name predicate applies in every mode.
fn allowed_tag_name(c: char) -> bool {
    allowed_html_tag_name(c) || c == ':'
}

fn allowed_number(c: char) -> bool {
    c.is_ascii_digit()
}

fn allowed_text(c: char) -> bool {
    c != '}'
}

fn allowed_quote_content(c: char) -> bool {
    c != '"'
}

fn allowed_unquoted_attribute(c: char) -> bool {
    c != ' ' && c != ']'
}

/// Consume runes from the front of `runes` while `allowed` holds. Returns
/// the collected value and the number of runes consumed.
pub fn scan_token_value(runes: &[char], allowed: impl Fn(char) -> bool) -> (String, usize) {
    let length = runes.iter().take_while(|&&c| allowed(c)).count();

    (runes[..length].iter().collect(), length)
}

/// A scanned numbering directive: `$`-run width, optional `@[-]start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numbering {
    pub start: i64,
    pub reverse: bool,
    pub width: String,
}

/// Scan a numbering directive (`$`*`@`\[`-`\]digits?).
///
/// The `$` run length is the zero-pad width. A following `@` may introduce a
/// start value, with a leading `-` selecting reverse counting. A bare `@`
/// (no `$` run, no `-`, no digits) is an error.
pub fn scan_numbering(runes: &[char]) -> Result<(Numbering, usize), ParseError> {
    let mut pos = 0;
    while pos < runes.len() && runes[pos] == '$' {
        pos += 1;
    }

    let width: String = runes[..pos].iter().collect();

    if runes.get(pos) != Some(&'@') {
        return Ok((
            Numbering {
                start: 1,
                reverse: false,
                width,
            },
            pos,
        ));
    }

    pos += 1;

    // @ can't be the last character of a numbering directive
    if pos >= runes.len() {
        return Err(ParseError::new(ErrorKind::InputTooShort, pos));
    }

    let mut reverse = false;
    if runes[pos] == '-' {
        pos += 1;
        reverse = true;
    }

    let (digits, length) = scan_token_value(&runes[pos..], allowed_number);
    if length == 0 {
        // @ must be followed by something it modifies
        if !reverse && width.is_empty() {
            return Err(ParseError::new(ErrorKind::InputTooShort, pos));
        }

        return Ok((
            Numbering {
                start: 1,
                reverse,
                width,
            },
            pos,
        ));
    }

    let start = digits.parse().unwrap_or(1);
    pos += length;

    Ok((
        Numbering {
            start,
            reverse,
            width,
        },
        pos,
    ))
}

/// Scan a class or id token: `.name` or `#name`, optionally followed by a
/// numbering directive. The caller distinguishes the two by the leading
/// rune.
pub fn scan_class_or_id(runes: &[char]) -> Result<(AttrValue, usize), ParseError> {
    if runes.len() < 2 {
        return Err(ParseError::new(ErrorKind::InputTooShort, 0));
    }

    if runes[0] != '.' && runes[0] != '#' {
        return Err(ParseError::new(ErrorKind::InvalidCharacter, 0));
    }

    let (value, length) = scan_token_value(&runes[1..], allowed_class_name);
    if length == 0 {
        return Err(ParseError::new(ErrorKind::InputTooShort, 1));
    }

    let mut token = AttrValue::new(value);
    let mut pos = length + 1;

    if matches!(runes.get(pos), Some('$') | Some('@')) {
        let (numbering, consumed) = scan_numbering(&runes[pos..]).map_err(|e| e.shift(pos))?;

        token.numbering = numbering.width;
        token.start = numbering.start;
        token.reverse = numbering.reverse;
        pos += consumed;
    }

    Ok((token, pos))
}

/// Scan one attribute inside a `[...]` list: `name`, `name=`, `name=bare`
/// or `name="quoted"`. Absence of `=` marks the attribute as valueless.
pub fn scan_attribute(runes: &[char]) -> Result<(Attr, usize), ParseError> {
    let (name, length) = scan_token_value(runes, allowed_class_name);

    // Attribute name can't be empty
    if length == 0 {
        return Err(ParseError::new(ErrorKind::InputTooShort, 0));
    }

    match runes.get(length).copied() {
        None | Some(' ') | Some(']') => return Ok((Attr::without_equal_sign(name), length)),
        Some('=') => {}
        Some(_) => return Err(ParseError::new(ErrorKind::InvalidCharacter, length)),
    }

    let pos = length + 1;

    match runes.get(pos).copied() {
        None | Some(' ') => Ok((Attr::new(name, ""), pos)),
        Some('"') => {
            let (value, value_length) = scan_token_value(&runes[pos + 1..], allowed_quote_content);

            // the scan stopped at the closing quote or ran off the end
            if pos + 1 + value_length >= runes.len() {
                return Err(ParseError::new(ErrorKind::DirectiveClosingMissing, pos));
            }

            Ok((Attr::new(name, value), pos + value_length + 2))
        }
        Some(_) => {
            let (value, value_length) = scan_token_value(&runes[pos..], allowed_unquoted_attribute);

            Ok((Attr::new(name, value), pos + value_length))
        }
    }
}

/// Scan a `[attr attr ...]` list, skipping intervening spaces, up to and
/// including the closing bracket.
pub fn scan_attribute_list(runes: &[char]) -> Result<(Vec<Attr>, usize), ParseError> {
    if runes.len() < 2 {
        return Err(ParseError::new(ErrorKind::InputTooShort, 0));
    }

    if runes[0] != '[' {
        return Err(ParseError::new(ErrorKind::InvalidCharacter, 0));
    }

    let mut attributes = Vec::new();
    let mut pos = 1;

    while pos < runes.len() {
        if runes[pos] == ']' {
            return Ok((attributes, pos + 1));
        }

        let (attr, length) = scan_attribute(&runes[pos..]).map_err(|e| e.shift(pos))?;
        pos += length;
        attributes.push(attr);

        while pos < runes.len() && runes[pos] == ' ' {
            pos += 1;
        }
    }

    Err(ParseError::new(ErrorKind::DirectiveClosingMissing, 0))
}

/// Scan a `*digits` repeat count. Absence of `*` yields repeat 1 with zero
/// runes consumed; values below 1 clamp to 1.
pub fn scan_repeat(runes: &[char]) -> Result<(usize, usize), ParseError> {
    if runes.is_empty() || runes[0] != '*' {
        return Ok((1, 0));
    }

    let (digits, length) = scan_token_value(&runes[1..], allowed_number);
    if length == 0 {
        return Err(ParseError::new(ErrorKind::InputTooShort, 0));
    }

    let repeat: usize = digits
        .parse()
        .map_err(|_| ParseError::new(ErrorKind::InvalidCharacter, 1))?;

    Ok((repeat.max(1), length + 1))
}

/// Scan a `{...}` text token. An empty `{}` is valid and yields no text.
pub fn scan_text(runes: &[char]) -> Result<(Option<Text>, usize), ParseError> {
    if runes.is_empty() || runes[0] != '{' {
        return Ok((None, 0));
    }

    let (value, length) = scan_token_value(&runes[1..], allowed_text);
    if length == 0 {
        return match runes.get(1) {
            Some('}') => Ok((None, 2)),
            _ => Err(ParseError::new(ErrorKind::DirectiveClosingMissing, 0)),
        };
    }

    if runes.get(length + 1) != Some(&'}') {
        return Err(ParseError::new(ErrorKind::DirectiveClosingMissing, 0));
    }

    Ok((Some(Text::new(value)), length + 2))
}

/// Scan the id/class/attribute decorations following a tag name, in any
/// interleaving: `[...]` attribute lists, `.class` tokens, one `#id` token.
/// A second id is an error.
fn scan_tag_decorations(tag: &mut TagNode, runes: &[char]) -> Result<usize, ParseError> {
    let mut pos = 0;

    while pos < runes.len() {
        match runes[pos] {
            '[' => {
                let (attrs, length) =
                    scan_attribute_list(&runes[pos..]).map_err(|e| e.shift(pos))?;

                tag.attributes.extend(attrs);
                pos += length;
            }
            '.' => {
                let (class, length) = scan_class_or_id(&runes[pos..]).map_err(|e| e.shift(pos))?;

                tag.classes.push(class);
                pos += length;
            }
            '#' => {
                if tag.id.is_some() {
                    return Err(ParseError::new(ErrorKind::DuplicateId, pos));
                }

                let (id, length) = scan_class_or_id(&runes[pos..]).map_err(|e| e.shift(pos))?;

                tag.id = Some(id);
                pos += length;
            }
            _ => break,
        }
    }

    Ok(pos)
}

/// Scan a full tag token: name, decorations, repeat count, text — in that
/// fixed order.
pub fn scan_tag(runes: &[char]) -> Result<(TagNode, usize), ParseError> {
    if runes.is_empty() {
        return Err(ParseError::new(ErrorKind::InputTooShort, 0));
    }

    let (name, length) = scan_token_value(runes, allowed_tag_name);
    if length == 0 {
        return Err(ParseError::new(ErrorKind::InputTooShort, 0));
    }

    let mut tag = TagNode::new(name);
    let mut pos = length;

    pos += scan_tag_decorations(&mut tag, &runes[pos..]).map_err(|e| e.shift(pos))?;

    let (repeat, repeat_length) = scan_repeat(&runes[pos..]).map_err(|e| e.shift(pos))?;
    if repeat_length > 0 {
        tag.repeat = repeat;
        pos += repeat_length;
    }

    let (text, text_length) = scan_text(&runes[pos..]).map_err(|e| e.shift(pos))?;
    tag.text = text;
    pos += text_length;

    Ok((tag, pos))
}

/// Scan one subject: a parenthesized group (parsed recursively, with an
/// optional trailing repeat count) or a single tag token. The subject is
/// allocated into `tree` and its id returned.
fn scan_subject(tree: &mut SubjectTree, runes: &[char]) -> Result<(NodeId, usize), ParseError> {
    if runes.is_empty() {
        return Err(ParseError::new(ErrorKind::InputTooShort, 0));
    }

    if runes[0] == '(' {
        let (children, length) = tokenize_at(tree, &runes[1..], true).map_err(|e| e.shift(1))?;
        let mut pos = 1 + length;

        let (repeat, repeat_length) = if pos < runes.len() {
            scan_repeat(&runes[pos..]).map_err(|e| e.shift(pos))?
        } else {
            (1, 0)
        };
        pos += repeat_length;

        let group = tree.alloc(Subject::Group(GroupNode::new(repeat)));
        for child in children {
            tree.add_child(group, child);
        }

        return Ok((group, pos));
    }

    let (tag, pos) = scan_tag(runes)?;

    Ok((tree.alloc(Subject::Tag(tag)), pos))
}

/// Scan one directive token: `+`, `>`, a run of `^`, or `)`. Mixing
/// directive characters within one run is an error, and `+`, `>`, `)`
/// cannot repeat.
pub fn scan_directive(runes: &[char]) -> Result<(Directive, usize), ParseError> {
    if runes.is_empty() {
        return Err(ParseError::new(ErrorKind::InputTooShort, 0));
    }

    let mut directive: Option<Directive> = None;
    let mut consumed = 0;

    for &c in runes {
        match c {
            '+' | '>' => {
                if directive.is_some() {
                    return Err(ParseError::new(ErrorKind::UnexpectedDirective, consumed));
                }

                directive = Some(if c == '+' { Directive::Add } else { Directive::Dive });
                consumed = 1;
            }
            '^' => match directive {
                None => {
                    directive = Some(Directive::Ascend(1));
                    consumed = 1;
                }
                Some(Directive::Ascend(n)) => {
                    directive = Some(Directive::Ascend(n + 1));
                    consumed += 1;
                }
                Some(_) => {
                    return Err(ParseError::new(ErrorKind::UnexpectedDirective, consumed));
                }
            },
            ')' => {
                if directive.is_some() {
                    return Err(ParseError::new(ErrorKind::UnexpectedDirective, consumed));
                }

                return Ok((Directive::CloseGroup, 1));
            }
            _ => break,
        }
    }

    match directive {
        Some(d) => Ok((d, consumed)),
        None => Err(ParseError::new(ErrorKind::InvalidCharacter, 0)),
    }
}

/// Attach `subject` relative to `last` according to `directive`, mutating
/// the top-level sequence for this nesting scope when the walk runs out of
/// parents.
fn attach(
    tree: &mut SubjectTree,
    directive: Directive,
    subject: NodeId,
    roots: &mut Vec<NodeId>,
    last: NodeId,
) {
    match directive {
        Directive::Add => match tree.parent_of(last) {
            Some(parent) => tree.add_child(parent, subject),
            None => roots.push(subject),
        },
        Directive::Dive => tree.add_child(last, subject),
        Directive::Ascend(count) => {
            // The last subject's immediate parent is the level it already
            // occupies, so one extra climb is needed; climbing past the root
            // silently stops there, in line with Emmet.
            let mut cursor = Some(last);
            for _ in 0..=count {
                cursor = cursor.and_then(|id| tree.parent_of(id));
                if cursor.is_none() {
                    break;
                }
            }

            match cursor {
                Some(parent) => tree.add_child(parent, subject),
                None => roots.push(subject),
            }
        }
        // filtered out by the tokenize loop before attach is reached
        Directive::CloseGroup => unreachable!(),
    }
}

fn tokenize_at(
    tree: &mut SubjectTree,
    runes: &[char],
    in_group: bool,
) -> Result<(Vec<NodeId>, usize), ParseError> {
    let mut pos = 0;

    let (first, length) = scan_subject(tree, runes)?;
    pos += length;

    let mut roots = vec![first];
    let mut last = first;

    while pos < runes.len() {
        let directive_start = pos;
        let (directive, length) = scan_directive(&runes[pos..]).map_err(|e| e.shift(pos))?;
        pos += length;

        if directive == Directive::CloseGroup {
            if in_group {
                return Ok((roots, pos));
            }

            return Err(ParseError::new(
                ErrorKind::UnexpectedGroupClosing,
                directive_start,
            ));
        }

        let (subject, length) = scan_subject(tree, &runes[pos..]).map_err(|e| e.shift(pos))?;
        pos += length;

        attach(tree, directive, subject, &mut roots, last);
        last = subject;
    }

    if in_group {
        return Err(ParseError::new(ErrorKind::DirectiveClosingMissing, pos));
    }

    Ok((roots, pos))
}

/// Parse an abbreviation string into a [`SubjectTree`]. The whole input must
/// be consumed; the first malformed token aborts with the rune offset at
/// which it occurred.
pub fn tokenize(input: &str) -> Result<SubjectTree, ParseError> {
    let runes: Vec<char> = input.chars().collect();
    let mut tree = SubjectTree::new();

    let (roots, _) = tokenize_at(&mut tree, &runes, false)?;
    tree.set_roots(roots);

    Ok(tree)
}

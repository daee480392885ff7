//! Error types for abbreviation parsing
//!
//! Every scanner reports the rune offset at which it failed, relative to the
//! slice it was handed. As the error bubbles out of nested scanners each
//! caller rebases the offset with [`ParseError::shift`], so the error that
//! finally leaves [`tokenize`](crate::emx::lexer::tokenize) carries the
//! absolute position within the abbreviation string.

use thiserror::Error;

/// The failure classes the scanners can report. Parsing is all-or-nothing:
/// the first error aborts and no partial output is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A required token could not be scanned because input ended prematurely.
    #[error("input too short")]
    InputTooShort,
    /// An unexpected character was found where a specific grammar expected
    /// something else.
    #[error("invalid character")]
    InvalidCharacter,
    /// An opened brace, bracket, quote or parenthesis was never closed.
    #[error("directive closing missing")]
    DirectiveClosingMissing,
    /// A `)` appeared with no matching open group in scope.
    #[error("unexpected group closing")]
    UnexpectedGroupClosing,
    /// A grammatically invalid directive combination, e.g. `+^` or `++`.
    #[error("unexpected directive")]
    UnexpectedDirective,
    /// A tag token specified more than one id.
    #[error("duplicate id")]
    DuplicateId,
}

/// A parse failure at a specific rune offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to tokenize at position {offset}: {kind}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Rebase the offset into the caller's coordinate space.
    #[must_use]
    pub fn shift(mut self, base: usize) -> Self {
        self.offset += base;
        self
    }
}

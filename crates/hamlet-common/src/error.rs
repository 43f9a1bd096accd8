//! Parse errors for the hamlet compiler.
//!
//! Every failure is fatal to the parse call that raised it. Line-level
//! sub-parsers produce a bare [`ErrorKind`]; the tree builder wraps it in a
//! [`ParseError`] together with the offending source line, and the caller
//! may attach a source identifier (usually a file path) on top.

use core::fmt;

use thiserror::Error;

/// The category of a parse failure, with its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A `%` with nothing after it.
    #[error("encountered a blank tag, expected a name")]
    BlankTag,

    /// A `%` followed by something that cannot start a tag name.
    #[error("expected a name for the tag, but instead found '{0}'")]
    InvalidTagName(char),

    /// A `.` or `#` selector token with an empty name.
    #[error("encountered an empty {0} name")]
    EmptySelectorPart(&'static str),

    /// An element was given two ids.
    #[error("element cannot have more than one id")]
    DuplicateId,

    /// A `.class` token after the `#id` token.
    #[error("encountered a class after an id (the id must be last)")]
    ClassAfterId,

    /// The same attribute was declared twice in one attribute list.
    #[error("found duplicate attribute: {0}")]
    DuplicateAttribute(String),

    /// A character the attribute state machine has no transition for.
    #[error("unexpected character while parsing attributes: '{0}'")]
    UnexpectedCharacter(char),

    /// An `=` followed directly by the closing parenthesis.
    #[error("unexpected end of attributes (do you have an extra equals sign?)")]
    DanglingEquals,

    /// The line ended before the closing parenthesis.
    #[error("reached end of line while parsing attributes")]
    UnterminatedAttributes,

    /// An unquoted value that is not a plain decimal integer.
    #[error("invalid integer literal '{0}' (string attributes must be surrounded with quotes)")]
    InvalidIntegerLiteral(String),

    /// Something other than a space, `(` or `=` directly after a selector.
    #[error("expected a space or '(', but found '{0}' instead")]
    ExpectedSpaceOrAttributes(char),

    /// Leading whitespace that is not a multiple of the indentation unit.
    #[error("uneven indentation level (expected a multiple of {unit})")]
    UnevenIndentation {
        /// Number of whitespace characters in one indentation unit.
        unit: usize,
    },

    /// Leading whitespace mixing spaces and tabs.
    #[error("mismatched whitespace at start of line (use spaces or tabs, not both)")]
    MixedIndentation,

    /// Indentation that grew by more than one level.
    #[error("too much indentation (expected at most level {allowed}, found level {found})")]
    ExcessIndentation {
        /// Deepest level the line could have used.
        allowed: usize,
        /// Level the line actually used.
        found: usize,
    },

    /// Block or variable syntax used without a template engine.
    #[error("{0} syntax requires a template engine, but none is configured")]
    EngineNotConfigured(&'static str),

    /// A block token with no keyword after it.
    #[error("encountered a block with no keyword")]
    EmptyBlock,

    /// A continuation keyword (`else`, `elif`, `empty`) with no block before
    /// it that it can continue.
    #[error("'{0}' must directly follow a block it can continue")]
    UnlinkedContinuation(String),

    /// A variable token with no expression after it.
    #[error("encountered a blank variable")]
    EmptyVariable,

    /// A `!!!` line naming a doctype that is not in the table.
    #[error("unrecognized doctype: '{0}'")]
    UnknownDoctype(String),
}

/// A fatal parse failure, located in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ParseError {
    /// What went wrong.
    #[source]
    pub kind: ErrorKind,
    /// 1-based number of the offending line.
    pub line_number: Option<usize>,
    /// The offending line as it appeared in the source, before stripping.
    pub line: Option<String>,
    /// Caller-supplied identifier of the source buffer (e.g. a file path).
    pub source_name: Option<String>,
}

impl ParseError {
    /// Create an error that is not yet tied to a source location.
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            line_number: None,
            line: None,
            source_name: None,
        }
    }

    /// Attach the line that caused the error.
    ///
    /// A location that is already set is kept, so the innermost report wins.
    #[must_use]
    pub fn at_line(mut self, line_number: usize, line: &str) -> Self {
        if self.line_number.is_none() {
            self.line_number = Some(line_number);
            self.line = Some(line.to_string());
        }
        self
    }

    /// Attach an identifier for the source buffer.
    #[must_use]
    pub fn with_source(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    /// The error category.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The human-readable reason, without location information.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl From<ErrorKind> for ParseError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Syntax error")?;
        if let Some(line_number) = self.line_number {
            write!(f, " on line {line_number}")?;
        }
        if let Some(source_name) = &self.source_name {
            write!(f, " in file {source_name}")?;
        }
        if let Some(line) = &self.line {
            write!(f, "\n\n{line}")?;
        }
        write!(f, "\n\nReason: {}", self.kind)
    }
}

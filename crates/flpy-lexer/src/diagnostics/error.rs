//! Structured lexical errors (§7).
//!
//! `LexError` enumerates the taxonomy the Raw Scanner, Indentation Engine, and
//! Token Assembler can report. `Error` is the plain record shared with the
//! syntactic analyzer: `{message, line, column, type, data}`.

use std::fmt;

use thiserror::Error;

/// Coarse error-type tag (§7), used for the `[TYPE]` suffix in user-visible text
/// and as the `type` field of `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Character not accepted by any production.
    UnknownChar,
    /// Unterminated string literal.
    String,
    /// Backslash followed by a disallowed character.
    Escape,
    /// Unexpected indent, or dedent that matches no outer level.
    Indent,
    /// Closer without opener, or opener without closer at EOF.
    Bracket,
    /// Catch-all, used for malformed numerics.
    Lexical,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::UnknownChar => "UNKNOWN_CHAR",
            Self::String => "STRING",
            Self::Escape => "ESCAPE",
            Self::Indent => "INDENT",
            Self::Bracket => "BRACKET",
            Self::Lexical => "LEXICAL",
        };
        write!(f, "{tag}")
    }
}

/// The taxonomy of lexical errors (§7), `thiserror`-derived for message
/// formatting. Each variant carries enough context to format the §7
/// user-visible string and to classify itself under an `ErrorType`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character not accepted by any production in the Token Catalog.
    #[error("unexpected character {character:?}")]
    UnknownChar {
        /// The offending character.
        character: char,
    },

    /// A string literal with no closing quote before end-of-line or EOF.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A backslash followed by a character outside the accepted escape set.
    ///
    /// Not emitted while escapes are accepted as pass-through (§4.2); retained
    /// for a future scanner that tightens the escape grammar.
    #[error("invalid escape sequence '\\{character}'")]
    BadEscape {
        /// The character following the backslash.
        character: char,
    },

    /// Indentation increased without the prior line announcing a new block.
    #[error("unexpected indentation")]
    UnexpectedIndent,

    /// A dedent landed on a column that matches no open indent level.
    #[error("inconsistent dedent — does not match any outer indentation level")]
    InconsistentIndent,

    /// A bracket closer with no matching opener, or an opener still open at EOF.
    #[error("{lexeme} without a matching opener")]
    BracketMismatch {
        /// The offending closer, or the still-open opener at EOF.
        lexeme: String,
    },

    /// A numeric literal whose shape the Raw Scanner could not complete.
    #[error("malformed numeric literal '{lexeme}'")]
    MalformedNumber {
        /// The partial lexeme scanned so far.
        lexeme: String,
    },
}

impl LexError {
    /// Returns the coarse `ErrorType` this variant is reported under.
    #[must_use]
    pub const fn error_type(&self) -> ErrorType {
        match self {
            Self::UnknownChar { .. } => ErrorType::UnknownChar,
            Self::UnterminatedString => ErrorType::String,
            Self::BadEscape { .. } => ErrorType::Escape,
            Self::UnexpectedIndent | Self::InconsistentIndent => ErrorType::Indent,
            Self::BracketMismatch { .. } => ErrorType::Bracket,
            Self::MalformedNumber { .. } => ErrorType::Lexical,
        }
    }

    /// Returns the offending lexeme/data carried by this error, if any.
    #[must_use]
    pub fn data(&self) -> String {
        match self {
            Self::UnknownChar { character } | Self::BadEscape { character } => character.to_string(),
            Self::BracketMismatch { lexeme } | Self::MalformedNumber { lexeme } => lexeme.clone(),
            Self::UnterminatedString | Self::UnexpectedIndent | Self::InconsistentIndent => {
                String::new()
            }
        }
    }
}

/// A single entry in the Error Log: `{message, line, column, type, data}` (§3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// Human-readable description of the error.
    pub message: String,
    /// 1-based line of the offending text.
    pub line: usize,
    /// 1-based, tab-expanded column of the offending text.
    pub column: usize,
    /// Coarse taxonomy tag.
    pub kind: ErrorType,
    /// The offending lexeme, or empty if not applicable.
    pub data: String,
}

impl Error {
    /// Builds an `Error` from a `LexError` and the position it occurred at.
    #[must_use]
    pub fn new(error: LexError, line: usize, column: usize) -> Self {
        let data = error.data();
        let kind = error.error_type();
        Self { message: error.to_string(), line, column, kind, data }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, col {}: {} [{}]", self.line, self.column, self.message, self.kind)
    }
}

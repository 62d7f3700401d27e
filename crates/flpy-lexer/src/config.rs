//! Lexer configuration.
//!
//! The tunables the core leaves as constants or deliberately open: the
//! tab-expansion width, an optional cap on recorded errors, and whether
//! same-line errors are deduplicated. Duplicate suppression is a presentation
//! policy (§7) — the mechanism lives here, disabled by default, leaving the
//! policy decision to whatever drives the lexer next.

/// Configuration for a `Lexer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Column width of a tab stop used when expanding leading whitespace (§4.1).
    pub tab_width: usize,
    /// Maximum number of errors to record before collapsing further ones into a
    /// single "too many errors" entry. `None` means unbounded.
    pub max_errors: Option<usize>,
    /// Suppress a new error if the previous recorded error was on the same line.
    pub suppress_duplicate_line_errors: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self { tab_width: crate::lexer::TAB_WIDTH, max_errors: None, suppress_duplicate_line_errors: false }
    }
}

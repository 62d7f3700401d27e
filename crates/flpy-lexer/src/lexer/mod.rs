//! The lexical analysis core: Raw Scanner, Indentation Engine, and Token
//! Assembler (§4), composed behind a single `Lexer` that hands out one token
//! at a time.
//!
//! The three pieces are not separate types — they are phases inside
//! [`Lexer::next_token`]. The Raw Scanner is [`Lexer::scan_raw`], a thin
//! wrapper over the generated `logos` scanner plus hand-written recovery for
//! what `logos` alone cannot classify (§4.2). The Indentation Engine is
//! [`Lexer::run_indentation_engine`], invoked at the start of every logical
//! line. The Token Assembler is the body of `next_token`: it drains the
//! pending queue first, intercepts physical newlines and bracket depth, and
//! reclassifies identifiers against the keyword table.

mod rules;
mod token;

use std::cmp::Ordering;
use std::collections::VecDeque;

use flpy_source::{FileID, Position};
use logos::Logos;
pub use rules::{TAB_WIDTH, expand_leading_whitespace, reclassify_keyword};
pub use token::{Token, TokenKind};

use crate::config::LexerConfig;
use crate::diagnostics::{Error, ErrorLog, ErrorType, LexError};
use crate::symbol::SymbolTable;

/// Outcome of one Raw Scanner step, before the Token Assembler sees it.
enum Raw<'src> {
    Lexeme(Token<'src>),
    Newline,
    Eof,
}

/// The lexical analysis core (§4): converts a source buffer into a stream of
/// tokens, tracking indentation and bracket depth as it goes.
///
/// Errors are pushed to a shared [`ErrorLog`] and identifiers are registered
/// in a shared [`SymbolTable`] rather than returned alongside each token —
/// both are cloned handles (`Rc<RefCell<_>>` underneath) so the syntactic
/// analyzer that drives the lexer can inspect them as it consumes the stream.
#[derive(Debug)]
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
    file_id: FileID,
    config: LexerConfig,
    errors: ErrorLog,
    symbol_table: SymbolTable,

    /// Open indentation levels, strictly increasing, always starting at `[0]`.
    indent_stack: Vec<usize>,
    /// Set after a top-level `:`; cleared by the next indentation decision.
    expect_indent: bool,
    /// Nesting depth of `(`, `[`, `{` (the Delimiter Depth, §4.4).
    delim_depth: usize,
    /// Tokens already produced by the Indentation Engine, awaiting return.
    pending: VecDeque<Token<'src>>,
    /// Set after a logical `NEWLINE`, or at the very start of input: the next
    /// iteration of the assembler loop must run the Indentation Engine first.
    awaiting_line_start: bool,
    /// Set once end-of-input bookkeeping (final DEDENTs, EOF) has run.
    eof_handled: bool,

    line: usize,
    column: usize,
}

impl<'src> Lexer<'src> {
    /// Builds a lexer with the default configuration (§9: tab width 4, no
    /// error cap, no duplicate suppression).
    #[must_use]
    pub fn build(source: &'src str, file_id: FileID) -> Self {
        Self::with_config(source, file_id, LexerConfig::default())
    }

    /// Builds a lexer with an explicit configuration.
    #[must_use]
    pub fn with_config(source: &'src str, file_id: FileID, config: LexerConfig) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
            file_id,
            config,
            errors: ErrorLog::new(),
            symbol_table: SymbolTable::new(),
            indent_stack: vec![0],
            expect_indent: false,
            delim_depth: 0,
            pending: VecDeque::new(),
            awaiting_line_start: true,
            eof_handled: false,
            line: 1,
            column: 1,
        }
    }

    /// Re-targets this lexer at a new source buffer, clearing all state
    /// including the shared Error Log and Symbol Table (§4.6, §4.5).
    pub fn input(&mut self, source: &'src str, file_id: FileID) {
        self.inner = TokenKind::lexer(source);
        self.source = source;
        self.file_id = file_id;
        self.errors.clear();
        self.symbol_table.clear();
        self.indent_stack = vec![0];
        self.expect_indent = false;
        self.delim_depth = 0;
        self.pending.clear();
        self.awaiting_line_start = true;
        self.eof_handled = false;
        self.line = 1;
        self.column = 1;
    }

    /// Returns the shared Error Log.
    #[must_use]
    pub const fn errors(&self) -> &ErrorLog { &self.errors }

    /// Returns the shared Symbol Table.
    #[must_use]
    pub const fn symbol_table(&self) -> &SymbolTable { &self.symbol_table }

    /// Returns the file this lexer is reading from.
    #[must_use]
    pub const fn file_id(&self) -> FileID { self.file_id }

    /// Produces the next token (§4.4, steps 1-8).
    pub fn next_token(&mut self) -> Token<'src> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                log::trace!("{token} (from pending queue)");
                return token;
            }

            if self.awaiting_line_start && self.delim_depth == 0 {
                self.awaiting_line_start = false;
                let (column, is_blank_or_comment, position) = self.measure_leading_line();
                self.run_indentation_engine(column, is_blank_or_comment, position);
                continue;
            }

            match self.scan_raw() {
                Raw::Lexeme(token) => {
                    if let Some(emitted) = self.assemble(token) {
                        log::trace!("{emitted}");
                        return emitted;
                    }
                }
                Raw::Newline => {
                    if self.delim_depth > 0 {
                        // Implicit continuation inside brackets (§4.4 step 3).
                        continue;
                    }
                    self.awaiting_line_start = true;
                    let token = Token::with_empty_lexeme(TokenKind::Newline, self.position());
                    log::trace!("{token}");
                    return token;
                }
                Raw::Eof => return self.handle_eof(),
            }
        }
    }

    /// The Indentation Engine (§4.3): given the tab-expanded column of the
    /// first non-whitespace character on a logical line, decides whether to
    /// push `INDENT`, pop `DEDENT`s, or leave the stack untouched.
    fn run_indentation_engine(&mut self, column: usize, is_blank_or_comment: bool, position: Position) {
        if is_blank_or_comment {
            return;
        }

        let top = *self.indent_stack.last().unwrap_or(&0);
        match column.cmp(&top) {
            Ordering::Equal => {}
            Ordering::Greater => {
                if !self.expect_indent {
                    self.record_error(LexError::UnexpectedIndent, position);
                }
                self.indent_stack.push(column);
                self.pending.push_back(Token::with_empty_lexeme(TokenKind::Indent, position));
            }
            Ordering::Less => {
                while *self.indent_stack.last().unwrap_or(&0) > column {
                    let _ = self.indent_stack.pop();
                    self.pending.push_back(Token::with_empty_lexeme(TokenKind::Dedent, position));
                }
                if *self.indent_stack.last().unwrap_or(&0) != column {
                    self.record_error(LexError::InconsistentIndent, position);
                    // Do not push `column`; continue as if `column == new top` (§4.3).
                }
            }
        }
        self.expect_indent = false;
    }

    /// The Token Assembler's per-token bookkeeping (§4.4 steps 4-8): tracks
    /// bracket depth, reclassifies identifiers against the keyword table and
    /// registers them in the Symbol Table, and raises the Expect-Indent Flag
    /// on a top-level `:`. Every real token is emitted; this never swallows one.
    fn assemble(&mut self, mut token: Token<'src>) -> Option<Token<'src>> {
        match token.kind {
            TokenKind::LParen | TokenKind::LBrack | TokenKind::LBrace => {
                self.delim_depth += 1;
            }
            TokenKind::RParen | TokenKind::RBrack | TokenKind::RBrace => {
                if self.delim_depth == 0 {
                    self.record_error(
                        LexError::BracketMismatch { lexeme: token.lexeme.to_string() },
                        token.position,
                    );
                } else {
                    self.delim_depth -= 1;
                }
            }
            TokenKind::Id => {
                if let Some(keyword_kind) = reclassify_keyword(token.lexeme) {
                    token.kind = keyword_kind;
                } else {
                    self.symbol_table.add(
                        token.lexeme,
                        token.position.line,
                        token.position.column,
                        TokenKind::Id,
                    );
                }
            }
            TokenKind::Colon if self.delim_depth == 0 => {
                self.expect_indent = true;
            }
            _ => {}
        }
        Some(token)
    }

    /// End-of-input handling (§4.3, §4.4): closes every open indentation
    /// level with a `DEDENT`, reports an unclosed bracket if one remains open,
    /// and finally yields `EOF`. Idempotent: later calls just replay `EOF`.
    fn handle_eof(&mut self) -> Token<'src> {
        if !self.eof_handled {
            self.eof_handled = true;
            let position = self.position();

            while self.indent_stack.len() > 1 {
                let _ = self.indent_stack.pop();
                self.pending.push_back(Token::with_empty_lexeme(TokenKind::Dedent, position));
            }
            if self.delim_depth > 0 {
                self.record_error(
                    LexError::BracketMismatch { lexeme: "end of file".to_string() },
                    position,
                );
            }
            self.pending.push_back(Token::with_empty_lexeme(TokenKind::Eof, position));
        }

        self.pending.pop_front().unwrap_or_else(|| Token::with_empty_lexeme(TokenKind::Eof, self.position()))
    }

    /// Peeks the leading run of spaces and tabs at the current position
    /// without consuming it: `logos`'s own whitespace-skip rule will consume
    /// the identical run the next time `scan_raw` calls `inner.next()`, so
    /// this never needs to keep its own cursor in sync with `logos`'s.
    ///
    /// Returns the tab-expanded column (§4.1), whether the remainder of the
    /// line is blank or comment-only, and the position of the first
    /// non-whitespace character (used as the INDENT/DEDENT position, §3).
    fn measure_leading_line(&self) -> (usize, bool, Position) {
        let remainder = &self.source[self.cursor()..];
        let mut byte_len = 0;
        for ch in remainder.chars() {
            match ch {
                ' ' | '\t' => byte_len += ch.len_utf8(),
                _ => break,
            }
        }
        let leading = &remainder[..byte_len];
        let column = expand_leading_whitespace(leading, self.config.tab_width);

        let is_blank_or_comment = matches!(remainder[byte_len..].chars().next(), None | Some('\n' | '#'));
        let position = Position::new(self.line, column + 1, self.cursor() + byte_len);
        (column, is_blank_or_comment, position)
    }

    /// The Raw Scanner (§4.2): one `logos` token, or hand-written recovery
    /// for input `logos` cannot match at all. Loops internally past errors
    /// so a single call always yields a real event or `Eof`.
    ///
    /// `logos`'s own whitespace/comment skip rules (`#[logos(skip ...)]`,
    /// `Comment`) consume text between matches without surfacing it as a
    /// token, so `self.line`/`self.column` must be advanced over that gap
    /// here before computing a token's `start` — otherwise every token (and
    /// every leading-indentation token on an indented line) would be
    /// reported short by the width of whatever was skipped before it.
    fn scan_raw(&mut self) -> Raw<'src> {
        loop {
            let gap_start = self.inner.span().end;
            match self.inner.next() {
                None => return Raw::Eof,
                Some(Ok(kind)) => {
                    let range = self.inner.span();
                    self.advance_position(&self.source[gap_start..range.start]);
                    let start = Position::new(self.line, self.column, range.start);
                    let matched = &self.source[range];
                    self.advance_position(matched);

                    if kind == TokenKind::PhysicalNewline {
                        return Raw::Newline;
                    }
                    // STRING's lexeme is the content between the quotes, not the
                    // verbatim match: the catalog's generic `KIND "lexeme"`
                    // display would otherwise double-quote it (§6).
                    let lexeme = if kind == TokenKind::String {
                        &matched[1..matched.len() - 1]
                    } else {
                        matched
                    };
                    return Raw::Lexeme(Token::new(kind, lexeme, start));
                }
                Some(Err(())) => {
                    let range = self.inner.span();
                    self.advance_position(&self.source[gap_start..range.start]);
                    self.recover();
                }
            }
        }
    }

    /// Hand-written recovery for a slice `logos` could not match against any
    /// production (§4.2). A leading quote means an unterminated string
    /// (consumed to end-of-line, not including it, and reported `STRING`);
    /// anything else is a single unrecognized character, reported
    /// `UNKNOWN_CHAR`. The Token Catalog's `NUMBER` productions always match
    /// at least one leading digit, so a malformed-number failure can never
    /// originate here — `LexError::MalformedNumber` is reserved taxonomy
    /// (§7) with no reachable Raw Scanner path, noted in DESIGN.md.
    fn recover(&mut self) {
        let range = self.inner.span();
        let start = Position::new(self.line, self.column, range.start);
        let bad = &self.source[range.clone()];
        let first = bad.chars().next().unwrap_or('\u{0}');

        if first == '"' || first == '\'' {
            self.advance_position(bad);
            let rest = &self.source[range.end..];
            let line_len = rest.find('\n').unwrap_or(rest.len());
            if line_len > 0 {
                self.inner.bump(line_len);
                self.advance_position(&self.source[range.end..range.end + line_len]);
            }
            self.record_error(LexError::UnterminatedString, start);
        } else {
            self.advance_position(bad);
            self.record_error(LexError::UnknownChar { character: first }, start);
        }
    }

    /// Advances `line`/`column` over consumed text, counting physical
    /// newlines. Mirrors the scanner's own line-tracking so manually bumped
    /// recovery text stays in sync with `logos`-matched text.
    fn advance_position(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Byte offset of the next unconsumed character.
    fn cursor(&self) -> usize {
        // `logos::Lexer::span()` reflects the most recently matched slice; its
        // end is exactly the byte offset `next()` resumes from.
        self.inner.span().end
    }

    /// The current position, for tokens not tied to a `logos` match (`NEWLINE`, `EOF`).
    fn position(&self) -> Position { Position::new(self.line, self.column, self.cursor()) }

    /// Records an error at a position, respecting the configured error cap
    /// and same-line duplicate suppression (§7, `LexerConfig`).
    ///
    /// Reaching `max_errors` collapses every further error into a single
    /// "too many errors" entry rather than dropping them silently (§7's
    /// duplicate-suppression policy); subsequent calls are then no-ops.
    fn record_error(&mut self, error: LexError, position: Position) {
        if self.config.suppress_duplicate_line_errors
            && self.errors.to_vec().last().is_some_and(|last| last.line == position.line)
        {
            return;
        }
        if let Some(max) = self.config.max_errors {
            match self.errors.len().cmp(&max) {
                Ordering::Greater => return,
                Ordering::Equal => {
                    let entry = Error {
                        message: format!("too many errors ({max}); further diagnostics suppressed"),
                        line: position.line,
                        column: position.column,
                        kind: ErrorType::Lexical,
                        data: String::new(),
                    };
                    log::warn!("{entry}");
                    self.errors.push(entry);
                    return;
                }
                Ordering::Less => {}
            }
        }
        let entry = Error::new(error, position.line, position.column);
        log::warn!("{entry}");
        self.errors.push(entry);
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    /// Yields tokens up to and including the first `EOF`, then stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.eof_handled && self.pending.is_empty() {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof { self.eof_handled = true; }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use flpy_source::FileID;

    use super::*;

    fn tokens(source: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::build(source, FileID::new(0));
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            out.push(token);
            if done {
                break;
            }
        }
        out
    }

    fn kinds(source: &str) -> Vec<TokenKind> { tokens(source).iter().map(Token::kind).collect() }

    #[test]
    fn simple_function_produces_expected_stream() {
        let source = "def add(x, y):\n    return x + y\n";
        let kinds = kinds(source);
        assert_eq!(
            kinds,
            vec![
                TokenKind::Def,
                TokenKind::Id,
                TokenKind::LParen,
                TokenKind::Id,
                TokenKind::Comma,
                TokenKind::Id,
                TokenKind::RParen,
                TokenKind::Colon,
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Return,
                TokenKind::Id,
                TokenKind::Plus,
                TokenKind::Id,
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keyword_shaped_identifier_is_reclassified() {
        let kinds = kinds("while\n");
        assert_eq!(kinds[0], TokenKind::While);
    }

    #[test]
    fn identifiers_are_registered_in_the_symbol_table() {
        let mut lexer = Lexer::build("x = y\n", FileID::new(0));
        loop {
            if lexer.next_token().kind == TokenKind::Eof {
                break;
            }
        }
        assert!(lexer.symbol_table().exists("x"));
        assert!(lexer.symbol_table().exists("y"));
    }

    #[test]
    fn newline_inside_brackets_is_implicit_continuation() {
        // Only the final newline, after the closing bracket restores depth to
        // zero, becomes a logical NEWLINE; the three inside `f(...)` do not.
        let kinds = kinds("f(\n    1,\n    2,\n)\n");
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Newline).count(), 1);
    }

    #[test]
    fn blank_and_comment_lines_do_not_disturb_the_indent_stack() {
        let source = "if x:\n    pass\n\n    # a comment\n    pass\n";
        let kinds = kinds(source);
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Indent).count(), 1);
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Dedent).count(), 1);
    }

    #[test]
    fn unexpected_indent_is_reported_but_still_synchronized() {
        let mut lexer = Lexer::build("x = 1\n    y = 2\n", FileID::new(0));
        loop {
            if lexer.next_token().kind == TokenKind::Eof {
                break;
            }
        }
        let errors = lexer.errors().to_vec();
        assert!(errors.iter().any(|e| e.message.contains("unexpected indentation")));
    }

    #[test]
    fn unterminated_string_is_reported_and_recovers_at_the_next_line() {
        let mut lexer = Lexer::build("x = \"oops\ny = 1\n", FileID::new(0));
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            kinds.push(token.kind);
            if done {
                break;
            }
        }
        let errors = lexer.errors().to_vec();
        assert!(errors.iter().any(|e| e.message.contains("unterminated string")));
        assert!(kinds.contains(&TokenKind::Id));

        // §8 scenario 4: the error is reported at the opening-quote column,
        // not the column `x` and the surrounding gap-skipped whitespace would
        // leave it at if skipped text were never counted.
        let string_error = errors.iter().find(|e| e.message.contains("unterminated string")).unwrap();
        assert_eq!(string_error.column, 5);
    }

    #[test]
    fn inline_tokens_report_their_true_column_past_skipped_whitespace() {
        // `logos`'s whitespace skip between tokens must still be counted
        // toward `self.column`, or every token after the first on a line
        // would under-report its column by the width of what was skipped.
        let toks = tokens("x = 1\n");
        assert_eq!(toks[0].column(), 1); // "x"
        assert_eq!(toks[1].column(), 3); // "="
        assert_eq!(toks[2].column(), 5); // "1"
    }

    #[test]
    fn first_token_on_an_indented_line_reports_its_true_column() {
        // §8 scenario 1: `return` follows four leading spaces, so its true
        // column is 5, not 1 — leading indentation is skipped by `logos`
        // the same way inline whitespace is and must be counted the same way.
        let source = "def add(x, y):\n    return x + y\n";
        let return_token = tokens(source).into_iter().find(|t| t.kind == TokenKind::Return).unwrap();
        assert_eq!(return_token.column(), 5);
    }

    #[test]
    fn unmatched_closing_bracket_is_reported() {
        let mut lexer = Lexer::build(")\n", FileID::new(0));
        loop {
            if lexer.next_token().kind == TokenKind::Eof {
                break;
            }
        }
        assert!(lexer.errors().to_vec().iter().any(|e| e.message.contains("without a matching opener")));
    }

    #[test]
    fn unclosed_bracket_is_reported_at_eof() {
        let mut lexer = Lexer::build("f(1, 2\n", FileID::new(0));
        loop {
            if lexer.next_token().kind == TokenKind::Eof {
                break;
            }
        }
        assert!(lexer.errors().to_vec().iter().any(|e| e.message.contains("without a matching opener")));
    }

    #[test]
    fn iterator_impl_stops_after_eof() {
        let lexer = Lexer::build("x\n", FileID::new(0));
        let all: Vec<_> = lexer.collect();
        assert_eq!(all.last().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn configured_tab_width_is_honored_by_the_indentation_engine() {
        let config = LexerConfig { tab_width: 2, ..LexerConfig::default() };
        let mut lexer = Lexer::with_config("if x:\n\tpass\n", FileID::new(0), config);
        let mut indent_column = None;
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::Indent {
                indent_column = Some(token.column());
            }
            if token.kind == TokenKind::Eof {
                break;
            }
        }
        // A single tab expands to column 3 (1-based) under `tab_width = 2`,
        // versus column 5 under the default width of 4.
        assert_eq!(indent_column, Some(3));
    }

    #[test]
    fn max_errors_collapses_further_diagnostics_into_one_entry() {
        let config = LexerConfig { max_errors: Some(2), ..LexerConfig::default() };
        let mut lexer = Lexer::with_config("$\n@\n^\n~\n", FileID::new(0), config);
        loop {
            if lexer.next_token().kind == TokenKind::Eof {
                break;
            }
        }
        let errors = lexer.errors().to_vec();
        assert_eq!(errors.len(), 3);
        assert!(errors[2].message.contains("too many errors"));
    }

    #[test]
    fn suppress_duplicate_line_errors_keeps_only_the_first_per_line() {
        let config = LexerConfig { suppress_duplicate_line_errors: true, ..LexerConfig::default() };
        let mut lexer = Lexer::with_config("$@\n", FileID::new(0), config);
        loop {
            if lexer.next_token().kind == TokenKind::Eof {
                break;
            }
        }
        assert_eq!(lexer.errors().len(), 1);
    }
}

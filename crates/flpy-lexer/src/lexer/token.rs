//! Token definitions for the Fangless Python lexical analysis core.
//!
//! This module defines the closed token catalog recognized by the lexer, plus the
//! `Token` record that carries a token's kind, lexeme, and source position.

use std::fmt::{self, Display, Formatter};

use flpy_source::Position;
use logos::Logos;

/// The closed set of token kinds produced by the lexer.
///
/// Only `Id`, `Number`, `String`, the operators, the delimiters, and the two
/// internal housekeeping variants (`PhysicalNewline`, `Comment`) are matched
/// directly by the generated `logos` scanner (the Raw Scanner). Keywords carry
/// no `#[token]` of their own: the scanner always produces `Id` for a
/// keyword-shaped lexeme, and the Token Assembler reclassifies it against the
/// keyword table (§4.1, `rules::reclassify_keyword`). `Newline`, `Indent`,
/// `Dedent`, and `Eof` are synthetic: produced by the Indentation Engine and
/// the Token Assembler's end-of-input handling, never matched against text.
#[derive(Logos, Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[logos(skip r"[ \t\f]+")]
pub enum TokenKind {
    // Keywords — reclassified from `Id`, never matched directly (see above).
    And,
    As,
    Assert,
    Async,
    Await,
    Break,
    Class,
    Continue,
    Def,
    Del,
    Elif,
    Else,
    Except,
    Finally,
    For,
    From,
    Global,
    If,
    Import,
    In,
    Is,
    Lambda,
    Nonlocal,
    Not,
    Or,
    Pass,
    Raise,
    Return,
    Try,
    While,
    With,
    Yield,

    // Keyword literals
    True,
    False,
    None,

    // Identifier; reclassified against the keyword table by the Token Assembler.
    #[regex(r"[A-Za-z_][A-Za-z_0-9]*")]
    Id,

    // Number: integer, or float with an optional fractional part and exponent.
    // No radix prefixes, underscore separators, or complex suffixes.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    // String: single-line, pass-through escapes (the backslash and its following
    // character are both consumed, never decoded). A literal newline inside the
    // quotes is excluded so an unterminated string fails to match here and falls
    // to hand-written recovery in the scanner instead.
    #[regex(r#""([^\\"\n]|\\.)*""#)]
    #[regex(r"'([^\\'\n]|\\.)*'")]
    String,

    // Operators (multi-character forms take priority over their single-character
    // prefixes via logos's longest-match rule).
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("//")]
    DoubleSlash,
    #[token("%")]
    Percent,
    #[token("**")]
    DoubleStar,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("==")]
    Eq,
    #[token("!=")]
    Neq,
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    // Physical newline, intercepted by the Token Assembler (§4.4 step 3) before
    // it ever reaches a consumer as a logical `NEWLINE`.
    #[regex(r"\n")]
    PhysicalNewline,
    // `#` to end of line, skipped; the trailing newline is not consumed.
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,

    // Layout tokens, synthetic: produced by the Indentation Engine / Token
    // Assembler, never matched directly against source text.
    Newline,
    Indent,
    Dedent,
    Eof,
}

impl TokenKind {
    /// Returns true for the layout tokens that print bare (no lexeme) per the
    /// token-stream textual format.
    #[must_use]
    pub const fn is_layout(self) -> bool {
        matches!(self, Self::Newline | Self::Indent | Self::Dedent | Self::Eof)
    }

    /// Returns true for the token kinds whose lexeme carries information distinct
    /// from the kind itself (identifiers, numbers, strings) and is therefore shown
    /// quoted in the textual format. Keywords, operators, and delimiters have a
    /// fixed spelling implied by the kind name and print bare.
    #[must_use]
    pub const fn carries_lexeme(self) -> bool { matches!(self, Self::Id | Self::Number | Self::String) }
}

impl Display for TokenKind {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::As => write!(f, "AS"),
            Self::Assert => write!(f, "ASSERT"),
            Self::Async => write!(f, "ASYNC"),
            Self::Await => write!(f, "AWAIT"),
            Self::Break => write!(f, "BREAK"),
            Self::Class => write!(f, "CLASS"),
            Self::Continue => write!(f, "CONTINUE"),
            Self::Def => write!(f, "DEF"),
            Self::Del => write!(f, "DEL"),
            Self::Elif => write!(f, "ELIF"),
            Self::Else => write!(f, "ELSE"),
            Self::Except => write!(f, "EXCEPT"),
            Self::Finally => write!(f, "FINALLY"),
            Self::For => write!(f, "FOR"),
            Self::From => write!(f, "FROM"),
            Self::Global => write!(f, "GLOBAL"),
            Self::If => write!(f, "IF"),
            Self::Import => write!(f, "IMPORT"),
            Self::In => write!(f, "IN"),
            Self::Is => write!(f, "IS"),
            Self::Lambda => write!(f, "LAMBDA"),
            Self::Nonlocal => write!(f, "NONLOCAL"),
            Self::Not => write!(f, "NOT"),
            Self::Or => write!(f, "OR"),
            Self::Pass => write!(f, "PASS"),
            Self::Raise => write!(f, "RAISE"),
            Self::Return => write!(f, "RETURN"),
            Self::Try => write!(f, "TRY"),
            Self::While => write!(f, "WHILE"),
            Self::With => write!(f, "WITH"),
            Self::Yield => write!(f, "YIELD"),

            Self::True => write!(f, "TRUE"),
            Self::False => write!(f, "FALSE"),
            Self::None => write!(f, "NONE"),

            Self::Id => write!(f, "ID"),
            Self::Number => write!(f, "NUMBER"),
            Self::String => write!(f, "STRING"),

            Self::Plus => write!(f, "PLUS"),
            Self::Minus => write!(f, "MINUS"),
            Self::Star => write!(f, "STAR"),
            Self::Slash => write!(f, "SLASH"),
            Self::DoubleSlash => write!(f, "DOUBLESLASH"),
            Self::Percent => write!(f, "PERCENT"),
            Self::DoubleStar => write!(f, "DOUBLESTAR"),
            Self::Lt => write!(f, "LT"),
            Self::Gt => write!(f, "GT"),
            Self::Le => write!(f, "LE"),
            Self::Ge => write!(f, "GE"),
            Self::Eq => write!(f, "EQ"),
            Self::Neq => write!(f, "NEQ"),
            Self::Assign => write!(f, "ASSIGN"),
            Self::PlusEq => write!(f, "PLUSEQ"),
            Self::MinusEq => write!(f, "MINUSEQ"),
            Self::StarEq => write!(f, "STAREQ"),
            Self::SlashEq => write!(f, "SLASHEQ"),

            Self::LParen => write!(f, "LPAREN"),
            Self::RParen => write!(f, "RPAREN"),
            Self::LBrack => write!(f, "LBRACK"),
            Self::RBrack => write!(f, "RBRACK"),
            Self::LBrace => write!(f, "LBRACE"),
            Self::RBrace => write!(f, "RBRACE"),
            Self::Colon => write!(f, "COLON"),
            Self::Comma => write!(f, "COMMA"),
            Self::Dot => write!(f, "DOT"),

            Self::PhysicalNewline => write!(f, "<physical newline>"),
            Self::Comment => write!(f, "<comment>"),

            Self::Newline => write!(f, "NEWLINE"),
            Self::Indent => write!(f, "INDENT"),
            Self::Dedent => write!(f, "DEDENT"),
            Self::Eof => write!(f, "EOF"),
        }
    }
}

/// A token emitted by the lexer: a kind, its verbatim lexeme, and its source
/// position. `INDENT`/`DEDENT`/`NEWLINE`/`EOF` carry an empty lexeme; their
/// position is that of the triggering line (or end of input, for `EOF`).
///
/// String lexemes hold only the content between the quotes, with backslash
/// escapes preserved verbatim and not decoded (see `lexeme_unquote` on the
/// scanner side for why: the catalog never evaluates escape sequences).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The lexeme (the actual text of the token) from the source code.
    pub lexeme: &'src str,
    /// The position of the token's first character in the source.
    pub position: Position,
}

impl<'src> Token<'src> {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, lexeme: &'src str, position: Position) -> Self {
        Self { kind, lexeme, position }
    }

    /// Creates a token with an empty lexeme (used for layout tokens).
    #[must_use]
    pub const fn with_empty_lexeme(kind: TokenKind, position: Position) -> Self {
        Self { kind, lexeme: "", position }
    }

    /// Returns the token kind.
    #[must_use]
    pub const fn kind(&self) -> TokenKind { self.kind }

    /// Returns the lexeme.
    #[must_use]
    pub const fn lexeme(&self) -> &'src str { self.lexeme }

    /// Returns the 1-based line of the token's first character.
    #[must_use]
    pub const fn line(&self) -> usize { self.position.line }

    /// Returns the 1-based, tab-expanded column of the token's first character.
    #[must_use]
    pub const fn column(&self) -> usize { self.position.column }

    /// Checks if the token is of the specified kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool { self.kind == kind }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.kind.carries_lexeme() {
            write!(f, "{} \"{}\"", self.kind, self.lexeme)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flpy_source::Position;

    #[test]
    fn layout_token_displays_bare() {
        let tok = Token::with_empty_lexeme(TokenKind::Indent, Position::start_of_file());
        assert_eq!(tok.to_string(), "INDENT");
    }

    #[test]
    fn identifier_displays_quoted_lexeme() {
        let tok = Token::new(TokenKind::Id, "add", Position::start_of_file());
        assert_eq!(tok.to_string(), "ID \"add\"");
    }

    #[test]
    fn keyword_displays_bare_despite_fixed_lexeme() {
        let tok = Token::new(TokenKind::Def, "def", Position::start_of_file());
        assert_eq!(tok.to_string(), "DEF");
    }

    #[test]
    fn string_lexeme_preserves_pass_through_escape() {
        let tok = Token::new(TokenKind::String, r#"Quote\"mark"#, Position::start_of_file());
        assert_eq!(tok.to_string(), r#"STRING "Quote\"mark""#);
    }

    #[test]
    fn column_reports_the_position_it_was_built_with() {
        let tok = Token::new(TokenKind::Id, "x", Position::new(3, 5, 20));
        assert_eq!(tok.column(), 5);
        assert_eq!(tok.line(), 3);
    }
}

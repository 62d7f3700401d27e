//! Token-catalog rules that sit alongside the generated scanner: the keyword
//! reclassification table and leading-whitespace tab expansion.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use super::token::TokenKind;

/// Column width of a tab stop for leading-whitespace expansion (§4.1).
pub const TAB_WIDTH: usize = 4;

/// Returns the global keyword table, built once.
///
/// Consulted *after* identifier recognition (§4.1): a matching lexeme is
/// reclassified from `ID` to the keyword kind, with its lexeme preserved.
fn keyword_table() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();

    KEYWORDS.get_or_init(|| {
        let mut map = FxHashMap::default();
        let _ = map.insert("and", TokenKind::And);
        let _ = map.insert("as", TokenKind::As);
        let _ = map.insert("assert", TokenKind::Assert);
        let _ = map.insert("async", TokenKind::Async);
        let _ = map.insert("await", TokenKind::Await);
        let _ = map.insert("break", TokenKind::Break);
        let _ = map.insert("class", TokenKind::Class);
        let _ = map.insert("continue", TokenKind::Continue);
        let _ = map.insert("def", TokenKind::Def);
        let _ = map.insert("del", TokenKind::Del);
        let _ = map.insert("elif", TokenKind::Elif);
        let _ = map.insert("else", TokenKind::Else);
        let _ = map.insert("except", TokenKind::Except);
        let _ = map.insert("finally", TokenKind::Finally);
        let _ = map.insert("for", TokenKind::For);
        let _ = map.insert("from", TokenKind::From);
        let _ = map.insert("global", TokenKind::Global);
        let _ = map.insert("if", TokenKind::If);
        let _ = map.insert("import", TokenKind::Import);
        let _ = map.insert("in", TokenKind::In);
        let _ = map.insert("is", TokenKind::Is);
        let _ = map.insert("lambda", TokenKind::Lambda);
        let _ = map.insert("nonlocal", TokenKind::Nonlocal);
        let _ = map.insert("not", TokenKind::Not);
        let _ = map.insert("or", TokenKind::Or);
        let _ = map.insert("pass", TokenKind::Pass);
        let _ = map.insert("raise", TokenKind::Raise);
        let _ = map.insert("return", TokenKind::Return);
        let _ = map.insert("try", TokenKind::Try);
        let _ = map.insert("while", TokenKind::While);
        let _ = map.insert("with", TokenKind::With);
        let _ = map.insert("yield", TokenKind::Yield);
        let _ = map.insert("True", TokenKind::True);
        let _ = map.insert("False", TokenKind::False);
        let _ = map.insert("None", TokenKind::None);

        map
    })
}

/// Reclassifies an `ID` lexeme to its keyword kind, if it names one.
#[must_use]
pub fn reclassify_keyword(lexeme: &str) -> Option<TokenKind> { keyword_table().get(lexeme).copied() }

/// Expands a run of leading whitespace (spaces and tabs only) into a tab-expanded
/// column count, per §4.2: each tab advances to the next multiple of `tab_width`,
/// each space advances by one.
#[must_use]
pub fn expand_leading_whitespace(leading: &str, tab_width: usize) -> usize {
    let mut column = 0;
    for ch in leading.chars() {
        match ch {
            '\t' => column = (column / tab_width + 1) * tab_width,
            ' ' => column += 1,
            _ => break,
        }
    }
    column
}

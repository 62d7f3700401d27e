//! The Symbol Table (§4.5): a flat, first-seen-wins mapping from identifier
//! lexeme to its first occurrence's metadata.
//!
//! This is deliberately *not* scope-aware — a richer, scope-aware symbol table
//! belongs to the later semantic-analysis phase (§9), which is out of scope here.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::lexer::TokenKind;

/// The first-seen metadata recorded for an identifier (§3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    /// The identifier's lexeme.
    pub symbol: String,
    /// 1-based line of the first occurrence.
    pub line: usize,
    /// 1-based, tab-expanded column of the first occurrence.
    pub column: usize,
    /// The token kind it was recognized as (always `Id` at insertion time).
    pub token_kind: TokenKind,
}

impl fmt::Display for SymbolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{} ({})", self.symbol, self.line, self.column, self.token_kind)
    }
}

/// The shared Symbol Table.
///
/// Aliased with the syntactic analyzer the same way the Error Log is (§5):
/// `Rc<RefCell<_>>`, since both sides only ever insert-if-absent and never
/// remove or reorder each other's entries.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: Rc<RefCell<FxHashMap<String, SymbolEntry>>>,
}

impl SymbolTable {
    /// Creates a new, empty Symbol Table.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Inserts a symbol if it has not been seen before. Idempotent: a later
    /// occurrence of the same lexeme is ignored, the first entry stands.
    pub fn add(&self, symbol: &str, line: usize, column: usize, token_kind: TokenKind) {
        let mut entries = self.entries.borrow_mut();
        let _ = entries.entry(symbol.to_string()).or_insert_with(|| SymbolEntry {
            symbol: symbol.to_string(),
            line,
            column,
            token_kind,
        });
    }

    /// Returns true if the symbol has been recorded.
    #[must_use]
    pub fn exists(&self, symbol: &str) -> bool { self.entries.borrow().contains_key(symbol) }

    /// Returns the first-seen metadata for a symbol, if recorded.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<SymbolEntry> { self.entries.borrow().get(symbol).cloned() }

    /// Removes a symbol's entry, if present, returning it.
    pub fn remove(&self, symbol: &str) -> Option<SymbolEntry> { self.entries.borrow_mut().remove(symbol) }

    /// Returns the number of distinct symbols recorded.
    #[must_use]
    pub fn len(&self) -> usize { self.entries.borrow().len() }

    /// Returns true if no symbols have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.borrow().is_empty() }

    /// Clears the table. Called by `input(source)` when a new buffer is installed.
    pub fn clear(&self) { self.entries.borrow_mut().clear(); }

    /// A textual dump of all entries, sorted by line then column, for diagnostics.
    #[must_use]
    pub fn dump(&self) -> String {
        let entries = self.entries.borrow();
        let mut sorted: Vec<&SymbolEntry> = entries.values().collect();
        sorted.sort_by_key(|entry| (entry.line, entry.column));

        let mut out = String::new();
        for entry in sorted {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let table = SymbolTable::new();
        table.add("x", 1, 1, TokenKind::Id);
        table.add("x", 5, 3, TokenKind::Id);

        let entry = table.get("x").unwrap();
        assert_eq!(entry.line, 1);
        assert_eq!(entry.column, 1);
    }

    #[test]
    fn shared_through_a_clone() {
        let table = SymbolTable::new();
        let alias = table.clone();
        alias.add("y", 2, 4, TokenKind::Id);
        assert!(table.exists("y"));
    }

    #[test]
    fn remove_then_exists_is_false() {
        let table = SymbolTable::new();
        table.add("z", 1, 1, TokenKind::Id);
        assert!(table.remove("z").is_some());
        assert!(!table.exists("z"));
    }
}

//! End-to-end tests for the lexical analysis core.
//!
//! Each `display_stream` test reproduces a literal end-to-end scenario: the
//! token stream's textual display, one token per line, is the test oracle.

use flpy_lexer::lexer::{Lexer, TokenKind};
use flpy_source::FileID;

fn display_stream(source: &str) -> String {
    let mut lexer = Lexer::build(source, FileID::new(0));
    let mut lines = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind() == TokenKind::Eof;
        lines.push(token.to_string());
        if done {
            break;
        }
    }
    lines.join("\n")
}

#[test]
fn simple_assignment() {
    let source = "x = 1\n";
    assert_eq!(display_stream(source), "ID \"x\"\nASSIGN\nNUMBER \"1\"\nNEWLINE\nEOF");
}

#[test]
fn simple_assignment_tokens_report_true_columns_past_skipped_whitespace() {
    // The inline whitespace `logos` skips between tokens must still count
    // toward column tracking, or `=` and `1` would be reported short by the
    // width of the spaces preceding them.
    let mut lexer = Lexer::build("x = 1\n", FileID::new(0));
    let mut columns = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind() == TokenKind::Eof;
        columns.push(token.column());
        if done {
            break;
        }
    }
    assert_eq!(columns, vec![1, 3, 5, 1, 1]);
}

#[test]
fn function_definition_with_indented_body() {
    let source = "def add(x, y):\n    return x + y\n";
    let expected = [
        "DEF",
        "ID \"add\"",
        "LPAREN",
        "ID \"x\"",
        "COMMA",
        "ID \"y\"",
        "RPAREN",
        "COLON",
        "NEWLINE",
        "INDENT",
        "RETURN",
        "ID \"x\"",
        "PLUS",
        "ID \"y\"",
        "NEWLINE",
        "DEDENT",
        "EOF",
    ]
    .join("\n");
    assert_eq!(display_stream(source), expected);
}

#[test]
fn nested_blocks_produce_matching_indent_dedent_pairs() {
    let source = "if x:\n    if y:\n        pass\n    pass\n";
    let mut lexer = Lexer::build(source, FileID::new(0));
    let mut indents = 0;
    let mut dedents = 0;
    loop {
        let token = lexer.next_token();
        match token.kind() {
            TokenKind::Indent => indents += 1,
            TokenKind::Dedent => dedents += 1,
            TokenKind::Eof => break,
            _ => {}
        }
    }
    assert_eq!(indents, 2);
    assert_eq!(dedents, 2);
}

#[test]
fn implicit_line_continuation_inside_parens_suppresses_newlines() {
    let source = "total = (\n    1 +\n    2\n)\n";
    let mut lexer = Lexer::build(source, FileID::new(0));
    let mut newlines = 0;
    loop {
        let token = lexer.next_token();
        if token.kind() == TokenKind::Eof {
            break;
        }
        if token.kind() == TokenKind::Newline {
            newlines += 1;
        }
    }
    assert_eq!(newlines, 1);
}

#[test]
fn unterminated_string_error_is_reported_at_the_opening_quote_column() {
    // §8 scenario 4: `s = "oops` — the opening quote sits at column 5, past
    // the `s`, the space, `=`, and another space that `logos` skips before
    // it; the error must not be reported short by that skipped width.
    let mut lexer = Lexer::build("s = \"oops\ny = 1\n", FileID::new(0));
    loop {
        if lexer.next_token().kind() == TokenKind::Eof {
            break;
        }
    }
    let errors = lexer.errors().to_vec();
    let string_error = errors.iter().find(|e| e.message.contains("unterminated string")).unwrap();
    assert_eq!(string_error.column, 5);
}

#[test]
fn string_literal_preserves_escape_pass_through() {
    let source = r#"s = "Quote\"mark"
"#;
    let expected = "ID \"s\"\nASSIGN\nSTRING \"Quote\\\"mark\"\nNEWLINE\nEOF";
    assert_eq!(display_stream(source), expected);
}

#[test]
fn keywords_print_bare_despite_a_fixed_lexeme() {
    let source = "True and False or None\n";
    let expected = ["TRUE", "AND", "FALSE", "OR", "NONE", "NEWLINE", "EOF"].join("\n");
    assert_eq!(display_stream(source), expected);
}

#[test]
fn empty_source_yields_only_eof() {
    assert_eq!(display_stream(""), "EOF");
}

#[test]
fn trailing_newline_only_yields_newline_then_eof() {
    assert_eq!(display_stream("\n"), "NEWLINE\nEOF");
}

#[test]
fn mixed_tab_and_space_indentation_expands_consistently() {
    // A tab at the start of a line expands to the next multiple of 4 (§4.1),
    // landing on the same column as four literal spaces.
    let source = "if x:\n\tpass\n";
    let mut lexer = Lexer::build(source, FileID::new(0));
    loop {
        if lexer.next_token().kind() == TokenKind::Eof {
            break;
        }
    }
    assert!(lexer.errors().is_empty());
}

#[test]
fn inconsistent_dedent_is_reported_and_scanning_continues_to_eof() {
    let source = "if x:\n    if y:\n        pass\n  pass\n";
    let mut lexer = Lexer::build(source, FileID::new(0));
    let mut saw_pass_after_error = false;
    loop {
        let token = lexer.next_token();
        if token.kind() == TokenKind::Eof {
            break;
        }
        if token.kind() == TokenKind::Pass {
            saw_pass_after_error = true;
        }
    }
    let errors = lexer.errors().to_vec();
    assert!(errors.iter().any(|e| e.message.contains("inconsistent dedent")));
    assert!(saw_pass_after_error);
}

#[test]
fn reusing_a_lexer_for_a_new_buffer_clears_prior_state() {
    let mut lexer = Lexer::build("x\n", FileID::new(0));
    loop {
        if lexer.next_token().kind() == TokenKind::Eof {
            break;
        }
    }
    assert!(lexer.symbol_table().exists("x"));

    lexer.input("y\n", FileID::new(1));
    loop {
        if lexer.next_token().kind() == TokenKind::Eof {
            break;
        }
    }
    assert!(!lexer.symbol_table().exists("x"));
    assert!(lexer.symbol_table().exists("y"));
    assert!(lexer.errors().is_empty());
}

//! # Fangless Python lexical analysis core
//!
//! The lexical analysis front-end for the Fangless Python transpiler: turns a
//! source buffer into a stream of tokens, tracking Python-style indentation
//! and implicit line continuation inside brackets as it goes.
//!
//! ## Key Features
//!
//! - **Indentation as tokens**: `INDENT`/`DEDENT` are produced inline, so a
//!   consumer never has to track column widths itself.
//! - **Error recovery**: a malformed lexeme is recorded to a shared
//!   [`diagnostics::ErrorLog`] and scanning resumes past it, rather than
//!   aborting the whole buffer.
//! - **Shared Symbol Table**: every identifier's first occurrence is recorded
//!   as tokens are produced, for whatever consumes the stream next.
//!
//! ## Example
//!
//! ```rust
//! use flpy_lexer::lexer::{Lexer, TokenKind};
//! use flpy_source::FileID;
//!
//! let mut lexer = Lexer::build("def add(x, y):\n    return x + y\n", FileID::new(0));
//! let mut kinds = Vec::new();
//! loop {
//!     let token = lexer.next_token();
//!     let done = token.kind() == TokenKind::Eof;
//!     kinds.push(token.kind());
//!     if done {
//!         break;
//!     }
//! }
//! assert_eq!(kinds.first(), Some(&TokenKind::Def));
//! ```

pub mod config;
pub mod diagnostics;
pub mod lexer;
pub mod symbol;

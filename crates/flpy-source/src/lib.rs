//! Source file handling and position tracking for the Fangless Python front-end.
//!
//! This crate provides the fundamental types for working with source code across the
//! lexing pipeline: source file representation, content access, and precise location
//! tracking through spans and positions.
//!
//! Everything lives in [`types`]: `FileID`, `Position`, `SourceFile`, `SourceManager`,
//! `Span`, and `SourceSpan`. Together these give every token, error, and symbol table
//! entry a file-qualified location.

pub mod types;

pub use types::{FileID, Position, SourceFile, SourceManager, SourceSpan, Span};

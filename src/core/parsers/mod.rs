//! Source file parsers.
//!
//! - `go`: Go source parser (tree-sitter-go), used to locate struct fields,
//!   their tag literals and their doc comments.

pub mod go;

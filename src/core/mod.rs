//! Core tag injection engine.
//!
//! One file flows one way through three stages:
//!
//! ```text
//! .pb.go source
//!     ↓ parsers::go    (tree-sitter syntax tree)
//!     ↓ extract        (EditRegion per directive, in file order)
//!     ↓ rewrite        (splices against the original bytes → new bytes)
//! rewritten .pb.go
//! ```
//!
//! ## Module Structure
//!
//! - `file_scanner`: discovery of generated files under directories
//! - `parsers`: Go source parsing
//! - `extract`: directive extraction from struct fields
//! - `tag`: struct tag items and literals
//! - `rewrite`: splice planning and buffer rewriting
//! - `process`: per-file read/parse/rewrite/write cycle

pub mod extract;
pub mod file_scanner;
pub mod parsers;
pub mod process;
pub mod rewrite;
pub mod tag;

pub use extract::{EditRegion, TagLiteral, extract_regions};
pub use file_scanner::{ScanResult, scan_files};
pub use parsers::go::{ParseError, ParsedGo, parse_go_source};
pub use process::{FileOutcome, LocatedChange, inject_source, process_file};
pub use rewrite::{RewritePlan, Splice, TagChange, apply_splices, plan_rewrite, rewrite_source};

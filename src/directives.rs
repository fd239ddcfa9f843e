//! Directive parsing for `@inject_tag` comments.
//!
//! The grammar is a single line comment directly above a struct field:
//!
//! ```text
//! // @inject_tag: validate:"required" db:"name"
//! ```
//!
//! Everything after the colon is taken verbatim as the tag text to inject.
//! There are no escapes and no multi-line form.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

static INJECT_TAG_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^//\s*@inject_tag:\s*(.*)$").expect("inject_tag pattern is valid")
});

/// Parse the tag text out of a comment.
/// Returns None if the comment is not an `@inject_tag` directive.
pub fn parse_inject_comment(text: &str) -> Option<&str> {
    let text = text.trim_end_matches('\r');
    INJECT_TAG_COMMENT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Where a pending tag injection came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveSource {
    /// Decoded from an `@inject_tag` comment; holds the comment's byte span.
    Comment(Range<usize>),
    /// Synthesized from the skip list for a bookkeeping field.
    SkipList,
}

/// Build the suppression tag for bookkeeping fields: `a:"-",b:"-"`.
///
/// Returns None for an empty skip list.
pub fn skip_tag(skip_fields: &[String]) -> Option<String> {
    if skip_fields.is_empty() {
        return None;
    }
    let tag = skip_fields
        .iter()
        .map(|name| format!("{}:\"-\"", name))
        .collect::<Vec<_>>()
        .join(",");
    Some(tag)
}

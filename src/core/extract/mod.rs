//! Directive extraction.
//!
//! Walks the top-level type declarations of a parsed Go file and turns every
//! pending tag injection into an [`EditRegion`]:
//!
//! - one region per `// @inject_tag:` line in a field's doc comment
//! - one synthetic region for a bookkeeping field (name starting with the
//!   skip prefix) when a skip list is configured
//!
//! Regions are returned in file order. A field may yield several regions;
//! the synthetic one always comes first.

use std::ops::Range;

use colored::Colorize;
use tree_sitter::Node;

use crate::config::InjectOptions;
use crate::core::parsers::go::ParsedGo;
use crate::core::tag::{LiteralKind, literal_content};
use crate::directives::{DirectiveSource, parse_inject_comment, skip_tag};


/// The tag literal currently attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLiteral {
    /// Byte span of the literal including its delimiters.
    pub span: Range<usize>,
    /// Literal content without delimiters.
    pub content: String,
}

/// A planned tag injection for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRegion {
    /// Byte offset where the field declaration starts.
    pub start: usize,
    /// Byte offset where the field declaration ends (after its tag, if any).
    pub end: usize,
    /// Existing tag, None if the field has no tag literal.
    pub current_tag: Option<TagLiteral>,
    /// Tag text to inject, as written in the directive.
    pub inject_tag: String,
    pub source: DirectiveSource,
}

impl EditRegion {
    /// Byte span of the originating directive comment, if any.
    pub fn comment_span(&self) -> Option<Range<usize>> {
        match &self.source {
            DirectiveSource::Comment(span) => Some(span.clone()),
            DirectiveSource::SkipList => None,
        }
    }

    pub fn field_span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Extract all edit regions from a parsed file, in file order.
pub fn extract_regions(parsed: &ParsedGo, options: &InjectOptions) -> Vec<EditRegion> {
    let skip = skip_tag(&options.skip_fields);
    let mut regions = Vec::new();

    let root = parsed.root();
    let mut cursor = root.walk();
    for decl in root.named_children(&mut cursor) {
        if decl.kind() != "type_declaration" {
            continue;
        }
        for field_list in struct_field_lists(decl) {
            let mut list_cursor = field_list.walk();
            for field in field_list.named_children(&mut list_cursor) {
                if field.kind() != "field_declaration" {
                    continue;
                }
                collect_field_regions(parsed, field, skip.as_deref(), options, &mut regions);
            }
        }
    }

    regions
}

/// Field lists of every struct type spec in a type declaration.
///
/// Grouped declarations (`type ( A struct{...}; B int )`) contribute every
/// struct spec, aliases (`type A = struct{...}`) included; non-struct specs
/// are ignored.
fn struct_field_lists(decl: Node) -> Vec<Node> {
    let mut lists = Vec::new();
    let mut cursor = decl.walk();
    for spec in decl.named_children(&mut cursor) {
        if !matches!(spec.kind(), "type_spec" | "type_alias") {
            continue;
        }
        let Some(ty) = spec.child_by_field_name("type") else {
            continue;
        };
        if ty.kind() != "struct_type" {
            continue;
        }
        let mut ty_cursor = ty.walk();
        if let Some(list) = ty
            .named_children(&mut ty_cursor)
            .find(|child| child.kind() == "field_declaration_list")
        {
            lists.push(list);
        }
    }
    lists
}

fn collect_field_regions(
    parsed: &ParsedGo,
    field: Node,
    skip: Option<&str>,
    options: &InjectOptions,
    regions: &mut Vec<EditRegion>,
) {
    let current_tag = match field.child_by_field_name("tag") {
        Some(tag) => match tag_literal(parsed, tag) {
            Some(literal) => Some(literal),
            None => {
                if options.verbose {
                    eprintln!(
                        "{} cannot decode tag at line {}, leaving field unchanged: {}",
                        "warning:".bold().yellow(),
                        tag.start_position().row + 1,
                        parsed.text(tag)
                    );
                }
                return;
            }
        },
        None => None,
    };
    let range = field.byte_range();

    if let Some(skip) = skip
        && let Some(name) = field.child_by_field_name("name")
        && parsed.text(name).starts_with(&options.skip_prefix)
    {
        regions.push(EditRegion {
            start: range.start,
            end: range.end,
            current_tag: current_tag.clone(),
            inject_tag: skip.to_string(),
            source: DirectiveSource::SkipList,
        });
    }

    for comment in doc_comments(field) {
        let text = parsed.text(comment);
        let Some(tag) = parse_inject_comment(&text) else {
            continue;
        };
        if options.verbose {
            let pos = field.start_position();
            eprintln!(
                "{} found @inject_tag at line {}: {}",
                "verbose:".dimmed(),
                pos.row + 1,
                tag
            );
        }
        regions.push(EditRegion {
            start: range.start,
            end: range.end,
            current_tag: current_tag.clone(),
            inject_tag: tag.to_string(),
            source: DirectiveSource::Comment(comment.byte_range()),
        });
    }
}

/// Decode a field's tag literal. None if it cannot be decoded.
fn tag_literal(parsed: &ParsedGo, tag: Node) -> Option<TagLiteral> {
    let kind = match tag.kind() {
        "raw_string_literal" => LiteralKind::Raw,
        "interpreted_string_literal" => LiteralKind::Interpreted,
        _ => return None,
    };
    let text = parsed.text(tag);
    Some(TagLiteral {
        span: tag.byte_range(),
        content: literal_content(&text, kind)?,
    })
}

/// Doc comment lines attached to a field, top to bottom.
///
/// A doc comment is the run of comment lines ending on the line right above
/// the field with no blank line in between. A comment sharing its line with
/// an earlier token (`Foo int // note` or `struct { // note`) belongs to that
/// token and ends the run.
fn doc_comments(field: Node) -> Vec<Node> {
    let mut comments = Vec::new();
    let mut next_row = field.start_position().row;
    let mut current = field.prev_named_sibling();

    while let Some(node) = current {
        if node.kind() != "comment" || node.end_position().row + 1 != next_row {
            break;
        }
        if is_trailing_comment(node) {
            break;
        }
        comments.push(node);
        next_row = node.start_position().row;
        current = node.prev_named_sibling();
    }

    comments.reverse();
    comments
}

fn is_trailing_comment(comment: Node) -> bool {
    match comment.prev_sibling() {
        Some(prev) if prev.kind() == "\n" => false,
        Some(prev) => prev.end_position().row == comment.start_position().row,
        None => false,
    }
}

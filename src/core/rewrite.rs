//! Byte rewriter.
//!
//! Turns extracted [`EditRegion`]s into splices against the original buffer
//! and builds the rewritten file in a single forward pass. Every splice is
//! expressed in offsets of the untouched input, so no edit can shift the
//! position of another.

use std::ops::Range;

use anyhow::{Result, bail};
use colored::Colorize;

use crate::config::InjectOptions;
use crate::core::extract::EditRegion;
use crate::core::tag::{TagItems, render_literal};

/// Replace `range` of the original buffer with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub range: Range<usize>,
    pub replacement: String,
}

/// A tag change on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChange {
    /// Span of the field declaration in the original buffer.
    pub field: Range<usize>,
    /// Tag content before injection, None if the field had no tag.
    pub before: Option<String>,
    pub after: String,
}

/// Planned edits for one file.
#[derive(Debug, Default)]
pub struct RewritePlan {
    pub splices: Vec<Splice>,
    pub changes: Vec<TagChange>,
    pub comments_removed: usize,
}

impl RewritePlan {
    pub fn is_empty(&self) -> bool {
        self.splices.is_empty()
    }
}

/// Plan the splices for all regions of a file.
///
/// Regions sharing a field are folded in order: each directive is merged
/// over the result of the previous one, so a later directive wins on key
/// conflicts. Extraction emits the skip-list directive first, which makes an
/// explicit `@inject_tag` override it.
pub fn plan_rewrite(source: &[u8], regions: &[EditRegion], options: &InjectOptions) -> RewritePlan {
    let mut plan = RewritePlan::default();

    for group in regions.chunk_by(|a, b| a.field_span() == b.field_span()) {
        let first = &group[0];
        let current = first
            .current_tag
            .as_ref()
            .map(|tag| TagItems::parse(&tag.content))
            .unwrap_or_default();

        let mut merged = current.clone();
        for region in group {
            let inject = TagItems::parse(&region.inject_tag);
            if inject.is_empty() {
                if options.verbose {
                    eprintln!(
                        "{} no key:\"value\" pairs in injected tag {:?}, skipping",
                        "warning:".bold().yellow(),
                        region.inject_tag
                    );
                }
                continue;
            }
            merged = merged.merge(&inject);
        }

        if merged != current {
            let after = merged.to_string();
            let splice = match &first.current_tag {
                Some(tag) => Splice {
                    range: tag.span.clone(),
                    replacement: render_literal(&after),
                },
                None => Splice {
                    range: first.end..first.end,
                    replacement: format!(" {}", render_literal(&after)),
                },
            };
            plan.splices.push(splice);
            plan.changes.push(TagChange {
                field: first.field_span(),
                before: first.current_tag.as_ref().map(|tag| tag.content.clone()),
                after,
            });
        }

        if options.remove_comments {
            for span in group.iter().filter_map(EditRegion::comment_span) {
                plan.splices.push(Splice {
                    range: comment_line_span(source, span),
                    replacement: String::new(),
                });
                plan.comments_removed += 1;
            }
        }
    }

    plan
}

/// Apply splices to `source`, returning the new contents.
///
/// Splices may be given in any order; overlapping splices are rejected.
pub fn apply_splices(source: &[u8], splices: &[Splice]) -> Result<Vec<u8>> {
    let mut ordered: Vec<&Splice> = splices.iter().collect();
    ordered.sort_by_key(|splice| (splice.range.start, splice.range.end));

    let added: usize = ordered.iter().map(|s| s.replacement.len()).sum();
    let mut out = Vec::with_capacity(source.len() + added);
    let mut cursor = 0;

    for splice in ordered {
        let Range { start, end } = splice.range;
        if start < cursor {
            bail!("overlapping edits at byte offset {}", start);
        }
        if end > source.len() || start > end {
            bail!(
                "edit {}..{} is out of bounds for a {} byte file",
                start,
                end,
                source.len()
            );
        }
        out.extend_from_slice(&source[cursor..start]);
        out.extend_from_slice(splice.replacement.as_bytes());
        cursor = end;
    }
    out.extend_from_slice(&source[cursor..]);

    Ok(out)
}

/// Plan and apply all regions of a file.
pub fn rewrite_source(
    source: &[u8],
    regions: &[EditRegion],
    options: &InjectOptions,
) -> Result<(Vec<u8>, RewritePlan)> {
    let plan = plan_rewrite(source, regions, options);
    let contents = apply_splices(source, &plan.splices)?;
    Ok((contents, plan))
}

/// Widen a comment span to its whole line when the comment stands alone on
/// that line, so removal leaves no blank line behind.
fn comment_line_span(source: &[u8], span: Range<usize>) -> Range<usize> {
    let is_blank = |bytes: &[u8]| bytes.iter().all(|b| matches!(b, b' ' | b'\t' | b'\r'));

    let line_start = source[..span.start]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    if !is_blank(&source[line_start..span.start]) {
        return span;
    }

    let rest = &source[span.end..];
    match rest.iter().position(|&b| b == b'\n') {
        Some(i) if is_blank(&rest[..i]) => line_start..span.end + i + 1,
        None if is_blank(rest) => line_start..source.len(),
        _ => span,
    }
}

use anyhow::{Result, anyhow};
use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

/// The file is not valid Go source.
#[derive(Debug, Error)]
#[error("failed to parse Go source {path}:{line}:{col}: unexpected `{snippet}`")]
pub struct ParseError {
    pub path: String,
    /// 1-based line of the first syntax error.
    pub line: usize,
    /// 1-based column of the first syntax error.
    pub col: usize,
    pub snippet: String,
}

/// A parsed Go source file together with the bytes it was parsed from.
pub struct ParsedGo<'src> {
    pub tree: Tree,
    pub source: &'src [u8],
}

impl<'src> ParsedGo<'src> {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Text of a node, lossily decoded.
    pub fn text(&self, node: Node) -> String {
        String::from_utf8_lossy(&self.source[node.byte_range()]).into_owned()
    }
}

/// Parse Go source bytes into a syntax tree.
///
/// tree-sitter recovers from syntax errors; any ERROR or MISSING node in the
/// result is reported as a [`ParseError`] so that a malformed file is never
/// rewritten.
pub fn parse_go_source<'src>(source: &'src [u8], file_path: &str) -> Result<ParsedGo<'src>> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| anyhow!("Failed to set parser language for go: {}", e))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| anyhow!("Failed to parse {}: parser returned no tree", file_path))?;

    if let Some(node) = first_error(tree.root_node()) {
        let pos = node.start_position();
        let snippet = String::from_utf8_lossy(&source[node.byte_range()])
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(40)
            .collect();
        return Err(ParseError {
            path: file_path.to_string(),
            line: pos.row + 1,
            col: pos.column + 1,
            snippet,
        }
        .into());
    }

    Ok(ParsedGo { tree, source })
}

fn first_error(node: Node) -> Option<Node> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(first_error)
        .or(Some(node))
}

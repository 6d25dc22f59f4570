//! Tree-sitter based Go parser.

use tree_sitter::{Node, Parser as TsParser, Tree};

use super::{CommentIndex, ParsedFile};
use crate::error::ConstTableError;

/// Maximum length of the source excerpt quoted in syntax errors.
const SNIPPET_LEN: usize = 24;

/// Parse Go source code into a `ParsedFile`.
///
/// tree-sitter recovers from syntax errors by inserting `ERROR` and
/// `MISSING` nodes; any such node turns into a `ConstTableError::Parse`
/// so that no table is built from a half-understood file.
pub fn parse(path: &str, source: Vec<u8>) -> Result<ParsedFile, ConstTableError> {
    let mut parser = TsParser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| parse_error(path, 1, 1, format!("failed to load Go grammar: {}", e)))?;

    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| parse_error(path, 1, 1, "failed to parse source".to_string()))?;

    check_syntax(path, &tree, &source)?;

    let comments = CommentIndex::collect(tree.root_node(), &source);

    Ok(ParsedFile {
        tree,
        source,
        path: path.to_string(),
        comments,
    })
}

/// Reject trees with recovered syntax errors or without a package clause.
fn check_syntax(path: &str, tree: &Tree, source: &[u8]) -> Result<(), ConstTableError> {
    let root = tree.root_node();

    if root.has_error() {
        if let Some(node) = first_error(root) {
            let pos = node.start_position();
            let message = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                format!("unexpected {}", snippet(node, source))
            };
            return Err(parse_error(path, pos.row + 1, pos.column + 1, message));
        }
        return Err(parse_error(path, 1, 1, "syntax error".to_string()));
    }

    let mut cursor = root.walk();
    let has_package = root
        .named_children(&mut cursor)
        .any(|n| n.kind() == "package_clause");
    if !has_package {
        return Err(parse_error(path, 1, 1, "expected 'package' clause".to_string()));
    }

    Ok(())
}

/// Find the first `ERROR` or `MISSING` node in document order.
fn first_error(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        // Only descend into subtrees that contain an error
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

/// First line of a node's text, shortened for messages.
fn snippet(node: Node, source: &[u8]) -> String {
    let text = String::from_utf8_lossy(&source[node.start_byte()..node.end_byte()]);
    let line = text.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return "end of input".to_string();
    }
    let short: String = line.chars().take(SNIPPET_LEN).collect();
    if short.len() < line.len() {
        format!("{:?}...", short)
    } else {
        format!("{:?}", short)
    }
}

fn parse_error(path: &str, line: usize, column: usize, message: String) -> ConstTableError {
    ConstTableError::Parse {
        path: path.to_string(),
        line,
        column,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_file() {
        let source = b"package main\n\nconst Version = \"1.0\"\n".to_vec();
        let parsed = parse("main.go", source).unwrap();
        assert_eq!(parsed.root().kind(), "source_file");
        assert_eq!(parsed.path, "main.go");
    }

    #[test]
    fn test_parsed_file_debug_shows_path() {
        let parsed = parse("debug.go", b"package main\n".to_vec()).unwrap();
        assert!(format!("{:?}", parsed).contains("debug.go"));
    }

    #[test]
    fn test_parse_syntax_error() {
        let source = b"package main\n\nconst (\n    A = \n".to_vec();
        let err = parse("bad.go", source).unwrap_err();
        match err {
            ConstTableError::Parse { path, line, .. } => {
                assert_eq!(path, "bad.go");
                assert!(line >= 3, "error should point past the package clause, got line {}", line);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_file_requires_package() {
        let err = parse("empty.go", Vec::new()).unwrap_err();
        assert!(
            err.to_string().contains("expected 'package' clause"),
            "got: {}",
            err
        );
    }

    #[test]
    fn test_comments_are_collected_in_order() {
        let source = b"// first\npackage main\n\n/* second */\nconst A = 1 // third\n".to_vec();
        let parsed = parse("c.go", source).unwrap();
        let texts: Vec<&str> = parsed.comments().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["// first", "/* second */", "// third"]);
    }
}

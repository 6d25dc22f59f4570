//! Constant declaration extraction.
//!
//! Walks every `const` declaration in document order (including the ones
//! nested in function bodies) and pairs constant names with the comment
//! blocks that document them:
//!
//! ```text
//! // Group doc.              -> Group pair for A and for B
//! const (
//!     // A doc.              -> Spec pair for A
//!     A = iota
//!     B                      // trailing: Line pair for B (opt-in)
//! )
//! ```

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Query, QueryCursor};

use crate::error::ConstTableError;
use crate::parser::{doc_text, ParsedFile};

/// Tree-sitter query for finding Go constant declarations.
const CONST_QUERY: &str = r#"
(const_declaration) @const
"#;

/// Where a comment block was attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentLevel {
    /// Doc comment of the whole `const` declaration.
    Group,
    /// Doc comment of one spec inside a parenthesized declaration.
    Spec,
    /// Comment trailing a spec on the same line.
    Line,
}

/// A constant name paired with one comment block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPair {
    pub name: String,
    pub level: CommentLevel,
    /// Comment text. `Group` pairs carry the doc text with markers and
    /// directives removed (empty for a group without doc); `Spec` and
    /// `Line` pairs carry the raw comment, markers included.
    pub text: String,
}

/// Extraction switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Tabulate every name of a multi-name spec (`A, B = 1, 2`), not only
    /// the first one.
    pub all_names: bool,
    /// Also attach trailing same-line comments of each spec.
    ///
    /// Off by default, as in the Go `goconsttable` tool: a line such as
    /// `A, B = 1, 2 // shared` then gives `A` an empty description, and
    /// `shared` only reaches `A` when this is enabled.
    pub include_line_comments: bool,
}

/// Extract `(name, comment)` pairs from a parsed Go file.
///
/// For each spec of each declaration, pairs are emitted in this order:
/// the declaration's doc comment (even when empty), then one pair per
/// comment of the spec's own doc, then the trailing line comments when
/// enabled.
pub fn extract(
    parsed: &ParsedFile,
    options: &ExtractOptions,
) -> Result<Vec<CommentPair>, ConstTableError> {
    let language: Language = tree_sitter_go::LANGUAGE.into();
    let query = Query::new(&language, CONST_QUERY).map_err(|e| ConstTableError::Parse {
        path: parsed.path.clone(),
        line: 1,
        column: 1,
        message: format!("invalid constant query: {}", e),
    })?;

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, parsed.root(), &parsed.source[..]);

    let mut pairs = Vec::new();
    let mut groups = 0;

    while let Some(m) = matches.next() {
        for capture in m.captures {
            groups += 1;
            extract_declaration(parsed, capture.node, options, &mut pairs)?;
        }
    }

    if std::env::var("GOCONSTTABLE_DEBUG").is_ok() {
        eprintln!(
            "[debug] Found {} const declarations, {} comment pairs",
            groups,
            pairs.len()
        );
    }

    Ok(pairs)
}

/// Emit the pairs of one `const_declaration` node.
fn extract_declaration(
    parsed: &ParsedFile,
    decl: Node,
    options: &ExtractOptions,
    pairs: &mut Vec<CommentPair>,
) -> Result<(), ConstTableError> {
    let group_doc = doc_text(parsed.lead_comments(decl));

    let mut cursor = decl.walk();
    let children: Vec<Node> = decl.children(&mut cursor).collect();
    let parenthesized = children.iter().any(|n| n.kind() == "(");

    for spec in children.iter().filter(|n| n.kind() == "const_spec") {
        let mut name_cursor = spec.walk();
        let names: Vec<Node> = spec
            .children_by_field_name("name", &mut name_cursor)
            .collect();

        let names = if options.all_names {
            &names[..]
        } else {
            &names[..names.len().min(1)]
        };

        for name_node in names {
            let name = parsed.identifier(*name_node)?.to_string();

            pairs.push(CommentPair {
                name: name.clone(),
                level: CommentLevel::Group,
                text: group_doc.clone(),
            });

            if parenthesized {
                for comment in parsed.lead_comments(*spec) {
                    pairs.push(CommentPair {
                        name: name.clone(),
                        level: CommentLevel::Spec,
                        text: comment.text.clone(),
                    });
                }
            }

            if options.include_line_comments {
                for comment in parsed.line_comments(*spec) {
                    pairs.push(CommentPair {
                        name: name.clone(),
                        level: CommentLevel::Line,
                        text: comment.text.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn pairs_of(source: &str, options: ExtractOptions) -> Vec<(String, CommentLevel, String)> {
        let parsed = parse("test.go", source.as_bytes().to_vec()).unwrap();
        extract(&parsed, &options)
            .unwrap()
            .into_iter()
            .map(|p| (p.name, p.level, p.text))
            .collect()
    }

    fn pair(name: &str, level: CommentLevel, text: &str) -> (String, CommentLevel, String) {
        (name.to_string(), level, text.to_string())
    }

    #[test]
    fn test_single_const_with_doc() {
        let pairs = pairs_of(
            "package main\n\n// Foo does X\nconst Foo = 1\n",
            ExtractOptions::default(),
        );
        assert_eq!(pairs, vec![pair("Foo", CommentLevel::Group, "Foo does X")]);
    }

    #[test]
    fn test_group_doc_then_spec_docs() {
        let source = r#"package main

// Colors of the rainbow.
const (
	// Red is first.
	Red = iota
	// Orange is second.
	Orange
)
"#;
        let pairs = pairs_of(source, ExtractOptions::default());
        assert_eq!(
            pairs,
            vec![
                pair("Red", CommentLevel::Group, "Colors of the rainbow."),
                pair("Red", CommentLevel::Spec, "// Red is first."),
                pair("Orange", CommentLevel::Group, "Colors of the rainbow."),
                pair("Orange", CommentLevel::Spec, "// Orange is second."),
            ]
        );
    }

    #[test]
    fn test_spec_doc_emits_one_pair_per_comment() {
        let source = "package main\n\nconst (\n\t// One.\n\t// Two.\n\tA = 1\n)\n";
        let pairs = pairs_of(source, ExtractOptions::default());
        assert_eq!(
            pairs,
            vec![
                pair("A", CommentLevel::Group, ""),
                pair("A", CommentLevel::Spec, "// One."),
                pair("A", CommentLevel::Spec, "// Two."),
            ]
        );
    }

    #[test]
    fn test_undocumented_const_still_emits_group_pair() {
        let pairs = pairs_of("package main\n\nconst Bare = 1\n", ExtractOptions::default());
        assert_eq!(pairs, vec![pair("Bare", CommentLevel::Group, "")]);
    }

    #[test]
    fn test_multi_name_spec_first_name_only() {
        let source = "package main\n\nconst (\n\t// shared\n\tA, B = 1, 2\n)\n";
        let pairs = pairs_of(source, ExtractOptions::default());
        assert!(pairs.iter().all(|(name, _, _)| name == "A"));

        let pairs = pairs_of(
            source,
            ExtractOptions {
                all_names: true,
                ..Default::default()
            },
        );
        assert!(pairs.contains(&pair("B", CommentLevel::Spec, "// shared")));
    }

    #[test]
    fn test_line_comments_are_opt_in() {
        let source = "package main\n\nconst (\n\tA, B = 1, 2 // shared\n)\n";
        let pairs = pairs_of(source, ExtractOptions::default());
        assert_eq!(pairs, vec![pair("A", CommentLevel::Group, "")]);

        let pairs = pairs_of(
            source,
            ExtractOptions {
                include_line_comments: true,
                ..Default::default()
            },
        );
        assert_eq!(
            pairs,
            vec![
                pair("A", CommentLevel::Group, ""),
                pair("A", CommentLevel::Line, "// shared"),
            ]
        );
    }

    #[test]
    fn test_nested_const_in_function() {
        let source = r#"package main

func main() {
	// Local limit.
	const limit = 10
	_ = limit
}
"#;
        let pairs = pairs_of(source, ExtractOptions::default());
        assert_eq!(pairs, vec![pair("limit", CommentLevel::Group, "Local limit.")]);
    }

    #[test]
    fn test_var_declarations_are_ignored() {
        let source = "package main\n\n// Not a constant.\nvar x = 1\n";
        assert!(pairs_of(source, ExtractOptions::default()).is_empty());
    }

    #[test]
    fn test_group_doc_skips_directives() {
        let source = "package main\n\n//go:generate stringer -type=Status\n// Status codes.\nconst (\n\t// Idle waits.\n\tIdle = iota\n)\n";
        let pairs = pairs_of(source, ExtractOptions::default());
        assert_eq!(
            pairs,
            vec![
                pair("Idle", CommentLevel::Group, "Status codes."),
                pair("Idle", CommentLevel::Spec, "// Idle waits."),
            ]
        );
    }

    #[test]
    fn test_group_doc_from_block_comment() {
        let source = "package main\n\n/* Limit bounds retries. */\nconst Limit = 3\n";
        let pairs = pairs_of(source, ExtractOptions::default());
        assert_eq!(pairs, vec![pair("Limit", CommentLevel::Group, " Limit bounds retries.")]);
    }
}

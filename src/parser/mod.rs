//! Go syntax tree access for constant extraction.
//!
//! This module provides:
//! - `parse`: tree-sitter based parsing of a Go source file
//! - `ParsedFile`: the tree together with its source and comment index
//! - Go-style comment attachment (doc comments and trailing line comments)
//!
//! tree-sitter keeps comments as `extra` nodes that float between the
//! nodes they document, so attachment is computed from byte and line
//! positions the way the Go parser does it.

mod comments;
mod treesitter;

pub use comments::{doc_text, Comment, CommentIndex};
pub use treesitter::parse;

use crate::error::ConstTableError;

/// Holds a parsed tree-sitter tree and associated metadata.
#[derive(Debug)]
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The original source code (kept for node text extraction).
    pub source: Vec<u8>,
    /// The file path (for error reporting).
    pub path: String,
    comments: CommentIndex,
}

impl ParsedFile {
    /// Root node of the tree.
    pub fn root(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Get the text of an identifier node, failing on invalid UTF-8.
    pub fn identifier(&self, node: tree_sitter::Node) -> Result<&str, ConstTableError> {
        node.utf8_text(&self.source).map_err(|_| {
            let pos = node.start_position();
            ConstTableError::Parse {
                path: self.path.clone(),
                line: pos.row + 1,
                column: pos.column + 1,
                message: "illegal UTF-8 encoding in identifier".to_string(),
            }
        })
    }

    /// All comments of the file, in source order.
    pub fn comments(&self) -> &[Comment] {
        self.comments.all()
    }

    /// The doc comment group directly above `node`.
    pub fn lead_comments(&self, node: tree_sitter::Node) -> &[Comment] {
        self.comments
            .lead(&self.source, node.start_byte(), node.start_position().row)
    }

    /// Comments trailing `node` on the line where it ends.
    pub fn line_comments(&self, node: tree_sitter::Node) -> &[Comment] {
        self.comments
            .trailing(&self.source, node.end_byte(), node.end_position().row)
    }
}

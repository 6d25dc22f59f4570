//! Go-style comment attachment over tree-sitter comment nodes.
//!
//! The rules mirror the Go parser:
//! - a comment starting on the line of the preceding token belongs to that
//!   token as a line comment, together with the comments following it on
//!   the same line
//! - other comments form groups; a comment joins the current group when it
//!   starts at most one line below the group's last line
//! - the last group before a node is its doc comment only if it ends on
//!   the line directly above the node

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

/// A single comment node of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Raw comment text, markers included (`// ...` or `/* ... */`).
    pub text: String,
    pub start_byte: usize,
    pub end_byte: usize,
    /// Start line (0-indexed).
    pub start_row: usize,
    /// End line (0-indexed).
    pub end_row: usize,
}

impl Comment {
    fn from_node(node: Node, source: &[u8]) -> Self {
        Self {
            text: String::from_utf8_lossy(&source[node.start_byte()..node.end_byte()]).into_owned(),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_row: node.start_position().row,
            end_row: node.end_position().row,
        }
    }
}

/// Every comment of a file in source order, plus the line table needed
/// to place the tokens around them.
#[derive(Debug, Default)]
pub struct CommentIndex {
    comments: Vec<Comment>,
    line_starts: Vec<usize>,
}

impl CommentIndex {
    /// Collect all `comment` nodes below `root`.
    pub fn collect(root: Node, source: &[u8]) -> Self {
        let mut comments = Vec::new();
        let mut cursor = root.walk();

        'walk: loop {
            let node = cursor.node();
            if node.kind() == "comment" {
                comments.push(Comment::from_node(node, source));
            }
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        comments.sort_by_key(|c| c.start_byte);

        let line_starts = std::iter::once(0)
            .chain(
                source
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| **b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();

        Self {
            comments,
            line_starts,
        }
    }

    /// All comments, in source order.
    pub fn all(&self) -> &[Comment] {
        &self.comments
    }

    /// The doc comment group of a node starting at `start_byte` on line
    /// `start_row`. Empty when the node has none.
    pub fn lead(&self, source: &[u8], start_byte: usize, start_row: usize) -> &[Comment] {
        let last = self.comments.partition_point(|c| c.end_byte <= start_byte);

        // Comments separated from the node and from each other by whitespace only
        let mut first = last;
        let mut cursor = start_byte;
        while first > 0 {
            let comment = &self.comments[first - 1];
            if !is_blank(&source[comment.end_byte..cursor]) {
                break;
            }
            cursor = comment.start_byte;
            first -= 1;
        }

        if first == last {
            return &[];
        }

        // Drop the line comment of the previous token
        if self.prev_token_row(source, cursor) == Some(self.comments[first].start_row) {
            let mut end_row = self.comments[first].end_row;
            first += 1;
            while first < last && self.comments[first].start_row <= end_row {
                end_row = self.comments[first].end_row;
                first += 1;
            }
        }

        if first == last {
            return &[];
        }

        let mut group_start = first;
        for i in first + 1..last {
            if self.comments[i].start_row > self.comments[i - 1].end_row + 1 {
                group_start = i;
            }
        }

        if self.comments[last - 1].end_row + 1 == start_row {
            &self.comments[group_start..last]
        } else {
            &[]
        }
    }

    /// Comments that start on line `end_row` after a node ending at
    /// `end_byte`, separated from it by whitespace only.
    pub fn trailing(&self, source: &[u8], end_byte: usize, end_row: usize) -> &[Comment] {
        let first = self.comments.partition_point(|c| c.start_byte < end_byte);

        let mut last = first;
        let mut cursor = end_byte;
        let mut line = end_row;
        while last < self.comments.len() {
            let comment = &self.comments[last];
            if comment.start_row > line || !is_blank(&source[cursor..comment.start_byte]) {
                break;
            }
            line = comment.end_row;
            cursor = comment.end_byte;
            last += 1;
        }

        &self.comments[first..last]
    }

    /// Line of the last non-whitespace byte before `offset`.
    fn prev_token_row(&self, source: &[u8], offset: usize) -> Option<usize> {
        let idx = source[..offset]
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())?;
        Some(self.row_of(idx))
    }

    /// Line (0-indexed) containing byte `offset`.
    fn row_of(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| b.is_ascii_whitespace())
}

/// Tool directives (`//go:generate`, `//nolint:errcheck`, `//line`, ...),
/// matched after the `//` marker.
static DIRECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:line |extern |export |[a-z0-9]+:[a-z0-9])").unwrap());

/// Text of a doc comment group with the comment markers removed.
///
/// Works like Go's `CommentGroup.Text`: `//` and `/* */` markers go away
/// along with one space after `//`, directive lines are dropped, trailing
/// whitespace is stripped from each line, leading blank lines are removed
/// and runs of blank lines collapse into one. Trailing blank lines are
/// removed too, so the result never ends with a newline.
pub fn doc_text(comments: &[Comment]) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for comment in comments {
        let text = comment.text.as_str();
        let body = if let Some(rest) = text.strip_prefix("//") {
            if DIRECTIVE_RE.is_match(rest) {
                continue;
            }
            rest.strip_prefix(' ').unwrap_or(rest)
        } else if let Some(rest) = text.strip_prefix("/*") {
            rest.strip_suffix("*/").unwrap_or(rest)
        } else {
            text
        };

        for line in body.split('\n') {
            let line = line.trim_end();
            let after_blank = lines.last().map_or(true, |l| l.is_empty());
            if !line.is_empty() || !after_blank {
                lines.push(line);
            }
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

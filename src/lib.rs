//! goconsttable - Markdown tables from Go constant declarations.
//!
//! Reads one Go source file, finds every `const` declaration and renders a
//! `| Constant | Description |` table built from the doc comments attached
//! to each constant.
//!
//! # Architecture
//!
//! The pipeline runs once, front to back:
//!
//! - `source`: reads the file
//! - `parser`: tree-sitter Go parsing and Go-style comment attachment
//! - `extract`: pairs constant names with their comment blocks
//! - `table`: normalizes comments and aggregates them per name
//! - `render`: built-in table layout or minijinja template
//! - `cli`: argument parsing and exit codes

pub mod cli;
pub mod error;
pub mod extract;
pub mod parser;
pub mod render;
pub mod source;
pub mod table;

use std::path::Path;

pub use error::{ConstTableError, ErrorClass};
pub use extract::{CommentLevel, CommentPair, ExtractOptions};
pub use parser::ParsedFile;
pub use table::{normalize, ConstTable, ConstantEntry, TableOrder};

/// Build the constant table of in-memory Go source.
///
/// `path` is only used in error messages.
pub fn table_from_source(
    path: &str,
    source: Vec<u8>,
    options: &ExtractOptions,
) -> Result<ConstTable, ConstTableError> {
    let parsed = parser::parse(path, source)?;
    let pairs = extract::extract(&parsed, options)?;
    let table = ConstTable::from_pairs(&pairs);

    if std::env::var("GOCONSTTABLE_DEBUG").is_ok() {
        eprintln!("[debug] Aggregated {} constants", table.len());
    }

    Ok(table)
}

/// Read a Go file and build its constant table.
pub fn table_from_file(path: &Path, options: &ExtractOptions) -> Result<ConstTable, ConstTableError> {
    let source = source::read_source(path)?;

    if std::env::var("GOCONSTTABLE_DEBUG").is_ok() {
        eprintln!("[debug] Read {} bytes from {}", source.len(), path.display());
    }

    table_from_source(&path.to_string_lossy(), source, options)
}

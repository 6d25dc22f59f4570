//! Error types for the goconsttable pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or rendering a constant table.
///
/// Every variant is terminal for the current invocation: the pipeline stops
/// at the first error and nothing is written to stdout.
#[derive(Error, Debug)]
pub enum ConstTableError {
    #[error("File path not provided.")]
    MissingPath,
    #[error("Error reading file: {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error reading file: {}: not a regular file", .0.display())]
    NotAFile(PathBuf),
    #[error("Error parsing file: {path}:{line}:{column}: {message}")]
    Parse {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("Error reading template: {}: {source}", .path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error parsing template: {0}")]
    TemplateSyntax(#[source] minijinja::Error),
    #[error("Error executing template: {0}")]
    TemplateRender(#[source] minijinja::Error),
}

/// Coarse error classes, one per pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Config,
    Read,
    Parse,
    Template,
}

impl ConstTableError {
    /// The pipeline stage this error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            ConstTableError::MissingPath => ErrorClass::Config,
            ConstTableError::Read { .. } | ConstTableError::NotAFile(_) => ErrorClass::Read,
            ConstTableError::Parse { .. } => ErrorClass::Parse,
            ConstTableError::TemplateRead { .. }
            | ConstTableError::TemplateSyntax(_)
            | ConstTableError::TemplateRender(_) => ErrorClass::Template,
        }
    }
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Config => "config",
            ErrorClass::Read => "read",
            ErrorClass::Parse => "parse",
            ErrorClass::Template => "template",
        }
    }
}

//! Command-line interface for goconsttable.

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use crate::error::ConstTableError;
use crate::extract::ExtractOptions;
use crate::render;
use crate::table::TableOrder;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Generate a Markdown table of Go constants and their doc comments.
///
/// Reads one Go source file, collects every `const` declaration with the
/// comments that document it, and prints a `| Constant | Description |`
/// table, optionally embedded in a template.
#[derive(Parser, Debug)]
#[command(name = "goconsttable")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to Go file
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Path to a template file; `{{ GoConstTable }}` (or Go-style
    /// `{{.GoConstTable}}`) is replaced by the table. Templates use
    /// minijinja syntax: only bare Go field references like `{{.Field}}`
    /// are translated, other Go template actions (`{{if ...}}`,
    /// `{{/* ... */}}`) fail as template errors
    #[arg(long)]
    pub template_path: Option<PathBuf>,

    /// Sort rows by constant name instead of source order
    #[arg(long)]
    pub sort: bool,

    /// Tabulate every name of multi-name declarations (`A, B = 1, 2`)
    #[arg(long)]
    pub all_names: bool,

    /// Also use comments trailing a constant on the same line
    #[arg(long)]
    pub include_line_comments: bool,
}

impl Cli {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            all_names: self.all_names,
            include_line_comments: self.include_line_comments,
        }
    }

    pub fn order(&self) -> TableOrder {
        if self.sort {
            TableOrder::Name
        } else {
            TableOrder::Source
        }
    }
}

/// Run the whole pipeline and return the rendered output.
///
/// Nothing is returned unless every stage succeeded.
pub fn generate(cli: &Cli) -> Result<String, ConstTableError> {
    let path = cli.path.as_deref().ok_or(ConstTableError::MissingPath)?;

    let table = crate::table_from_file(path, &cli.extract_options())?;

    let template = render::load_template(cli.template_path.as_deref())?;
    if std::env::var("GOCONSTTABLE_DEBUG").is_ok() {
        match &cli.template_path {
            Some(p) => eprintln!("[debug] Using template {}", p.display()),
            None => eprintln!("[debug] Using built-in template"),
        }
    }

    render::render(&table, &template, &path.to_string_lossy(), cli.order())
}

/// Run the tool, writing the result to stdout.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out)
}

/// Run the tool, writing the result to `out`.
///
/// Pipeline errors are reported on stderr and mapped to `EXIT_ERROR`;
/// only failures writing `out` are returned as errors.
pub fn run_with_output<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<i32> {
    let output = match generate(cli) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(EXIT_ERROR);
        }
    };

    out.write_all(output.as_bytes())?;
    out.flush()?;

    Ok(EXIT_SUCCESS)
}

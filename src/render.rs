//! Table rendering, built-in layout or user template.
//!
//! Templates are rendered with minijinja. The template context exposes:
//! - `GoConstTable`: the fully formatted Markdown table
//! - `Constants`: the rows as a list of `{ Name, Description }`
//! - `SourcePath`: the analyzed file path
//!
//! Go `text/template` field references such as `{{.GoConstTable}}` are
//! rewritten to `{{ GoConstTable }}` before parsing. Other Go template
//! actions are not translated and fail as template errors.

use std::borrow::Cow;
use std::path::Path;

use minijinja::{Environment, UndefinedBehavior};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::error::ConstTableError;
use crate::table::{ConstTable, ConstantEntry, TableOrder};

/// Template used when no template file is given.
pub const DEFAULT_TEMPLATE: &str = "{{ GoConstTable }}";

const TEMPLATE_NAME: &str = "goconsttable";

const TABLE_HEADER: &str = "| Constant | Description |\n| --- | --- |\n";

/// Go template field reference: `{{.Name}}`, `{{- .Name -}}`.
static GO_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(-\s)?\s*\.([A-Za-z_][A-Za-z0-9_]*)\s*(\s-)?\}\}").unwrap()
});

#[derive(Serialize)]
struct TemplateContext<'a> {
    #[serde(rename = "GoConstTable")]
    go_const_table: &'a str,
    #[serde(rename = "Constants")]
    constants: Vec<&'a ConstantEntry>,
    #[serde(rename = "SourcePath")]
    source_path: &'a str,
}

/// Format the table as Markdown: header, separator, one row per entry.
pub fn format_table(table: &ConstTable, order: TableOrder) -> String {
    let mut out = String::from(TABLE_HEADER);
    for entry in table.ordered(order) {
        out.push_str(&format!("| {} | {} |\n", entry.name, entry.description));
    }
    out
}

/// Load the template source, falling back to the built-in template.
pub fn load_template(path: Option<&Path>) -> Result<Cow<'static, str>, ConstTableError> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|e| ConstTableError::TemplateRead {
                path: path.to_path_buf(),
                source: e,
            }),
        None => Ok(Cow::Borrowed(DEFAULT_TEMPLATE)),
    }
}

/// Rewrite Go template field references into minijinja expressions.
pub fn translate_go_fields(template: &str) -> Cow<'_, str> {
    GO_FIELD_RE.replace_all(template, |caps: &Captures| {
        let open = if caps.get(1).is_some() { "{{-" } else { "{{" };
        let close = if caps.get(3).is_some() { "-}}" } else { "}}" };
        format!("{} {} {}", open, &caps[2], close)
    })
}

/// Render the table through `template`.
///
/// The output is the template text verbatim with placeholders substituted,
/// trailing newline included. Unknown fields are an error.
pub fn render(
    table: &ConstTable,
    template: &str,
    source_path: &str,
    order: TableOrder,
) -> Result<String, ConstTableError> {
    let formatted = format_table(table, order);
    let source = translate_go_fields(template);

    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.add_template(TEMPLATE_NAME, &source)
        .map_err(ConstTableError::TemplateSyntax)?;

    let tmpl = env
        .get_template(TEMPLATE_NAME)
        .map_err(ConstTableError::TemplateSyntax)?;

    let context = TemplateContext {
        go_const_table: &formatted,
        constants: table.ordered(order),
        source_path,
    };

    tmpl.render(&context).map_err(ConstTableError::TemplateRender)
}

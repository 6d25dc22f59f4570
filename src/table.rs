//! Comment normalization and the name → description table.

use std::collections::HashMap;

use serde::Serialize;

use crate::extract::CommentPair;

/// One row of the constant table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Row ordering used when rendering a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableOrder {
    /// Order in which constants were first seen in the file.
    #[default]
    Source,
    /// Sorted by constant name.
    Name,
}

/// Collapse raw comment text into a single line.
///
/// Each line loses every leading and trailing `/` and then its surrounding
/// whitespace. Lines that end up empty are kept as empty slots, so an
/// empty comment line shows up as a double space in the joined result.
pub fn normalize(raw: &str) -> String {
    raw.split('\n')
        .map(|line| line.trim_matches('/').trim())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Insertion-ordered mapping from constant name to accumulated description.
#[derive(Debug, Clone, Default)]
pub struct ConstTable {
    entries: Vec<ConstantEntry>,
    index: HashMap<String, usize>,
}

impl ConstTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from extracted comment pairs, in order.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = &'a CommentPair>,
    {
        let mut table = Self::new();
        for pair in pairs {
            table.add_comment(&pair.name, &pair.text);
        }
        table
    }

    /// Normalize a raw comment and append it to `name`'s description.
    pub fn add_comment(&mut self, name: &str, raw: &str) {
        self.aggregate(name, &normalize(raw));
    }

    /// Append an already normalized description to `name`.
    ///
    /// An absent or still empty description is replaced outright; a
    /// non-empty one gets a single space and then `description`.
    pub fn aggregate(&mut self, name: &str, description: &str) {
        match self.index.get(name) {
            Some(&i) => {
                let current = &mut self.entries[i].description;
                if current.is_empty() {
                    current.push_str(description);
                } else {
                    current.push(' ');
                    current.push_str(description);
                }
            }
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push(ConstantEntry {
                    name: name.to_string(),
                    description: description.to_string(),
                });
            }
        }
    }

    /// Description accumulated for `name`, if it was seen.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&i| self.entries[i].description.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[ConstantEntry] {
        &self.entries
    }

    /// Entries in the requested order.
    pub fn ordered(&self, order: TableOrder) -> Vec<&ConstantEntry> {
        let mut rows: Vec<&ConstantEntry> = self.entries.iter().collect();
        if order == TableOrder::Name {
            rows.sort_by(|a, b| a.name.cmp(&b.name));
        }
        rows
    }
}

//! Field list parsing and alias merging.
//!
//! Field lists come from a single comma-separated form entry. Two syntaxes are
//! supported:
//!
//! - [`FieldSyntax::Typed`]: entries look like column definitions
//!   (`name TEXT, age INT`); only the first word of each entry is the field name.
//! - [`FieldSyntax::Plain`]: entries are taken verbatim (`id, COUNT(*)`).
//!
//! Aliases are a second comma-separated entry paired with fields by position.

use serde::Deserialize;
use std::fmt;

/// How entries of a field list are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSyntax {
    /// `name TYPE` entries; the type declaration is stripped.
    #[default]
    Typed,
    /// Entries are used verbatim.
    Plain,
}

/// A single parsed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as it appears in the select list
    pub name: String,
    /// Declared type (only present for typed entries that carry one)
    pub data_type: Option<String>,
    /// Output alias
    pub alias: Option<String>,
}

impl FieldSpec {
    /// Create a bare field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            alias: None,
        }
    }

    /// Set the output alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    fn parse(entry: &str, syntax: FieldSyntax) -> Option<Self> {
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }

        match syntax {
            FieldSyntax::Plain => Some(Self::new(entry)),
            FieldSyntax::Typed => {
                let mut words = entry.split_whitespace();
                let name = words.next()?;
                let data_type = words.collect::<Vec<_>>().join(" ");
                Some(Self {
                    name: name.to_string(),
                    data_type: (!data_type.is_empty()).then_some(data_type),
                    alias: None,
                })
            }
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} AS {}", self.name, alias),
            None => f.write_str(&self.name),
        }
    }
}

/// Parse a comma-separated field list.
///
/// Blank entries (e.g. from a trailing comma) are dropped.
pub fn parse_fields(input: &str, syntax: FieldSyntax) -> Vec<FieldSpec> {
    parse_aliased_fields(input, syntax, "")
}

/// Parse a field list and pair it with a comma-separated alias list by position.
///
/// Aliases pair with field entries as entered, before blank entries are
/// dropped, so `a, , c` with `x, y, z` gives `a AS x, c AS z`. A field keeps
/// its bare name when the alias list is too short or the alias at its position
/// is blank. Aliases past the last entry are ignored.
pub fn parse_aliased_fields(input: &str, syntax: FieldSyntax, aliases: &str) -> Vec<FieldSpec> {
    let aliases: Vec<&str> = if aliases.trim().is_empty() {
        Vec::new()
    } else {
        aliases.split(',').map(str::trim).collect()
    };

    input
        .split(',')
        .enumerate()
        .filter_map(|(pos, entry)| {
            let mut field = FieldSpec::parse(entry, syntax)?;
            field.alias = aliases
                .get(pos)
                .filter(|alias| !alias.is_empty())
                .map(|alias| alias.to_string());
            Some(field)
        })
        .collect()
}

/// Render the select list: each field (with `AS alias` when present) joined by `", "`.
pub fn select_list(fields: &[FieldSpec]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests;

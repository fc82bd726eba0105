//! Form state handed to the composer.

use crate::error::ComposeError;
use crate::field::FieldSyntax;
use crate::filter::{CompareOp, Filter, FilterClause};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// ORDER BY direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parse a form value; a blank value means "not chosen".
    pub fn parse_optional(s: &str) -> Result<Option<Self>, ComposeError> {
        if s.trim().is_empty() {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(ComposeError::InvalidSortDirection(s.to_string())),
        }
    }
}

/// A single compose request, built fresh from the current form values.
///
/// Text values are kept as entered; the composer trims them. The query kind
/// stays a raw selector token so that an unknown selection surfaces as
/// [`ComposeError::InvalidKind`] at composition time.
///
/// # Example
/// ```
/// use sqlform::{CompareOp, QueryRequest, compose};
///
/// let req = QueryRequest::select("users")
///     .fields("id, name")
///     .aliases("user_id,")
///     .distinct(true)
///     .filter("age", CompareOp::Gt, "18");
///
/// assert_eq!(
///     compose(&req).unwrap(),
///     "SELECT DISTINCT id AS user_id, name FROM users WHERE age > 18"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RequestForm")]
pub struct QueryRequest {
    /// Query type selector (`SELECT`, `insert`, ...)
    pub kind: String,
    /// Table name
    pub table: String,
    /// Comma-separated field list
    pub fields: String,
    /// How entries of `fields` are read for SELECT
    pub field_syntax: FieldSyntax,
    /// Comma-separated aliases, position-aligned with `fields`
    pub aliases: String,
    /// WHERE source
    pub filter: Filter,
    /// Raw VALUES / SET operand for INSERT and UPDATE
    pub values: String,
    /// ORDER BY field (SELECT only)
    pub sort_field: String,
    /// ORDER BY direction; `None` renders as ASC
    pub sort_direction: Option<SortDirection>,
    /// Emit `SELECT DISTINCT`
    pub distinct: bool,
}

impl QueryRequest {
    /// Create a request for a raw selector token and table.
    pub fn new(kind: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            table: table.into(),
            ..Self::default()
        }
    }

    /// Create a SELECT request.
    pub fn select(table: impl Into<String>) -> Self {
        Self::new("SELECT", table)
    }

    /// Create an INSERT request.
    pub fn insert(table: impl Into<String>) -> Self {
        Self::new("INSERT", table)
    }

    /// Create an UPDATE request.
    pub fn update(table: impl Into<String>) -> Self {
        Self::new("UPDATE", table)
    }

    /// Create a DELETE request.
    pub fn delete(table: impl Into<String>) -> Self {
        Self::new("DELETE", table)
    }

    /// Set the comma-separated field list.
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Set how field entries are read.
    pub fn field_syntax(mut self, syntax: FieldSyntax) -> Self {
        self.field_syntax = syntax;
        self
    }

    /// Set the comma-separated alias list.
    pub fn aliases(mut self, aliases: impl Into<String>) -> Self {
        self.aliases = aliases.into();
        self
    }

    /// Add a structured filter row. Replaces a raw condition string.
    pub fn filter(
        mut self,
        field: impl Into<String>,
        op: CompareOp,
        value: impl Into<String>,
    ) -> Self {
        self.filter.push(FilterClause::new(field, op, value));
        self
    }

    /// Set all filter rows at once.
    pub fn filters(mut self, clauses: Vec<FilterClause>) -> Self {
        self.filter = Filter::Clauses(clauses);
        self
    }

    /// Set a raw WHERE condition string. Replaces structured filter rows.
    pub fn conditions(mut self, conditions: impl Into<String>) -> Self {
        self.filter = Filter::Raw(conditions.into());
        self
    }

    /// Set the raw VALUES / SET operand.
    pub fn values(mut self, values: impl Into<String>) -> Self {
        self.values = values.into();
        self
    }

    /// Sort by `field` with the default direction.
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.sort_field = field.into();
        self
    }

    /// Sort by `field` ascending.
    pub fn order_by_asc(self, field: impl Into<String>) -> Self {
        self.order_by(field).sort_direction(SortDirection::Asc)
    }

    /// Sort by `field` descending.
    pub fn order_by_desc(self, field: impl Into<String>) -> Self {
        self.order_by(field).sort_direction(SortDirection::Desc)
    }

    /// Set the sort direction.
    pub fn sort_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = Some(direction);
        self
    }

    /// Toggle DISTINCT.
    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }
}

/// Flat on-disk shape of a form file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RequestForm {
    kind: String,
    table: String,
    fields: String,
    field_syntax: FieldSyntax,
    aliases: String,
    filters: Vec<FilterClause>,
    conditions: String,
    values: String,
    sort_field: String,
    #[serde(deserialize_with = "deserialize_direction")]
    sort_direction: Option<SortDirection>,
    distinct: bool,
}

impl From<RequestForm> for QueryRequest {
    fn from(form: RequestForm) -> Self {
        // Structured rows win when both are present.
        let filter = if !form.filters.is_empty() {
            Filter::Clauses(form.filters)
        } else if !form.conditions.trim().is_empty() {
            Filter::Raw(form.conditions)
        } else {
            Filter::None
        };

        Self {
            kind: form.kind,
            table: form.table,
            fields: form.fields,
            field_syntax: form.field_syntax,
            aliases: form.aliases,
            filter,
            values: form.values,
            sort_field: form.sort_field,
            sort_direction: form.sort_direction,
            distinct: form.distinct,
        }
    }
}

fn deserialize_direction<'de, D>(deserializer: D) -> Result<Option<SortDirection>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => SortDirection::parse_optional(&s).map_err(serde::de::Error::custom),
    }
}

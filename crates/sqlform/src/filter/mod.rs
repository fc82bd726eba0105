//! WHERE clause inputs.
//!
//! A [`Filter`] is either an ordered list of structured [`FilterClause`]s (one
//! operator/value row per field) or a raw condition string passed through as-is.

use crate::error::{ComposeError, ComposeResult};
use crate::field::{FieldSyntax, parse_fields};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Comparison operator offered for a filter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `!=`
    Ne,
}

impl CompareOp {
    /// All operators, in the order a form lists them.
    pub const ALL: [CompareOp; 6] = [
        Self::Eq,
        Self::Gt,
        Self::Lt,
        Self::Gte,
        Self::Lte,
        Self::Ne,
    ];

    /// SQL symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Ne => "!=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareOp {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ComposeError::InvalidOperator(s.to_string()))
    }
}

/// A literal value classified for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal<'a> {
    /// Digits with at most one decimal point; rendered unquoted.
    Number(&'a str),
    /// Anything else; rendered in single quotes.
    Text(&'a str),
}

impl<'a> Literal<'a> {
    /// Classify a raw value.
    pub fn classify(value: &'a str) -> Self {
        if is_numeric(value) {
            Self::Number(value)
        } else {
            Self::Text(value)
        }
    }
}

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => f.write_str(v),
            Self::Text(v) => write!(f, "'{v}'"),
        }
    }
}

/// Returns `true` if `value` matches `^\d+(\.\d+)?$`.
///
/// Signs, exponents and leading/trailing dots are not numeric here.
pub fn is_numeric(value: &str) -> bool {
    static NUMERIC_RE: OnceLock<Regex> = OnceLock::new();
    NUMERIC_RE
        .get_or_init(|| Regex::new(r"^\d+(\.\d+)?$").expect("invalid built-in numeric regex"))
        .is_match(value)
}

/// One filter row: `field <op> <value>`.
///
/// A row with no operator, a blank field or a blank value is inactive and
/// renders nothing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterClause {
    pub field: String,
    #[serde(default, deserialize_with = "deserialize_op")]
    pub op: Option<CompareOp>,
    #[serde(default)]
    pub value: String,
}

impl FilterClause {
    /// Create an active clause.
    pub fn new(field: impl Into<String>, op: CompareOp, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: Some(op),
            value: value.into(),
        }
    }

    /// Create an empty row for `field` (no operator, no value).
    pub fn blank(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: None,
            value: String::new(),
        }
    }

    /// Render the clause, or `None` if the row is inactive.
    ///
    /// Field and value are trimmed; a blank field also makes the row inactive.
    pub fn render(&self) -> Option<String> {
        let op = self.op?;
        let field = self.field.trim();
        let value = self.value.trim();
        if field.is_empty() || value.is_empty() {
            return None;
        }
        Some(format!("{field} {op} {}", Literal::classify(value)))
    }
}

fn deserialize_op<'de, D>(deserializer: D) -> Result<Option<CompareOp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// WHERE clause source for a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    /// No WHERE clause.
    #[default]
    None,
    /// Structured rows joined with `AND`.
    Clauses(Vec<FilterClause>),
    /// Condition text appended verbatim.
    Raw(String),
}

impl Filter {
    /// Render the WHERE body, or `None` when nothing would be emitted.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Clauses(clauses) => {
                let parts: Vec<String> = clauses
                    .iter()
                    .filter_map(|clause| {
                        let rendered = clause.render();
                        #[cfg(feature = "tracing")]
                        if rendered.is_none() {
                            tracing::debug!(field = %clause.field, "skipping inactive filter row");
                        }
                        rendered
                    })
                    .collect();
                (!parts.is_empty()).then(|| parts.join(" AND "))
            }
            Self::Raw(conditions) => {
                let conditions = conditions.trim();
                (!conditions.is_empty()).then(|| conditions.to_string())
            }
        }
    }

    /// Push a structured clause, converting a raw or empty filter into a clause list.
    pub(crate) fn push(&mut self, clause: FilterClause) {
        match self {
            Self::Clauses(clauses) => clauses.push(clause),
            _ => *self = Self::Clauses(vec![clause]),
        }
    }
}

/// Build one blank filter row per field parsed from `fields`.
///
/// The caller fills in operator and value for the rows it wants active.
pub fn filter_rows(fields: &str, syntax: FieldSyntax) -> ComposeResult<Vec<FilterClause>> {
    let parsed = parse_fields(fields, syntax);
    if parsed.is_empty() {
        return Err(ComposeError::MissingFields);
    }
    Ok(parsed
        .into_iter()
        .map(|f| FilterClause::blank(f.name))
        .collect())
}

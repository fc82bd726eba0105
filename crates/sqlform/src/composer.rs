//! Statement assembly.
//!
//! [`compose`] validates a [`QueryRequest`] for its kind and then joins the
//! pieces into SQL text. Validation always completes before any text is built,
//! so a failed request never yields a partial statement.

use crate::error::{ComposeError, ComposeResult};
use crate::field::{parse_aliased_fields, select_list};
use crate::kind::QueryKind;
use crate::request::QueryRequest;

/// Compose the SQL statement described by `request`.
///
/// | kind   | output                                                              |
/// |--------|---------------------------------------------------------------------|
/// | SELECT | `SELECT [DISTINCT ]<fields> FROM <t>[ WHERE ..][ ORDER BY <f> <dir>]` |
/// | INSERT | `INSERT INTO <t> (<fields>) VALUES (<values>)`                      |
/// | UPDATE | `UPDATE <t> SET <fields> = <values>[ WHERE ..]`                     |
/// | DELETE | `DELETE FROM <t>[ WHERE ..]`                                        |
pub fn compose(request: &QueryRequest) -> ComposeResult<String> {
    let kind: QueryKind = request.kind.parse()?;
    let table = request.table.trim();
    if table.is_empty() {
        return Err(ComposeError::MissingTable);
    }

    let sql = match kind {
        QueryKind::Select => compose_select(request, table)?,
        QueryKind::Insert => {
            let (fields, values) = fields_and_values(request)?;
            format!("INSERT INTO {table} ({fields}) VALUES ({values})")
        }
        QueryKind::Update => {
            let (fields, values) = fields_and_values(request)?;
            let mut sql = format!("UPDATE {table} SET {fields} = {values}");
            push_where(&mut sql, request);
            sql
        }
        QueryKind::Delete => {
            let mut sql = format!("DELETE FROM {table}");
            push_where(&mut sql, request);
            sql
        }
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(kind = %kind, table, len = sql.len(), "composed statement");

    Ok(sql)
}

fn compose_select(request: &QueryRequest, table: &str) -> ComposeResult<String> {
    let fields = parse_aliased_fields(&request.fields, request.field_syntax, &request.aliases);
    if fields.is_empty() {
        return Err(ComposeError::MissingFields);
    }

    let distinct = if request.distinct { "DISTINCT " } else { "" };
    let mut sql = format!("SELECT {distinct}{} FROM {table}", select_list(&fields));
    push_where(&mut sql, request);

    let sort_field = request.sort_field.trim();
    if !sort_field.is_empty() {
        let direction = request.sort_direction.unwrap_or_default();
        sql.push_str(&format!(" ORDER BY {sort_field} {direction}"));
    }

    Ok(sql)
}

/// Both operands are passed through as single raw strings.
fn fields_and_values(request: &QueryRequest) -> ComposeResult<(&str, &str)> {
    let fields = request.fields.trim();
    let values = request.values.trim();
    if fields.is_empty() || values.is_empty() {
        return Err(ComposeError::MissingFieldsOrValues);
    }
    Ok((fields, values))
}

fn push_where(sql: &mut String, request: &QueryRequest) {
    if let Some(body) = request.filter.render() {
        sql.push_str(" WHERE ");
        sql.push_str(&body);
    }
}

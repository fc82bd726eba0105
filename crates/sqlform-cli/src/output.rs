use serde_json::json;
use sqlform::{CompareOp, FilterClause};

pub fn print_sql(sql: &str, as_json: bool) -> anyhow::Result<()> {
    println!("{}", render_sql(sql, as_json)?);
    Ok(())
}

pub fn print_filter_rows(rows: &[FilterClause], as_json: bool) -> anyhow::Result<()> {
    println!("{}", render_filter_rows(rows, as_json)?);
    Ok(())
}

fn render_sql(sql: &str, as_json: bool) -> anyhow::Result<String> {
    if as_json {
        Ok(serde_json::to_string(&json!({ "sql": sql }))?)
    } else {
        Ok(sql.to_string())
    }
}

fn render_filter_rows(rows: &[FilterClause], as_json: bool) -> anyhow::Result<String> {
    let operators: Vec<&str> = CompareOp::ALL.iter().map(|op| op.as_str()).collect();

    if as_json {
        let rows: Vec<_> = rows
            .iter()
            .map(|r| json!({ "field": r.field, "operators": operators }))
            .collect();
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let width = rows.iter().map(|r| r.field.len()).max().unwrap_or(0);
    let ops = operators.join(" ");
    Ok(rows
        .iter()
        .map(|r| format!("{:<width$}  [{ops}]", r.field))
        .collect::<Vec<_>>()
        .join("\n"))
}

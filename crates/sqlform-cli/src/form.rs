use sqlform::{Filter, QueryRequest};
use std::path::Path;

/// Load a compose request from a form file.
///
/// Files ending in `.json` are read as JSON, everything else as TOML. String
/// values may reference environment variables as `${VAR}`.
pub fn load(path: &Path) -> anyhow::Result<QueryRequest> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read form file {}: {e}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let mut request: QueryRequest = if is_json {
        serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("failed to parse form file {}: {e}", path.display()))?
    } else {
        toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("failed to parse form file {}: {e}", path.display()))?
    };

    expand_request(&mut request)?;
    tracing::debug!(path = %path.display(), kind = %request.kind, "loaded form");
    Ok(request)
}

fn expand_request(req: &mut QueryRequest) -> anyhow::Result<()> {
    for s in [
        &mut req.kind,
        &mut req.table,
        &mut req.fields,
        &mut req.aliases,
        &mut req.values,
        &mut req.sort_field,
    ] {
        let expanded = expand_env_vars(s)?;
        *s = expanded;
    }

    match &mut req.filter {
        Filter::None => {}
        Filter::Raw(conditions) => *conditions = expand_env_vars(conditions)?,
        Filter::Clauses(clauses) => {
            for c in clauses {
                c.field = expand_env_vars(&c.field)?;
                c.value = expand_env_vars(&c.value)?;
            }
        }
    }

    Ok(())
}

/// Replace every `${VAR}` in `input` with the value of the environment variable.
///
/// A `$` not followed by `{` is kept as-is.
fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            anyhow::bail!("unterminated env var reference in {input:?}");
        };

        let key = &after[..end];
        if key.is_empty() {
            anyhow::bail!("invalid env var reference: ${{}}");
        }
        let value = std::env::var(key)
            .map_err(|_| anyhow::anyhow!("missing env var for form expansion: {key}"))?;
        out.push_str(&value);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlform::{CompareOp, FilterClause};
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sqlform-form-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn expand_plain_text_untouched() {
        assert_eq!(expand_env_vars("price > $5").unwrap(), "price > $5");
        assert_eq!(expand_env_vars("").unwrap(), "");
    }

    #[test]
    fn expand_known_var() {
        // SAFETY: test-only variable with a unique name.
        unsafe { std::env::set_var("SQLFORM_TEST_TABLE", "accounts") };
        assert_eq!(
            expand_env_vars("app.${SQLFORM_TEST_TABLE}_v2").unwrap(),
            "app.accounts_v2"
        );
    }

    #[test]
    fn expand_errors() {
        assert!(expand_env_vars("${}").is_err());
        assert!(expand_env_vars("${OPEN").is_err());
        assert!(expand_env_vars("${SQLFORM_TEST_DEFINITELY_UNSET}").is_err());
    }

    #[test]
    fn load_toml_form() {
        // SAFETY: test-only variable with a unique name.
        unsafe { std::env::set_var("SQLFORM_TEST_MIN_AGE", "21") };
        let path = write_temp(
            "users.toml",
            r#"
kind = "select"
table = "users"
fields = "id INT, name TEXT"

[[filters]]
field = "age"
op = ">="
value = "${SQLFORM_TEST_MIN_AGE}"
"#,
        );

        let req = load(&path).unwrap();
        assert_eq!(
            req.filter,
            Filter::Clauses(vec![FilterClause::new("age", CompareOp::Gte, "21")])
        );
    }

    #[test]
    fn load_json_form() {
        let path = write_temp(
            "logs.json",
            r#"{"kind": "insert", "table": "logs", "fields": "msg,level", "values": "'hi',1"}"#,
        );
        let req = load(&path).unwrap();
        assert_eq!(req.kind, "insert");
        assert_eq!(req.values, "'hi',1");
    }

    #[test]
    fn load_reports_path() {
        let err = load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));

        let path = write_temp("broken.toml", "kind = ");
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse form file"));
    }
}

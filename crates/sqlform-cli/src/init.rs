use crate::cli::InitArgs;
use std::path::Path;

pub fn run(args: InitArgs) -> anyhow::Result<()> {
    write_template(&args.form)?;
    println!("wrote {}", args.form.display());
    Ok(())
}

const TEMPLATE: &str = r#"# sqlform form file
#
# Compose with: sqlform form <this file>
# String values may reference environment variables as ${VAR}.

kind = "select" # select | insert | update | delete
table = "users"

# Comma-separated. With field_syntax = "typed" each entry may carry a type
# ("name TEXT") and only the first word is used.
fields = "id INT, name TEXT, age INT"
field_syntax = "typed" # typed | plain

# Matched to fields by position; leave an entry blank to keep the bare name.
aliases = "user_id,,"

distinct = false

sort_field = "name"
sort_direction = "asc" # asc | desc (blank = asc)

# insert/update only: passed through as-is
# values = "'alice', 30"

# One row per field; rows without op or value are skipped.
# Numeric values are emitted unquoted, everything else in single quotes.
[[filters]]
field = "age"
op = ">=" # = > < >= <= !=
value = "18"

# Or, instead of [[filters]], a raw condition:
# conditions = "age >= 18 AND name IS NOT NULL"
"#;

fn write_template(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("refusing to overwrite existing file: {}", path.display());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("failed to create directory {}: {e}", parent.display())
            })?;
        }
    }

    std::fs::write(path, TEMPLATE)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
    Ok(())
}

use sqlform::{FieldSyntax, FilterClause, QueryRequest, SortDirection};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Compose,
    Form,
    Init,
    Filters,
}

#[derive(Debug, Clone)]
pub struct Invocation {
    pub verbose: bool,
    pub command: Command,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Compose(ComposeArgs),
    Form(FormArgs),
    Init(InitArgs),
    Filters(FiltersArgs),
}

#[derive(Debug, Clone)]
pub struct ComposeArgs {
    pub request: QueryRequest,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct FormArgs {
    pub form: PathBuf,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct InitArgs {
    pub form: PathBuf,
}

#[derive(Debug, Clone)]
pub struct FiltersArgs {
    pub fields: String,
    pub syntax: FieldSyntax,
    pub json: bool,
}

const DEFAULT_FORM: &str = "sqlform.toml";

pub fn parse_args(args: &[String]) -> anyhow::Result<Invocation> {
    let verbose = args
        .iter()
        .skip(1)
        .any(|a| a == "-v" || a == "--verbose");
    let mut it = args
        .iter()
        .skip(1)
        .map(|s| s.as_str())
        .filter(|a| *a != "-v" && *a != "--verbose");

    let command = match it.next() {
        None | Some("-h" | "--help") => Command::Help(HelpTopic::Root),
        Some("compose") => parse_compose(it)?,
        Some("form") => parse_form(it)?,
        Some("init") => parse_init(it)?,
        Some("filters") => parse_filters(it)?,
        Some(other) => anyhow::bail!("unknown command: {other}"),
    };

    Ok(Invocation { verbose, command })
}

/// Read the value of `flag`, either from `--flag=value` or the next token.
fn flag_value<'a>(
    flag: &str,
    token: &'a str,
    it: &mut impl Iterator<Item = &'a str>,
) -> anyhow::Result<Option<&'a str>> {
    if token == flag {
        let Some(v) = it.next() else {
            anyhow::bail!("{flag} requires a value");
        };
        return Ok(Some(v));
    }
    Ok(token
        .strip_prefix(flag)
        .and_then(|rest| rest.strip_prefix('=')))
}

fn parse_compose<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut request = QueryRequest::select("");
    let mut filters: Vec<FilterClause> = Vec::new();
    let mut conditions: Option<String> = None;
    let mut json = false;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Compose)),
            "--plain-fields" => request.field_syntax = FieldSyntax::Plain,
            "--distinct" => request.distinct = true,
            "--asc" => request.sort_direction = Some(SortDirection::Asc),
            "--desc" => request.sort_direction = Some(SortDirection::Desc),
            "--json" => json = true,
            _ => {
                if let Some(v) = flag_value("--kind", token, &mut it)? {
                    request.kind = v.to_string();
                } else if let Some(v) = flag_value("--table", token, &mut it)? {
                    request.table = v.to_string();
                } else if let Some(v) = flag_value("--fields", token, &mut it)? {
                    request.fields = v.to_string();
                } else if let Some(v) = flag_value("--aliases", token, &mut it)? {
                    request.aliases = v.to_string();
                } else if let Some(v) = flag_value("--values", token, &mut it)? {
                    request.values = v.to_string();
                } else if let Some(v) = flag_value("--order-by", token, &mut it)? {
                    request.sort_field = v.to_string();
                } else if let Some(v) = flag_value("--where", token, &mut it)? {
                    conditions = Some(v.to_string());
                } else if let Some(v) = flag_value("--filter", token, &mut it)? {
                    filters.push(parse_filter(v)?);
                } else {
                    anyhow::bail!("unknown argument: {token}");
                }
            }
        }
    }

    match (filters.is_empty(), conditions) {
        (false, Some(_)) => anyhow::bail!("--filter and --where cannot be combined"),
        (false, None) => request = request.filters(filters),
        (true, Some(c)) => request = request.conditions(c),
        (true, None) => {}
    }

    Ok(Command::Compose(ComposeArgs { request, json }))
}

/// Parse `FIELD:OP:VALUE`. The value may itself contain `:`.
fn parse_filter(spec: &str) -> anyhow::Result<FilterClause> {
    let mut parts = spec.splitn(3, ':');
    let (Some(field), Some(op), Some(value)) = (parts.next(), parts.next(), parts.next()) else {
        anyhow::bail!("--filter expects FIELD:OP:VALUE, got {spec:?}");
    };
    let field = field.trim();
    if field.is_empty() {
        anyhow::bail!("--filter field must not be empty: {spec:?}");
    }

    let mut clause = FilterClause::blank(field);
    if !op.trim().is_empty() {
        clause.op = Some(op.parse()?);
    }
    clause.value = value.to_string();
    Ok(clause)
}

fn parse_form<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut form = PathBuf::from(DEFAULT_FORM);
    let mut json = false;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Form)),
            "--json" => json = true,
            _ => match flag_value("--form", token, &mut it)? {
                Some(v) => form = PathBuf::from(v),
                None if !token.starts_with('-') => form = PathBuf::from(token),
                None => anyhow::bail!("unknown argument: {token}"),
            },
        }
    }

    Ok(Command::Form(FormArgs { form, json }))
}

fn parse_init<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut form = PathBuf::from(DEFAULT_FORM);

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Init)),
            _ => match flag_value("--form", token, &mut it)? {
                Some(v) => form = PathBuf::from(v),
                None => anyhow::bail!("unknown argument: {token}"),
            },
        }
    }

    Ok(Command::Init(InitArgs { form }))
}

fn parse_filters<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut fields: Option<String> = None;
    let mut syntax = FieldSyntax::Typed;
    let mut json = false;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Filters)),
            "--plain-fields" => syntax = FieldSyntax::Plain,
            "--json" => json = true,
            _ => match flag_value("--fields", token, &mut it)? {
                Some(v) => fields = Some(v.to_string()),
                None => anyhow::bail!("unknown argument: {token}"),
            },
        }
    }

    let Some(fields) = fields else {
        anyhow::bail!("--fields is required");
    };

    Ok(Command::Filters(FiltersArgs {
        fields,
        syntax,
        json,
    }))
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
sqlform - compose SQL statements from form values

USAGE:
  sqlform <COMMAND> [OPTIONS]

COMMANDS:
  compose       Compose a statement from command-line values
  form          Compose a statement from a TOML/JSON form file
  init          Write a template form file
  filters       List the filter rows for a field list

GLOBAL OPTIONS:
  -v, --verbose         Debug logging on stderr (RUST_LOG overrides)
  -h, --help            Print help

Run `sqlform <command> --help` for more."
            );
        }
        HelpTopic::Compose => {
            println!(
                "\
USAGE:
  sqlform compose --table <TABLE> [OPTIONS]

OPTIONS:
  --kind <KIND>             select | insert | update | delete (default: select)
  --table <TABLE>           Table name
  --fields <LIST>           Comma-separated fields (e.g. \"name TEXT, age INT\")
  --plain-fields            Use field entries verbatim (no type stripping)
  --aliases <LIST>          Comma-separated aliases, matched by position
  --filter <F:OP:VALUE>     Filter row; repeatable. OP is one of = > < >= <= !=
  --where <CONDITIONS>      Raw WHERE condition (not combinable with --filter)
  --values <VALUES>         VALUES / SET operand for insert and update
  --order-by <FIELD>        ORDER BY field
  --asc | --desc            ORDER BY direction (default: ASC)
  --distinct                SELECT DISTINCT
  --json                    Print {{\"sql\": ...}}
  -h, --help                Print help"
            );
        }
        HelpTopic::Form => {
            println!(
                "\
USAGE:
  sqlform form [FILE] [OPTIONS]

OPTIONS:
  --form <FILE>         Form file path (default: sqlform.toml; .json is read as JSON)
  --json                Print {{\"sql\": ...}}
  -h, --help            Print help

Values may reference environment variables as ${{VAR}}."
            );
        }
        HelpTopic::Init => {
            println!(
                "\
USAGE:
  sqlform init [OPTIONS]

OPTIONS:
  --form <FILE>         Template path (default: sqlform.toml)
  -h, --help            Print help"
            );
        }
        HelpTopic::Filters => {
            println!(
                "\
USAGE:
  sqlform filters --fields <LIST> [OPTIONS]

OPTIONS:
  --fields <LIST>       Comma-separated fields (e.g. \"name TEXT, age INT\")
  --plain-fields        Use field entries verbatim (no type stripping)
  --json                Print rows as JSON
  -h, --help            Print help"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlform::{CompareOp, Filter};

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("sqlform")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parse_compose_select() {
        let inv = parse_args(&args(&[
            "compose",
            "--table",
            "users",
            "--fields=id,name",
            "--aliases",
            "user_id,",
            "--distinct",
            "--filter",
            "age:>:18",
            "--order-by",
            "name",
            "--desc",
        ]))
        .unwrap();

        assert!(!inv.verbose);
        let Command::Compose(c) = inv.command else {
            panic!("expected compose");
        };
        assert_eq!(c.request.kind, "SELECT");
        assert_eq!(c.request.table, "users");
        assert_eq!(c.request.fields, "id,name");
        assert_eq!(c.request.aliases, "user_id,");
        assert!(c.request.distinct);
        assert_eq!(c.request.sort_field, "name");
        assert_eq!(c.request.sort_direction, Some(SortDirection::Desc));
        assert_eq!(
            c.request.filter,
            Filter::Clauses(vec![FilterClause::new("age", CompareOp::Gt, "18")])
        );
        assert!(!c.json);
    }

    #[test]
    fn parse_compose_where_and_verbose() {
        let inv = parse_args(&args(&[
            "-v",
            "compose",
            "--kind",
            "delete",
            "--table",
            "sessions",
            "--where",
            "expired = 1",
            "--json",
        ]))
        .unwrap();

        assert!(inv.verbose);
        let Command::Compose(c) = inv.command else {
            panic!("expected compose");
        };
        assert_eq!(c.request.kind, "delete");
        assert_eq!(c.request.filter, Filter::Raw("expired = 1".to_string()));
        assert!(c.json);
    }

    #[test]
    fn parse_compose_rejects_filter_with_where() {
        let err = parse_args(&args(&[
            "compose", "--table", "t", "--filter", "a:=:1", "--where", "b = 2",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("cannot be combined"));
    }

    #[test]
    fn parse_filter_spec() {
        assert_eq!(
            parse_filter("created_at:>=:2024-01-01 10:00").unwrap(),
            FilterClause::new("created_at", CompareOp::Gte, "2024-01-01 10:00")
        );
        assert_eq!(parse_filter("age::").unwrap(), FilterClause::blank("age"));
        assert!(parse_filter("age:>").is_err());
        assert!(parse_filter(":=:1").is_err());
        assert!(parse_filter("age:=~:1").is_err());
    }

    #[test]
    fn parse_form_positional_and_flag() {
        let inv = parse_args(&args(&["form", "forms/users.json"])).unwrap();
        let Command::Form(f) = inv.command else {
            panic!("expected form");
        };
        assert_eq!(f.form, PathBuf::from("forms/users.json"));

        let inv = parse_args(&args(&["form", "--json"])).unwrap();
        let Command::Form(f) = inv.command else {
            panic!("expected form");
        };
        assert_eq!(f.form, PathBuf::from(DEFAULT_FORM));
        assert!(f.json);
    }

    #[test]
    fn parse_filters_requires_fields() {
        assert!(parse_args(&args(&["filters"])).is_err());

        let inv = parse_args(&args(&["filters", "--fields", "a TEXT", "--plain-fields"])).unwrap();
        let Command::Filters(f) = inv.command else {
            panic!("expected filters");
        };
        assert_eq!(f.fields, "a TEXT");
        assert_eq!(f.syntax, FieldSyntax::Plain);
    }

    #[test]
    fn parse_help_and_unknown() {
        assert!(matches!(
            parse_args(&args(&[])).unwrap().command,
            Command::Help(HelpTopic::Root)
        ));
        assert!(matches!(
            parse_args(&args(&["init", "--help"])).unwrap().command,
            Command::Help(HelpTopic::Init)
        ));
        assert!(parse_args(&args(&["explain"])).is_err());
        assert!(parse_args(&args(&["compose", "--bogus"])).is_err());
        assert!(parse_args(&args(&["compose", "--table"])).is_err());
    }
}

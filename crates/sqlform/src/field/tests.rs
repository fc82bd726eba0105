use super::*;

fn names(fields: &[FieldSpec]) -> Vec<&str> {
    fields.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn test_typed_strips_declarations() {
    let fields = parse_fields("name TEXT, age INT, id", FieldSyntax::Typed);
    assert_eq!(names(&fields), vec!["name", "age", "id"]);
    assert_eq!(fields[0].data_type.as_deref(), Some("TEXT"));
    assert_eq!(fields[2].data_type, None);
}

#[test]
fn test_typed_keeps_multi_word_type() {
    let fields = parse_fields("created_at TIMESTAMP WITH TIME ZONE", FieldSyntax::Typed);
    assert_eq!(fields[0].name, "created_at");
    assert_eq!(
        fields[0].data_type.as_deref(),
        Some("TIMESTAMP WITH TIME ZONE")
    );
}

#[test]
fn test_typed_splits_type_at_inner_comma() {
    let fields = parse_fields("price NUMERIC(10, 2)", FieldSyntax::Typed);
    assert_eq!(names(&fields), vec!["price", "2)"]);
    assert_eq!(fields[0].data_type.as_deref(), Some("NUMERIC(10"));
}

#[test]
fn test_plain_is_verbatim() {
    let fields = parse_fields(" id , COUNT(*) total ", FieldSyntax::Plain);
    assert_eq!(names(&fields), vec!["id", "COUNT(*) total"]);
    assert!(fields.iter().all(|f| f.data_type.is_none()));
}

#[test]
fn test_blank_entries_dropped() {
    let fields = parse_fields("a,, b ,", FieldSyntax::Typed);
    assert_eq!(names(&fields), vec!["a", "b"]);
    assert!(parse_fields("   ", FieldSyntax::Plain).is_empty());
}

#[test]
fn test_alias_positional_sparse() {
    let fields = parse_aliased_fields("a,b,c", FieldSyntax::Plain, ",x,");
    assert_eq!(select_list(&fields), "a, b AS x, c");
}

#[test]
fn test_alias_list_shorter() {
    let fields = parse_aliased_fields("a,b,c", FieldSyntax::Plain, "x");
    assert_eq!(select_list(&fields), "a AS x, b, c");
}

#[test]
fn test_alias_list_longer() {
    let fields = parse_aliased_fields("a,b", FieldSyntax::Plain, "x, y, z");
    assert_eq!(select_list(&fields), "a AS x, b AS y");
}

#[test]
fn test_alias_list_empty() {
    let fields = parse_aliased_fields("a,b", FieldSyntax::Plain, "  ");
    assert_eq!(select_list(&fields), "a, b");
}

#[test]
fn test_alias_blank_entries_trimmed() {
    let fields = parse_aliased_fields("a,b", FieldSyntax::Plain, " first ,   ");
    assert_eq!(select_list(&fields), "a AS first, b");
}

#[test]
fn test_alias_pairs_with_entries_before_blanks_dropped() {
    let fields = parse_aliased_fields("id, , name", FieldSyntax::Typed, "uid, , uname");
    assert_eq!(select_list(&fields), "id AS uid, name AS uname");

    let fields = parse_aliased_fields("a,,c", FieldSyntax::Plain, "x,y,z");
    assert_eq!(select_list(&fields), "a AS x, c AS z");
}

#[test]
fn test_field_spec_display() {
    assert_eq!(FieldSpec::new("id").to_string(), "id");
    assert_eq!(FieldSpec::new("id").alias("user_id").to_string(), "id AS user_id");
}

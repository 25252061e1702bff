//! Paging emulation on the legacy (11g) dialect.

use quarry_sql_core::ast::{Expr, OrderBy, SelectStatement, TableRef};
use quarry_sql_core::value::ParameterValues;
use quarry_sql_oracle::{OracleCompatibility, OracleOptions, OracleSqlGenerator};

fn generate(stmt: &SelectStatement) -> String {
    OracleSqlGenerator::new(&OracleOptions::new(OracleCompatibility::Legacy))
        .generate(stmt, &ParameterValues::new())
        .expect("generation failed")
        .text
}

fn orders_by_id() -> SelectStatement {
    SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
}

#[test]
fn unlimited_select_is_left_alone() {
    assert_eq!(generate(&orders_by_id()), "SELECT \"id\"\nFROM \"orders\"");
}

#[test]
fn ordering_alone_needs_no_wrapping() {
    let stmt = orders_by_id().order(OrderBy::asc(Expr::column("id")));
    assert_eq!(
        generate(&stmt),
        "SELECT \"id\"\nFROM \"orders\"\nORDER BY \"id\" NULLS FIRST"
    );
}

#[test]
fn limit_joins_an_existing_predicate() {
    let stmt = SelectStatement::new()
        .column(Expr::column("X"))
        .from(TableRef::table("t"))
        .filter(Expr::column("X").gt(Expr::integer(0)))
        .take(Expr::integer(5));
    assert_eq!(
        generate(&stmt),
        "SELECT \"X\"\nFROM \"t\"\nWHERE \"X\" > 0 AND rownum <= 5"
    );
}

#[test]
fn limit_without_predicate_opens_a_where() {
    let stmt = orders_by_id().take(Expr::integer(5));
    assert_eq!(
        generate(&stmt),
        "SELECT \"id\"\nFROM \"orders\"\nWHERE rownum <= 5"
    );
}

#[test]
fn offset_only_wraps_once_with_no_upper_bound() {
    let stmt = orders_by_id().skip(Expr::integer(10));
    assert_eq!(
        generate(&stmt),
        "SELECT *\nFROM (\n    SELECT \"m1\".*, rownum AS \"r1\"\n    FROM (\n        SELECT \"id\"\n        FROM \"orders\"\n    ) \"m1\"\n)\nWHERE \"r1\" > 10"
    );
}

#[test]
fn offset_and_limit_bound_both_ends() {
    let stmt = orders_by_id().take(Expr::integer(5)).skip(Expr::integer(10));
    let text = generate(&stmt);
    assert!(text.ends_with("WHERE \"r1\" > 10 AND \"r1\" <= 10 + 5"));
    // Still a single ranking wrap; no re-aliasing without ordering.
    assert_eq!(text.matches("rownum").count(), 1);
    assert!(!text.contains("\"K0\""));
}

#[test]
fn ordered_page_restores_display_names_outermost() {
    let stmt = SelectStatement::new()
        .column(Expr::column("id"))
        .column(Expr::column("name"))
        .from(TableRef::table("orders"))
        .order(OrderBy::asc(Expr::column("name")))
        .take(Expr::integer(5))
        .skip(Expr::integer(10));
    assert_eq!(
        generate(&stmt),
        "SELECT \"K0\" AS \"id\", \"K1\" AS \"name\"\nFROM (\n    SELECT \"m1\".*, rownum AS \"r1\"\n    FROM (\n        SELECT \"id\" AS \"K0\", \"name\" AS \"K1\"\n        FROM \"orders\"\n        ORDER BY \"name\" NULLS FIRST\n    ) \"m1\"\n)\nWHERE \"r1\" > 10 AND \"r1\" <= 10 + 5"
    );
}

#[test]
fn ordered_limit_without_offset_bounds_the_wrapper() {
    let stmt = orders_by_id()
        .order(OrderBy::desc(Expr::column("id")))
        .take(Expr::integer(3));
    assert_eq!(
        generate(&stmt),
        "SELECT \"K0\" AS \"id\"\nFROM (\n    SELECT \"id\" AS \"K0\"\n    FROM \"orders\"\n    ORDER BY \"id\" DESC\n) \"m1\"\nWHERE rownum <= 3"
    );
}

#[test]
fn ordered_offset_without_limit_skips_the_realiasing_layer() {
    let stmt = orders_by_id()
        .order(OrderBy::asc(Expr::column("id")))
        .skip(Expr::integer(10));
    assert_eq!(
        generate(&stmt),
        "SELECT *\nFROM (\n    SELECT \"m1\".*, rownum AS \"r1\"\n    FROM (\n        SELECT \"id\"\n        FROM \"orders\"\n        ORDER BY \"id\" NULLS FIRST\n    ) \"m1\"\n)\nWHERE \"r1\" > 10"
    );
}

#[test]
fn parameter_only_ordering_pages_as_unordered() {
    let stmt = orders_by_id()
        .order(OrderBy::asc(Expr::parameter("p0")))
        .take(Expr::integer(5));
    assert_eq!(
        generate(&stmt),
        "SELECT \"id\"\nFROM \"orders\"\nWHERE rownum <= 5"
    );
}

#[test]
fn parameterized_bounds_stay_parameterized() {
    let stmt = orders_by_id()
        .take(Expr::parameter("p_limit"))
        .skip(Expr::parameter("p_offset"));
    let params = ParameterValues::new()
        .bind("p_limit", 5_i64)
        .bind("p_offset", 10_i64);
    let sql = OracleSqlGenerator::new(&OracleOptions::new(OracleCompatibility::Legacy))
        .generate(&stmt, &params)
        .expect("generation failed");
    assert!(sql
        .text
        .ends_with("WHERE \"r1\" > :p_offset AND \"r1\" <= :p_offset + :p_limit"));
    assert_eq!(
        sql.params.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
        vec!["p_offset", "p_limit"]
    );
}

#[test]
fn nested_pages_use_distinct_wrapper_aliases() {
    let inner = orders_by_id().skip(Expr::integer(1));
    let stmt = SelectStatement::new()
        .column(Expr::qualified_column("s", "id"))
        .from(TableRef::subquery(inner, "s"))
        .skip(Expr::integer(2));

    let text = generate(&stmt);
    assert!(text.contains("\"r1\""));
    assert!(text.contains("\"m1\""));
    assert!(text.contains("\"r2\""));
    assert!(text.contains("\"m2\""));
    assert!(text.contains("WHERE \"r1\" > 2"));
    assert!(text.contains("WHERE \"r2\" > 1"));
}

#[test]
fn legacy_output_never_uses_modern_syntax() {
    let stmt = orders_by_id()
        .order(OrderBy::asc(Expr::column("id")))
        .take(Expr::integer(5))
        .skip(Expr::integer(10));
    let text = generate(&stmt);
    assert!(!text.contains("FETCH"));
    assert!(!text.contains("OFFSET"));
    assert!(!text.contains("TOP"));
}

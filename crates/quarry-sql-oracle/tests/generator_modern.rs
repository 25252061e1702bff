//! Rewriter behavior on the modern (12c) dialect.

use quarry_sql_core::ast::{
    BinaryOp, Expr, FunctionCall, JoinType, OrderBy, SelectStatement, SqlType, TableRef,
};
use quarry_sql_core::value::ParameterValues;
use quarry_sql_oracle::{OracleCompatibility, OracleOptions, OracleSqlGenerator};

fn generate(stmt: &SelectStatement) -> String {
    generate_with(stmt, &ParameterValues::new()).text
}

fn generate_with(
    stmt: &SelectStatement,
    params: &ParameterValues,
) -> quarry_sql_core::GeneratedSql {
    OracleSqlGenerator::new(&OracleOptions::new(OracleCompatibility::Modern))
        .generate(stmt, params)
        .expect("generation failed")
}

fn select_expr(expr: Expr) -> SelectStatement {
    SelectStatement::new().column(expr).from(TableRef::table("t"))
}

#[test]
fn bitwise_and_uses_bitand() {
    let stmt = select_expr(Expr::column("a").binary(BinaryOp::BitAnd, Expr::column("b")));
    assert_eq!(generate(&stmt), "SELECT BITAND(\"a\", \"b\")\nFROM \"t\"");
}

#[test]
fn bitwise_or_uses_inclusion_exclusion() {
    let stmt = select_expr(Expr::column("a").binary(BinaryOp::BitOr, Expr::column("b")));
    assert_eq!(
        generate(&stmt),
        "SELECT \"a\" - BITAND(\"a\", \"b\") + \"b\"\nFROM \"t\""
    );
}

#[test]
fn modulo_uses_mod_function() {
    let stmt = select_expr(Expr::column("a").binary(BinaryOp::Mod, Expr::column("b")));
    assert_eq!(generate(&stmt), "SELECT MOD(\"a\", \"b\")\nFROM \"t\"");
}

#[test]
fn string_concat_uses_pipes() {
    let stmt = select_expr(Expr::column("a").binary(BinaryOp::Concat, Expr::column("b")));
    assert_eq!(generate(&stmt), "SELECT \"a\" || \"b\"\nFROM \"t\"");
}

#[test]
fn equality_with_empty_string_becomes_null_test() {
    let stmt = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("t"))
        .filter(Expr::column("name").eq(Expr::string("")));
    assert_eq!(
        generate(&stmt),
        "SELECT \"id\"\nFROM \"t\"\nWHERE \"name\" IS NULL"
    );

    let stmt = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("t"))
        .filter(Expr::column("name").not_eq(Expr::string("")));
    assert_eq!(
        generate(&stmt),
        "SELECT \"id\"\nFROM \"t\"\nWHERE \"name\" IS NOT NULL"
    );
}

#[test]
fn non_empty_string_comparison_is_untouched() {
    let stmt = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("t"))
        .filter(Expr::column("name").eq(Expr::string("x")));
    assert_eq!(
        generate(&stmt),
        "SELECT \"id\"\nFROM \"t\"\nWHERE \"name\" = 'x'"
    );
}

#[test]
fn constant_and_parameter_orderings_are_dropped() {
    let stmt = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
        .order(OrderBy::asc(Expr::parameter("p0")))
        .order(OrderBy::asc(Expr::column("id")))
        .order(OrderBy::desc(Expr::integer(1)));
    assert_eq!(
        generate(&stmt),
        "SELECT \"id\"\nFROM \"orders\"\nORDER BY \"id\" NULLS FIRST"
    );
}

#[test]
fn all_orderings_dropped_means_no_order_by() {
    let stmt = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
        .order(OrderBy::asc(Expr::parameter("p0")))
        .order(OrderBy::desc(Expr::integer(1)));
    assert_eq!(generate(&stmt), "SELECT \"id\"\nFROM \"orders\"");
}

#[test]
fn descending_orderings_keep_default_null_placement() {
    let stmt = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
        .order(OrderBy::desc(Expr::column("id")));
    assert_eq!(
        generate(&stmt),
        "SELECT \"id\"\nFROM \"orders\"\nORDER BY \"id\" DESC"
    );
}

#[test]
fn limit_only_emits_fetch_first_after_order_by() {
    let stmt = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
        .order(OrderBy::asc(Expr::column("id")))
        .take(Expr::integer(3));
    let text = generate(&stmt);
    assert_eq!(
        text,
        "SELECT \"id\"\nFROM \"orders\"\nORDER BY \"id\" NULLS FIRST\nFETCH FIRST 3 ROWS ONLY"
    );
    assert!(!text.contains("TOP"));
}

#[test]
fn limit_and_offset_emit_offset_fetch() {
    let stmt = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
        .take(Expr::integer(3))
        .skip(Expr::integer(4));
    assert_eq!(
        generate(&stmt),
        "SELECT \"id\"\nFROM \"orders\"\nOFFSET 4 ROWS\nFETCH NEXT 3 ROWS ONLY"
    );
}

#[test]
fn zero_table_select_reads_from_dual() {
    let stmt = SelectStatement::new().column(Expr::integer(1));
    assert_eq!(generate(&stmt), "SELECT 1\nFROM DUAL");
}

#[test]
fn raw_derived_table_is_parenthesized_and_aliased() {
    let stmt = SelectStatement::new()
        .column(Expr::qualified_column("v", "id"))
        .from(TableRef::raw_sql("SELECT id FROM legacy_view", "v"));
    assert_eq!(
        generate(&stmt),
        "SELECT \"v\".\"id\"\nFROM (\n    SELECT id FROM legacy_view\n) \"v\""
    );
}

#[test]
fn lateral_join_becomes_cross_apply() {
    let stmt = SelectStatement::new()
        .column(Expr::qualified_column("l", "qty"))
        .from(TableRef::table("orders").alias("o").join(
            JoinType::CrossLateral,
            TableRef::table("order_lines").alias("l"),
            None,
        ));
    assert_eq!(
        generate(&stmt),
        "SELECT \"l\".\"qty\"\nFROM \"orders\" \"o\"\nCROSS APPLY \"order_lines\" \"l\""
    );
}

#[test]
fn boolean_coalesce_projection_is_cast() {
    let call = FunctionCall::new(
        "NVL",
        vec![
            Expr::typed_column(None, "flag", SqlType::Boolean),
            Expr::integer(0),
        ],
        SqlType::Boolean,
    );
    let stmt = SelectStatement::new()
        .column_as(Expr::Function(call), "is_active")
        .from(TableRef::table("t"));
    assert_eq!(
        generate(&stmt),
        "SELECT CAST(NVL(\"flag\", 0) AS NUMBER(1)) AS \"is_active\"\nFROM \"t\""
    );
}

#[test]
fn instr_against_empty_parameter_collapses_to_one() {
    let call = FunctionCall::new(
        "INSTR",
        vec![Expr::column("name"), Expr::parameter("p0")],
        SqlType::Integer,
    );
    let stmt = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("t"))
        .filter(Expr::Function(call).gt(Expr::integer(0)));

    let params = ParameterValues::new().bind("p0", "");
    let sql = generate_with(&stmt, &params);
    assert_eq!(sql.text, "SELECT \"id\"\nFROM \"t\"\nWHERE 1 > 0");
    // The collapsed parameter never reaches the bind list.
    assert!(sql.params.is_empty());
}

#[test]
fn instr_against_real_parameter_is_untouched() {
    let call = FunctionCall::new(
        "INSTR",
        vec![Expr::column("name"), Expr::parameter("p0")],
        SqlType::Integer,
    );
    let stmt = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("t"))
        .filter(Expr::Function(call).gt(Expr::integer(0)));

    let params = ParameterValues::new().bind("p0", "smith");
    let sql = generate_with(&stmt, &params);
    assert_eq!(
        sql.text,
        "SELECT \"id\"\nFROM \"t\"\nWHERE INSTR(\"name\", :p0) > 0"
    );
    assert_eq!(sql.params.len(), 1);
}

#[test]
fn extract_uses_from_keyword() {
    let call = FunctionCall::new(
        "EXTRACT",
        vec![Expr::fragment("YEAR"), Expr::column("created_at")],
        SqlType::Integer,
    );
    let stmt = select_expr(Expr::Function(call));
    assert_eq!(
        generate(&stmt),
        "SELECT EXTRACT(YEAR FROM \"created_at\")\nFROM \"t\""
    );
}

#[test]
fn decimal_aggregates_are_cast_back_to_store_precision() {
    let avg = FunctionCall::new(
        "AVG",
        vec![Expr::typed_column(None, "total", SqlType::Decimal)],
        SqlType::Decimal,
    );
    let stmt = select_expr(Expr::Function(avg));
    assert_eq!(
        generate(&stmt),
        "SELECT CAST(AVG(\"total\") AS NUMBER(29,4))\nFROM \"t\""
    );

    // Non-decimal aggregates stay bare.
    let sum = FunctionCall::new(
        "SUM",
        vec![Expr::typed_column(None, "qty", SqlType::Integer)],
        SqlType::Integer,
    );
    let stmt = select_expr(Expr::Function(sum));
    assert_eq!(generate(&stmt), "SELECT SUM(\"qty\")\nFROM \"t\"");
}

#[test]
fn add_months_is_cast_to_timestamp() {
    let call = FunctionCall::new(
        "ADD_MONTHS",
        vec![Expr::column("created_at"), Expr::integer(1)],
        SqlType::Timestamp,
    );
    let stmt = select_expr(Expr::Function(call));
    assert_eq!(
        generate(&stmt),
        "SELECT CAST(ADD_MONTHS(\"created_at\", 1) AS TIMESTAMP)\nFROM \"t\""
    );
}

#[test]
fn unknown_function_names_are_delimited() {
    let call = FunctionCall::new("CALC_TOTAL", vec![Expr::column("id")], SqlType::Decimal);
    let stmt = select_expr(Expr::Function(call));
    assert_eq!(generate(&stmt), "SELECT \"CALC_TOTAL\"(\"id\")\nFROM \"t\"");

    // Schema-qualified calls keep their name bare.
    let call = FunctionCall::new("CALC_TOTAL", vec![Expr::column("id")], SqlType::Decimal)
        .with_schema("APP");
    let stmt = select_expr(Expr::Function(call));
    assert_eq!(
        generate(&stmt),
        "SELECT \"APP\".CALC_TOTAL(\"id\")\nFROM \"t\""
    );
}

#[test]
fn reemission_is_byte_identical() {
    let stmt = SelectStatement::new()
        .column(Expr::column("id"))
        .column_as(
            Expr::column("a").binary(BinaryOp::BitOr, Expr::column("b")),
            "bits",
        )
        .from(TableRef::table("orders"))
        .filter(Expr::column("name").eq(Expr::string("")))
        .order(OrderBy::asc(Expr::column("id")))
        .take(Expr::integer(7));

    assert_eq!(generate(&stmt), generate(&stmt));
}

//! Oracle expression-to-SQL rewriting.
//!
//! [`OracleHooks`] overrides the core generator exactly where Oracle's
//! SQL differs; everything else falls through to the default emission.
//! The overrides are shared by both compatibility levels — the legacy
//! level additionally routes whole selects through the `rownum` pager.

use quarry_sql_core::ast::{
    BinaryOp, Expr, FunctionCall, JoinClause, Literal, OrderBy, OrderDirection, SelectColumn,
    SelectStatement, SqlType,
};
use quarry_sql_core::error::Result;
use quarry_sql_core::generator::{DialectHooks, Emitted, Generation};

use crate::options::OracleCompatibility;
use crate::rownum;

/// Function names Oracle resolves as built-ins.
///
/// Any other unqualified function name is delimited as an identifier
/// so it cannot collide with a reserved word. Sorted for binary
/// search; plan function names are upper-cased by the compiler.
const BUILTIN_FUNCTIONS: &[&str] = &[
    "ABS",
    "ADD_MONTHS",
    "AVG",
    "BITAND",
    "CEIL",
    "COALESCE",
    "COUNT",
    "EXTRACT",
    "FLOOR",
    "GREATEST",
    "INSTR",
    "LAST_DAY",
    "LEAST",
    "LENGTH",
    "LOWER",
    "LPAD",
    "LTRIM",
    "MAX",
    "MIN",
    "MOD",
    "MONTHS_BETWEEN",
    "NVL",
    "NVL2",
    "POWER",
    "REPLACE",
    "ROUND",
    "RPAD",
    "RTRIM",
    "SQRT",
    "SUBSTR",
    "SUM",
    "SYSDATE",
    "SYSTIMESTAMP",
    "TO_CHAR",
    "TO_DATE",
    "TO_NUMBER",
    "TO_TIMESTAMP",
    "TRIM",
    "TRUNC",
    "UPPER",
];

fn is_builtin(name: &str) -> bool {
    BUILTIN_FUNCTIONS.binary_search(&name).is_ok()
}

/// Returns the orderings that survive emission: Oracle rejects
/// ordering by a bare constant, and ordering by a bound parameter is
/// a no-op, so both are dropped.
pub(crate) fn effective_orderings(orderings: &[OrderBy]) -> Vec<&OrderBy> {
    orderings
        .iter()
        .filter(|o| !o.expr.is_constant_or_parameter())
        .collect()
}

fn is_empty_string_literal(expr: &Expr) -> bool {
    matches!(expr, Expr::Literal(Literal::String(s)) if s.is_empty())
}

fn is_null_coalescing(call: &FunctionCall) -> bool {
    matches!(call.name.as_str(), "NVL" | "COALESCE")
}

/// The Oracle dialect hook set.
#[derive(Debug, Clone, Copy)]
pub struct OracleHooks {
    compatibility: OracleCompatibility,
}

impl OracleHooks {
    /// Creates hooks for the given compatibility level.
    #[must_use]
    pub const fn new(compatibility: OracleCompatibility) -> Self {
        Self { compatibility }
    }
}

impl DialectHooks for OracleHooks {
    fn select(&self, stmt: &SelectStatement, g: &mut Generation<'_>) -> Result<Emitted> {
        match self.compatibility {
            OracleCompatibility::Legacy => rownum::page_select(stmt, g),
            OracleCompatibility::Modern => Ok(Emitted::Fallback),
        }
    }

    fn projection(&self, column: &SelectColumn, g: &mut Generation<'_>) -> Result<Emitted> {
        // Oracle has no boolean column type; a null-coalesced boolean
        // projection is ambiguous without an explicit cast.
        let coerce = matches!(
            &column.expr,
            Expr::Function(call) if is_null_coalescing(call) && call.return_type == SqlType::Boolean
        );
        if !coerce {
            return Ok(Emitted::Fallback);
        }
        g.write("CAST(");
        g.emit_expr(&column.expr)?;
        g.write(" AS NUMBER(1))");
        if let Some(alias) = &column.alias {
            g.write(" AS ");
            g.write_identifier(alias);
        }
        Ok(Emitted::Handled)
    }

    fn binary(
        &self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        g: &mut Generation<'_>,
    ) -> Result<Emitted> {
        match op {
            // No infix bitwise operators before 21c.
            BinaryOp::BitAnd => {
                g.write("BITAND(");
                g.emit_expr(left)?;
                g.write(", ");
                g.emit_expr(right)?;
                g.write(")");
                Ok(Emitted::Handled)
            }
            BinaryOp::BitOr => {
                // Inclusion-exclusion over BITAND.
                g.emit_expr(left)?;
                g.write(" - BITAND(");
                g.emit_expr(left)?;
                g.write(", ");
                g.emit_expr(right)?;
                g.write(") + ");
                g.emit_expr(right)?;
                Ok(Emitted::Handled)
            }
            BinaryOp::Mod => {
                g.write("MOD(");
                g.emit_expr(left)?;
                g.write(", ");
                g.emit_expr(right)?;
                g.write(")");
                Ok(Emitted::Handled)
            }
            // Oracle stores '' as NULL, so comparing against the
            // empty string must become a NULL test.
            BinaryOp::Eq | BinaryOp::NotEq => {
                let subject = if is_empty_string_literal(right) {
                    left
                } else if is_empty_string_literal(left) {
                    right
                } else {
                    return Ok(Emitted::Fallback);
                };
                g.emit_expr(subject)?;
                g.write(if op == BinaryOp::Eq {
                    " IS NULL"
                } else {
                    " IS NOT NULL"
                });
                Ok(Emitted::Handled)
            }
            _ => Ok(Emitted::Fallback),
        }
    }

    fn function(&self, call: &FunctionCall, g: &mut Generation<'_>) -> Result<Emitted> {
        match call.name.as_str() {
            // Searching for an empty pattern: '' is NULL here, and
            // INSTR(x, NULL) is NULL rather than the expected match at
            // position 1. Collapse the call to its known result.
            "INSTR" => {
                if let Some(Expr::Parameter { name, .. }) = call.args.get(1) {
                    if g.parameter_values().is_empty_string(name) {
                        g.write("1");
                        return Ok(Emitted::Handled);
                    }
                }
                Ok(Emitted::Fallback)
            }
            "EXTRACT" if call.args.len() == 2 => {
                g.write("EXTRACT(");
                g.emit_expr(&call.args[0])?;
                g.write(" FROM ");
                g.emit_expr(&call.args[1])?;
                g.write(")");
                Ok(Emitted::Handled)
            }
            // NUMBER has unbounded precision; pin the aggregate back
            // to the store decimal so scale survives materialization.
            "AVG" | "SUM"
                if call
                    .args
                    .first()
                    .is_some_and(|a| a.sql_type() == SqlType::Decimal) =>
            {
                g.write("CAST(");
                g.emit_function_default(call)?;
                g.write(" AS NUMBER(29,4))");
                Ok(Emitted::Handled)
            }
            // ADD_MONTHS returns DATE even for timestamp input.
            "ADD_MONTHS" => {
                g.write("CAST(");
                g.emit_function_default(call)?;
                g.write(" AS TIMESTAMP)");
                Ok(Emitted::Handled)
            }
            name if call.schema.is_none() && !is_builtin(name) => {
                g.write_identifier(name);
                g.write("(");
                if call.distinct {
                    g.write("DISTINCT ");
                }
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        g.write(", ");
                    }
                    g.emit_expr(arg)?;
                }
                g.write(")");
                Ok(Emitted::Handled)
            }
            _ => Ok(Emitted::Fallback),
        }
    }

    fn order_by(&self, orderings: &[OrderBy], g: &mut Generation<'_>) -> Result<Emitted> {
        let effective = effective_orderings(orderings);
        if effective.is_empty() {
            // Nothing real to order by: suppress the clause entirely.
            return Ok(Emitted::Handled);
        }
        g.newline();
        g.write("ORDER BY ");
        for (i, entry) in effective.iter().enumerate() {
            if i > 0 {
                g.write(", ");
            }
            g.emit_expr(&entry.expr)?;
            match entry.direction {
                OrderDirection::Desc => g.write(" DESC"),
                // Ascending null ordering differs from the framework
                // default; make it deterministic.
                OrderDirection::Asc => g.write(" NULLS FIRST"),
            }
        }
        Ok(Emitted::Handled)
    }

    fn limit_offset(
        &self,
        limit: Option<&Expr>,
        offset: Option<&Expr>,
        g: &mut Generation<'_>,
    ) -> Result<Emitted> {
        match (limit, offset) {
            (Some(limit), None) => {
                g.newline();
                g.write("FETCH FIRST ");
                g.emit_expr(limit)?;
                g.write(" ROWS ONLY");
            }
            _ => g.emit_offset_fetch(limit, offset)?,
        }
        Ok(Emitted::Handled)
    }

    fn empty_from(&self, g: &mut Generation<'_>) -> Result<Emitted> {
        let Some(dummy) = g.dialect().dummy_table() else {
            return Ok(Emitted::Fallback);
        };
        g.newline();
        g.write("FROM ");
        g.write(dummy);
        Ok(Emitted::Handled)
    }

    fn raw_derived_table(&self, sql: &str, alias: &str, g: &mut Generation<'_>) -> Result<Emitted> {
        // Every inlined subquery needs a real alias here, including
        // ones carried as raw SQL text.
        g.write("(");
        g.newline();
        g.indented(|g| {
            for line in sql.lines() {
                g.write(line);
                g.newline();
            }
            Ok(())
        })?;
        g.write(") ");
        g.write_identifier(alias);
        Ok(Emitted::Handled)
    }

    fn lateral_join(&self, join: &JoinClause, g: &mut Generation<'_>) -> Result<Emitted> {
        g.write("CROSS APPLY ");
        g.emit_table_ref(&join.table)?;
        Ok(Emitted::Handled)
    }
}

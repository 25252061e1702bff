//! Row-limit emulation for the legacy dialect.
//!
//! Before 12c the engine has no `OFFSET`/`FETCH`; the only row-
//! limiting primitive is `rownum`, a pseudo-column numbering rows in
//! scan order, assigned before `ORDER BY` and unusable in the same
//! SELECT that filters on its alias. Paging therefore restructures
//! the statement into up to three nested levels:
//!
//! 1. the original body (with orderings, grouping, predicates),
//! 2. a ranking level projecting `body.*` plus `rownum`,
//! 3. an outer level filtering on the ranked ordinal and restoring
//!    the original projection names.
//!
//! When the body is ordered *and* limited, its projections are first
//! re-aliased to positional `K<i>` names so the outer level can
//! reference them without tripping over alias visibility and star
//! expansion in nested subqueries; the outer level re-projects them
//! under their original display names, which downstream result
//! binding depends on.
//!
//! All wrapper construction is tree-to-tree: the input statement is
//! never mutated, and rebuilt trees are fed back through the normal
//! emission path so every operator/function rewrite still applies.

use quarry_sql_core::ast::{
    BinaryOp, Expr, SelectColumn, SelectStatement, TableRef,
};
use quarry_sql_core::error::{Result, SqlGenError};
use quarry_sql_core::generator::{Emitted, Generation};

use crate::generator::effective_orderings;

/// Classifies a SELECT and emits the appropriate `rownum` wrapping.
///
/// Returns [`Emitted::Fallback`] when no row limiting is present (an
/// ordering alone needs no wrapping), so the default single-level
/// emission applies.
pub(crate) fn page_select(stmt: &SelectStatement, g: &mut Generation<'_>) -> Result<Emitted> {
    let ordered = !effective_orderings(&stmt.order_by).is_empty();
    match (ordered, stmt.limit.is_some(), stmt.offset.is_some()) {
        // No row limiting: plain emission, ordered or not.
        (_, false, false) => Ok(Emitted::Fallback),
        // Limit without ordering or offset: scan order is stable
        // enough to bound by raw position in the same SELECT.
        (false, true, false) => {
            limit_in_place(stmt, g)?;
            Ok(Emitted::Handled)
        }
        // Any offset: rank with rownum, filter one level out. The
        // K-re-aliasing level is added exactly when the body is both
        // ordered and limited.
        (ordered, limited, true) => {
            offset_wrap(stmt, ordered && limited, g)?;
            Ok(Emitted::Handled)
        }
        // Ordered limit without offset: ordering must run before
        // truncation, so the bound goes on a wrapper level.
        (true, true, false) => {
            ordered_limit_wrap(stmt, g)?;
            Ok(Emitted::Handled)
        }
    }
}

/// Appends `rownum <= limit` to the statement's own WHERE clause.
fn limit_in_place(stmt: &SelectStatement, g: &mut Generation<'_>) -> Result<()> {
    let mut body = stmt.clone();
    let Some(limit) = body.limit.take() else {
        return Err(SqlGenError::InvalidPlan(String::from(
            "limit classification without a limit expression",
        )));
    };
    let bound = Expr::fragment("rownum").lt_eq(limit);
    body.where_clause = Some(match body.where_clause.take() {
        Some(existing) => existing.and(bound),
        None => bound,
    });
    g.emit_select(&body)
}

/// Wraps the body in a ranking level and an outer filter level.
fn offset_wrap(stmt: &SelectStatement, realias: bool, g: &mut Generation<'_>) -> Result<()> {
    let n = g.next_wrapper_index();
    let m_alias = format!("m{n}");
    let r_alias = format!("r{n}");

    let mut body = stmt.clone();
    let Some(offset) = body.offset.take() else {
        return Err(SqlGenError::InvalidPlan(String::from(
            "offset classification without an offset expression",
        )));
    };
    let limit = body.limit.take();

    let outer_columns = if realias {
        let (inner, outer) = split_projections(&body.columns);
        body.columns = inner;
        outer
    } else {
        vec![SelectColumn::new(Expr::Wildcard { table: None })]
    };

    let ranking = SelectStatement::new()
        .column(Expr::Wildcard {
            table: Some(m_alias.clone()),
        })
        .column_as(Expr::fragment("rownum"), r_alias.clone())
        .from(TableRef::Subquery {
            query: Box::new(body),
            alias: Some(m_alias),
        });

    let mut predicate = Expr::column(r_alias.clone()).gt(offset.clone());
    if let Some(limit) = limit {
        predicate = predicate.and(
            Expr::column(r_alias).lt_eq(offset.binary(BinaryOp::Add, limit)),
        );
    }

    let mut outer = SelectStatement::new()
        .from(TableRef::derived(ranking))
        .filter(predicate);
    outer.columns = outer_columns;
    g.emit_select(&outer)
}

/// Wraps an ordered, limited body so the bound applies after the sort.
fn ordered_limit_wrap(stmt: &SelectStatement, g: &mut Generation<'_>) -> Result<()> {
    let n = g.next_wrapper_index();
    let m_alias = format!("m{n}");

    let mut body = stmt.clone();
    let Some(limit) = body.limit.take() else {
        return Err(SqlGenError::InvalidPlan(String::from(
            "ordered-limit classification without a limit expression",
        )));
    };

    let (inner, outer_columns) = split_projections(&body.columns);
    body.columns = inner;

    let mut outer = SelectStatement::new()
        .from(TableRef::Subquery {
            query: Box::new(body),
            alias: Some(m_alias),
        })
        .filter(Expr::fragment("rownum").lt_eq(limit));
    outer.columns = outer_columns;
    g.emit_select(&outer)
}

/// Splits a projection list into the re-aliased inner form and the
/// outer re-projection restoring original display names.
///
/// Star projections cannot carry an alias and pass through both
/// levels unchanged; projections that already have an alias keep it
/// in the inner level and are referenced by it outside.
fn split_projections(columns: &[SelectColumn]) -> (Vec<SelectColumn>, Vec<SelectColumn>) {
    let mut inner = Vec::with_capacity(columns.len());
    let mut outer = Vec::with_capacity(columns.len());
    for (i, column) in columns.iter().enumerate() {
        if matches!(column.expr, Expr::Wildcard { .. }) {
            inner.push(column.clone());
            outer.push(column.clone());
            continue;
        }
        if let Some(alias) = &column.alias {
            inner.push(column.clone());
            outer.push(SelectColumn::new(Expr::column(alias.clone())));
            continue;
        }
        let display = column.display_name().map(String::from);
        let synthetic = format!("K{i}");
        inner.push(SelectColumn::with_alias(
            column.expr.clone(),
            synthetic.clone(),
        ));
        outer.push(match display {
            Some(name) => SelectColumn::with_alias(Expr::column(synthetic), name),
            None => SelectColumn::new(Expr::column(synthetic)),
        });
    }
    (inner, outer)
}

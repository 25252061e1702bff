//! Query-plan-to-SQL generation with pluggable dialect hooks.
//!
//! [`Generation`] walks a [`SelectStatement`] tree depth-first exactly
//! once and emits SQL text into its own [`SqlWriter`]. At every point
//! where dialects are known to disagree it first offers the node to
//! the configured [`DialectHooks`]; a hook either fully handles the
//! node or falls through to the default emission here. Hooks never
//! mutate the input tree — wrapping strategies build new trees and
//! feed them back through [`Generation::emit_select`].
//!
//! One `Generation` serves exactly one call: the writer, the bound
//! parameter order, and the wrapper-alias counter all reset with it,
//! so concurrent generations only need distinct instances.

use crate::ast::{
    BinaryOp, Expr, FunctionCall, JoinClause, JoinType, Literal, OrderBy, OrderDirection,
    SelectColumn, SelectStatement, TableRef,
};
use crate::dialect::Dialect;
use crate::error::{Result, SqlGenError};
use crate::value::{ParameterValues, SqlValue};
use crate::writer::SqlWriter;

/// Outcome of offering a node to a dialect hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitted {
    /// The hook emitted the node completely; do not recurse generically.
    Handled,
    /// The hook declined; apply the default emission.
    Fallback,
}

/// Override points where dialects may replace the default emission.
///
/// Every method falls through by default, so a dialect implements only
/// the points where its SQL actually differs. A hook that starts
/// emitting must finish the node and return [`Emitted::Handled`];
/// errors from nested emission propagate unchanged.
pub trait DialectHooks {
    /// Offers an entire SELECT before any default clause emission.
    ///
    /// Paging strategies that restructure the statement intercept
    /// here, emit a rebuilt tree via [`Generation::emit_select`], and
    /// report the node handled.
    fn select(&self, stmt: &SelectStatement, g: &mut Generation<'_>) -> Result<Emitted> {
        let _ = (stmt, g);
        Ok(Emitted::Fallback)
    }

    /// Offers one projection entry (expression plus display alias).
    fn projection(&self, column: &SelectColumn, g: &mut Generation<'_>) -> Result<Emitted> {
        let _ = (column, g);
        Ok(Emitted::Fallback)
    }

    /// Offers a binary expression.
    fn binary(
        &self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        g: &mut Generation<'_>,
    ) -> Result<Emitted> {
        let _ = (op, left, right, g);
        Ok(Emitted::Fallback)
    }

    /// Offers a function call.
    fn function(&self, call: &FunctionCall, g: &mut Generation<'_>) -> Result<Emitted> {
        let _ = (call, g);
        Ok(Emitted::Fallback)
    }

    /// Offers the whole ORDER BY list. Called only when the plan has
    /// orderings; the hook owns the entire clause including its
    /// leading line break, and may emit nothing at all.
    fn order_by(&self, orderings: &[OrderBy], g: &mut Generation<'_>) -> Result<Emitted> {
        let _ = (orderings, g);
        Ok(Emitted::Fallback)
    }

    /// Offers the limit/offset pair. Called only when at least one is
    /// present.
    fn limit_offset(
        &self,
        limit: Option<&Expr>,
        offset: Option<&Expr>,
        g: &mut Generation<'_>,
    ) -> Result<Emitted> {
        let _ = (limit, offset, g);
        Ok(Emitted::Fallback)
    }

    /// Offers the FROM clause of a select with no source tables. The
    /// default emits no FROM clause at all.
    fn empty_from(&self, g: &mut Generation<'_>) -> Result<Emitted> {
        let _ = g;
        Ok(Emitted::Fallback)
    }

    /// Offers a derived table over raw SQL text.
    fn raw_derived_table(&self, sql: &str, alias: &str, g: &mut Generation<'_>) -> Result<Emitted> {
        let _ = (sql, alias, g);
        Ok(Emitted::Fallback)
    }

    /// Offers a lateral cross join.
    fn lateral_join(&self, join: &JoinClause, g: &mut Generation<'_>) -> Result<Emitted> {
        let _ = (join, g);
        Ok(Emitted::Fallback)
    }
}

/// The no-override hook set: every node takes the default emission.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHooks;

impl DialectHooks for DefaultHooks {}

/// A finished generation: SQL text plus the bound values for every
/// placeholder that survived into the text, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSql {
    /// The SQL command text.
    pub text: String,
    /// Parameter name/value pairs in first-emission order. Names
    /// emitted more than once appear once.
    pub params: Vec<(String, SqlValue)>,
}

/// One SQL-generation pass over one statement tree.
pub struct Generation<'a> {
    out: SqlWriter,
    dialect: &'a dyn Dialect,
    hooks: &'a dyn DialectHooks,
    params: &'a ParameterValues,
    bound: Vec<String>,
    alias_seq: u32,
}

impl<'a> Generation<'a> {
    /// Creates a fresh generation pass.
    #[must_use]
    pub fn new(
        dialect: &'a dyn Dialect,
        hooks: &'a dyn DialectHooks,
        params: &'a ParameterValues,
    ) -> Self {
        Self {
            out: SqlWriter::new(),
            dialect,
            hooks,
            params,
            bound: Vec::new(),
            alias_seq: 0,
        }
    }

    /// Generates the complete SQL for a statement tree.
    ///
    /// # Errors
    ///
    /// Returns an error when the plan contains an unsupported
    /// construct or a placeholder with no bound value; the partial
    /// buffer is discarded with the pass.
    pub fn generate(mut self, stmt: &SelectStatement) -> Result<GeneratedSql> {
        tracing::trace!(
            projections = stmt.columns.len(),
            tables = stmt.tables.len(),
            "generating SQL"
        );
        self.emit_select(stmt)?;
        let mut params = Vec::with_capacity(self.bound.len());
        for name in self.bound {
            let value = self
                .params
                .get(&name)
                .cloned()
                .ok_or_else(|| SqlGenError::UnboundParameter(name.clone()))?;
            params.push((name, value));
        }
        Ok(GeneratedSql {
            text: self.out.finish(),
            params,
        })
    }

    /// The bound-parameter value map for this pass.
    #[must_use]
    pub fn parameter_values(&self) -> &ParameterValues {
        self.params
    }

    /// The lexical dialect for this pass.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect
    }

    /// Returns the next wrapper-alias ordinal, unique within this pass.
    pub fn next_wrapper_index(&mut self) -> u32 {
        self.alias_seq += 1;
        self.alias_seq
    }

    /// Appends raw text to the output buffer.
    pub fn write(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Terminates the current output line.
    pub fn newline(&mut self) {
        self.out.newline();
    }

    /// Appends a quoted identifier.
    pub fn write_identifier(&mut self, name: &str) {
        let quoted = self.dialect.quote_identifier(name);
        self.out.push_str(&quoted);
    }

    /// Runs `f` with the output indented one level. The matching
    /// dedent happens even when `f` returns early with an error.
    pub fn indented<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.out.indent();
        let result = f(self);
        self.out.dedent();
        result
    }

    /// Emits a SELECT, offering it to the hooks first.
    pub fn emit_select(&mut self, stmt: &SelectStatement) -> Result<()> {
        let hooks = self.hooks;
        if hooks.select(stmt, self)? == Emitted::Handled {
            return Ok(());
        }
        self.emit_select_default(stmt)
    }

    /// Emits a SELECT through the default clause sequence, bypassing
    /// the whole-select hook (the clause-level hooks still apply).
    pub fn emit_select_default(&mut self, stmt: &SelectStatement) -> Result<()> {
        let hooks = self.hooks;

        self.write("SELECT ");
        if stmt.distinct {
            self.write("DISTINCT ");
        }
        if stmt.columns.is_empty() {
            self.write("1");
        }
        for (i, column) in stmt.columns.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_projection(column)?;
        }

        if stmt.tables.is_empty() {
            // ANSI allows a FROM-less select; dialects that mandate a
            // FROM clause supply their dummy table here.
            hooks.empty_from(self)?;
        } else {
            self.newline();
            self.write("FROM ");
            for (i, table) in stmt.tables.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.emit_table_ref(table)?;
            }
        }

        if let Some(predicate) = &stmt.where_clause {
            self.newline();
            self.write("WHERE ");
            self.emit_expr(predicate)?;
        }

        if !stmt.group_by.is_empty() {
            self.newline();
            self.write("GROUP BY ");
            for (i, expr) in stmt.group_by.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.emit_expr(expr)?;
            }
        }

        if let Some(predicate) = &stmt.having {
            self.newline();
            self.write("HAVING ");
            self.emit_expr(predicate)?;
        }

        if !stmt.order_by.is_empty() && hooks.order_by(&stmt.order_by, self)? == Emitted::Fallback {
            self.newline();
            self.write("ORDER BY ");
            for (i, entry) in stmt.order_by.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.emit_ordering(entry)?;
            }
        }

        if (stmt.limit.is_some() || stmt.offset.is_some())
            && hooks.limit_offset(stmt.limit.as_ref(), stmt.offset.as_ref(), self)?
                == Emitted::Fallback
        {
            if let Some(limit) = &stmt.limit {
                self.newline();
                self.write("LIMIT ");
                self.emit_expr(limit)?;
            }
            if let Some(offset) = &stmt.offset {
                self.newline();
                self.write("OFFSET ");
                self.emit_expr(offset)?;
            }
        }

        Ok(())
    }

    /// Emits one projection entry.
    pub fn emit_projection(&mut self, column: &SelectColumn) -> Result<()> {
        let hooks = self.hooks;
        if hooks.projection(column, self)? == Emitted::Handled {
            return Ok(());
        }
        self.emit_projection_default(column)
    }

    /// Emits one projection entry without offering it to the hooks.
    pub fn emit_projection_default(&mut self, column: &SelectColumn) -> Result<()> {
        self.emit_expr(&column.expr)?;
        if let Some(alias) = &column.alias {
            self.write(" AS ");
            self.write_identifier(alias);
        }
        Ok(())
    }

    /// Emits one ORDER BY entry in the default form: the expression,
    /// then ` DESC` for descending entries.
    pub fn emit_ordering(&mut self, entry: &OrderBy) -> Result<()> {
        self.emit_expr(&entry.expr)?;
        if entry.direction == OrderDirection::Desc {
            self.write(" DESC");
        }
        Ok(())
    }

    /// Emits the ANSI `OFFSET .. ROWS [FETCH NEXT .. ROWS ONLY]`
    /// form, for dialects whose modern syntax matches it.
    pub fn emit_offset_fetch(
        &mut self,
        limit: Option<&Expr>,
        offset: Option<&Expr>,
    ) -> Result<()> {
        if let Some(offset) = offset {
            self.newline();
            self.write("OFFSET ");
            self.emit_expr(offset)?;
            self.write(" ROWS");
        }
        if let Some(limit) = limit {
            self.newline();
            self.write("FETCH NEXT ");
            self.emit_expr(limit)?;
            self.write(" ROWS ONLY");
        }
        Ok(())
    }

    /// Emits a FROM-list entry.
    pub fn emit_table_ref(&mut self, table: &TableRef) -> Result<()> {
        match table {
            TableRef::Table {
                schema,
                name,
                alias,
            } => {
                if let Some(schema) = schema {
                    self.write_identifier(schema);
                    self.write(".");
                }
                self.write_identifier(name);
                if let Some(alias) = alias {
                    self.write(" ");
                    self.write_identifier(alias);
                }
                Ok(())
            }
            TableRef::Subquery { query, alias } => {
                self.emit_parenthesized_select(query)?;
                if let Some(alias) = alias {
                    self.write(" ");
                    self.emit_table_alias(alias);
                }
                Ok(())
            }
            TableRef::RawSql { sql, alias } => {
                let hooks = self.hooks;
                if hooks.raw_derived_table(sql, alias, self)? == Emitted::Handled {
                    return Ok(());
                }
                self.write("(");
                self.write(sql);
                self.write(") ");
                self.emit_table_alias(alias);
                Ok(())
            }
            TableRef::Join { left, join } => {
                self.emit_table_ref(left)?;
                self.newline();
                self.emit_join(join)
            }
        }
    }

    fn emit_table_alias(&mut self, alias: &str) {
        if self.dialect.table_alias_as() {
            self.write("AS ");
        }
        self.write_identifier(alias);
    }

    fn emit_join(&mut self, join: &JoinClause) -> Result<()> {
        if join.join_type == JoinType::CrossLateral {
            let hooks = self.hooks;
            if hooks.lateral_join(join, self)? == Emitted::Handled {
                return Ok(());
            }
        }
        self.write(join.join_type.as_str());
        self.write(" ");
        self.emit_table_ref(&join.table)?;
        if let Some(on) = &join.on {
            self.write(" ON ");
            self.emit_expr(on)?;
        }
        Ok(())
    }

    /// Emits a nested SELECT wrapped in parentheses, indented.
    pub fn emit_parenthesized_select(&mut self, stmt: &SelectStatement) -> Result<()> {
        self.write("(");
        self.newline();
        self.indented(|g| {
            g.emit_select(stmt)?;
            g.newline();
            Ok(())
        })?;
        self.write(")");
        Ok(())
    }

    /// Emits an expression, offering dialect-sensitive nodes to the
    /// hooks first.
    pub fn emit_expr(&mut self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Literal(lit) => {
                self.emit_literal(lit);
                Ok(())
            }
            Expr::Column {
                table,
                name,
                sql_type: _,
            } => {
                if let Some(table) = table {
                    self.write_identifier(table);
                    self.write(".");
                }
                self.write_identifier(name);
                Ok(())
            }
            Expr::Binary { left, op, right } => {
                let hooks = self.hooks;
                if hooks.binary(*op, left, right, self)? == Emitted::Handled {
                    return Ok(());
                }
                self.emit_binary_default(*op, left, right)
            }
            Expr::Unary { op, operand } => {
                self.write(op.as_str());
                if *op == crate::ast::UnaryOp::Not {
                    self.write(" ");
                }
                self.emit_operand(operand, u8::MAX)
            }
            Expr::Function(call) => {
                let hooks = self.hooks;
                if hooks.function(call, self)? == Emitted::Handled {
                    return Ok(());
                }
                self.emit_function_default(call)
            }
            Expr::Parameter { name, .. } => {
                self.emit_parameter(name);
                Ok(())
            }
            Expr::Subquery(query) => self.emit_parenthesized_select(query),
            Expr::IsNull { expr, negated } => {
                self.emit_operand(expr, u8::MAX)?;
                self.write(if *negated { " IS NOT NULL" } else { " IS NULL" });
                Ok(())
            }
            Expr::In {
                expr,
                list,
                negated,
            } => {
                self.emit_operand(expr, u8::MAX)?;
                self.write(if *negated { " NOT IN (" } else { " IN (" });
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expr(item)?;
                }
                self.write(")");
                Ok(())
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                self.emit_operand(expr, u8::MAX)?;
                self.write(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                self.emit_operand(low, u8::MAX)?;
                self.write(" AND ");
                self.emit_operand(high, u8::MAX)
            }
            Expr::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                self.write("CASE");
                if let Some(operand) = operand {
                    self.write(" ");
                    self.emit_expr(operand)?;
                }
                for (when, then) in when_clauses {
                    self.write(" WHEN ");
                    self.emit_expr(when)?;
                    self.write(" THEN ");
                    self.emit_expr(then)?;
                }
                if let Some(else_clause) = else_clause {
                    self.write(" ELSE ");
                    self.emit_expr(else_clause)?;
                }
                self.write(" END");
                Ok(())
            }
            Expr::Cast { expr, data_type } => {
                self.write("CAST(");
                self.emit_expr(expr)?;
                self.write(" AS ");
                let ty = data_type.to_sql();
                self.write(&ty);
                self.write(")");
                Ok(())
            }
            Expr::Fragment(sql) => {
                self.write(sql);
                Ok(())
            }
            Expr::Wildcard { table } => {
                if let Some(table) = table {
                    self.write_identifier(table);
                    self.write(".");
                }
                self.write("*");
                Ok(())
            }
        }
    }

    /// Emits a binary expression in infix form, parenthesizing
    /// operands that bind looser than the operator.
    pub fn emit_binary_default(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<()> {
        self.emit_operand(left, op.precedence())?;
        self.write(" ");
        self.write(op.as_str());
        self.write(" ");
        self.emit_operand(right, op.precedence())
    }

    fn emit_operand(&mut self, operand: &Expr, parent_precedence: u8) -> Result<()> {
        let needs_parens = match operand {
            Expr::Binary { op, .. } => op.precedence() < parent_precedence,
            Expr::Case { .. } => parent_precedence == u8::MAX,
            _ => false,
        };
        if needs_parens {
            self.write("(");
            self.emit_expr(operand)?;
            self.write(")");
            Ok(())
        } else {
            self.emit_expr(operand)
        }
    }

    /// Emits a function call in the generic `name(arg, ...)` form.
    pub fn emit_function_default(&mut self, call: &FunctionCall) -> Result<()> {
        if let Some(schema) = &call.schema {
            self.write_identifier(schema);
            self.write(".");
        }
        self.write(&call.name);
        self.write("(");
        if call.distinct {
            self.write("DISTINCT ");
        }
        for (i, arg) in call.args.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expr(arg)?;
        }
        self.write(")");
        Ok(())
    }

    /// Emits a named parameter placeholder and records its binding.
    pub fn emit_parameter(&mut self, name: &str) {
        let placeholder = self.dialect.format_parameter(name);
        self.write(&placeholder);
        if !self.bound.iter().any(|n| n == name) {
            self.bound.push(String::from(name));
        }
    }

    fn emit_literal(&mut self, lit: &Literal) {
        match lit {
            Literal::Integer(n) => {
                let text = n.to_string();
                self.write(&text);
            }
            Literal::Float(f) => {
                let text = f.to_string();
                self.write(&text);
            }
            Literal::String(s) => {
                let escaped = s.replace('\'', "''");
                self.write("'");
                self.write(&escaped);
                self.write("'");
            }
            Literal::Boolean(b) => self.write(if *b { "TRUE" } else { "FALSE" }),
            Literal::Null => self.write("NULL"),
        }
    }
}

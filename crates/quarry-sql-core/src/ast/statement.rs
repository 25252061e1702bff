//! Statement-level nodes of the compiled query plan.

use super::expression::Expr;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY entry: an expression and a direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
}

impl OrderBy {
    /// Creates an ascending ordering.
    #[must_use]
    pub const fn asc(expr: Expr) -> Self {
        Self {
            expr,
            direction: OrderDirection::Asc,
        }
    }

    /// Creates a descending ordering.
    #[must_use]
    pub const fn desc(expr: Expr) -> Self {
        Self {
            expr,
            direction: OrderDirection::Desc,
        }
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// CROSS JOIN.
    Cross,
    /// A lateral cross join: the right side may reference columns of
    /// the left side. Dialects without `LATERAL` rewrite this.
    CrossLateral,
}

impl JoinType {
    /// Returns the generic SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Cross => "CROSS JOIN",
            Self::CrossLateral => "CROSS JOIN LATERAL",
        }
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// The table to join.
    pub table: TableRef,
    /// The join condition (for non-CROSS joins).
    pub on: Option<Expr>,
}

/// A source table in the FROM list.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    /// A simple table name.
    Table {
        /// Schema name (optional).
        schema: Option<String>,
        /// Table name.
        name: String,
        /// Alias.
        alias: Option<String>,
    },
    /// A derived table (nested SELECT).
    Subquery {
        /// The subquery.
        query: Box<SelectStatement>,
        /// Alias, when the derived table needs to be referenced.
        alias: Option<String>,
    },
    /// A derived table over pre-compiled raw SQL text.
    RawSql {
        /// The raw SQL, emitted verbatim inside parentheses.
        sql: String,
        /// Alias (required for derived tables).
        alias: String,
    },
    /// A joined table.
    Join {
        /// Left side of the join.
        left: Box<TableRef>,
        /// The join clause.
        join: Box<JoinClause>,
    },
}

impl TableRef {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            schema: None,
            name: name.into(),
            alias: None,
        }
    }

    /// Creates a derived table from a subquery.
    #[must_use]
    pub fn subquery(query: SelectStatement, alias: impl Into<String>) -> Self {
        Self::Subquery {
            query: Box::new(query),
            alias: Some(alias.into()),
        }
    }

    /// Creates an unaliased derived table.
    #[must_use]
    pub fn derived(query: SelectStatement) -> Self {
        Self::Subquery {
            query: Box::new(query),
            alias: None,
        }
    }

    /// Creates a derived table over raw SQL text.
    #[must_use]
    pub fn raw_sql(sql: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::RawSql {
            sql: sql.into(),
            alias: alias.into(),
        }
    }

    /// Adds an alias to this table reference.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        match self {
            Self::Table { schema, name, .. } => Self::Table {
                schema,
                name,
                alias: Some(alias.into()),
            },
            Self::Subquery { query, .. } => Self::Subquery {
                query,
                alias: Some(alias.into()),
            },
            Self::RawSql { sql, .. } => Self::RawSql {
                sql,
                alias: alias.into(),
            },
            Self::Join { left, join } => Self::Join {
                left: Box::new((*left).alias(alias)),
                join,
            },
        }
    }

    /// Joins another table onto this reference.
    #[must_use]
    pub fn join(self, join_type: JoinType, table: Self, on: Option<Expr>) -> Self {
        Self::Join {
            left: Box::new(self),
            join: Box::new(JoinClause {
                join_type,
                table,
                on,
            }),
        }
    }
}

/// A projected column: an expression with an optional display alias.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectColumn {
    /// The expression.
    pub expr: Expr,
    /// Column alias.
    pub alias: Option<String>,
}

impl SelectColumn {
    /// Creates an unaliased projection.
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// Creates a projection with a display alias.
    #[must_use]
    pub fn with_alias(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }

    /// Returns the name downstream result binding sees for this
    /// projection: the alias if present, else the column name for
    /// plain column references.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match (&self.alias, &self.expr) {
            (Some(alias), _) => Some(alias),
            (None, Expr::Column { name, .. }) => Some(name),
            _ => None,
        }
    }
}

/// One (possibly nested) SELECT of the compiled plan.
///
/// Constructed once upstream and consumed exactly once per generation
/// pass; nested instances appear as derived tables and subqueries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    /// Alias of this select when nested as a derived table.
    pub alias: Option<String>,
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The projection list. A `Expr::Wildcard` entry projects all
    /// columns of its source table.
    pub columns: Vec<SelectColumn>,
    /// The FROM list. Empty for table-less selects.
    pub tables: Vec<TableRef>,
    /// The WHERE predicate.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING predicate.
    pub having: Option<Expr>,
    /// ORDER BY entries.
    pub order_by: Vec<OrderBy>,
    /// Row-limit expression.
    pub limit: Option<Expr>,
    /// Row-offset expression.
    pub offset: Option<Expr>,
}

impl SelectStatement {
    /// Creates an empty SELECT.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a projected expression.
    #[must_use]
    pub fn column(mut self, expr: Expr) -> Self {
        self.columns.push(SelectColumn::new(expr));
        self
    }

    /// Adds a projected expression with a display alias.
    #[must_use]
    pub fn column_as(mut self, expr: Expr, alias: impl Into<String>) -> Self {
        self.columns.push(SelectColumn::with_alias(expr, alias));
        self
    }

    /// Adds a source table.
    #[must_use]
    pub fn from(mut self, table: TableRef) -> Self {
        self.tables.push(table);
        self
    }

    /// Sets the WHERE predicate.
    #[must_use]
    pub fn filter(mut self, predicate: Expr) -> Self {
        self.where_clause = Some(predicate);
        self
    }

    /// Appends an ORDER BY entry.
    #[must_use]
    pub fn order(mut self, entry: OrderBy) -> Self {
        self.order_by.push(entry);
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub fn take(mut self, limit: Expr) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the row offset.
    #[must_use]
    pub fn skip(mut self, offset: Expr) -> Self {
        self.offset = Some(offset);
        self
    }
}

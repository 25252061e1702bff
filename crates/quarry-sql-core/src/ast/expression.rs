//! Expression nodes of the compiled query plan.
//!
//! A plan tree is built once by the upstream query compiler and handed
//! to a generator read-only; generators never mutate it.

use super::types::{DataType, SqlType};

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    String(String),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
}

impl Literal {
    /// Returns the static type of the literal.
    #[must_use]
    pub const fn sql_type(&self) -> SqlType {
        match self {
            Self::Integer(_) => SqlType::Integer,
            Self::Float(_) => SqlType::Float,
            Self::String(_) => SqlType::Text,
            Self::Boolean(_) => SqlType::Boolean,
            Self::Null => SqlType::Unknown,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Concat,
    Like,

    // Bitwise
    BitAnd,
    BitOr,
}

impl BinaryOp {
    /// Returns the generic SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Concat => "||",
            Self::Like => "LIKE",
            Self::BitAnd => "&",
            Self::BitOr => "|",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 3,
            Self::Like => 4,
            Self::BitOr => 5,
            Self::BitAnd => 6,
            Self::Add | Self::Sub | Self::Concat => 7,
            Self::Mul | Self::Div | Self::Mod => 8,
        }
    }

    /// Returns whether the operator yields a boolean result.
    #[must_use]
    pub const fn is_predicate(&self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::NotEq
                | Self::Lt
                | Self::LtEq
                | Self::Gt
                | Self::GtEq
                | Self::And
                | Self::Or
                | Self::Like
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical NOT
    Not,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "NOT",
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Owning schema or package, when the call is qualified.
    pub schema: Option<String>,
    /// The function name.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified (aggregates).
    pub distinct: bool,
    /// The static result type of the call.
    pub return_type: SqlType,
}

impl FunctionCall {
    /// Creates an unqualified function call.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Expr>, return_type: SqlType) -> Self {
        Self {
            schema: None,
            name: name.into(),
            args,
            distinct: false,
            return_type,
        }
    }

    /// Qualifies the call with an owning schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// An expression in the compiled query plan.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A column reference, optionally qualified with a table alias.
    ///
    /// References to projected aliases of an inner query use the same
    /// node, qualified with the inner query's alias.
    Column {
        /// Table name or alias (optional).
        table: Option<String>,
        /// Column name.
        name: String,
        /// The static type of the column.
        sql_type: SqlType,
    },

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A function call.
    Function(FunctionCall),

    /// A named bound parameter.
    Parameter {
        /// The parameter name, without placeholder decoration.
        name: String,
        /// The static type of the bound value.
        sql_type: SqlType,
    },

    /// A scalar subquery.
    Subquery(Box<super::SelectStatement>),

    /// IS NULL expression.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// IN expression.
    In {
        /// The expression to check.
        expr: Box<Expr>,
        /// The list of values.
        list: Vec<Expr>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// BETWEEN expression.
    Between {
        /// The expression to check.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// CASE expression.
    Case {
        /// The operand (if any).
        operand: Option<Box<Expr>>,
        /// WHEN/THEN clauses.
        when_clauses: Vec<(Expr, Expr)>,
        /// ELSE clause.
        else_clause: Option<Box<Expr>>,
    },

    /// CAST expression.
    Cast {
        /// Expression to cast.
        expr: Box<Expr>,
        /// Target type.
        data_type: DataType,
    },

    /// An opaque SQL fragment emitted verbatim.
    ///
    /// Carries pre-compiled text from the upstream framework, such as
    /// engine pseudo-columns. Never built from user input.
    Fragment(String),

    /// Wildcard (*) in a projection.
    Wildcard {
        /// Table qualifier (optional).
        table: Option<String>,
    },
}

impl Expr {
    /// Creates a column reference of unknown type.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            table: None,
            name: name.into(),
            sql_type: SqlType::Unknown,
        }
    }

    /// Creates a qualified column reference of unknown type.
    #[must_use]
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column {
            table: Some(table.into()),
            name: name.into(),
            sql_type: SqlType::Unknown,
        }
    }

    /// Creates a typed column reference.
    #[must_use]
    pub fn typed_column(
        table: Option<&str>,
        name: impl Into<String>,
        sql_type: SqlType,
    ) -> Self {
        Self::Column {
            table: table.map(String::from),
            name: name.into(),
            sql_type,
        }
    }

    /// Creates a new integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a new string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a new boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Literal(Literal::Boolean(value))
    }

    /// Creates a NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// Creates a named bound parameter of unknown type.
    #[must_use]
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::Parameter {
            name: name.into(),
            sql_type: SqlType::Unknown,
        }
    }

    /// Creates a verbatim SQL fragment.
    #[must_use]
    pub fn fragment(sql: impl Into<String>) -> Self {
        Self::Fragment(sql.into())
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates an inequality expression.
    #[must_use]
    pub fn not_eq(self, right: Self) -> Self {
        self.binary(BinaryOp::NotEq, right)
    }

    /// Creates a less-than-or-equal expression.
    #[must_use]
    pub fn lt_eq(self, right: Self) -> Self {
        self.binary(BinaryOp::LtEq, right)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt(self, right: Self) -> Self {
        self.binary(BinaryOp::Gt, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// Creates an IS NULL expression.
    #[must_use]
    pub fn is_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: false,
        }
    }

    /// Creates an IS NOT NULL expression.
    #[must_use]
    pub fn is_not_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: true,
        }
    }

    /// Creates a CAST expression.
    #[must_use]
    pub fn cast(self, data_type: DataType) -> Self {
        Self::Cast {
            expr: Box::new(self),
            data_type,
        }
    }

    /// Returns the static result type of the expression.
    #[must_use]
    pub fn sql_type(&self) -> SqlType {
        match self {
            Self::Literal(lit) => lit.sql_type(),
            Self::Column { sql_type, .. } | Self::Parameter { sql_type, .. } => *sql_type,
            Self::Binary { left, op, right } => {
                if op.is_predicate() {
                    SqlType::Boolean
                } else if matches!(op, BinaryOp::Concat) {
                    SqlType::Text
                } else {
                    match left.sql_type() {
                        SqlType::Unknown => right.sql_type(),
                        ty => ty,
                    }
                }
            }
            Self::Unary { op, operand } => match op {
                UnaryOp::Not => SqlType::Boolean,
                UnaryOp::Neg => operand.sql_type(),
            },
            Self::Function(f) => f.return_type,
            Self::IsNull { .. } | Self::In { .. } | Self::Between { .. } => SqlType::Boolean,
            Self::Case {
                when_clauses,
                else_clause,
                ..
            } => when_clauses
                .first()
                .map_or_else(
                    || else_clause.as_ref().map_or(SqlType::Unknown, |e| e.sql_type()),
                    |(_, then)| then.sql_type(),
                ),
            Self::Cast { data_type, .. } => data_type.semantic_type(),
            Self::Subquery(_) | Self::Fragment(_) | Self::Wildcard { .. } => SqlType::Unknown,
        }
    }

    /// Returns whether the expression is a literal constant or a bound
    /// parameter.
    ///
    /// Orderings over such expressions are no-ops and some engines
    /// reject them outright.
    #[must_use]
    pub const fn is_constant_or_parameter(&self) -> bool {
        matches!(self, Self::Literal(_) | Self::Parameter { .. })
    }
}

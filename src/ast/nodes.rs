use crate::ast::value::Value;
use std::fmt;

/// Scalar comparison operators.
///
/// Spelled either as a call (`eq(a,1)`) or in FIQL infix form (`a=eq=1`,
/// `a==1`); both surfaces collapse to the same operator here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl ComparisonOp {
    /// Resolve an `OPERATOR` token spelling - keyword or FIQL symbol - to
    /// the operator it denotes.
    pub fn from_operator(spelling: &str) -> Option<ComparisonOp> {
        match spelling {
            "eq" | "=" | "==" => Some(ComparisonOp::Eq),
            "ne" | "!=" | "<>" => Some(ComparisonOp::Ne),
            "lt" | "<" => Some(ComparisonOp::Lt),
            "gt" | ">" => Some(ComparisonOp::Gt),
            "le" | "<=" => Some(ComparisonOp::Le),
            "ge" | ">=" => Some(ComparisonOp::Ge),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "eq",
            ComparisonOp::Ne => "ne",
            ComparisonOp::Lt => "lt",
            ComparisonOp::Gt => "gt",
            ComparisonOp::Le => "le",
            ComparisonOp::Ge => "ge",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Array-membership operators (`in`, `out`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipOp {
    In,
    Out,
}

impl MembershipOp {
    pub fn from_operator(spelling: &str) -> Option<MembershipOp> {
        match spelling {
            "in" => Some(MembershipOp::In),
            "out" => Some(MembershipOp::Out),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MembershipOp::In => "in",
            MembershipOp::Out => "out",
        }
    }
}

impl fmt::Display for MembershipOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One node of the filter tree.
///
/// Parenthesized groups never appear here: parens only decide how siblings
/// fold into `And`/`Or` during parsing, and glue chains fold flat, so
/// `a&b&c` is a single `And` with three children.
///
/// # Invariants
///
/// - `And`/`Or` always carry at least 2 children; the parser rejects a
///   one-argument `and()`/`or()` before a node is ever built.
/// - `In`/`Out` always carry at least 1 value.
/// - Nodes are produced once and never mutated; every child belongs to
///   exactly one parent.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    /// Conjunction of 2+ sub-queries: `and(q,q,...)` or `q&q`
    And(Vec<QueryNode>),

    /// Disjunction of 2+ sub-queries: `or(q,q,...)` or `q|q`
    Or(Vec<QueryNode>),

    /// Negation of exactly one sub-query: `not(q)`
    Not(Box<QueryNode>),

    /// Scalar comparison: `eq(field,value)` / `field=eq=value`
    Comparison {
        op: ComparisonOp,
        field: String,
        value: Value,
    },

    /// Array membership: `in(field,(v,...))` / `field=in=(v,...)`
    Membership {
        op: MembershipOp,
        field: String,
        values: Vec<Value>,
    },
}

/// Sort precedence order for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Default when no prefix is present; `+` makes it explicit
    Ascending,
    /// Leading `-`
    Descending,
}

/// One `(field, direction)` entry of a `sort(...)` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub name: String,
    pub direction: SortDirection,
}

/// `select(a,b,c)` - the projection list, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Select {
    pub fields: Vec<String>,
}

/// `sort(a,+b,-c)` - field order is the sort precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sort {
    pub fields: Vec<SortField>,
}

/// `limit(n)` / `limit(n,offset)` - offset defaults to 0 when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub limit: i64,
    pub offset: i64,
}

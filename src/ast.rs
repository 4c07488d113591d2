//! # RQL - Abstract Syntax Tree
//!
//! This module defines the token and node model for RQL (Resource Query
//! Language), the compact URL-query-string dialect for filtering, sorting,
//! selection and pagination:
//!
//! ```text
//! and(eq(a,b),gt(c,1))&sort(+a)&limit(10,20)
//! ```
//!
//! or, in its FIQL-compatible infix form, which parses to the same tree:
//!
//! ```text
//! a=eq=b&c=gt=1&sort(+a)&limit(10,20)
//! ```
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[value]** - Literal values with inferred kinds and explicit casts
//! - **[nodes]** - Query nodes (logic, comparison, membership) and the
//!   auxiliary select/sort/limit clauses
//! - **[query]** - The complete parse result
//!
//! ## Core Concepts
//!
//! ### Filter tree vs auxiliary clauses
//!
//! `and`/`or`/`not` and the comparison/membership operators form the filter
//! tree. `select(...)`, `sort(...)` and `limit(...)` are siblings of that
//! tree, not filter nodes: they only appear at the top level of a query and
//! land in their own slots on [`query::ParsedQuery`].
//!
//! ### Dual surface syntax
//!
//! Every comparison has a function-call form (`eq(a,1)`) and a FIQL infix
//! form (`a=eq=1`, `a==1`, `a=1`). Both produce the identical node shape;
//! the distinction does not survive parsing.
//!
//! ### Typed literals
//!
//! A literal carries the exact source text plus its lexically inferred kind
//! (`1` is an integer, `2015-04-19` a date, `x` a string). An explicit
//! `type:` prefix such as `string:3` overrides the inferred kind without
//! rewriting the raw text.
pub mod nodes;
pub mod query;
pub mod tokens;
pub mod value;

pub use nodes::{ComparisonOp, Limit, MembershipOp, QueryNode, Select, Sort, SortDirection, SortField};
pub use query::ParsedQuery;
pub use tokens::{Token, TokenKind};
pub use value::{Value, ValueKind};

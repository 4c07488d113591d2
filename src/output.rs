//! JSON rendering of a parsed query.
//!
//! Turns the AST into a `serde_json::Value` for the CLI and for callers
//! that want to hand the parse result across a process boundary. The
//! rendering is lossless where it matters - a value whose raw text does
//! not fit the target JSON type (an out-of-range integer, say) falls back
//! to its raw string - and deterministic: node fields always appear in the
//! same order.
//!
//! This is a one-way debug/interchange view; serializing the AST back to
//! RQL text is deliberately not supported.

use crate::ast::{ParsedQuery, QueryNode, SortDirection, Token, Value, ValueKind};
use serde_json::{Value as Json, json};

/// Render a complete parse result.
///
/// Absent clauses render as `null` so the shape is stable:
///
/// ```
/// use rql_parser::{parse, output::to_json};
///
/// let query = parse("eq(a,1)&limit(10)").unwrap();
/// let json = to_json(&query);
/// assert_eq!(json["filter"]["op"], "eq");
/// assert_eq!(json["limit"]["offset"], 0);
/// assert!(json["sort"].is_null());
/// ```
pub fn to_json(query: &ParsedQuery) -> Json {
    json!({
        "filter": query.filter.as_ref().map(node_to_json),
        "select": query.select.as_ref().map(|s| json!(s.fields)),
        "sort": query.sort.as_ref().map(|s| Json::Array(
            s.fields
                .iter()
                .map(|f| json!({
                    "field": f.name,
                    "direction": match f.direction {
                        SortDirection::Ascending => "asc",
                        SortDirection::Descending => "desc",
                    },
                }))
                .collect(),
        )),
        "limit": query.limit.map(|l| json!({ "limit": l.limit, "offset": l.offset })),
    })
}

/// Compact JSON string of a parse result.
pub fn to_json_string(query: &ParsedQuery) -> String {
    to_json(query).to_string()
}

/// Pretty-printed JSON string of a parse result.
pub fn to_json_string_pretty(query: &ParsedQuery) -> String {
    serde_json::to_string_pretty(&to_json(query)).unwrap_or_else(|_| to_json(query).to_string())
}

/// Render one filter node.
pub fn node_to_json(node: &QueryNode) -> Json {
    match node {
        QueryNode::And(children) => json!({
            "op": "and",
            "queries": children.iter().map(node_to_json).collect::<Vec<_>>(),
        }),
        QueryNode::Or(children) => json!({
            "op": "or",
            "queries": children.iter().map(node_to_json).collect::<Vec<_>>(),
        }),
        QueryNode::Not(child) => json!({
            "op": "not",
            "query": node_to_json(child),
        }),
        QueryNode::Comparison { op, field, value } => json!({
            "op": op.name(),
            "field": field,
            "value": value_to_json(value),
        }),
        QueryNode::Membership { op, field, values } => json!({
            "op": op.name(),
            "field": field,
            "values": values.iter().map(value_to_json).collect::<Vec<_>>(),
        }),
    }
}

/// Render one literal by its (possibly cast-overridden) kind.
pub fn value_to_json(value: &Value) -> Json {
    match value.kind {
        ValueKind::Null => Json::Null,
        ValueKind::True => json!(true),
        ValueKind::False => json!(false),
        ValueKind::Integer => match value.as_i64() {
            Some(n) => json!(n),
            None => json!(value.raw),
        },
        ValueKind::Float => match value.as_f64() {
            Some(n) => json!(n),
            None => json!(value.raw),
        },
        ValueKind::String | ValueKind::Date | ValueKind::DateTime | ValueKind::Empty => {
            json!(value.as_str())
        }
    }
}

/// Render a lexed token stream: the view `rql tokens` prints.
pub fn tokens_to_json(tokens: &[Token]) -> Json {
    Json::Array(
        tokens
            .iter()
            .map(|t| {
                json!({
                    "value": t.value,
                    "kind": t.kind.to_string(),
                    "position": t.position,
                })
            })
            .collect(),
    )
}

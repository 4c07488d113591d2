use crate::ast::nodes::{Limit, QueryNode, Select, Sort};

/// The complete result of parsing one RQL string.
///
/// The filter tree and the three auxiliary clauses are separate slots: at
/// the outermost glue level, `select(...)`, `sort(...)` and `limit(...)`
/// are extracted here rather than folded into the filter's `And`/`Or`.
///
/// An empty input string is valid and yields the default (all slots empty).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedQuery {
    pub filter: Option<QueryNode>,
    pub select: Option<Select>,
    pub sort: Option<Sort>,
    pub limit: Option<Limit>,
}

impl ParsedQuery {
    /// True when nothing at all was parsed (empty source string).
    pub fn is_empty(&self) -> bool {
        self.filter.is_none() && self.select.is_none() && self.sort.is_none() && self.limit.is_none()
    }
}

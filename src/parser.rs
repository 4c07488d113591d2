//! The RQL parser (dispatcher).
//!
//! Owns the token stream and drives the recursive descent: it tries the
//! registered [`TOKEN_PARSERS`] in their fixed priority order for each
//! primary expression, glues siblings with `&`/`|` into flat `And`/`Or`
//! nodes, and extracts the top-level-only `select`/`sort`/`limit` clauses
//! into their own result slots.
//!
//! Glue has no precedence: `&` and `|` cannot be mixed at one nesting
//! level, the author has to parenthesize. Chains of 3+ terms fold flat -
//! `a&b&c` is one `And` with three children, not a nested pair.
//!
//! All malformed input is rejected at the point of detection; no partial
//! tree is ever returned.
//!
//! [`TOKEN_PARSERS`]: crate::token_parser::TOKEN_PARSERS

use crate::ast::{ParsedQuery, QueryNode, Token, TokenKind, Value, ValueKind};
use crate::lexer::{LexError, tokenize};
use crate::stream::TokenStream;
use crate::token_parser::{
    LimitTokenParser, SelectTokenParser, SortTokenParser, TOKEN_PARSERS, TokenParser,
};
use std::fmt;

/// Upper bound on grouping/operator nesting. Deeper input fails with
/// [`SyntaxError::DepthExceeded`] instead of exhausting the call stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Any grammar violation, carrying enough positional context for the
/// caller to render a pointer into the source query.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// The wrong kind of token where a specific one was required
    UnexpectedToken { expected: String, found: Token },
    /// The stream ended where more input was required
    UnexpectedEof { expected: String },
    /// Tokens remained after the query was complete
    TrailingInput { found: Token },
    /// Too few arguments to an operator (`and`/`or` need 2+, `in`/`out`
    /// and `sort` need 1+)
    WrongArity {
        operator: String,
        min: usize,
        given: usize,
        position: usize,
    },
    /// `&` and `|` combined at one nesting level without parentheses
    MixedGlue { position: usize },
    /// `select`/`sort`/`limit` nested inside an expression
    MisplacedClause { operator: String, position: usize },
    /// `select`/`sort`/`limit` glued to the query with `|`
    ClauseWithOr { operator: String, position: usize },
    /// A second `select`/`sort`/`limit` in one query
    DuplicateClause { operator: String, position: usize },
    /// Input nested deeper than [`MAX_NESTING_DEPTH`]
    DepthExceeded { position: usize },
    /// Lexer invariant violation (unreachable for well-formed recognizers)
    Lex(LexError),
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::UnexpectedToken { expected, found } => write!(
                f,
                "Expected {}, found {} at offset {}",
                expected, found, found.position
            ),
            SyntaxError::UnexpectedEof { expected } => {
                write!(f, "Expected {}, but reached end of input", expected)
            }
            SyntaxError::TrailingInput { found } => write!(
                f,
                "Unexpected trailing {} at offset {}",
                found, found.position
            ),
            SyntaxError::WrongArity {
                operator,
                min,
                given,
                position,
            } => write!(
                f,
                "\"{}\" operator expects at least {} parameters, {} given (offset {})",
                operator, min, given, position
            ),
            SyntaxError::MixedGlue { position } => write!(
                f,
                "Cannot mix '&' and '|' at the same nesting level without parentheses (offset {})",
                position
            ),
            SyntaxError::MisplacedClause { operator, position } => write!(
                f,
                "{}() is only allowed at the top level of the query (offset {})",
                operator, position
            ),
            SyntaxError::ClauseWithOr { operator, position } => write!(
                f,
                "{}() can only be joined to the query with '&' (offset {})",
                operator, position
            ),
            SyntaxError::DuplicateClause { operator, position } => write!(
                f,
                "Multiple {}() clauses in one query (offset {})",
                operator, position
            ),
            SyntaxError::DepthExceeded { position } => write!(
                f,
                "Maximum nesting depth ({}) exceeded at offset {}",
                MAX_NESTING_DEPTH, position
            ),
            SyntaxError::Lex(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for SyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyntaxError::Lex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for SyntaxError {
    fn from(e: LexError) -> Self {
        SyntaxError::Lex(e)
    }
}

/// Parse a complete RQL string into its query tree and auxiliary clauses.
///
/// The single function boundary the hosting application depends on. An
/// empty input string is valid and yields an empty [`ParsedQuery`].
pub fn parse(input: &str) -> Result<ParsedQuery, SyntaxError> {
    let stream = tokenize(input)?;
    Parser::new(stream).parse()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GlueKind {
    And,
    Or,
}

pub struct Parser {
    stream: TokenStream,
    depth: usize,
}

impl Parser {
    pub fn new(stream: TokenStream) -> Self {
        Parser { stream, depth: 0 }
    }

    pub(crate) fn stream(&self) -> &TokenStream {
        &self.stream
    }

    pub(crate) fn stream_mut(&mut self) -> &mut TokenStream {
        &mut self.stream
    }

    pub(crate) fn enter(&mut self, position: usize) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(SyntaxError::DepthExceeded { position });
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Parse the whole stream: a glue chain of filter expressions and
    /// auxiliary clauses, then verify nothing trails.
    pub fn parse(mut self) -> Result<ParsedQuery, SyntaxError> {
        let mut query = ParsedQuery::default();
        if self.stream.is_eof() {
            return Ok(query);
        }

        let mut filters: Vec<QueryNode> = Vec::new();
        let mut clauses: Vec<(String, usize)> = Vec::new();
        let mut seps: Vec<(GlueKind, usize)> = Vec::new();

        loop {
            if let Some((name, position)) = self.clause_at_cursor() {
                match name.as_str() {
                    "select" if query.select.is_none() => {
                        query.select = Some(SelectTokenParser::parse(&mut self)?);
                    }
                    "sort" if query.sort.is_none() => {
                        query.sort = Some(SortTokenParser::parse(&mut self)?);
                    }
                    "limit" if query.limit.is_none() => {
                        query.limit = Some(LimitTokenParser::parse(&mut self)?);
                    }
                    _ => {
                        return Err(SyntaxError::DuplicateClause {
                            operator: name,
                            position,
                        });
                    }
                }
                clauses.push((name, position));
            } else {
                filters.push(self.parse_primary()?);
            }

            match self.stream.peek() {
                Some(t) if t.kind == TokenKind::Ampersand => {
                    seps.push((GlueKind::And, t.position));
                    self.stream.advance();
                }
                Some(t) if t.kind == TokenKind::VerticalBar => {
                    seps.push((GlueKind::Or, t.position));
                    self.stream.advance();
                }
                _ => break,
            }
        }

        if let Some(token) = self.stream.peek() {
            return Err(SyntaxError::TrailingInput {
                found: token.clone(),
            });
        }

        // No precedence between '&' and '|': the whole top-level chain
        // must use one glue kind.
        if let Some(&(first_kind, _)) = seps.first() {
            if let Some(&(_, position)) = seps.iter().find(|(kind, _)| *kind != first_kind) {
                return Err(SyntaxError::MixedGlue { position });
            }
            if first_kind == GlueKind::Or {
                if let Some((operator, position)) = clauses.into_iter().next() {
                    return Err(SyntaxError::ClauseWithOr { operator, position });
                }
            }
        }

        query.filter = match filters.len() {
            0 => None,
            1 => Some(filters.remove(0)),
            _ => Some(match seps[0].0 {
                GlueKind::And => QueryNode::And(filters),
                GlueKind::Or => QueryNode::Or(filters),
            }),
        };
        Ok(query)
    }

    /// The name and position of the auxiliary clause at the cursor, if any.
    fn clause_at_cursor(&self) -> Option<(String, usize)> {
        let position = self.stream.peek()?.position;
        for name in ["select", "sort", "limit"] {
            let matched = match name {
                "select" => SelectTokenParser::matches(self),
                "sort" => SortTokenParser::matches(self),
                _ => LimitTokenParser::matches(self),
            };
            if matched {
                return Some((name.to_string(), position));
            }
        }
        None
    }

    /// Parse one glue chain: a primary expression, optionally extended by
    /// `&`/`|` siblings, folded flat into a single `And`/`Or`. Used inside
    /// groups and logic-operator arguments.
    pub(crate) fn parse_expression(&mut self) -> Result<QueryNode, SyntaxError> {
        let mut children = vec![self.parse_primary()?];
        let mut glue: Option<GlueKind> = None;

        loop {
            let (kind, position) = match self.stream.peek() {
                Some(t) if t.kind == TokenKind::Ampersand => {
                    (GlueKind::And, t.position)
                }
                Some(t) if t.kind == TokenKind::VerticalBar => {
                    (GlueKind::Or, t.position)
                }
                _ => break,
            };
            match glue {
                None => glue = Some(kind),
                Some(current) if current != kind => {
                    return Err(SyntaxError::MixedGlue { position });
                }
                _ => {}
            }
            self.stream.advance();
            children.push(self.parse_primary()?);
        }

        Ok(match glue {
            None => children.remove(0),
            Some(GlueKind::And) => QueryNode::And(children),
            Some(GlueKind::Or) => QueryNode::Or(children),
        })
    }

    /// Parse one primary expression by trying each registered token parser
    /// in priority order.
    pub(crate) fn parse_primary(&mut self) -> Result<QueryNode, SyntaxError> {
        // select/sort/limit never nest inside an expression
        if let Some((operator, position)) = self.clause_at_cursor() {
            return Err(SyntaxError::MisplacedClause { operator, position });
        }

        for token_parser in TOKEN_PARSERS {
            if token_parser.matches(self) {
                return token_parser.parse(self);
            }
        }

        match self.stream.peek() {
            Some(token) => Err(SyntaxError::UnexpectedToken {
                expected: "an expression".to_string(),
                found: token.clone(),
            }),
            None => Err(SyntaxError::UnexpectedEof {
                expected: "an expression".to_string(),
            }),
        }
    }

    /// Parse one value operand: an optional `TYPE` cast prefix, then a
    /// literal token.
    pub(crate) fn parse_value(&mut self) -> Result<Value, SyntaxError> {
        let token = self.stream.current()?.clone();
        if token.kind == TokenKind::Type {
            self.stream.advance();
            let literal = self.stream.current()?.clone();
            let lexed = ValueKind::from_token_kind(literal.kind).ok_or_else(|| {
                SyntaxError::UnexpectedToken {
                    expected: "a literal value after the type cast".to_string(),
                    found: literal.clone(),
                }
            })?;
            self.stream.advance();
            return Ok(Value::with_cast(literal.value, lexed, token.value));
        }

        match ValueKind::from_token_kind(token.kind) {
            Some(kind) => {
                self.stream.advance();
                Ok(Value::new(token.value, kind))
            }
            None => Err(SyntaxError::UnexpectedToken {
                expected: "a value".to_string(),
                found: token,
            }),
        }
    }
}

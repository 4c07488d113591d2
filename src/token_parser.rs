//! One parsing strategy per syntactic construct.
//!
//! Every construct of the grammar - grouping, the logic operators, the
//! scalar comparisons in both surface forms, array membership in both
//! surface forms - is a unit struct implementing [`TokenParser`]: a
//! non-consuming `matches` predicate on the current token(s), and a
//! `parse` that consumes exactly this construct (recursively re-entering
//! the dispatcher for nested expressions) and returns one AST node.
//!
//! [`TOKEN_PARSERS`] is the fixed priority order the dispatcher tries them
//! in; precedence is this list, nothing implicit.
//!
//! The auxiliary clauses (`select`, `sort`, `limit`) are not filter nodes
//! and have their own parsers at the bottom of this module; the dispatcher
//! only consults them at the top glue level.

use crate::ast::{
    ComparisonOp, Limit, MembershipOp, QueryNode, Select, Sort, SortDirection, SortField, Token,
    TokenKind, Value,
};
use crate::parser::{Parser, SyntaxError};

/// A recognizer/consumer pair for one grammar construct.
pub trait TokenParser {
    /// Does the stream's current position look like this construct's entry
    /// point? Must not consume anything.
    fn matches(&self, parser: &Parser) -> bool;

    /// Consume the tokens of exactly this construct and produce its node.
    fn parse(&self, parser: &mut Parser) -> Result<QueryNode, SyntaxError>;
}

/// The dispatch table, in match priority order: grouping parens first,
/// then the logic operators, then scalar/array operators in call form,
/// then their FIQL infix forms.
pub static TOKEN_PARSERS: [&(dyn TokenParser + Sync); 6] = [
    &GroupTokenParser,
    &LogicTokenParser,
    &ComparisonCallTokenParser,
    &MembershipCallTokenParser,
    &ComparisonFiqlTokenParser,
    &MembershipFiqlTokenParser,
];

fn current_is_operator(parser: &Parser, names: &[&str]) -> bool {
    match parser.stream().peek() {
        Some(token) if token.kind == TokenKind::Operator => {
            names.contains(&token.value.as_str())
        }
        _ => false,
    }
}

// ============================================================================
// Grouping
// ============================================================================

/// `( expression )` - no AST node of its own; parens only decide how the
/// enclosed glue chain folds.
pub struct GroupTokenParser;

impl TokenParser for GroupTokenParser {
    fn matches(&self, parser: &Parser) -> bool {
        matches!(parser.stream().peek(), Some(t) if t.kind == TokenKind::OpenParen)
    }

    fn parse(&self, parser: &mut Parser) -> Result<QueryNode, SyntaxError> {
        let open = parser.stream_mut().expect(TokenKind::OpenParen)?;
        parser.enter(open.position)?;
        let node = parser.parse_expression()?;
        parser.leave();
        parser.stream_mut().expect(TokenKind::CloseParen)?;
        Ok(node)
    }
}

// ============================================================================
// Logic operators
// ============================================================================

/// `and(q,q,...)`, `or(q,q,...)` with at least 2 arguments, `not(q)` with
/// exactly one. Arity is enforced here, at parse time.
pub struct LogicTokenParser;

impl TokenParser for LogicTokenParser {
    fn matches(&self, parser: &Parser) -> bool {
        current_is_operator(parser, &["and", "or", "not"])
    }

    fn parse(&self, parser: &mut Parser) -> Result<QueryNode, SyntaxError> {
        let operator = parser.stream_mut().expect(TokenKind::Operator)?;
        parser.stream_mut().expect(TokenKind::OpenParen)?;
        parser.enter(operator.position)?;

        if operator.value == "not" {
            let child = parser.parse_expression()?;
            parser.leave();
            parser.stream_mut().expect(TokenKind::CloseParen)?;
            return Ok(QueryNode::Not(Box::new(child)));
        }

        if matches!(parser.stream().peek(), Some(t) if t.kind == TokenKind::CloseParen) {
            return Err(SyntaxError::WrongArity {
                operator: operator.value,
                min: 2,
                given: 0,
                position: operator.position,
            });
        }
        let mut children = Vec::new();
        loop {
            children.push(parser.parse_expression()?);
            let next = parser.stream().current()?.clone();
            match next.kind {
                TokenKind::Comma => parser.stream_mut().advance(),
                TokenKind::CloseParen => break,
                _ => {
                    return Err(SyntaxError::UnexpectedToken {
                        expected: "COMMA or CLOSE_PAREN".to_string(),
                        found: next,
                    });
                }
            }
        }
        parser.leave();
        parser.stream_mut().expect(TokenKind::CloseParen)?;

        if children.len() < 2 {
            return Err(SyntaxError::WrongArity {
                operator: operator.value,
                min: 2,
                given: children.len(),
                position: operator.position,
            });
        }
        Ok(match operator.value.as_str() {
            "and" => QueryNode::And(children),
            _ => QueryNode::Or(children),
        })
    }
}

// ============================================================================
// Scalar comparisons
// ============================================================================

const COMPARISON_KEYWORDS: [&str; 6] = ["eq", "ne", "lt", "gt", "le", "ge"];

fn comparison_node(operator: &Token, field: String, value: Value) -> Result<QueryNode, SyntaxError> {
    match ComparisonOp::from_operator(&operator.value) {
        Some(op) => Ok(QueryNode::Comparison { op, field, value }),
        None => Err(SyntaxError::UnexpectedToken {
            expected: "a comparison operator".to_string(),
            found: operator.clone(),
        }),
    }
}

/// Call form: `eq(field,value)`.
pub struct ComparisonCallTokenParser;

impl TokenParser for ComparisonCallTokenParser {
    fn matches(&self, parser: &Parser) -> bool {
        current_is_operator(parser, &COMPARISON_KEYWORDS)
    }

    fn parse(&self, parser: &mut Parser) -> Result<QueryNode, SyntaxError> {
        let operator = parser.stream_mut().expect(TokenKind::Operator)?;
        parser.stream_mut().expect(TokenKind::OpenParen)?;
        let field = parser.stream_mut().expect(TokenKind::String)?;
        parser.stream_mut().expect(TokenKind::Comma)?;
        let value = parser.parse_value()?;
        parser.stream_mut().expect(TokenKind::CloseParen)?;
        comparison_node(&operator, field.value, value)
    }
}

/// FIQL infix form: `field=eq=value`, `field==value`, `field<>value`, ...
/// Produces the identical node shape as the call form.
pub struct ComparisonFiqlTokenParser;

impl TokenParser for ComparisonFiqlTokenParser {
    fn matches(&self, parser: &Parser) -> bool {
        let stream = parser.stream();
        match (stream.peek(), stream.peek_at(1)) {
            (Some(field), Some(op)) => {
                field.kind == TokenKind::String
                    && op.kind == TokenKind::Operator
                    && ComparisonOp::from_operator(&op.value).is_some()
            }
            _ => false,
        }
    }

    fn parse(&self, parser: &mut Parser) -> Result<QueryNode, SyntaxError> {
        let field = parser.stream_mut().expect(TokenKind::String)?;
        let operator = parser.stream_mut().expect(TokenKind::Operator)?;
        let value = parser.parse_value()?;
        comparison_node(&operator, field.value, value)
    }
}

// ============================================================================
// Array membership
// ============================================================================

fn membership_node(
    operator: &Token,
    field: String,
    values: Vec<Value>,
) -> Result<QueryNode, SyntaxError> {
    match MembershipOp::from_operator(&operator.value) {
        Some(op) => Ok(QueryNode::Membership { op, field, values }),
        None => Err(SyntaxError::UnexpectedToken {
            expected: "an array operator".to_string(),
            found: operator.clone(),
        }),
    }
}

/// Parse the parenthesized, comma-separated value list of an `in`/`out`.
/// At least one value is required; the empty list is an arity error.
fn parse_value_list(parser: &mut Parser, operator: &Token) -> Result<Vec<Value>, SyntaxError> {
    parser.stream_mut().expect(TokenKind::OpenParen)?;
    if matches!(parser.stream().peek(), Some(t) if t.kind == TokenKind::CloseParen) {
        return Err(SyntaxError::WrongArity {
            operator: operator.value.clone(),
            min: 1,
            given: 0,
            position: operator.position,
        });
    }
    let mut values = Vec::new();
    loop {
        values.push(parser.parse_value()?);
        let next = parser.stream().current()?.clone();
        match next.kind {
            TokenKind::Comma => parser.stream_mut().advance(),
            TokenKind::CloseParen => break,
            _ => {
                return Err(SyntaxError::UnexpectedToken {
                    expected: "COMMA or CLOSE_PAREN".to_string(),
                    found: next,
                });
            }
        }
    }
    parser.stream_mut().expect(TokenKind::CloseParen)?;
    Ok(values)
}

/// Call form: `in(field,(v,v,...))` - note the inner parens around the
/// value list.
pub struct MembershipCallTokenParser;

impl TokenParser for MembershipCallTokenParser {
    fn matches(&self, parser: &Parser) -> bool {
        current_is_operator(parser, &["in", "out"])
    }

    fn parse(&self, parser: &mut Parser) -> Result<QueryNode, SyntaxError> {
        let operator = parser.stream_mut().expect(TokenKind::Operator)?;
        parser.stream_mut().expect(TokenKind::OpenParen)?;
        let field = parser.stream_mut().expect(TokenKind::String)?;
        parser.stream_mut().expect(TokenKind::Comma)?;
        let values = parse_value_list(parser, &operator)?;
        parser.stream_mut().expect(TokenKind::CloseParen)?;
        membership_node(&operator, field.value, values)
    }
}

/// FIQL infix form: `field=in=(v,v,...)` - one level of parens around the
/// value list instead of the call form's two.
pub struct MembershipFiqlTokenParser;

impl TokenParser for MembershipFiqlTokenParser {
    fn matches(&self, parser: &Parser) -> bool {
        let stream = parser.stream();
        match (stream.peek(), stream.peek_at(1)) {
            (Some(field), Some(op)) => {
                field.kind == TokenKind::String
                    && op.kind == TokenKind::Operator
                    && MembershipOp::from_operator(&op.value).is_some()
            }
            _ => false,
        }
    }

    fn parse(&self, parser: &mut Parser) -> Result<QueryNode, SyntaxError> {
        let field = parser.stream_mut().expect(TokenKind::String)?;
        let operator = parser.stream_mut().expect(TokenKind::Operator)?;
        let values = parse_value_list(parser, &operator)?;
        membership_node(&operator, field.value, values)
    }
}

// ============================================================================
// Auxiliary clauses (top level only)
// ============================================================================

/// `select(field,field,...)` - the field list may be empty.
pub struct SelectTokenParser;

impl SelectTokenParser {
    pub fn matches(parser: &Parser) -> bool {
        current_is_operator(parser, &["select"])
    }

    pub fn parse(parser: &mut Parser) -> Result<Select, SyntaxError> {
        parser.stream_mut().expect(TokenKind::Operator)?;
        parser.stream_mut().expect(TokenKind::OpenParen)?;
        let mut fields = Vec::new();
        if !matches!(parser.stream().peek(), Some(t) if t.kind == TokenKind::CloseParen) {
            loop {
                let field = parser.stream_mut().expect(TokenKind::String)?;
                fields.push(field.value);
                match parser.stream().peek() {
                    Some(t) if t.kind == TokenKind::Comma => parser.stream_mut().advance(),
                    _ => break,
                }
            }
        }
        parser.stream_mut().expect(TokenKind::CloseParen)?;
        Ok(Select { fields })
    }
}

/// `sort(a,+b,-c)` - a leading `+`/`-` on each field sets the direction,
/// default ascending; list order is the sort precedence order.
pub struct SortTokenParser;

impl SortTokenParser {
    pub fn matches(parser: &Parser) -> bool {
        current_is_operator(parser, &["sort"])
    }

    pub fn parse(parser: &mut Parser) -> Result<Sort, SyntaxError> {
        let operator = parser.stream_mut().expect(TokenKind::Operator)?;
        parser.stream_mut().expect(TokenKind::OpenParen)?;
        if matches!(parser.stream().peek(), Some(t) if t.kind == TokenKind::CloseParen) {
            return Err(SyntaxError::WrongArity {
                operator: operator.value,
                min: 1,
                given: 0,
                position: operator.position,
            });
        }
        let mut fields = Vec::new();
        loop {
            let field = parser.stream_mut().expect(TokenKind::String)?;
            fields.push(sort_field(&field)?);
            match parser.stream().peek() {
                Some(t) if t.kind == TokenKind::Comma => parser.stream_mut().advance(),
                _ => break,
            }
        }
        parser.stream_mut().expect(TokenKind::CloseParen)?;
        Ok(Sort { fields })
    }
}

fn sort_field(token: &Token) -> Result<SortField, SyntaxError> {
    let (direction, name) = match token.value.strip_prefix('-') {
        Some(rest) => (SortDirection::Descending, rest),
        None => (
            SortDirection::Ascending,
            token.value.strip_prefix('+').unwrap_or(&token.value),
        ),
    };
    if name.is_empty() {
        return Err(SyntaxError::UnexpectedToken {
            expected: "a sort field name".to_string(),
            found: token.clone(),
        });
    }
    Ok(SortField {
        name: name.to_string(),
        direction,
    })
}

/// `limit(n)` / `limit(n,offset)` - offset defaults to 0.
pub struct LimitTokenParser;

impl LimitTokenParser {
    pub fn matches(parser: &Parser) -> bool {
        current_is_operator(parser, &["limit"])
    }

    pub fn parse(parser: &mut Parser) -> Result<Limit, SyntaxError> {
        parser.stream_mut().expect(TokenKind::Operator)?;
        parser.stream_mut().expect(TokenKind::OpenParen)?;
        let limit = integer_argument(parser)?;
        let offset = match parser.stream().peek() {
            Some(t) if t.kind == TokenKind::Comma => {
                parser.stream_mut().advance();
                integer_argument(parser)?
            }
            _ => 0,
        };
        parser.stream_mut().expect(TokenKind::CloseParen)?;
        Ok(Limit { limit, offset })
    }
}

fn integer_argument(parser: &mut Parser) -> Result<i64, SyntaxError> {
    let token = parser.stream_mut().expect(TokenKind::Integer)?;
    token
        .value
        .parse()
        .map_err(|_| SyntaxError::UnexpectedToken {
            expected: "an integer in i64 range".to_string(),
            found: token.clone(),
        })
}

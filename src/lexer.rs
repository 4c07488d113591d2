//! The RQL lexer.
//!
//! Converts a raw query string into an ordered sequence of typed tokens by
//! scanning left to right and trying a fixed list of recognizers at each
//! position; the first recognizer that matches wins. The order resolves
//! every ambiguity in the grammar:
//!
//! 1. Structural characters `(` `)` `,` `&` `|`
//! 2. `name:` type-cast prefixes (only when a recognizable literal follows)
//! 3. Operator keywords in call position (`eq(` is an operator, a bare
//!    `eq` between ampersands is a plain string)
//! 4. FIQL operators: `=eq=` keyword forms, then the bare symbols
//!    `==` `<=` `>=` `!=` `<>` `=` `<` `>`
//! 5. Literals: constants, integers, floats, calendar-validated dates and
//!    date-times
//! 6. Anything else is a `STRING` run up to the next structural character
//!
//! Lexing is total: malformed text never fails here, it falls back to
//! `STRING` and surfaces later as a parser-level syntax error. Whitespace
//! is never skipped - RQL lives in URL query strings, so a space is
//! ordinary string content.

use crate::ast::{Token, TokenKind};
use crate::stream::TokenStream;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static TYPE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*):").unwrap());

static CALL_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(and|or|not|eq|ne|lt|gt|le|ge|in|out|select|sort|limit)").unwrap()
});

static FIQL_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=(eq|ne|lt|gt|le|ge|in|out)=").unwrap());

static SYMBOL_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(==|<=|>=|!=|<>|=|<|>)").unwrap());

static CONSTANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(null|true|false|empty)(\(\))?").unwrap());

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").unwrap());

static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.[0-9]+|\.[0-9]+)([eE][+-]?[0-9]+)?").unwrap()
});

static DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})T([0-9]{2}):([0-9]{2}):([0-9]{2})Z").unwrap()
});

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})").unwrap());

/// Lexer-internal invariant violation.
///
/// Not used for "unrecognized text" - unrecognized text always falls back
/// to `STRING`. The only way to see this error is a recognizer set that
/// fails to consume input, which the grammar makes unreachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub position: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lex error at offset {}: {}", self.position, self.message)
    }
}

impl std::error::Error for LexError {}

/// Tokenize a complete RQL string.
///
/// Total over any input: the result is a finite token stream, and the only
/// error condition is a lexer-internal invariant violation.
pub fn tokenize(input: &str) -> Result<TokenStream, LexError> {
    Lexer::new(input).tokenize()
}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    pub fn tokenize(mut self) -> Result<TokenStream, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(TokenStream::new(tokens))
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if self.position >= self.input.len() {
            return Ok(None);
        }
        let start = self.position;
        let rest = &self.input[start..];

        match recognize(rest) {
            Some((kind, value, len)) if len > 0 => {
                self.position += len;
                Ok(Some(Token::new(kind, value, start)))
            }
            _ => Err(LexError {
                message: "recognizer consumed no input".to_string(),
                position: start,
            }),
        }
    }
}

/// Characters that terminate a literal or string token.
fn is_boundary(c: char) -> bool {
    matches!(c, '(' | ')' | ',' | '&' | '|' | '=' | '<' | '>' | '!')
}

/// True when the text at `len` bytes into `rest` is a token boundary.
fn boundary_at(rest: &str, len: usize) -> bool {
    match rest[len..].chars().next() {
        None => true,
        Some(c) => is_boundary(c),
    }
}

fn recognize(rest: &str) -> Option<(TokenKind, String, usize)> {
    // 1. Structural characters
    let first = rest.chars().next()?;
    let structural = match first {
        '(' => Some(TokenKind::OpenParen),
        ')' => Some(TokenKind::CloseParen),
        ',' => Some(TokenKind::Comma),
        '&' => Some(TokenKind::Ampersand),
        '|' => Some(TokenKind::VerticalBar),
        _ => None,
    };
    if let Some(kind) = structural {
        return Some((kind, first.to_string(), 1));
    }

    // 2. Type-cast prefix, only when a recognizable literal follows;
    //    otherwise the colon is ordinary string content
    if let Some(caps) = TYPE_PREFIX.captures(rest) {
        let whole = caps.get(0).unwrap();
        if match_literal(&rest[whole.end()..]).is_some() {
            let name = caps.get(1).unwrap().as_str();
            return Some((TokenKind::Type, name.to_string(), whole.end()));
        }
    }

    // 3. Operator keywords, only in call position
    if let Some(m) = CALL_KEYWORD.find(rest) {
        if rest[m.end()..].starts_with('(') {
            return Some((TokenKind::Operator, m.as_str().to_string(), m.end()));
        }
    }

    // 4. FIQL operators: keyword form first so `=eq=` beats the bare `=`
    if let Some(caps) = FIQL_KEYWORD.captures(rest) {
        let name = caps.get(1).unwrap().as_str();
        return Some((
            TokenKind::Operator,
            name.to_string(),
            caps.get(0).unwrap().end(),
        ));
    }
    if let Some(m) = SYMBOL_OPERATOR.find(rest) {
        return Some((TokenKind::Operator, m.as_str().to_string(), m.end()));
    }

    // 5. Literals
    if let Some((kind, len)) = match_literal(rest) {
        return Some((kind, rest[..len].to_string(), len));
    }

    // 6. String fallback: everything up to the next boundary. A boundary
    //    character that no operator recognizer claimed (a lone `!`) is
    //    consumed as a one-character string so the scan always advances.
    let len = rest
        .char_indices()
        .find(|&(_, c)| is_boundary(c))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    let len = if len == 0 { first.len_utf8() } else { len };
    Some((TokenKind::String, rest[..len].to_string(), len))
}

/// Try the literal recognizers, in priority order: constants, integer,
/// float, date-time, date. Each requires a token boundary after the match;
/// a calendar-invalid date fails here and downgrades to `STRING`.
fn match_literal(rest: &str) -> Option<(TokenKind, usize)> {
    if let Some(caps) = CONSTANT.captures(rest) {
        let whole = caps.get(0).unwrap();
        if boundary_at(rest, whole.end()) {
            let kind = match caps.get(1).unwrap().as_str() {
                "null" => TokenKind::Null,
                "true" => TokenKind::True,
                "false" => TokenKind::False,
                _ => TokenKind::Empty,
            };
            return Some((kind, whole.end()));
        }
    }

    if let Some(m) = INTEGER.find(rest) {
        if boundary_at(rest, m.end()) {
            return Some((TokenKind::Integer, m.end()));
        }
    }

    if let Some(m) = FLOAT.find(rest) {
        if boundary_at(rest, m.end()) {
            return Some((TokenKind::Float, m.end()));
        }
    }

    if let Some(caps) = DATETIME.captures(rest) {
        let whole = caps.get(0).unwrap();
        if boundary_at(rest, whole.end())
            && is_valid_date(field(&caps, 1), field(&caps, 2), field(&caps, 3))
            && is_valid_time(field(&caps, 4), field(&caps, 5), field(&caps, 6))
        {
            return Some((TokenKind::DateTime, whole.end()));
        }
    }

    if let Some(caps) = DATE.captures(rest) {
        let whole = caps.get(0).unwrap();
        if boundary_at(rest, whole.end())
            && is_valid_date(field(&caps, 1), field(&caps, 2), field(&caps, 3))
        {
            return Some((TokenKind::Date, whole.end()));
        }
    }

    None
}

fn field(caps: &regex::Captures<'_>, index: usize) -> u32 {
    // capture groups are fixed-width digit runs, parse cannot fail
    caps.get(index).unwrap().as_str().parse().unwrap_or(0)
}

fn is_leap_year(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_valid_date(year: u32, month: u32, day: u32) -> bool {
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month)
}

fn is_valid_time(hour: u32, minute: u32, second: u32) -> bool {
    hour <= 23 && minute <= 59 && second <= 59
}

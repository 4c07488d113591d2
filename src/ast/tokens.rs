use std::fmt;

/// The lexical class of a [`Token`].
///
/// The token's text lives on [`Token::value`]; kinds are plain tags so the
/// exact source spelling (sign, case, punctuation) survives lexing and
/// downstream casting stays lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Operator keyword or FIQL symbol
    ///
    /// Keywords (`and`, `or`, `not`, `eq`, `ne`, `lt`, `gt`, `le`, `ge`,
    /// `in`, `out`, `select`, `sort`, `limit`) lex as operators only in
    /// call position (`eq(`) or wrapped in a FIQL `=op=`; anywhere else the
    /// same text is a plain [`TokenKind::String`]. The symbols `=`, `==`,
    /// `!=`, `<>`, `<`, `>`, `<=`, `>=` are always operators.
    Operator,

    /// `(`
    OpenParen,

    /// `)`
    CloseParen,

    /// `,`
    Comma,

    /// `&` - AND glue between sibling expressions
    Ampersand,

    /// `|` - OR glue between sibling expressions
    VerticalBar,

    /// Type-cast prefix (`string:`, `date:`, ...)
    ///
    /// The token value is the bare type name without the colon. Emitted
    /// only when the text after the colon starts a recognizable literal;
    /// otherwise the colon is ordinary string content.
    Type,

    /// Any run of text no other recognizer claimed
    String,

    /// Signed decimal integer (`1`, `+1`, `-1`, `0`)
    Integer,

    /// Signed decimal float, optionally with exponent (`1.5`, `-.4e12`)
    Float,

    /// Calendar-valid `YYYY-MM-DD`
    Date,

    /// Calendar-valid `YYYY-MM-DDTHH:MM:SSZ` (case-sensitive `T` and `Z`)
    DateTime,

    /// `null` or `null()`
    Null,

    /// `true` or `true()`
    True,

    /// `false` or `false()`
    False,

    /// `empty` or `empty()`
    Empty,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Operator => "OPERATOR",
            TokenKind::OpenParen => "OPEN_PAREN",
            TokenKind::CloseParen => "CLOSE_PAREN",
            TokenKind::Comma => "COMMA",
            TokenKind::Ampersand => "AMPERSAND",
            TokenKind::VerticalBar => "VERTICAL_BAR",
            TokenKind::Type => "TYPE",
            TokenKind::String => "STRING",
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::Date => "DATE",
            TokenKind::DateTime => "DATETIME",
            TokenKind::Null => "NULL",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Empty => "EMPTY",
        };
        f.write_str(name)
    }
}

/// One lexed token: the exact substring matched, its kind, and its
/// character offset in the source string (for error messages).
///
/// Tokens are produced once by the lexer and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            value: value.into(),
            position,
        }
    }

    /// True if this is an `OPERATOR` token with the given spelling.
    pub fn is_operator(&self, name: &str) -> bool {
        self.kind == TokenKind::Operator && self.value == name
    }

    /// True if this token can serve as a literal value operand.
    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::String
                | TokenKind::Integer
                | TokenKind::Float
                | TokenKind::Date
                | TokenKind::DateTime
                | TokenKind::Null
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Empty
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.value)
    }
}

use crate::ast::tokens::TokenKind;

/// The inferred (or cast-overridden) kind of a literal [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Untyped text - the default when no other recognizer claimed the
    /// literal and no cast is present
    String,
    Integer,
    Float,
    Date,
    DateTime,
    Null,
    True,
    False,
    Empty,
}

impl ValueKind {
    /// Map a literal token kind to its value kind.
    ///
    /// Returns `None` for structural and operator tokens, which never form
    /// values.
    pub fn from_token_kind(kind: TokenKind) -> Option<ValueKind> {
        match kind {
            TokenKind::String => Some(ValueKind::String),
            TokenKind::Integer => Some(ValueKind::Integer),
            TokenKind::Float => Some(ValueKind::Float),
            TokenKind::Date => Some(ValueKind::Date),
            TokenKind::DateTime => Some(ValueKind::DateTime),
            TokenKind::Null => Some(ValueKind::Null),
            TokenKind::True => Some(ValueKind::True),
            TokenKind::False => Some(ValueKind::False),
            TokenKind::Empty => Some(ValueKind::Empty),
            _ => None,
        }
    }

    /// Map an explicit `type:` cast name to a value kind.
    ///
    /// Unknown names return `None`: the cast is still recorded on the
    /// value, but the lexed kind stands.
    pub fn from_cast_name(name: &str) -> Option<ValueKind> {
        match name {
            "string" => Some(ValueKind::String),
            "integer" => Some(ValueKind::Integer),
            "float" => Some(ValueKind::Float),
            "date" => Some(ValueKind::Date),
            "datetime" => Some(ValueKind::DateTime),
            _ => None,
        }
    }
}

/// A literal operand: the exact source text plus its kind and the explicit
/// `type:` cast prefix, when one was written.
///
/// The raw text is preserved byte-for-byte (sign, case, punctuation) so a
/// consumer can perform its own lossless conversion. A known cast name
/// overrides the lexed kind - `string:3` is a [`ValueKind::String`] whose
/// raw text happens to be `3`. This is a syntactic override, not a
/// coercion: the raw text is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub raw: String,
    pub kind: ValueKind,
    pub cast: Option<String>,
}

impl Value {
    pub fn new(raw: impl Into<String>, kind: ValueKind) -> Self {
        Value {
            raw: raw.into(),
            kind,
            cast: None,
        }
    }

    /// Build a value from a lexed literal with an explicit cast prefix.
    ///
    /// The kind override only happens for cast names that map to a literal
    /// kind; an unrecognized name is kept on `cast` for the consumer.
    pub fn with_cast(raw: impl Into<String>, lexed: ValueKind, cast: impl Into<String>) -> Self {
        let cast = cast.into();
        let kind = ValueKind::from_cast_name(&cast).unwrap_or(lexed);
        Value {
            raw: raw.into(),
            kind,
            cast: Some(cast),
        }
    }

    pub fn is_null(&self) -> bool {
        self.kind == ValueKind::Null
    }

    /// Get as boolean (only for true/false literals)
    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ValueKind::True => Some(true),
            ValueKind::False => Some(false),
            _ => None,
        }
    }

    /// Get as integer, parsing the raw text
    pub fn as_i64(&self) -> Option<i64> {
        match self.kind {
            ValueKind::Integer => self.raw.parse().ok(),
            _ => None,
        }
    }

    /// Get as float, parsing the raw text (integers widen)
    pub fn as_f64(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Integer | ValueKind::Float => self.raw.parse().ok(),
            _ => None,
        }
    }

    /// The string content of the value.
    ///
    /// Constant call forms (`true()`, `empty()`) normalize to their bare
    /// keyword; `empty` normalizes to the empty string.
    pub fn as_str(&self) -> &str {
        match self.kind {
            ValueKind::Empty => "",
            ValueKind::Null => "null",
            ValueKind::True => "true",
            ValueKind::False => "false",
            _ => &self.raw,
        }
    }
}

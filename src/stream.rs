use crate::ast::{Token, TokenKind};
use crate::parser::SyntaxError;

/// A forward-only cursor over an owned, immutable token buffer.
///
/// The cursor never moves backward: lookahead is done with [`peek`] /
/// [`peek_at`] instead of rewinding, and advancing past the end is an
/// idempotent no-op. Consuming where no token remains yields an explicit
/// end-of-stream [`SyntaxError`], never an out-of-bounds access.
///
/// [`peek`]: TokenStream::peek
/// [`peek_at`]: TokenStream::peek_at
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens, cursor: 0 }
    }

    /// The token under the cursor, or an end-of-stream error.
    pub fn current(&self) -> Result<&Token, SyntaxError> {
        self.peek().ok_or_else(|| SyntaxError::UnexpectedEof {
            expected: "a token".to_string(),
        })
    }

    /// The token under the cursor, without the error plumbing.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// Look ahead `offset` tokens past the cursor without consuming.
    pub fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.cursor + offset)
    }

    /// Advance the cursor one token. No-op past the end.
    pub fn advance(&mut self) {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
    }

    pub fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Consume and return the current token if its kind matches.
    ///
    /// The error names the expected kind and the actual token with its
    /// position, so callers can point into the source query.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                let token = token.clone();
                self.advance();
                Ok(token)
            }
            Some(token) => Err(SyntaxError::UnexpectedToken {
                expected: kind.to_string(),
                found: token.clone(),
            }),
            None => Err(SyntaxError::UnexpectedEof {
                expected: kind.to_string(),
            }),
        }
    }

    /// All tokens, for callers that want to inspect the raw lex result.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> TokenStream {
        TokenStream::new(vec![
            Token::new(TokenKind::String, "a", 0),
            Token::new(TokenKind::Operator, "=", 1),
            Token::new(TokenKind::Integer, "1", 2),
        ])
    }

    #[test]
    fn test_cursor_never_rewinds() {
        let mut s = stream();
        assert_eq!(s.current().unwrap().value, "a");
        s.advance();
        s.advance();
        s.advance();
        assert!(s.is_eof());
        s.advance(); // idempotent past the end
        assert!(s.is_eof());
        assert!(s.current().is_err());
    }

    #[test]
    fn test_expect_mismatch_reports_found_token() {
        let mut s = stream();
        let err = s.expect(TokenKind::Integer).unwrap_err();
        match err {
            SyntaxError::UnexpectedToken { expected, found } => {
                assert_eq!(expected, "INTEGER");
                assert_eq!(found.kind, TokenKind::String);
                assert_eq!(found.position, 0);
            }
            other => panic!("Expected UnexpectedToken, got {:?}", other),
        }
        // the failed expect must not consume
        assert_eq!(s.current().unwrap().value, "a");
    }

    #[test]
    fn test_peek_at_lookahead() {
        let s = stream();
        assert_eq!(s.peek_at(1).unwrap().value, "=");
        assert_eq!(s.peek_at(2).unwrap().value, "1");
        assert!(s.peek_at(3).is_none());
    }
}

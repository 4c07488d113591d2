//! CLI support for rql-parser
//!
//! Provides programmatic access to the `rql` binary's functionality for
//! embedding in other tools.

mod check;

pub use check::{CheckOptions, CheckResult, execute_check, execute_tokens};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Grammar violation in the query
    Syntax(crate::SyntaxError),
    /// Lexer invariant violation
    Lex(crate::LexError),
    /// JSON serialization error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No query provided
    NoQuery,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Syntax(e) => write!(f, "Syntax error: {}", e),
            CliError::Lex(e) => write!(f, "Lex error: {}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoQuery => {
                write!(f, "No query provided. Pass one as an argument or pipe it to stdin.")
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Syntax(e) => Some(e),
            CliError::Lex(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::NoQuery => None,
        }
    }
}

impl From<crate::SyntaxError> for CliError {
    fn from(e: crate::SyntaxError) -> Self {
        CliError::Syntax(e)
    }
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Lex(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

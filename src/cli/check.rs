//! Parse RQL queries and render the result

use super::CliError;
use crate::output::{to_json, tokens_to_json};
use crate::{parse, tokenize};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The RQL query to parse
    pub query: String,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't print the tree
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query parsed successfully, with its JSON rendering
    Parsed(serde_json::Value),
}

/// Parse a query and render its AST (or just confirm the syntax).
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let query = parse(&options.query)?;
    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }
    Ok(CheckResult::Parsed(to_json(&query)))
}

/// Lex a query and render the raw token stream, the debugging view for
/// "why did this text not lex as an operator".
pub fn execute_tokens(query: &str) -> Result<serde_json::Value, CliError> {
    let stream = tokenize(query)?;
    Ok(tokens_to_json(stream.tokens()))
}

pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod stream;
pub mod token_parser;

pub use ast::{
    ComparisonOp, Limit, MembershipOp, ParsedQuery, QueryNode, Select, Sort, SortDirection,
    SortField, Token, TokenKind, Value, ValueKind,
};
pub use lexer::{LexError, Lexer, tokenize};
pub use output::{to_json, to_json_string, to_json_string_pretty};
pub use parser::{MAX_NESTING_DEPTH, Parser, SyntaxError, parse};
pub use stream::TokenStream;
pub use token_parser::{TOKEN_PARSERS, TokenParser};

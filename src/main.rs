use clap::{Parser as ClapParser, Subcommand};
use rql_parser::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "rql")]
#[command(about = "Parse RQL/FIQL query strings into a typed query AST")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an RQL query and print its AST as JSON
    Check {
        /// The RQL query (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't print the tree
        #[arg(long)]
        syntax_only: bool,
    },

    /// Dump the token stream for an RQL query
    Tokens {
        /// The RQL query (reads from stdin if not provided)
        query: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            query,
            pretty,
            syntax_only,
        } => run_check(query, pretty, syntax_only),
        Commands::Tokens { query } => run_tokens(query),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Take the query from the argument, or from stdin when piped.
fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
        }
        None => Err(CliError::NoQuery),
    }
}

fn run_check(query: Option<String>, pretty: bool, syntax_only: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        query: read_query(query)?,
        pretty,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Parsed(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_tokens(query: Option<String>) -> Result<(), CliError> {
    let query = read_query(query)?;
    let output = cli::execute_tokens(&query)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

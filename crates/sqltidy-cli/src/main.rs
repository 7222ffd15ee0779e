//! sqltidy CLI
//!
//! Reads one SQL statement from an argument, a file, or stdin and prints
//! the beautified result.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

/// Deterministic SQL formatting for a single statement.
#[derive(Parser)]
#[command(name = "sqltidy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The SQL statement to format. Reads stdin when omitted.
    sql: Option<String>,

    /// Read the statement from a file instead.
    #[arg(short, long, conflicts_with = "sql")]
    file: Option<PathBuf>,

    /// Extra columns of indentation.
    #[arg(short, long, default_value_t = 0)]
    indent: usize,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::TRACE
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let sql = match (cli.sql, cli.file) {
        (Some(sql), _) => sql,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    debug!(bytes = sql.len(), "read statement");

    let parsed = sqltidy_core::parse(&sql)?;
    println!("{}", parsed.render_indented(cli.indent));
    Ok(())
}

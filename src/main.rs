use std::{env, path::PathBuf, str::FromStr, time::Instant};

use clap::Parser as _;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use tiny::{
    display_error,
    lexer::lexer::{tokenize, Lexer},
    Parser, TraceParser,
};

#[derive(clap::Parser, Debug)]
#[clap(name = "tiny", about = "Parse a TINY program and print its syntax tree.")]
struct Tiny {
    /// Path to the TINY source file
    source: PathBuf,

    /// Print the rules entered and exited instead of building a tree
    #[clap(short, long, default_value = "false", conflicts_with_all = ["format", "snippets"])]
    trace: bool,

    /// How to print the tree
    #[clap(short, long, value_enum, default_value = "list")]
    format: Format,

    /// Show the offending source line under each parse error
    #[clap(short, long, default_value = "false")]
    snippets: bool,

    /// Dump the token stream before parsing
    #[clap(long, default_value = "false")]
    tokens: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// One label per line, pre-order
    List,
    /// A single s-expression
    Sexpr,
}

fn main() -> anyhow::Result<()> {
    initialize_logging()?;

    let tiny = Tiny::parse();

    if tiny.tokens {
        let lexer = Lexer::from_path(&tiny.source).map_err(|err| anyhow::anyhow!(err.to_string()))?;
        let file_name = tiny
            .source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        for token in tokenize(lexer.source().to_string(), file_name) {
            token.debug();
        }
    }

    let start = Instant::now();

    if tiny.trace {
        let mut parser = TraceParser::from_path(&tiny.source).map_err(|err| anyhow::anyhow!(err.to_string()))?;
        for event in parser.program() {
            println!("{}", event);
        }
        info!(errors = parser.error_count(), elapsed = ?start.elapsed(), "Traced program");
        return Ok(());
    }

    let mut parser = Parser::from_path(&tiny.source).map_err(|err| anyhow::anyhow!(err.to_string()))?;
    debug!(path = %tiny.source.display(), len = parser.source_text().len(), "Read input file");

    let program = parser.program();
    info!(errors = parser.error_count(), elapsed = ?start.elapsed(), "Parsed program");

    for error in parser.diagnostics() {
        println!("{}", error);
        if tiny.snippets {
            print!("{}", display_error(error, parser.source_text()));
        }
    }
    println!("{}", parser.summary());

    match tiny.format {
        Format::List => {
            for label in program.to_string_list() {
                println!("{}", label);
            }
        }
        Format::Sexpr => println!("{}", program),
    }

    Ok(())
}

fn initialize_logging() -> anyhow::Result<()> {
    let env_filter = env::var("RUST_LOG").unwrap_or_default();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_str(&env_filter)?),
        )
        .init();

    Ok(())
}

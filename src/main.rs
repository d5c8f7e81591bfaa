use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use jet::{
    interpreter::evaluator::core::DEFAULT_MAX_DEPTH,
    lex,
    repl::{self, PROMPT, Session, SessionConfig},
};

/// jet is a small scripting language with first-class functions and
/// closures. Without arguments it starts an interactive session.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// A script to run instead of starting the REPL.
    file: Option<PathBuf>,

    /// Evaluate CODE instead of starting the REPL.
    #[arg(short = 'e', long = "eval", value_name = "CODE", conflicts_with = "file")]
    code: Option<String>,

    /// Print the parsed program before evaluating it.
    #[arg(long)]
    echo_ast: bool,

    /// Print the tokens of the script or CODE instead of evaluating it.
    #[arg(long)]
    tokens: bool,

    /// Maximum number of active function calls.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// The REPL prompt.
    #[arg(long, default_value = PROMPT)]
    prompt: String,
}

/// Installs a stderr subscriber when `JET_LOG` (or else `RUST_LOG`) is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let Ok(filter) = EnvFilter::try_from_env("JET_LOG").or_else(|_| EnvFilter::try_from_default_env())
    else {
        return;
    };

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)
                                                    .with_target(true)
                                                    .with_level(true))
                                  .with(filter)
                                  .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let source = match (&args.file, &args.code) {
        (Some(path), _) => match fs::read_to_string(path) {
            Ok(source) => Some(source),
            Err(error) => {
                eprintln!("Failed to read the input file '{}': {error}", path.display());
                return ExitCode::FAILURE;
            },
        },
        (None, Some(code)) => Some(code.clone()),
        (None, None) => None,
    };

    let config = SessionConfig { max_depth: args.max_depth,
                                 echo_ast:  args.echo_ast,
                                 prompt:    args.prompt, };

    let result = match source {
        Some(source) if args.tokens => dump_tokens(&source),
        Some(source) => run_source(&source, config),
        None if args.tokens => {
            eprintln!("--tokens needs a FILE or -e CODE");
            return ExitCode::from(2);
        },
        None => repl::start(io::stdin().lock(), io::stdout().lock(), config).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        },
    }
}

fn run_source(source: &str, config: SessionConfig) -> io::Result<bool> {
    let mut session = Session::new(config);
    let mut stdout = io::stdout().lock();
    let succeeded = session.execute(source, &mut stdout)?;
    stdout.flush()?;
    Ok(succeeded)
}

fn dump_tokens(source: &str) -> io::Result<bool> {
    let mut stdout = io::stdout().lock();
    for token in lex(source) {
        writeln!(stdout,
                 "{:<12} {:<16} {}",
                 token.kind.to_string(),
                 format!("{:?}", token.literal),
                 token.position)?;
    }
    Ok(true)
}

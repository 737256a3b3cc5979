//! # minnow
//!
//! The interactive shell of the minnow database engine.
//!
//! The engine is composed of multiple internal components organized under
//! the `/crates` directory of this workspace:
//!
//! - `/crates/storage`: slotted pages, heap files and heap tables.
//! - `/crates/sql`: the schema catalog and the DDL executor.
//!
//! This binary reads one statement line at a time from standard input,
//! parses it into the executor's statement nodes, and prints the resulting
//! rowset or message. `quit` (or end of input) terminates the session.

use crate::config::{ConfigError, EngineConfig};
use sql_exec::{ExecError, Executor};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

mod config;
mod parser;

#[derive(Debug, Error)]
enum ShellError {
    #[error("cannot prepare database environment at {}", path.display())]
    Env {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Exec(#[from] ExecError),
    #[error("cannot read from standard input")]
    Stdin { source: std::io::Error },
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: minnow <db-environment-dir>");
        std::process::exit(2);
    }

    if let Err(e) = run(Path::new(&args[1])) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(env_arg: &Path) -> Result<(), ShellError> {
    let env_dir = prepare_environment(env_arg)?;

    let engine_config = EngineConfig::load_or_default(&env_dir)?;
    let _logging_guard = init_logging(&engine_config.logs_dir(&env_dir));

    println!(
        "(minnow: running with database environment at {})",
        env_dir.display()
    );

    let mut executor: Executor = Executor::new(&env_dir)?;
    tracing::info!(env = %env_dir.display(), "session started");

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("SQL> ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| ShellError::Stdin { source: e })?;
        if read == 0 {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Case-fold before parsing; the whole language is lower-case.
        let query = line.to_lowercase();
        if query == "quit" {
            break;
        }

        match parser::parse_line(&query) {
            Ok(statements) => {
                for statement in statements {
                    match executor.execute(&statement) {
                        Ok(result) => println!("{result}"),
                        Err(e) => println!("Error: {e}"),
                    }
                }
            }
            Err(e) => {
                eprintln!("Given string is not a valid SQL query.");
                eprintln!("{e}");
            }
        }
    }

    tracing::info!("session ended");
    Ok(())
}

/// Creates the environment directory when absent and resolves it to an
/// absolute path.
fn prepare_environment(env_arg: &Path) -> Result<PathBuf, ShellError> {
    let env_error = |source| ShellError::Env {
        path: env_arg.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(env_arg).map_err(env_error)?;
    env_arg.canonicalize().map_err(env_error)
}

/// Sets up the logging for the shell: a compact console layer on stderr and
/// a daily-rolling JSON file layer under the log directory. The returned
/// guard must stay alive for the process lifetime.
fn init_logging(log_dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(log_dir, "minnow.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let file_layer = fmt::layer().with_writer(file_writer).json();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

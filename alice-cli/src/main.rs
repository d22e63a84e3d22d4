//! Alice CLI: run two-mode grid programs.
//!
//! Exit codes:
//! - 0: Program terminated with `@`
//! - 1: Usage or input error
//! - 2: Tick budget exhausted
//! - 3: Runtime error

mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "alice", version, about = "Run Alice programs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program file
    Run {
        file: PathBuf,
        #[command(flatten)]
        options: RunOptions,
        /// Arguments handed to the program
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run a program given inline
    Eval {
        source: String,
        #[command(flatten)]
        options: RunOptions,
        /// Arguments handed to the program
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop after N ticks (exit code 2)
    #[arg(long, value_name = "N")]
    pub max_ticks: Option<u64>,
    /// Seed for the random commands
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print the VM state to stderr when the run ends
    #[arg(long)]
    pub dump: bool,
    /// Print the VM state to stderr after every tick
    #[arg(long)]
    pub dump_each_tick: bool,
}

/// Log to stderr so that program output on stdout stays untouched.
/// `RUST_LOG` overrides the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };
    init_logging();

    let result = match &cli.command {
        Commands::Run {
            file,
            options,
            args,
        } => commands::run(file, options, args),
        Commands::Eval {
            source,
            options,
            args,
        } => commands::eval(source, options, args),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

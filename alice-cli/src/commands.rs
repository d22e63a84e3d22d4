//! CLI command implementations.

use crate::RunOptions;
use alice_common::Grid;
use alice_vm::{dump, Config, Outcome, VM};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Load a program file and run it.
pub fn run(file: &Path, options: &RunOptions, args: &[String]) -> Result<(), i32> {
    let source = fs::read_to_string(file).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", file.display());
        1
    })?;
    info!(file = %file.display(), "loaded program");
    execute(&source, options, args)
}

/// Run a program given as a string.
pub fn eval(source: &str, options: &RunOptions, args: &[String]) -> Result<(), i32> {
    execute(source, options, args)
}

fn config_from(options: &RunOptions) -> Config {
    Config {
        max_ticks: options.max_ticks,
        seed: options.seed,
    }
}

/// Wire stdin/stdout to a fresh VM, run it, and map the outcome to an
/// exit code.
fn execute(source: &str, options: &RunOptions, args: &[String]) -> Result<(), i32> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = BufWriter::new(io::stdout().lock());

    let result = {
        let mut vm = VM::new(
            Grid::parse(source),
            &mut input,
            &mut output,
            config_from(options),
        )
        .with_args(args.iter().cloned());

        let result = if options.dump_each_tick {
            vm.run_with_observer(|vm| eprint!("{}", dump::render(vm)))
        } else {
            vm.run()
        };
        if options.dump {
            eprint!("{}", dump::render(&vm));
        }
        result
    };

    if let Err(e) = output.flush() {
        eprintln!("error: cannot write output: {e}");
        return Err(1);
    }

    match result {
        Ok(Outcome::Terminated) => Ok(()),
        Ok(Outcome::TickLimitReached) => {
            eprintln!(
                "error: tick budget of {} exhausted",
                options.max_ticks.unwrap_or_default()
            );
            Err(2)
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(3)
        }
    }
}

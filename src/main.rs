use clap::{Parser, Subcommand};
use log::error;
use ssa_debugger::debugger::{Debugger, DebuggerConfig};
use ssa_debugger::executor::{self, LoadError};
use ssa_debugger::ssa::{BuilderMode, Program};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[clap(
    name = "ssa-debugger",
    about = "Builds the SSA symbol table for type-checked packages and steps through recorded executions"
)]
struct Arguments {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print each package's member inventory.
    Inventory {
        /// Type-checked compilation units (JSON).
        #[clap(required = true)]
        units: Vec<PathBuf>,

        /// Check every function's invariants after construction.
        #[clap(long)]
        sanity: bool,
    },

    /// Replay a recorded trace under the interactive debugger.
    Replay {
        #[clap(required = true)]
        units: Vec<PathBuf>,

        /// Recorded execution trace (JSON).
        #[clap(short, long)]
        trace: PathBuf,

        /// Omit block and instruction coordinates from stop banners.
        #[clap(long)]
        terse: bool,

        #[clap(long)]
        sanity: bool,

        /// Start running instead of stopping at the first event.
        #[clap(long)]
        run: bool,
    },
}

fn build_program(units: &[PathBuf], sanity: bool) -> Result<Program, LoadError> {
    let mut mode = BuilderMode::LOG_PACKAGES;
    if sanity {
        mode |= BuilderMode::SANITY_CHECK_FUNCTIONS;
    }
    let mut program = Program::new(mode);
    program.create_packages(executor::load_units(units)?)?;
    Ok(program)
}

fn run(args: Arguments) -> Result<i32, LoadError> {
    match args.command {
        Command::Inventory { units, sanity } => {
            let program = build_program(&units, sanity)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for pkg in program.all_packages() {
                pkg.dump_to(&mut out)?;
            }
            out.flush()?;
            Ok(0)
        }
        Command::Replay {
            units,
            trace,
            terse,
            sanity,
            run,
        } => {
            let program = build_program(&units, sanity)?;
            let trace = executor::load_trace(&trace)?;
            let config = DebuggerConfig {
                terse,
                stop_on_entry: !run,
                ..DebuggerConfig::default()
            };
            let stdin = io::stdin();
            let mut debugger = Debugger::new(&program, stdin.lock(), io::stdout(), config);
            let code = executor::run_replay(&program, trace, &mut debugger)?;
            Ok(code.unwrap_or(0))
        }
    }
}

fn main() {
    env_logger::init();

    let args = Arguments::parse();
    match run(args) {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            process::exit(1);
        }
    }
}

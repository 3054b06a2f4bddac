//! # GPCD
//!
//! Monitor for the GPCD terminal computer.
//!

use clap::Parser;
use gpcd::lang::Options;
use std::path::PathBuf;
use tracing::Level;

mod term;

/// Assemble and run GPCD programs
#[derive(Parser, Debug)]
#[command(name = "gpcd", version)]
struct Args {
    /// Assembly source to load
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Run FILE until it halts and print the registers, without a prompt
    #[arg(long, requires = "file")]
    run: bool,

    /// Step budget for `--run` and the monitor's `run` command
    #[arg(long, default_value_t = 5000)]
    cycles: usize,

    /// Assemble in two passes so labels may be used before they are declared
    #[arg(long)]
    forward_labels: bool,

    /// Only `0x` prefixed numbers are hexadecimal
    #[arg(long)]
    strict_radix: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Log every dispatched instruction
    #[arg(long)]
    trace: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    });
    let config = term::Config {
        file: args.file,
        batch: args.run,
        cycles: args.cycles,
        options: Options::new()
            .forward_labels(args.forward_labels)
            .strict_radix(args.strict_radix),
    };
    std::process::exit(term::main(config));
}

fn init_tracing(level: Level) {
    let _ = tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .try_init();
}


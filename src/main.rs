//! Command-line entry point for the pipeline simulator.

use std::fs;
use std::io::{self, BufReader};
use std::process;

use clap::Parser;

use rv32i_pipesim::config::Config;
use rv32i_pipesim::sim::Simulator;
use rv32i_pipesim::sim::Termination;

/// Run a memory image through the five-stage pipeline and print its
/// return value.
#[derive(Parser, Debug)]
#[command(name = "rv32i-pipesim", author, version, about)]
struct Args {
    /// Memory image to load (text format: `@addr` directives plus
    /// whitespace-separated hex bytes). Reads stdin if omitted.
    #[arg(short, long)]
    image: Option<String>,

    /// TOML file overriding the default `Config`.
    #[arg(short, long)]
    config: Option<String>,

    /// Enable per-cycle tracing regardless of what the config says.
    #[arg(long)]
    trace: bool,

    /// Override `Config::clock_limit` (0 = unlimited).
    #[arg(long)]
    clock_limit: Option<u64>,

    /// Use ABI register names (`a0`, `sp`, ...) in dumps instead of
    /// numeric ones.
    #[arg(long)]
    abi_names: bool,

    /// Print the statistics summary on exit.
    #[arg(long)]
    stats: bool,
}

fn main() {
    let args = Args::parse();

    let filter = if args.trace { "trace" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_target(false)
        .init();

    let mut config = match &args.config {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => match Config::from_toml_str(&text) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("error: invalid config {path}: {err}");
                    process::exit(2);
                }
            },
            Err(err) => {
                eprintln!("error: cannot read config {path}: {err}");
                process::exit(2);
            }
        },
        None => Config::default(),
    };

    if let Some(limit) = args.clock_limit {
        config.clock_limit = limit;
    }
    if args.abi_names {
        config.use_abi_names = true;
    }

    let mut simulator = match &args.image {
        Some(path) => match fs::File::open(path) {
            Ok(file) => match Simulator::from_image(BufReader::new(file), config) {
                Ok(simulator) => simulator,
                Err(err) => {
                    eprintln!("error: cannot load image {path}: {err}");
                    process::exit(2);
                }
            },
            Err(err) => {
                eprintln!("error: cannot open image {path}: {err}");
                process::exit(2);
            }
        },
        None => match Simulator::from_image(BufReader::new(io::stdin().lock()), config) {
            Ok(simulator) => simulator,
            Err(err) => {
                eprintln!("error: cannot read image from stdin: {err}");
                process::exit(2);
            }
        },
    };

    match simulator.run() {
        Ok(Termination::Retired(code)) => {
            if args.stats {
                simulator.stats().print();
            }
            process::exit(i32::from(code));
        }
        Ok(Termination::ClockLimitReached) => {
            eprintln!("clock limit reached without retirement");
            if args.stats {
                simulator.stats().print();
            }
            let code = (simulator.registers().read(10) & 0xff) as u8;
            process::exit(i32::from(code));
        }
        Err(err) => {
            eprintln!("fatal: {err}");
            process::exit(1);
        }
    }
}

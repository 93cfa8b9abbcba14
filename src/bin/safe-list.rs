//! Safe List - Command Line Interface
//!
//! Runs the demonstration flow against stdin and stdout. The flow itself takes
//! no options; only log verbosity can be chosen. Arguments that are not
//! recognised are reported and the flow runs with its fixed settings anyway.

use clap::error::ErrorKind;
use clap::Parser;
use safe_list::{demo, logging, DemoConfig};
use std::ffi::OsString;
use std::io;

#[derive(Parser, Debug)]
#[command(name = "safe-list")]
#[command(about = "Owned linked list, bounded line read and scoped heap block demo", long_about = None)]
#[command(version)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// What the command line asked for
#[derive(Debug)]
enum Invocation {
    /// Run the flow; `rejected` holds the reason if the arguments were ignored
    Run {
        verbose: u8,
        rejected: Option<String>,
    },
    /// Print help or version text and stop
    Print(clap::Error),
}

fn interpret<I, T>(argv: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(argv) {
        Ok(args) => Invocation::Run {
            verbose: args.verbose,
            rejected: None,
        },
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Print(e)
        }
        Err(e) => Invocation::Run {
            verbose: 0,
            rejected: Some(e.to_string().lines().next().unwrap_or_default().to_string()),
        },
    }
}

fn main() {
    let (verbose, rejected) = match interpret(std::env::args_os()) {
        Invocation::Run { verbose, rejected } => (verbose, rejected),
        Invocation::Print(e) => {
            let _ = e.print();
            return;
        }
    };

    if let Err(e) = logging::init(verbose) {
        eprintln!("Error installing logger: {}", e);
    }
    if let Some(reason) = rejected {
        log::warn!("ignoring command line ({}); running with defaults", reason);
    }

    let config = DemoConfig::default();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    // The flow has no failing exit status; problems are only reported
    match demo::run(&config, &mut input, &mut output) {
        Ok(report) => log::debug!("{:?}", report),
        Err(e) => log::error!("Error writing output: {}", e),
    }
}

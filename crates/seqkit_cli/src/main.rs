use std::env;
use std::process::ExitCode;

use seqkit_cli::{execute, load_config, parse_args, CliError, Command, HELP};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SEQKIT_LOG";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::Help => {
            print!("{HELP}");
            Ok(())
        }
        Command::Run(run_args) => {
            init_tracing(run_args.verbose);
            let config = load_config(run_args.config.as_deref())?;
            let output = execute(&run_args, &config)?;
            if !output.is_empty() {
                println!("{output}");
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

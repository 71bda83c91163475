use std::path::PathBuf;

use num_bigint::BigInt;
use serde::Serialize;

use seqkit::Pipeline;

use crate::config::{OutputFormat, SeqkitToml};
use crate::CliError;

pub const HELP: &str = "\
usage: seqkit run <source> [<stage>...] [--format json|lines] [--config <path>] [--verbose]
       seqkit help

sources:
  fib:N             first N Fibonacci numbers
  primes:N          first N primes
  primes-upto:N     primes up to and including N
  values:a,b,c      literal integers

stages:
  filter:even|odd|prime|gt=N|lt=N|div=N
  map:square|double|negate|add=N|digit-sum
  sort:asc|desc|digit-sum|last-digit
  reverse

environment:
  SEQKIT_CONFIG     path to seqkit.toml
  SEQKIT_LOG        tracing filter, e.g. seqkit=debug
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(RunArgs),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    pub source: Option<String>,
    pub stages: Vec<String>,
    pub format: Option<OutputFormat>,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

#[derive(Serialize)]
struct Report {
    source: String,
    stages: Vec<String>,
    values: Vec<String>,
}

pub fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };
    match command.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "run" => parse_run_args(rest).map(Command::Run),
        other => Err(CliError::Usage(format!(
            "unknown command {other}, see `seqkit help`"
        ))),
    }
}

fn parse_run_args(args: &[String]) -> Result<RunArgs, CliError> {
    let mut out = RunArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--format" => {
                let value = flag_value(&mut iter, "--format")?;
                out.format = Some(value.parse()?);
            }
            "--config" => {
                out.config = Some(PathBuf::from(flag_value(&mut iter, "--config")?));
            }
            "-v" | "--verbose" => out.verbose = true,
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown flag {flag}")));
            }
            positional if out.source.is_none() => out.source = Some(positional.to_string()),
            positional => out.stages.push(positional.to_string()),
        }
    }
    Ok(out)
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a String, CliError> {
    iter.next()
        .ok_or_else(|| CliError::Usage(format!("{flag} expects a value")))
}

/// Runs the pipeline described by `args` and renders its output.
pub fn execute(args: &RunArgs, config: &SeqkitToml) -> Result<String, CliError> {
    let pipeline = Pipeline::parse(args.source.as_deref(), &args.stages)?;
    // Missing arguments outrank the configured limit.
    if let Some(bound) = pipeline.validate()?.bound() {
        let max = config.limits.max_bound;
        if bound > max {
            return Err(CliError::BoundTooLarge { bound, max });
        }
    }
    let values = pipeline.run()?;
    tracing::debug!(count = values.len(), "pipeline finished");
    let format = args.format.unwrap_or(config.output.format);
    render(&pipeline, &values, format, config.output.pretty)
}

pub fn render(
    pipeline: &Pipeline,
    values: &[BigInt],
    format: OutputFormat,
    pretty: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Lines => Ok(values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let report = Report {
                source: pipeline
                    .source()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                stages: pipeline.stages().iter().map(ToString::to_string).collect(),
                values: values.iter().map(ToString::to_string).collect(),
            };
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            Ok(json)
        }
    }
}

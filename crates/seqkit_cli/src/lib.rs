mod cli;
mod config;

pub use cli::{execute, parse_args, render, Command, RunArgs, HELP};
pub use config::{
    find_seqkit_toml, load_config, load_config_from, read_seqkit_toml, LimitsConfig,
    OutputConfig, OutputFormat, SeqkitToml, CONFIG_ENV, CONFIG_FILE,
};

use seqkit::SeqError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Seq(#[from] SeqError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("{0}")]
    Usage(String),
    #[error("bound {bound} exceeds max_bound {max}")]
    BoundTooLarge { bound: i64, max: i64 },
}

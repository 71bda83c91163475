use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::CliError;

pub const CONFIG_FILE: &str = "seqkit.toml";
pub const CONFIG_ENV: &str = "SEQKIT_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One value per line.
    Lines,
    /// A single JSON object with the source, stages and values.
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(text: &str) -> Result<Self, CliError> {
        match text {
            "lines" => Ok(OutputFormat::Lines),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::Usage(format!(
                "--format expects json or lines, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeqkitToml {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: OutputFormat,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            pretty: default_pretty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    /// Largest `count` or maximum a generator source may ask for.
    #[serde(default = "default_max_bound")]
    pub max_bound: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_bound: default_max_bound(),
        }
    }
}

fn default_format() -> OutputFormat {
    OutputFormat::Lines
}

fn default_pretty() -> bool {
    true
}

fn default_max_bound() -> i64 {
    100_000
}

pub fn read_seqkit_toml(path: &Path) -> Result<SeqkitToml, CliError> {
    let text = std::fs::read_to_string(path)?;
    let config: SeqkitToml = toml::from_str(&text)
        .map_err(|err| CliError::Config(format!("failed to parse {}: {err}", path.display())))?;
    if config.limits.max_bound < 1 {
        return Err(CliError::Config(format!(
            "{}: limits.max_bound must be at least 1",
            path.display()
        )));
    }
    Ok(config)
}

/// Looks for `seqkit.toml` in `start` and each of its parents.
pub fn find_seqkit_toml(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

/// Resolves the config for this process: `explicit`, then `$SEQKIT_CONFIG`,
/// then a `seqkit.toml` above the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<SeqkitToml, CliError> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let cwd = std::env::current_dir()?;
    load_config_from(explicit, from_env.as_deref(), &cwd)
}

pub fn load_config_from(
    explicit: Option<&Path>,
    from_env: Option<&Path>,
    cwd: &Path,
) -> Result<SeqkitToml, CliError> {
    let path = match explicit.or(from_env) {
        Some(path) => Some(path.to_path_buf()),
        None => find_seqkit_toml(cwd),
    };
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            read_seqkit_toml(&path)
        }
        None => {
            tracing::debug!("no {CONFIG_FILE} found, using defaults");
            Ok(SeqkitToml::default())
        }
    }
}

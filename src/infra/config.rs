use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisConfig;
use crate::cli::{AppContext, InitArgs, OutputFormat};

/// File names probed in the working directory, first match wins
pub const CONFIG_FILES: [&str; 4] =
    ["plagcheck.toml", "plagcheck.yaml", "plagcheck.json", ".plagcheck.toml"];

/// Environment prefix; nested keys use `__`, e.g. `PLAGCHECK__ANALYSIS__NGRAM_SIZE=4`
pub const ENV_PREFIX: &str = "PLAGCHECK";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Metric constants, weights and verdict bands
    pub analysis: AnalysisConfig,

    /// Default output settings
    pub output: OutputConfig,

    /// Default batch settings
    pub batch: BatchConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig
{
    pub format: OutputFormat,
    /// Longest-common snippet is cut to this many chars in text/table output
    pub snippet_chars: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig
{
    /// Token sequences kept in memory for documents reused across pairs
    pub cache_entries: u64,
}

impl Default for OutputConfig
{
    fn default() -> Self
    {
        Self { format: OutputFormat::Text, snippet_chars: 240 }
    }
}

impl Default for BatchConfig
{
    fn default() -> Self
    {
        Self { cache_entries: 10_000 }
    }
}

pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

/// Load configuration from the first config file found in `dir`, then the environment
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    for name in &CONFIG_FILES
    {
        let path = dir.join(name);
        if path.exists()
        {
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    // Add environment variables with PLAGCHECK__ prefix
    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use lexicard_config::Config;

/// Config from `path` when given, defaults with environment overrides otherwise.
///
/// Credentials left empty in the file are still taken from the environment.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No config file, using defaults and environment");
        return Ok(Config::new());
    };

    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("Can't open config {}", path.display()))?;
    let mut config: Config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid config {}", path.display()))?;

    config.oxford = config.oxford.with_env_credentials();
    Ok(config)
}

/// Write the default config to `path` unless a file is already there
pub fn init_config(path: &Path) -> anyhow::Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&Config::default())?)?;
    tracing::info!("Created default config at {}", path.display());
    Ok(true)
}

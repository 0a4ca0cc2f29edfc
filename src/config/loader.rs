use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::Config;
use crate::error::Error;

/// Load and validate config from YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, Error> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("reading {} failed: {e}", path.display())))?;
    parse_config(&raw)
}

pub fn parse_config(content: &str) -> Result<Config, Error> {
    let expanded = expand_env_vars(content)?;
    let config: Config = serde_yaml::from_str(&expanded).map_err(|e| {
        error!("parse config error: {}", e);
        Error::Config(format!("invalid config format: {e}"))
    })?;

    debug!("validating config ...");
    config.validate()?;
    Ok(config)
}

/// Replaces `${VAR}` and `${VAR:default}` with environment values.
fn expand_env_vars(input: &str) -> Result<String, Error> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")
        .map_err(|e| Error::Config(e.to_string()))?;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    });
    Ok(expanded.into_owned())
}

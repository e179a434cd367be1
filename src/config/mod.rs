//! Optional config file merged beneath CLI flags.
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::args::{FuzzerArgs, HttpMethod};
use crate::error::{AppResult, ConfigError};

#[cfg(test)]
mod tests;

/// Config filenames checked when no explicit `--config` path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["apifuzz.toml", "apifuzz.json"];

/// Keys accepted in `apifuzz.toml` / `apifuzz.json`. CLI flags win over
/// config values.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub file: Option<String>,
    pub url: Option<String>,
    pub method: Option<String>,
    pub attempts: Option<NonZeroU32>,
    pub verbose: Option<bool>,
    pub concurrency: Option<NonZeroUsize>,
    pub strict_methods: Option<bool>,
}

/// Loads the config file, falling back to the default filenames in the
/// working directory when no explicit path is given.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    if let Some(path) = path {
        return load_config_file(Path::new(path)).map(Some);
    }
    for candidate in DEFAULT_CONFIG_FILES {
        let candidate = Path::new(candidate);
        if candidate.exists() {
            return load_config_file(candidate).map(Some);
        }
    }
    Ok(None)
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let text = std::fs::read_to_string(path).map_err(|err| ConfigError::ReadConfig {
        path: path.to_path_buf(),
        source: err,
    })?;
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ConfigError::MissingExtension)?;
    let config = match ext.to_ascii_lowercase().as_str() {
        "toml" => toml::from_str(&text).map_err(|err| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source: err,
        })?,
        "json" => serde_json::from_str(&text).map_err(|err| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source: err,
        })?,
        other => {
            return Err(ConfigError::UnsupportedExtension {
                ext: other.to_owned(),
            }
            .into());
        }
    };
    Ok(config)
}

/// Fills CLI gaps from the config file. Boolean flags are or-ed so a config
/// cannot switch off a flag the user passed.
///
/// # Errors
///
/// Returns an error when the config `method` value is not GET or POST.
pub fn apply_config(args: &mut FuzzerArgs, config: &ConfigFile) -> AppResult<()> {
    if args.file.is_none() {
        args.file.clone_from(&config.file);
    }
    if args.url.is_none() {
        args.url.clone_from(&config.url);
    }
    if args.method.is_none()
        && let Some(method) = config.method.as_deref()
    {
        let parsed = HttpMethod::from_str(method)
            .map_err(|err| ConfigError::InvalidMethod { source: err })?;
        args.method = Some(parsed);
    }
    if args.attempts.is_none() {
        args.attempts = config.attempts;
    }
    if args.concurrency.is_none() {
        args.concurrency = config.concurrency;
    }
    if config.verbose == Some(true) {
        args.verbose = true;
    }
    if config.strict_methods == Some(true) {
        args.strict_methods = true;
    }
    Ok(())
}

use super::{ConfigFile, apply_config, load_config_file};
use clap::Parser;
use tempfile::tempdir;

use crate::args::{FuzzerArgs, HttpMethod};

fn bare_args() -> Result<FuzzerArgs, String> {
    FuzzerArgs::try_parse_from(["apifuzz"]).map_err(|err| err.to_string())
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("apifuzz.toml");
    let content = r#"
url = "http://localhost:3000/search"
method = "get"
attempts = 40
verbose = true
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.url.as_deref() != Some("http://localhost:3000/search") {
        return Err("Unexpected url".to_owned());
    }
    if config.attempts.map(std::num::NonZeroU32::get) != Some(40) {
        return Err("Unexpected attempts".to_owned());
    }
    if config.verbose != Some(true) {
        return Err("Unexpected verbose".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("apifuzz.json");
    let content = r#"{ "file": "endpoints.txt", "concurrency": 4 }"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.file.as_deref() != Some("endpoints.txt") {
        return Err("Unexpected file".to_owned());
    }
    if config.concurrency.map(std::num::NonZeroUsize::get) != Some(4) {
        return Err("Unexpected concurrency".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_extension_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("apifuzz.yaml");
    std::fs::write(&path, "url: x").map_err(|err| format!("write failed: {}", err))?;

    if load_config_file(&path).is_ok() {
        return Err("YAML must be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn config_fills_gaps_but_cli_wins() -> Result<(), String> {
    let mut args =
        FuzzerArgs::try_parse_from(["apifuzz", "-n", "5"]).map_err(|err| err.to_string())?;
    let config = ConfigFile {
        url: Some("http://cfg.test".to_owned()),
        method: Some("post".to_owned()),
        attempts: std::num::NonZeroU32::new(9),
        ..ConfigFile::default()
    };

    apply_config(&mut args, &config).map_err(|err| err.to_string())?;

    if args.url.as_deref() != Some("http://cfg.test") {
        return Err("Config url must fill the gap".to_owned());
    }
    if args.method != Some(HttpMethod::Post) {
        return Err("Config method must fill the gap".to_owned());
    }
    if args.attempts.map(std::num::NonZeroU32::get) != Some(5) {
        return Err("CLI attempts must win over config".to_owned());
    }
    Ok(())
}

#[test]
fn invalid_config_method_fails() -> Result<(), String> {
    let mut args = bare_args()?;
    let config = ConfigFile {
        method: Some("delete".to_owned()),
        ..ConfigFile::default()
    };
    if apply_config(&mut args, &config).is_ok() {
        return Err("DELETE must be rejected".to_owned());
    }
    Ok(())
}

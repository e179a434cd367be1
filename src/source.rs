//! Endpoint sources: file-backed lists and single ad-hoc targets.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};
use url::Url;

use crate::args::HttpMethod;
use crate::error::SourceError;

/// One (URL, method) pair to fuzz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub url: String,
    pub method: HttpMethod,
}

/// Ordered list of targets for one run. The engine borrows it read-only.
#[derive(Debug)]
pub struct EndpointSource {
    targets: Vec<Target>,
}

impl EndpointSource {
    /// Loads targets from a UTF-8 text file, one `url,method` record per
    /// line. The first comma splits the record; the method token ends at the
    /// first run of whitespace after it, so trailing columns are ignored.
    /// Both fields are trimmed. Blank lines and lines missing either field
    /// are skipped silently; records naming a method outside GET/POST are
    /// skipped with a warning, or abort the load in strict mode.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::SourceUnavailable`] when the file cannot be
    /// read, [`SourceError::NoTargets`] when no line yields a usable target,
    /// and [`SourceError::UnsupportedMethod`] for a bad method in strict
    /// mode.
    pub fn from_file(path: &Path, strict_methods: bool) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|err| SourceError::SourceUnavailable {
            path: path.to_path_buf(),
            source: err,
        })?;
        let reader = BufReader::new(file);

        let mut targets = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|err| SourceError::SourceUnavailable {
                path: path.to_path_buf(),
                source: err,
            })?;
            match parse_line(&line) {
                Ok(Some(target)) => targets.push(target),
                Ok(None) => {}
                Err(err) => {
                    if strict_methods {
                        return Err(err);
                    }
                    warn!("Skipping endpoint: {}", err);
                }
            }
        }

        if targets.is_empty() {
            return Err(SourceError::NoTargets {
                path: path.to_path_buf(),
            });
        }
        debug!(
            "Loaded {} target(s) from '{}'.",
            targets.len(),
            path.display()
        );
        Ok(Self { targets })
    }

    /// Builds a source around one ad-hoc target.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidTarget`] when the URL is empty or does
    /// not parse as an absolute URL.
    pub fn single(url: &str, method: HttpMethod) -> Result<Self, SourceError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(SourceError::InvalidTarget {
                reason: "URL must not be empty".to_owned(),
            });
        }
        if let Err(err) = Url::parse(url) {
            return Err(SourceError::InvalidTarget {
                reason: format!("URL '{}' does not parse: {}", url, err),
            });
        }
        Ok(Self {
            targets: vec![Target {
                url: url.to_owned(),
                method,
            }],
        })
    }

    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }
}

/// Parses one endpoint record. `Ok(None)` means the line carries no usable
/// record and is skipped.
fn parse_line(line: &str) -> Result<Option<Target>, SourceError> {
    let Some((url_part, method_part)) = line.split_once(',') else {
        return Ok(None);
    };
    let url = url_part.trim();
    if url.is_empty() {
        return Ok(None);
    }
    let Some(method_token) = method_part.split_whitespace().next() else {
        return Ok(None);
    };
    match HttpMethod::from_str(method_token) {
        Ok(method) => Ok(Some(Target {
            url: url.to_owned(),
            method,
        })),
        Err(_) => Err(SourceError::UnsupportedMethod {
            url: url.to_owned(),
            method: method_token.to_owned(),
        }),
    }
}

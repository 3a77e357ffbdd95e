//! minnow_options: minnow.json parsing and session options.
//!
//! Session options come from a `minnow.json` file: the path passed with
//! `--config`, else `minnow.json` in the working directory, else the defaults.
//! Command-line flags are applied on top by the front end.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "minnow.json";

/// Options for one interactive session or file run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SessionOptions {
    /// Print the syntax tree of every submission.
    pub show_tree: bool,
    /// Print the bound tree of every submission.
    pub show_program: bool,
    /// Seed for `rnd`; unseeded sessions draw from the OS.
    pub seed: Option<u64>,
    /// How results and diagnostics are written.
    pub format: OutputFormat,
    /// Use ANSI colors in text output.
    pub color: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            show_tree: false,
            show_program: false,
            seed: None,
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// Output format of the front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Failure to read, parse or write a `minnow.json` file.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid options in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },
}

/// Parse session options from JSON text. Missing fields take their defaults.
pub fn parse_options(content: &str) -> Result<SessionOptions, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse a session options file.
pub fn parse_options_file(path: &Path) -> Result<SessionOptions, OptionsError> {
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_options(&content).map_err(|source| OptionsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The options file that applies: `explicit` if given, else `minnow.json`
/// in `dir` when it exists.
pub fn find_options_file(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let candidate = dir.join(CONFIG_FILE_NAME);
            candidate.is_file().then_some(candidate)
        }
    }
}

/// Load the options that apply in `dir`. An explicit path must exist.
pub fn load_options(explicit: Option<&Path>, dir: &Path) -> Result<SessionOptions, OptionsError> {
    match find_options_file(explicit, dir) {
        Some(path) => {
            let options = parse_options_file(&path)?;
            debug!(path = %path.display(), "loaded session options");
            Ok(options)
        }
        None => Ok(SessionOptions::default()),
    }
}

/// Write the default options to `path`. Refuses to overwrite.
pub fn write_default_options(path: &Path) -> Result<(), OptionsError> {
    if path.exists() {
        return Err(OptionsError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    let json = serde_json::to_string_pretty(&SessionOptions::default()).map_err(|source| OptionsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json + "\n").map_err(|source| OptionsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SessionOptions::default();
        assert!(!options.show_tree);
        assert!(!options.show_program);
        assert_eq!(options.seed, None);
        assert_eq!(options.format, OutputFormat::Text);
        assert!(options.color);
    }

    #[test]
    fn test_parse_partial() {
        let options = parse_options(r#"{ "showTree": true, "seed": 42 }"#).unwrap();
        assert!(options.show_tree);
        assert_eq!(options.seed, Some(42));
        assert!(options.color);
    }

    #[test]
    fn test_parse_format() {
        let options = parse_options(r#"{ "format": "json", "color": false }"#).unwrap();
        assert_eq!(options.format, OutputFormat::Json);
        assert!(!options.color);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(parse_options(r#"{ "showTrees": true }"#).is_err());
    }
}

//! Session configuration and input script loading.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use skirmish_core::config::SessionConfig;

use crate::script::InputScript;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {path}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a session configuration. Omitted fields take their defaults.
pub fn parse_session_config(text: &str) -> Result<SessionConfig, toml::de::Error> {
    toml::from_str(text)
}

pub fn load_session_config(path: &Path) -> Result<SessionConfig, LoadError> {
    let text = read(path)?;
    parse_session_config(&text).map_err(|source| LoadError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_script(path: &Path) -> Result<InputScript, LoadError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

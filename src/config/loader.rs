//! TOML configuration file loading.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Load and deserialize a TOML config file.
///
/// A missing file deserializes from empty TOML, so every field falls back to
/// its `#[serde(default)]`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read, and
/// [`ConfigError::InvalidSyntax`] if it does not match the schema.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    parse_config(&content).map_err(|message| ConfigError::InvalidSyntax {
        path: path.to_path_buf(),
        message,
    })
}

/// Deserialize TOML text, returning the parser's message on failure.
///
/// # Errors
///
/// Returns the TOML error message if `content` does not match `T`.
pub fn parse_config<T: DeserializeOwned>(content: &str) -> Result<T, String> {
    toml::from_str(content).map_err(|e| e.message().to_string())
}

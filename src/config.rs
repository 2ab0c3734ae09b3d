use crate::error::{ConfigError, Error, Result};
use crate::rdf::vocab;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "podd.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub artifact: ArtifactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/podd".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Ontologies imported by every new artifact
    #[serde(default = "default_imports")]
    pub imports: Vec<String>,
}

fn default_imports() -> Vec<String> {
    vocab::DEFAULT_IMPORTS.iter().map(|s| s.to_string()).collect()
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            imports: default_imports(),
        }
    }
}

impl Config {
    /// Load config from a TOML file, returns defaults if the file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| {
            Error::Config(ConfigError::ReadFailed {
                path: path.display().to_string(),
                source,
            })
        })?;

        toml::from_str(&contents).map_err(|e| {
            Error::Config(ConfigError::ParseFailed {
                path: path.display().to_string(),
                details: e.to_string(),
            })
        })
    }
}

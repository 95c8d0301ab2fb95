//! Job configuration file support for cleaning runs

use anyhow::{Context, Result};
use eduscrub_core::response_time::DEFAULT_MAX_SECONDS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete cleaning job configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub cleaning: CleaningConfig,
}

/// Input file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

/// Output file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

/// Knobs for the cleaning stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    #[serde(default = "default_max_seconds")]
    pub max_seconds: i64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            max_seconds: DEFAULT_MAX_SECONDS,
        }
    }
}

fn default_delimiter() -> char {
    ','
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_max_seconds() -> i64 {
    DEFAULT_MAX_SECONDS
}

impl JobConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                extension
            )),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let content = match extension {
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "toml" => toml::to_string_pretty(self)?,
            _ => {
                return Err(anyhow::anyhow!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                    extension
                ))
            }
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Example config for the usual latin1 skill-builder export
    pub fn example() -> Self {
        Self {
            input: InputConfig {
                path: "data/skill_builder_data.csv".to_string(),
                delimiter: ',',
                encoding: "latin1".to_string(),
            },
            output: OutputConfig {
                path: "data/output/processed_skill_builder.csv".to_string(),
            },
            cleaning: CleaningConfig::default(),
        }
    }
}

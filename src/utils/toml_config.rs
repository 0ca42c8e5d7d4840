//! TOML-based configuration for delve
//!
//! Everything lives in one `delve.toml`. Every section and every key is
//! optional; an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from delve.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DelveConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Semantic memory settings
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Research run settings
    #[serde(default)]
    pub research: ResearchConfig,

    /// Chunk summarizer backend
    #[serde(default)]
    pub summarizer: SummarizerConfig,
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// ============= Memory Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Embedding width; must match the embedder
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Default number of records returned by `recall`
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// JSON snapshot loaded at startup and saved after each run.
    /// Memory is process-lifetime only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            top_k: default_top_k(),
            snapshot_path: None,
        }
    }
}

fn default_dimension() -> usize {
    delve_vector::DEFAULT_DIMENSION
}

fn default_top_k() -> usize {
    3
}

// ============= Research Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchConfig {
    #[serde(default = "default_sources_per_query")]
    pub sources_per_query: usize,

    /// Summarizer window in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Process one sub-query's sources concurrently
    #[serde(default)]
    pub parallel_sources: bool,

    #[serde(default = "default_call_timeout")]
    pub retrieve_timeout_secs: u64,

    #[serde(default = "default_call_timeout")]
    pub extract_timeout_secs: u64,

    #[serde(default = "default_summarize_timeout")]
    pub summarize_timeout_secs: u64,

    #[serde(default = "default_call_timeout")]
    pub embed_timeout_secs: u64,

    #[serde(default = "default_call_timeout")]
    pub triplets_timeout_secs: u64,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            sources_per_query: default_sources_per_query(),
            chunk_size: default_chunk_size(),
            parallel_sources: false,
            retrieve_timeout_secs: default_call_timeout(),
            extract_timeout_secs: default_call_timeout(),
            summarize_timeout_secs: default_summarize_timeout(),
            embed_timeout_secs: default_call_timeout(),
            triplets_timeout_secs: default_call_timeout(),
        }
    }
}

fn default_sources_per_query() -> usize {
    2
}

fn default_chunk_size() -> usize {
    crate::rag::chunker::DEFAULT_CHUNK_SIZE
}

fn default_call_timeout() -> u64 {
    30
}

fn default_summarize_timeout() -> u64 {
    120
}

// ============= Summarizer Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizerConfig {
    #[serde(default = "default_ollama_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            model: default_model(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

// ============= Errors =============

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl DelveConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: DelveConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject zero sizes, zero timeouts and blank backend settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("memory.dimension", self.memory.dimension as u64),
            ("memory.top_k", self.memory.top_k as u64),
            ("research.sources_per_query", self.research.sources_per_query as u64),
            ("research.chunk_size", self.research.chunk_size as u64),
            ("research.retrieve_timeout_secs", self.research.retrieve_timeout_secs),
            ("research.extract_timeout_secs", self.research.extract_timeout_secs),
            ("research.summarize_timeout_secs", self.research.summarize_timeout_secs),
            ("research.embed_timeout_secs", self.research.embed_timeout_secs),
            ("research.triplets_timeout_secs", self.research.triplets_timeout_secs),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be greater than 0",
                    key
                )));
            }
        }

        if self.summarizer.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "summarizer.base_url must not be empty".to_string(),
            ));
        }
        if self.summarizer.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "summarizer.model must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The defaults rendered as TOML, as written by `delve init`
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = DelveConfig::from_toml("").unwrap();
        assert_eq!(config, DelveConfig::default());
        assert_eq!(config.memory.dimension, 384);
        assert_eq!(config.memory.top_k, 3);
        assert_eq!(config.research.sources_per_query, 2);
        assert_eq!(config.research.chunk_size, 800);
        assert_eq!(config.research.summarize_timeout_secs, 120);
        assert_eq!(config.research.triplets_timeout_secs, 30);
        assert!(!config.research.parallel_sources);
        assert!(config.memory.snapshot_path.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let content = r#"
[memory]
dimension = 8
snapshot_path = "data/memory.json"

[research]
parallel_sources = true

[summarizer]
model = "mistral"
"#;

        let config = DelveConfig::from_toml(content).unwrap();
        assert_eq!(config.memory.dimension, 8);
        assert_eq!(config.memory.top_k, 3);
        assert_eq!(
            config.memory.snapshot_path.as_deref(),
            Some(Path::new("data/memory.json"))
        );
        assert!(config.research.parallel_sources);
        assert_eq!(config.summarizer.model, "mistral");
        assert_eq!(config.summarizer.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_zero_values_rejected() {
        for content in [
            "[memory]\ndimension = 0",
            "[memory]\ntop_k = 0",
            "[research]\nchunk_size = 0",
            "[research]\nsources_per_query = 0",
            "[research]\nembed_timeout_secs = 0",
            "[research]\ntriplets_timeout_secs = 0",
        ] {
            let result = DelveConfig::from_toml(content);
            assert!(
                matches!(result, Err(ConfigError::ValidationError(_))),
                "accepted: {content}"
            );
        }
    }

    #[test]
    fn test_blank_model_rejected() {
        let result = DelveConfig::from_toml("[summarizer]\nmodel = \"  \"");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_parse_error() {
        let result = DelveConfig::from_toml("[memory\ndimension = 3");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_default_toml_round_trips() {
        let rendered = DelveConfig::default_toml().unwrap();
        assert!(rendered.contains("[research]"));
        assert_eq!(DelveConfig::from_toml(&rendered).unwrap(), DelveConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let result = DelveConfig::load("/nonexistent/delve.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
        assert_eq!(
            DelveConfig::load_or_default("/nonexistent/delve.toml").unwrap(),
            DelveConfig::default()
        );
    }
}

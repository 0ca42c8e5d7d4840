//! Init command implementation
//!
//! Writes a default `delve.toml` into a directory.

use super::output::Output;
use crate::utils::toml_config::DelveConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug)]
pub enum InitResult {
    /// Initialization completed successfully
    Success(PathBuf),
    /// delve.toml already exists and `force` was not given
    AlreadyExists(PathBuf),
    /// An error occurred during initialization
    Error(String),
}

/// Run the init command
pub fn run(path: &Path, force: bool, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing delve");

    let config_path = path.join("delve.toml");
    if config_path.exists() && !force {
        output.warning("delve.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists(config_path);
    }

    if let Err(e) = fs::create_dir_all(path) {
        output.error(&format!("Failed to create {}: {}", path.display(), e));
        return InitResult::Error(e.to_string());
    }

    let content = match generate_delve_toml() {
        Ok(content) => content,
        Err(e) => {
            output.error(&format!("Failed to render configuration: {}", e));
            return InitResult::Error(e);
        }
    };

    if let Err(e) = fs::write(&config_path, content) {
        output.error(&format!("Failed to create delve.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", &config_path.display().to_string());
    output.success("delve initialized");

    output.hint("Start Ollama and pull the summarizer model, then run:");
    output.command("delve research \"your question\"");

    InitResult::Success(config_path)
}

/// Default configuration with a snapshot path so `recall` works across runs.
fn generate_delve_toml() -> Result<String, String> {
    let mut config = DelveConfig::default();
    config.memory.snapshot_path = Some(PathBuf::from("data/memory.json"));

    let body = toml::to_string_pretty(&config).map_err(|e| e.to_string())?;
    Ok(format!(
        "# delve configuration\n# Every key is optional; removed keys fall back to these defaults.\n\n{}",
        body
    ))
}

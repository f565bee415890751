//! Configuration management for tell.
//!
//! Configuration is loaded from `~/.config/tell/config.toml`. Every field is
//! optional; a missing file means defaults. The API key can also come from
//! the `GROQ_API_KEY` environment variable (resolved in the Groq client).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Groq API key (prefer the GROQ_API_KEY env var).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Completion length cap; commands are short.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "openai/gpt-oss-20b".to_string()
}

fn default_max_tokens() -> u32 {
    200
}

impl Config {
    /// Get the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("tell"))
            .context("Could not determine config directory")
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the conversation history file path (`~/.tell/history.json`).
    pub fn history_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|p| p.join(".tell").join("history.json"))
            .context("Could not determine home directory")
    }

    /// Load configuration from file, using defaults if not found.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }
}

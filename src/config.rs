// src/config.rs
//! Application configuration: optional `config.yaml` plus environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnhancerConfig {
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub enhancer: EnhancerConfig,
    pub output_dir: PathBuf,
    pub port: u16,
    /// Default credential, only ever taken from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enhancer: EnhancerConfig::default(),
            output_dir: PathBuf::from("output"),
            port: 8000,
            api_key: None,
        }
    }
}

pub struct ConfigManager;

impl ConfigManager {
    /// Load `config.yaml` from the working directory (if any) and apply
    /// environment overrides.
    pub fn load() -> Result<AppConfig> {
        Self::load_with(Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn load_with(path: &Path) -> Result<AppConfig> {
        let mut config = Self::load_from(path)?;
        Self::apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Missing file means defaults; a present but invalid file is an error.
    pub fn load_from(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CV_ENHANCER_URL") {
            config.enhancer.api_url = url;
        }
        if let Some(model) = lookup("CV_ENHANCER_MODEL") {
            config.enhancer.model = model;
        }
        if let Some(dir) = lookup("CV_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(port) = lookup("CV_PORT") {
            config.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("CV_PORT must be a valid port number"))?;
        }
        config.api_key = lookup("GROQ_API_KEY").filter(|key| !key.trim().is_empty());
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

fn default_temperature() -> f32 {
    0.7
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub default_model: Option<String>,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Config {
    pub fn new() -> Self {
        Self {
            default_model: None,
            dark_mode: false,
            temperature: default_temperature(),
        }
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, config_content)?;
        Ok(())
    }

    pub fn save_default_model(model: &str) -> Result<()> {
        let mut config = Self::load().unwrap_or_else(|_| Self::new());
        config.default_model = Some(model.to_string());
        config.save()
    }

    pub fn save_dark_mode(dark_mode: bool) -> Result<()> {
        let mut config = Self::load().unwrap_or_else(|_| Self::new());
        config.dark_mode = dark_mode;
        config.save()
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("groqchat").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn round_trips_through_json() {
        let mut config = Config::new();
        config.default_model = Some("qwen-2.5-32b".to_string());
        config.dark_mode = true;

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.default_model.as_deref(), Some("qwen-2.5-32b"));
        assert!(parsed.dark_mode);
        assert_eq!(parsed.temperature, 0.7);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_model": null}}"#).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let parsed: Config = serde_json::from_str(&content).unwrap();

        assert!(parsed.default_model.is_none());
        assert!(!parsed.dark_mode);
        assert_eq!(parsed.temperature, 0.7);
    }
}

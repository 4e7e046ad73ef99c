use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an optional JSON settings file.
pub const CONFIG_ENV: &str = "POLLUTION_PANEL_CONFIG";

/// Startup settings.  Every field has a default, so a settings file only
/// needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Raw dataset loaded at startup.
    pub data_path: PathBuf,
    /// GeoJSON file drawn behind the top-countries map.
    pub outline_path: Option<PathBuf>,
    /// How many countries the map view lists.
    pub top_n: usize,
    /// Initial window size in points.
    pub window: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            outline_path: None,
            top_n: 10,
            window: [1200.0, 800.0],
        }
    }
}

impl Config {
    /// Defaults, then the file named by [`CONFIG_ENV`], then the first
    /// positional argument as the data path.
    pub fn load(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", PathBuf::from(&path).display()))?;
                Self::from_json(&text)?
            }
            None => Self::default(),
        };
        if let Some(data_path) = args.into_iter().nth(1) {
            config.data_path = PathBuf::from(data_path);
        }
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_keep_defaults() {
        let config = Config::from_json(r#"{"top_n": 5, "outline_path": "world.json"}"#).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.outline_path, Some(PathBuf::from("world.json")));
        assert_eq!(config.data_path, PathBuf::from("data.csv"));
    }

    #[test]
    fn test_unknown_types_are_rejected() {
        assert!(Config::from_json(r#"{"top_n": "ten"}"#).is_err());
    }
}

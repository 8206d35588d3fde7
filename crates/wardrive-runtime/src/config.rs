use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Error, Result};

/// Resolve the wardrive data directory:
/// 1. Explicit path (with tilde expansion)
/// 2. WARDRIVE_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.wardrive fallback for systems without XDG
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("WARDRIVE_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("wardrive"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".wardrive"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

fn default_jitter() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Cached IEEE OUI registry CSV. The cache itself is maintained
    /// externally; when the file is absent the build degrades to
    /// Unknown vendors instead of failing.
    #[serde(default)]
    pub oui_csv: Option<PathBuf>,

    /// Where the output document is written. Defaults to
    /// `wardrive.geojson` inside the capture directory.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Whether colliding AP markers get the deterministic jitter offset.
    #[serde(default = "default_jitter")]
    pub jitter: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            oui_csv: None,
            output: None,
            jitter: true,
        }
    }
}

impl Config {
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(resolve_data_dir(None)?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.oui_csv.is_none());
        assert!(config.jitter);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let config = Config {
            oui_csv: Some(PathBuf::from("/data/oui.csv")),
            output: Some(PathBuf::from("/data/wardrive.geojson")),
            jitter: false,
        };

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.oui_csv, Some(PathBuf::from("/data/oui.csv")));
        assert!(!loaded.jitter);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert!(config.oui_csv.is_none());
        assert!(config.jitter);

        Ok(())
    }

    #[test]
    fn test_jitter_defaults_on_when_absent_from_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "oui_csv = \"/data/oui.csv\"\n")?;

        let config = Config::load_from(&config_path)?;
        assert!(config.jitter);

        Ok(())
    }
}

use crate::error::{Result, SkycastError};
use crate::models::{DayBoundary, Units};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CITY: &str = "Salt Lake City";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Environment variable consulted when no config file exists
const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default = "default_city")]
    pub default_city: String,
    #[serde(default)]
    pub day_boundary: DayBoundary,
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default)]
    pub units: Units,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl OpenWeatherMapConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            units: Units::default(),
            base_url: default_base_url(),
        }
    }
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("units", &self.units)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::find_config_path()?,
        };

        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        // A bare API key in the environment is enough to run
        if config_override.is_none() {
            if let Some(config) = Self::from_env() {
                tracing::info!("No config file found, using {} from environment", API_KEY_ENV);
                return Ok(config);
            }
        }

        Err(SkycastError::Config(format!(
            "Config file not found at {:?}. Run `skycast init` to set up.",
            config_path
        )))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| SkycastError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str)?;

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| SkycastError::Config(format!("Failed to parse config: {}", e)))?;

        if config.openweathermap.api_key.trim().is_empty() {
            return Err(SkycastError::Config(
                "openweathermap.api_key is empty".into(),
            ));
        }

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn from_env() -> Option<Self> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| Config {
                openweathermap: OpenWeatherMapConfig::new(key),
                ..Config::default()
            })
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("skycast").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Default path for writing new config files (~/.config/skycast/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SkycastError::Config("Cannot determine config directory".into()))?
            .join("skycast");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up skycast!");
        println!();

        println!("OpenWeatherMap");
        let api_key: String = Password::new()
            .with_prompt("  API key")
            .interact()
            .map_err(|e| SkycastError::Config(format!("Input error: {}", e)))?;

        let units_str: String = Input::new()
            .with_prompt("  Units (imperial, metric)")
            .default("imperial".into())
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                Units::from_str(input)
                    .map(|_| ())
                    .ok_or("expected imperial or metric")
            })
            .interact_text()
            .map_err(|e| SkycastError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Preferences");
        let default_city: String = Input::new()
            .with_prompt("  Default city")
            .default(DEFAULT_CITY.into())
            .interact_text()
            .map_err(|e| SkycastError::Config(format!("Input error: {}", e)))?;

        let boundary_str: String = Input::new()
            .with_prompt("  Split forecast days by (city, local, utc)")
            .default("city".into())
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                DayBoundary::from_str(input)
                    .map(|_| ())
                    .ok_or("expected city, local or utc")
            })
            .interact_text()
            .map_err(|e| SkycastError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            openweathermap: OpenWeatherMapConfig {
                api_key,
                units: Units::from_str(&units_str).unwrap_or_default(),
                base_url: default_base_url(),
            },
            default_city,
            day_boundary: DayBoundary::from_str(&boundary_str).unwrap_or_default(),
        };

        let config_path = Self::default_config_path()?;
        config.write_to(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    /// Serialize to YAML with a header comment
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| SkycastError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# skycast configuration\n# Generated by `skycast init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| SkycastError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("SKYCAST_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| SkycastError::Config("Cannot determine data directory".into()))?
            .join("skycast");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("skycast.db"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openweathermap: OpenWeatherMapConfig::new(""),
            default_city: default_city(),
            day_boundary: DayBoundary::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_minimal_config_applies_defaults() {
        let file = write_config("openweathermap:\n  api_key: abc123\n");
        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.openweathermap.api_key, "abc123");
        assert_eq!(config.openweathermap.units, Units::Imperial);
        assert_eq!(config.openweathermap.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.default_city, DEFAULT_CITY);
        assert_eq!(config.day_boundary, DayBoundary::City);
    }

    #[test]
    fn load_full_config() {
        let file = write_config(
            "openweathermap:\n  api_key: abc123\n  units: metric\n  base_url: http://localhost:9999\ndefault_city: Oslo\nday_boundary: utc\n",
        );
        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.openweathermap.units, Units::Metric);
        assert_eq!(config.openweathermap.base_url, "http://localhost:9999");
        assert_eq!(config.default_city, "Oslo");
        assert_eq!(config.day_boundary, DayBoundary::Utc);
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("SKYCAST_TEST_SUBSTITUTED_KEY", "from-env");
        let file = write_config("openweathermap:\n  api_key: ${SKYCAST_TEST_SUBSTITUTED_KEY}\n");
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.openweathermap.api_key, "from-env");
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let file = write_config("openweathermap:\n  api_key: \"\"\n");
        assert!(matches!(
            Config::load_from(file.path()),
            Err(SkycastError::Config(_))
        ));
    }

    #[test]
    fn missing_override_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = Config::load(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("skycast init"));
    }

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config {
            openweathermap: OpenWeatherMapConfig::new("key"),
            default_city: "Boise".into(),
            day_boundary: DayBoundary::Local,
        };
        config.write_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_city, "Boise");
        assert_eq!(loaded.day_boundary, DayBoundary::Local);
        assert_eq!(loaded.openweathermap.api_key, "key");
    }

    #[test]
    fn debug_redacts_api_key() {
        let debug = format!("{:?}", OpenWeatherMapConfig::new("super-secret"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn data_dir_override_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let db_path = Config::db_path(Some(&data)).unwrap();
        assert!(data.exists());
        assert_eq!(db_path, data.join("skycast.db"));
    }
}

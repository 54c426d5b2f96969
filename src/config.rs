use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Port to listen on
    pub port: u16,
    /// Path to the JSON store file
    pub data_file: PathBuf,
    /// Directory holding the front end's static files
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            data_file: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("calorie-tracker")
                .join("calories.json"),
            static_dir: PathBuf::from("public"),
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    ///
    /// The config file is `config_path` if given, else `CALORIES_CONFIG`, else
    /// [`Config::default_config_path`]. A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path
            .or_else(|| std::env::var("CALORIES_CONFIG").ok().map(PathBuf::from))
            .unwrap_or_else(Self::default_config_path);

        let mut config = Self::default();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        config.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply `CALORIES_*` overrides read through `var`.
    fn apply_env(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(port) = var("CALORIES_PORT") {
            self.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(data_file) = var("CALORIES_DATA_FILE") {
            self.data_file = PathBuf::from(data_file);
        }
        if let Some(static_dir) = var("CALORIES_STATIC_DIR") {
            self.static_dir = PathBuf::from(static_dir);
        }
        Ok(self)
    }

    /// Default config file path: <config dir>/calorie-tracker/config.yaml
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calorie-tracker")
            .join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidPort(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    e
                )
            }
            ConfigError::InvalidPort(value) => {
                write!(f, "Invalid CALORIES_PORT value '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::tempdir;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert!(config
            .data_file
            .to_string_lossy()
            .contains("calories.json"));
        assert_eq!(config.static_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_load_no_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.static_dir, Config::default().static_dir);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_file: /custom/path/calories.json").unwrap();
        writeln!(file, "static_dir: /srv/www").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/custom/path/calories.json"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "static_dir: assets\n").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.static_dir, PathBuf::from("assets"));
        assert_eq!(config.data_file, Config::default().data_file);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .apply_env(vars(&[
                ("CALORIES_PORT", "8081"),
                ("CALORIES_DATA_FILE", "/tmp/cal.json"),
                ("CALORIES_STATIC_DIR", "/tmp/www"),
            ]))
            .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.data_file, PathBuf::from("/tmp/cal.json"));
        assert_eq!(config.static_dir, PathBuf::from("/tmp/www"));
    }

    #[test]
    fn test_no_env_leaves_config_alone() {
        let config = Config::default().apply_env(vars(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_port_error() {
        let result = Config::default().apply_env(vars(&[("CALORIES_PORT", "eighty")]));

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref v) if v == "eighty"));
        assert!(err.to_string().contains("CALORIES_PORT"));
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}

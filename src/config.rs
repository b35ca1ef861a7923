use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the site HTTP API
    pub api_base_url: String,
    /// Login page the panel redirects to when the session is gone
    pub login_url: String,
    /// Directory for locally cached documents
    pub cache_dir: PathBuf,
    /// JSON file consumed by the public site
    pub site_data_path: PathBuf,
    /// Port the admin panel listens on
    pub panel_port: u16,
    /// Path of the config file that was loaded, if any
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("igreja-admin");
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            login_url: "http://localhost:8080/login.html".to_string(),
            cache_dir: data_dir.join("cache"),
            site_data_path: data_dir.join("site-data.json"),
            panel_port: 8090,
            config_file: None,
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Self::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
            config.config_file = Some(path);
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("IGREJA_ADMIN_API_URL") {
            config.api_base_url = url;
        }
        if let Ok(url) = std::env::var("IGREJA_ADMIN_LOGIN_URL") {
            config.login_url = url;
        }
        if let Ok(dir) = std::env::var("IGREJA_ADMIN_CACHE_DIR") {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Ok(path) = std::env::var("IGREJA_ADMIN_SITE_DATA_PATH") {
            config.site_data_path = PathBuf::from(path);
        }
        if let Some(port) = std::env::var("IGREJA_ADMIN_PANEL_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            config.panel_port = port;
        }

        Ok(config)
    }

    /// Default config file path: ~/.config/igreja-admin/config.yaml
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("igreja-admin")
            .join("config.yaml")
    }

    /// Writes a config file with the default values, creating parent
    /// directories as needed. Refuses to overwrite an existing file.
    pub fn init(config_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path));
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(parent.to_path_buf(), e))?;
        }

        let contents =
            serde_yaml::to_string(&Self::default()).map_err(ConfigError::EncodeError)?;
        std::fs::write(&path, contents)
            .map_err(|e| ConfigError::WriteError(path.clone(), e))?;

        Ok(path)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    WriteError(PathBuf, std::io::Error),
    EncodeError(serde_yaml::Error),
    AlreadyExists(PathBuf),
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
            ConfigError::WriteError(path, e) => {
                write!(f, "Failed to write config file '{}': {}", path.display(), e)
            }
            ConfigError::EncodeError(e) => {
                write!(f, "Failed to serialize config: {}", e)
            }
            ConfigError::AlreadyExists(path) => {
                write!(f, "Config file '{}' already exists", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.panel_port, 8090);
        assert!(config.cache_dir.to_string_lossy().contains("igreja-admin"));
    }

    #[test]
    fn test_load_no_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.panel_port, 8090);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_base_url: https://igreja.example.com/api").unwrap();
        writeln!(file, "cache_dir: /var/lib/igreja-admin/cache").unwrap();
        writeln!(file, "panel_port: 9000").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.api_base_url, "https://igreja.example.com/api");
        assert_eq!(
            config.cache_dir,
            PathBuf::from("/var/lib/igreja-admin/cache")
        );
        assert_eq!(config.panel_port, 9000);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "login_url: https://fromfile.example.com/login.html").unwrap();

        // Set env var
        std::env::set_var("IGREJA_ADMIN_LOGIN_URL", "https://fromenv.example.com/login.html");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.login_url, "https://fromenv.example.com/login.html");

        // Clean up
        std::env::remove_var("IGREJA_ADMIN_LOGIN_URL");
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

    #[test]
    fn test_init_writes_loadable_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested/config.yaml");

        let written = Config::init(Some(config_path.clone())).unwrap();
        assert_eq!(written, config_path);

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.panel_port, 8090);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_init_refuses_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "panel_port: 9000\n").unwrap();

        let result = Config::init(Some(config_path));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }
}

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, DEFAULT_DOCUMENTS_PATH, DEFAULT_GATEWAY_URL, DEFAULT_GRAPH_PATH,
    DEFAULT_HEALTH_PATH, DEFAULT_QUERY_PATH, ENV_PREFIX, LOCAL_CONFIG_PATH,
};
use crate::session::User;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Query service configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Identity stamped onto new sessions
    #[serde(default)]
    pub user: Option<UserConfig>,

    /// Conversation behaviour
    #[serde(default)]
    pub chat: ChatConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UIConfig,
}

impl Config {
    /// The configured identity, if any
    pub fn identity(&self) -> Option<User> {
        self.user.clone().map(User::from)
    }
}

/// Query service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the query service
    pub base_url: String,
    /// Path of the query endpoint
    pub query_path: String,
    /// Path of the health endpoint
    pub health_path: String,
    /// Path of the document upload endpoint
    pub documents_path: String,
    /// Path of the graph endpoint
    pub graph_path: String,
    /// Request timeout; the transport default applies when unset
    pub request_timeout_secs: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            query_path: DEFAULT_QUERY_PATH.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            documents_path: DEFAULT_DOCUMENTS_PATH.to_string(),
            graph_path: DEFAULT_GRAPH_PATH.to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Identity section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl From<UserConfig> for User {
    fn from(config: UserConfig) -> Self {
        Self {
            id: config.id,
            name: config.name,
            email: config.email,
        }
    }
}

/// Conversation behaviour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Reject a send while another one is pending for the same session
    pub serialize_sends: bool,
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UIConfig {
    /// Show session sidebar by default
    pub show_sidebar: bool,
    /// Show message timestamps
    pub show_timestamps: bool,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            show_sidebar: true,
            show_timestamps: true,
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let global_config = get_config_dir()?.join(CONFIG_FILE_NAME);
    let local_config = PathBuf::from(LOCAL_CONFIG_PATH);
    load_config_from(&[global_config, local_config])
}

/// Layer the given TOML files (later wins) over the defaults, then the
/// environment on top
pub fn load_config_from(files: &[PathBuf]) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    for file in files {
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }
    }

    // KGCHAT_GATEWAY__BASE_URL -> gateway.base_url
    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    figment.extract().context("Failed to load configuration")
}

/// Load a single explicit configuration file (plus environment overrides)
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }
    load_config_from(&[path.to_path_buf()])
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join(APP_NAME);
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Directory for runtime files such as the log
pub fn get_data_dir() -> Result<PathBuf> {
    match ProjectDirs::from("", "", APP_NAME) {
        Some(proj_dirs) => {
            let data_dir = proj_dirs.data_dir();
            std::fs::create_dir_all(data_dir)?;
            Ok(data_dir.to_path_buf())
        }
        None => get_config_dir(),
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join(CONFIG_FILE_NAME)
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<PathBuf> {
    let config_file = get_config_dir()?.join(CONFIG_FILE_NAME);

    if !config_file.exists() {
        save_config(&Config::default(), Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    } else {
        println!("Configuration already exists at: {}", config_file.display());
    }

    Ok(config_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.gateway.base_url, "http://localhost:5000");
        assert_eq!(config.gateway.query_path, "/query");
        assert_eq!(config.gateway.documents_path, "/documents");
        assert_eq!(config.gateway.graph_path, "/graph");
        assert_eq!(config.gateway.request_timeout_secs, None);
        assert!(config.user.is_none());
        assert!(!config.chat.serialize_sends);
        assert!(config.ui.show_sidebar);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[gateway]
base_url = "http://kg.internal:8080"

[user]
id = "u-7"
name = "Grace"
email = "grace@example.com"

[chat]
serialize_sends = true
"#,
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.gateway.base_url, "http://kg.internal:8080");
        assert_eq!(config.gateway.query_path, "/query");
        assert!(config.chat.serialize_sends);
        assert_eq!(
            config.identity(),
            Some(User {
                id: "u-7".to_string(),
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
            })
        );
    }

    #[test]
    fn test_later_files_win() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        std::fs::write(&global, "[gateway]\nbase_url = \"http://global\"\nquery_path = \"/ask\"\n").unwrap();
        std::fs::write(&local, "[gateway]\nbase_url = \"http://local\"\n").unwrap();

        let config = load_config_from(&[global, local, dir.path().join("missing.toml")]).unwrap();
        assert_eq!(config.gateway.base_url, "http://local");
        assert_eq!(config.gateway.query_path, "/ask");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_config_file(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.gateway.request_timeout_secs = Some(30);

        save_config(&config, Some(path.clone())).unwrap();
        assert_eq!(load_config_file(&path).unwrap(), config);
    }
}

/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:5000";
pub const DEFAULT_QUERY_PATH: &str = "/query";
pub const DEFAULT_HEALTH_PATH: &str = "/health";
pub const DEFAULT_DOCUMENTS_PATH: &str = "/documents";
pub const DEFAULT_GRAPH_PATH: &str = "/graph";
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 3;

// Identifiers
pub const SESSION_ID_PREFIX: &str = "session";
pub const MESSAGE_ID_PREFIX: &str = "msg";
pub const REQUEST_ID_PREFIX: &str = "req";
pub const SESSION_TITLE_PREFIX: &str = "Chat";

// Diagnostics
pub const MAX_DIAGNOSTICS: usize = 256;

// UI Configuration
pub const UI_REFRESH_INTERVAL_MS: u64 = 50;
pub const UI_SCROLL_LINES: u16 = 3;

// Files
pub const APP_NAME: &str = "kgchat";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOCAL_CONFIG_PATH: &str = ".kgchat/config.toml";
pub const LOG_FILE_NAME: &str = "kgchat.log";
pub const ENV_PREFIX: &str = "KGCHAT_";

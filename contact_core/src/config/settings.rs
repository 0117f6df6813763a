use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Unprefixed variables recognised for compatibility with common hosting
/// setups, mapped onto their config keys.
const WELL_KNOWN_ENV: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("TELEGRAM_BOT_TOKEN", "notifier.bot_token"),
    ("TELEGRAM_CHAT_ID", "notifier.chat_id"),
    ("PORT", "server.port"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub notifier: NotifierConfig,
    pub site: SiteConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Empty means "not configured": the server still starts but every
    /// submission fails.
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
    pub timeout_seconds: u64,
    pub site_name: String,
    pub wait_for_delivery: bool,
}

/// Where the landing page and its assets live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub index_file: PathBuf,
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            acquire_timeout_seconds: 10,
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: "https://api.telegram.org".to_string(),
            timeout_seconds: 10,
            site_name: "Kraftcut".to_string(),
            wait_for_delivery: false,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            index_file: PathBuf::from("index.html"),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl DatabaseConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }
}

impl NotifierConfig {
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }
}

impl AppConfig {
    /// Loads configuration from defaults, `config.toml`, and the process
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_env(None)
    }

    /// Same as [`AppConfig::load`], but reads environment variables from
    /// `vars` instead of the process when given.
    pub fn load_from_env(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars.clone()),
        );

        for (var, key) in WELL_KNOWN_ENV {
            let value = match &vars {
                Some(map) => map.get(*var).cloned(),
                None => std::env::var(var).ok(),
            };
            let value = value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.normalize();

        app_config.validate()?;

        Ok(app_config)
    }

    fn normalize(&mut self) {
        self.database.url = self.database.url.trim().to_string();
        self.notifier.bot_token = self.notifier.bot_token.trim().to_string();
        self.notifier.chat_id = self.notifier.chat_id.trim().to_string();
        self.notifier.api_base = self.notifier.api_base.trim().trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "Database max connections must be greater than 0".to_string(),
            ));
        }

        if self.database.acquire_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Database acquire timeout must be greater than 0".to_string(),
            ));
        }

        if self.notifier.timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Notifier timeout must be greater than 0".to_string(),
            ));
        }

        if self.notifier.api_base.is_empty() {
            return Err(ConfigError::Message(
                "Notifier API base URL cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

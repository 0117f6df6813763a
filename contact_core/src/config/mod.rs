pub mod settings;

pub use settings::{AppConfig, CorsConfig, DatabaseConfig, NotifierConfig, ServerConfig, SiteConfig};

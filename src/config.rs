use crate::domain::services::key_generator::MAX_PREFIX_LEN;
use config::builder::{ConfigBuilder, DefaultState};
use config::ConfigError;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: Server,
    pub db: Db,
    pub admin: Admin,
    pub keys: Keys,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Db {
    pub backend: StorageBackend,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Admin {
    /// Hex SHA-256 digest of the admin bearer token.
    pub token_sha256: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Keys {
    /// Prefix for randomly generated keys (`<prefix>-<code>`).
    pub prefix: String,
}

fn default_max_connections() -> u32 {
    5
}

/// Load settings from `config/default.toml`, `config/<env>.toml`, and env overrides.
///
/// `default.toml` carries no admin credential, so an environment that does not
/// supply one fails here instead of starting with a known token.
pub fn load() -> Result<Settings, ConfigError> {
    let env_name = std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());
    finish(
        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{env_name}")).required(false))
            .add_source(config::Environment::with_prefix("KEYPANEL").separator("__")),
    )
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

impl Settings {
    /// Operator mistakes that would otherwise surface as per-request failures.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.keys.prefix;
        if prefix.trim().is_empty() || prefix.trim() != prefix.as_str() {
            return Err(ConfigError::Message(
                "keys.prefix must be non-empty without surrounding whitespace".to_string(),
            ));
        }
        if prefix.chars().count() > MAX_PREFIX_LEN {
            return Err(ConfigError::Message(format!(
                "keys.prefix must be at most {MAX_PREFIX_LEN} characters"
            )));
        }
        if self.admin.token_sha256.trim().is_empty() {
            return Err(ConfigError::Message(
                "admin.token_sha256 must be set".to_string(),
            ));
        }
        Ok(())
    }
}

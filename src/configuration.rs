use crate::client::export::Locale;
use crate::errors::ConfigurationError;
use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::env::var;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Settings {
    pub application: Application,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub resilience: ResilienceSettings,
    #[serde(default)]
    pub client: ClientSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Application {
    pub host: String,
    pub port: u16,
}

impl Default for Application {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DatabaseSettings {
    #[serde_as(as = "DisplayFromStr")]
    pub db_type: DatabaseType,
    pub url: Option<String>,
    pub protocol: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_idle_timeout() -> u64 {
    30
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            db_type: DatabaseType::InMemory,
            url: None,
            protocol: None,
            host: None,
            port: None,
            user: None,
            password: None,
            name: None,
            max_connections: default_max_connections(),
            min_connections: 0,
            connect_timeout_secs: default_connect_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    InMemory,
    Relational,
}

impl Display for DatabaseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseType::InMemory => write!(f, "in_memory"),
            DatabaseType::Relational => write!(f, "relational"),
        }
    }
}

impl FromStr for DatabaseType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relational" => Ok(DatabaseType::Relational),
            "in_memory" => Ok(DatabaseType::InMemory),
            &_ => Err(ConfigurationError::UnknownDatabaseType),
        }
    }
}

impl DatabaseSettings {
    pub fn is_valid(&self) -> Result<(), ConfigurationError> {
        if self.db_type == DatabaseType::Relational && self.url.is_none() {
            if self.protocol.is_none()
                || self.host.is_none()
                || self.name.is_none()
                || self.port.is_none()
                || self.user.is_none()
                || self.password.is_none()
            {
                return Err(ConfigurationError::MissingDatabaseSettings);
            }
        }
        Ok(())
    }

    /// Connection string for the relational store. An explicit `url` wins over
    /// the individual parts.
    pub fn relational_connection(&self) -> Result<String, ConfigurationError> {
        if let Some(url) = &self.url {
            return Ok(url.to_owned());
        }
        match (
            &self.protocol,
            &self.user,
            &self.password,
            &self.host,
            self.port,
            &self.name,
        ) {
            (Some(protocol), Some(user), Some(password), Some(host), Some(port), Some(name)) => {
                Ok(format!("{protocol}://{user}:{password}@{host}:{port}/{name}"))
            }
            _ => Err(ConfigurationError::MissingDatabaseSettings),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Reconnection behaviour of the connection manager.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ResilienceSettings {
    pub max_retries: u32,
    pub retry_delay_secs: u64,
    pub heartbeat_interval_secs: u64,
}

impl Default for ResilienceSettings {
    fn default() -> Self {
        Self {
            max_retries: 5,
            retry_delay_secs: 5,
            heartbeat_interval_secs: 240,
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    #[serde_as(as = "DisplayFromStr")]
    pub locale: Locale,
    pub session_file: String,
    pub gate_password: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3001".to_string(),
            locale: Locale::PtBr,
            session_file: ".stockroom-session.json".to_string(),
            gate_password: "Almo123.".to_string(),
        }
    }
}

/// The possible runtime environment for our application.
#[derive(Debug, Eq, PartialEq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => Err(ConfigurationError::UnknownEnvironment(other.to_string())),
        }
    }
}

pub fn get_env() -> Result<Environment, ConfigurationError> {
    var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "dev".into())
        .try_into()
}

pub fn get_configuration() -> Result<Settings, ConfigurationError> {
    let environment = get_env()?;
    let second_source = format!("configuration/{}", environment.as_str());
    let settings = Config::builder()
        .add_source(config::File::new("configuration/base", FileFormat::Yaml))
        .add_source(config::File::new(&second_source, FileFormat::Yaml).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    let mut settings = settings.try_deserialize::<Settings>()?;
    apply_legacy_overrides(&mut settings)?;
    settings.database.is_valid()?;
    Ok(settings)
}

/// `DATABASE_URL` and `PORT` are honoured for deployments that only set those.
fn apply_legacy_overrides(settings: &mut Settings) -> Result<(), ConfigurationError> {
    if let Ok(url) = var("DATABASE_URL") {
        settings.database.url = Some(url);
        settings.database.db_type = DatabaseType::Relational;
    }
    if let Ok(port) = var("PORT") {
        settings.application.port = port
            .parse()
            .map_err(|_| ConfigurationError::InvalidPort(port))?;
    }
    Ok(())
}

//! Process settings: profile defaults from `APP_ENV`, then per-variable overrides.
//!
//! Variables: `APP_ENV`, `BIND_ADDR`, `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`,
//! `SECRET_KEY`, `TOKEN_EXPIRES_IN`, `ROOT_GROUP`, `BODY_LIMIT`, `LOG_LEVEL`,
//! `REQUEST_LOG`, `CODE_MESSAGES`.

use crate::config::CodeMessages;
use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

const DEV_SECRET_KEY: &str = "development-only-secret-key";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            _ => Err(ConfigError::InvalidSetting {
                name: "APP_ENV",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
}

impl LogLevel {
    /// Directive for `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_directive())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            _ => Err(ConfigError::InvalidSetting {
                name: "LOG_LEVEL",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogSettings {
    pub level: LogLevel,
    /// When false the request-log middleware passes responses through silently.
    pub request_log: bool,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub env: Environment,
    pub bind_addr: String,
    /// None runs the service on the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub secret_key: String,
    /// Access token lifetime in seconds.
    pub token_expires_in: i64,
    pub root_group: String,
    pub body_limit: usize,
    pub log: LogSettings,
    pub codes: CodeMessages,
}

impl Settings {
    /// Profile defaults, before any variable overrides.
    pub fn for_env(env: Environment) -> Self {
        let (level, request_log) = match env {
            Environment::Development => (LogLevel::Debug, true),
            Environment::Production => (LogLevel::Info, true),
            Environment::Test => (LogLevel::Info, false),
        };
        Settings {
            env,
            bind_addr: "127.0.0.1:5000".into(),
            database_url: None,
            max_connections: 5,
            secret_key: DEV_SECRET_KEY.into(),
            token_expires_in: 3600,
            root_group: "root".into(),
            body_limit: 1024 * 1024,
            log: LogSettings { level, request_log },
            codes: CodeMessages::new(),
        }
    }

    /// Load `.env` if present, then read the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let env = match var("APP_ENV") {
            Some(v) => v.parse()?,
            None => Environment::Development,
        };
        let mut settings = Self::for_env(env);

        if let Some(v) = var("BIND_ADDR") {
            settings.bind_addr = v;
        }
        settings.database_url = var("DATABASE_URL");
        if let Some(v) = var("DATABASE_MAX_CONNECTIONS") {
            settings.max_connections = parse_setting("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        match var("SECRET_KEY") {
            Some(v) => settings.secret_key = v,
            None if env == Environment::Production => {
                return Err(ConfigError::MissingSetting("SECRET_KEY"));
            }
            None => {}
        }
        if let Some(v) = var("TOKEN_EXPIRES_IN") {
            settings.token_expires_in = parse_setting("TOKEN_EXPIRES_IN", &v)?;
        }
        if let Some(v) = var("ROOT_GROUP") {
            settings.root_group = v;
        }
        if let Some(v) = var("BODY_LIMIT") {
            settings.body_limit = parse_setting("BODY_LIMIT", &v)?;
        }
        if let Some(v) = var("LOG_LEVEL") {
            settings.log.level = v.parse()?;
        }
        if let Some(v) = var("REQUEST_LOG") {
            settings.log.request_log = parse_bool("REQUEST_LOG", &v)?;
        }
        if let Some(v) = var("CODE_MESSAGES") {
            settings.codes = CodeMessages::parse_overrides(&v).ok_or(ConfigError::InvalidSetting {
                name: "CODE_MESSAGES",
                value: v,
            })?;
        }
        Ok(settings)
    }
}

fn parse_setting<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidSetting {
        name,
        value: value.to_string(),
    })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidSetting {
            name,
            value: value.to_string(),
        }),
    }
}

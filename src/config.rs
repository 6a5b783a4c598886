use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use std::path::Path;

use crate::auth::SecretScheme;
use crate::models::Role;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub store: StoreConfig,
    pub database: DbConfig,
    pub auth: AuthConfig,
    pub alerts: AlertConfig,
    pub logging: LoggingConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    /// Full connection URL; takes precedence over the individual parts.
    pub url: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 5432,
            user: "postgres".into(),
            password: String::new(),
            name: "bornes".into(),
            max_connections: 5,
            url: None,
        }
    }
}

impl DbConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name);
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        Ok(options)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub secret_scheme: SecretScheme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Fill level (percent) under which a report is logged as a warning.
    pub fill_threshold: i32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { fill_threshold: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub users: Vec<SeedUser>,
    pub devices: Vec<SeedDevice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub login: String,
    pub secret: String,
    pub display_name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDevice {
    pub device_id: String,
    pub room: String,
    #[serde(default = "full_level")]
    pub fill_level: i32,
    #[serde(default = "full_level")]
    pub battery_level: i32,
    /// Login of the agent in charge of the device.
    #[serde(default)]
    pub assigned_agent: Option<String>,
}

fn full_level() -> i32 {
    100
}

impl Config {
    /// `APP_CONFIG` if set, else the default path when it exists, else built-in defaults.
    /// Environment overrides are applied in every case.
    pub fn discover() -> Result<Self, anyhow::Error> {
        if let Ok(path) = std::env::var("APP_CONFIG") {
            return Self::load(path);
        }
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            return Self::load(DEFAULT_CONFIG_PATH);
        }
        let mut cfg = Self::default();
        cfg.apply_overrides(env_lookup)?;
        Ok(cfg)
    }

    /// Load YAML from disk, expand ${VAR} placeholders, parse, then apply env overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut cfg = Self::from_yaml(&raw, env_lookup)?;
        cfg.apply_overrides(env_lookup)?;
        Ok(cfg)
    }

    pub fn from_yaml<F>(raw: &str, lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expanded = expand_placeholders(raw, &lookup)?;
        serde_yaml::from_str(&expanded).context("failed to parse config YAML")
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("API_PORT") {
            self.api.port = port
                .parse()
                .with_context(|| format!("API_PORT is not a port number: {}", port))?;
        }
        if let Some(backend) = lookup("STORE_BACKEND") {
            self.store.backend = match backend.to_ascii_lowercase().as_str() {
                "memory" => StoreBackend::Memory,
                "postgres" => StoreBackend::Postgres,
                other => anyhow::bail!("STORE_BACKEND must be memory or postgres, got {}", other),
            };
        }
        if let Some(host) = lookup("DB_HOST") {
            self.database.host = host;
        }
        if let Some(port) = lookup("DB_PORT") {
            self.database.port = port
                .parse()
                .with_context(|| format!("DB_PORT is not a port number: {}", port))?;
        }
        if let Some(user) = lookup("DB_USER") {
            self.database.user = user;
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            self.database.password = password;
        }
        if let Some(name) = lookup("DB_NAME") {
            self.database.name = name;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url);
        }
        Ok(())
    }

    pub fn api_bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Expand `${VAR}` and `${VAR:-default}`; `$$` yields a literal `$`.
/// A bare `$` not followed by `{` is kept as-is.
fn expand_placeholders<F>(input: &str, lookup: &F) -> Result<String, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
        } else if let Some(body) = after.strip_prefix('{') {
            let end = body
                .find('}')
                .context("unterminated placeholder: missing '}'")?;
            let expr = &body[..end];
            let (name, default) = match expr.split_once(":-") {
                Some((name, default)) => (name, Some(default)),
                None => (expr, None),
            };
            let value = lookup(name)
                .or_else(|| default.map(str::to_string))
                .with_context(|| format!("missing environment variable: {}", name))?;
            out.push_str(&value);
            rest = &body[end + 1..];
        } else {
            out.push('$');
            rest = after;
        }
    }
    out.push_str(rest);

    Ok(out)
}

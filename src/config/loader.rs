//! Load settings from environment variables (or any key lookup, for tests).

use crate::config::types::*;
use crate::error::ConfigError;
use indexmap::IndexMap;
use std::time::Duration;

impl Settings {
    /// Read settings from the process environment. Load `.env` before calling this if wanted.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the raw value for a variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let connect_timeout = match non_empty("DB_CONNECT_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "DB_CONNECT_TIMEOUT_SECS",
                value: raw.clone(),
            })?),
            None => Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Settings {
            database: DatabaseSettings {
                connection_string: non_empty("DB_CONNECTION_STRING"),
                dsn: non_empty("DB_DSN"),
                username: non_empty("DB_USERNAME"),
                password: non_empty("DB_PASSWORD"),
                connect_timeout,
            },
            students_query: non_empty("STUDENTS_QUERY").unwrap_or_else(|| DEFAULT_STUDENTS_QUERY.to_string()),
            active_where_clause: lookup("ACTIVE_WHERE_CLAUSE")
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            koha: KohaSettings {
                branch: lookup("KOHA_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
                category: lookup("KOHA_CATEGORY").unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                static_attributes: parse_static_attributes(lookup("KOHA_STATIC_ATTRIBUTES").as_deref())?,
            },
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }
}

/// Parse `type=value,type=value`. Blank items are skipped; a repeated type keeps its first position and the last value.
pub fn parse_static_attributes(raw: Option<&str>) -> Result<IndexMap<String, String>, ConfigError> {
    let mut attributes = IndexMap::new();
    let Some(raw) = raw else {
        return Ok(attributes);
    };
    for item in raw.split(',') {
        if item.trim().is_empty() {
            continue;
        }
        let (key, value) = item
            .split_once('=')
            .ok_or_else(|| ConfigError::StaticAttribute(item.to_string()))?;
        attributes.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(attributes)
}

/// Translate a `LOG_LEVEL` value (e.g. `INFO`, `WARNING`) into a tracing filter directive.
pub fn log_level_directive(level: &str) -> String {
    match level.trim().to_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        "" => "info".to_string(),
        other => other.to_string(),
    }
}

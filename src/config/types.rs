//! Runtime settings: built once at startup and shared read-only.

use crate::error::ConfigError;
use indexmap::IndexMap;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_STUDENTS_QUERY: &str =
    "SELECT reg_no, first_name, surname, email, phone, course, level FROM vw_students WHERE active = 1";
pub const DEFAULT_BRANCH: &str = "MAIN";
pub const DEFAULT_CATEGORY: &str = "STUD";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8100;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    /// Base query returning one row per student.
    pub students_query: String,
    /// Raw SQL appended for `active_only` fetches. Operator-controlled; never built from request input.
    pub active_where_clause: String,
    pub koha: KohaSettings,
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database: DatabaseSettings::default(),
            students_query: DEFAULT_STUDENTS_QUERY.to_string(),
            active_where_clause: String::new(),
            koha: KohaSettings::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Listen address as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Static values stamped onto every patron payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KohaSettings {
    pub branch: String,
    pub category: String,
    /// Extended attributes appended to every patron, in configured order.
    pub static_attributes: IndexMap<String, String>,
}

impl Default for KohaSettings {
    fn default() -> Self {
        KohaSettings {
            branch: DEFAULT_BRANCH.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            static_attributes: IndexMap::new(),
        }
    }
}

#[derive(Clone)]
pub struct DatabaseSettings {
    /// Full connection URL; wins over `dsn`.
    pub connection_string: Option<String>,
    /// Base connection URL that `username`/`password` are applied to.
    pub dsn: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub connect_timeout: Duration,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            connection_string: None,
            dsn: None,
            username: None,
            password: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("connection_string", &self.connection_string.as_ref().map(|_| "<set>"))
            .field("dsn", &self.dsn)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl DatabaseSettings {
    /// Assemble connect options. Fails when neither a connection string nor a DSN is configured.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.connection_string {
            return PgConnectOptions::from_str(url)
                .map_err(|e| ConfigError::ConnectionString(e.to_string()));
        }
        let dsn = self.dsn.as_deref().ok_or(ConfigError::MissingDatabase)?;
        let mut options =
            PgConnectOptions::from_str(dsn).map_err(|e| ConfigError::ConnectionString(e.to_string()))?;
        if let Some(username) = &self.username {
            options = options.username(username);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        Ok(options)
    }
}

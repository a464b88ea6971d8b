// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Connection configuration

use crate::error::{ThesaurusError, ThesaurusResult};
use crate::store::BackendType;
use crate::vocab::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 3306;

/// Connection settings for the backing store
///
/// Holds host, database name, credentials, the language whose terms are
/// searched by word lookups, and the store driver to use.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfiguration {
    /// Host name, optionally with `:port`
    pub host: String,
    pub database: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
    /// Selects the `language_id` filter applied to word lookups
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub backend: BackendType,
}

impl Default for DatabaseConfiguration {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            database: "openthesaurus".to_string(),
            user: "root".to_string(),
            password: String::new(),
            language: Language::German,
            backend: BackendType::MySql,
        }
    }
}

impl DatabaseConfiguration {
    pub fn new(host: &str, database: &str, user: &str, password: &str, language: Language) -> Self {
        Self {
            host: host.to_string(),
            database: database.to_string(),
            user: user.to_string(),
            password: password.to_string(),
            language,
            backend: BackendType::MySql,
        }
    }

    /// Configuration for the in-memory driver, loading `fixture` when given
    pub fn in_memory(fixture: Option<PathBuf>) -> Self {
        Self {
            backend: BackendType::Memory { fixture },
            ..Self::default()
        }
    }

    pub fn with_backend(mut self, backend: BackendType) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Read the configuration from `OT_*` environment variables
    ///
    /// Unset variables keep their default value. Recognized variables:
    /// `OT_DB_HOST`, `OT_DB_NAME`, `OT_DB_USER`, `OT_DB_PASSWORD`,
    /// `OT_LANGUAGE`, `OT_BACKEND` and `OT_FIXTURE`.
    pub fn from_env() -> ThesaurusResult<Self> {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("OT_DB_HOST") {
            config.host = host;
        }
        if let Ok(database) = std::env::var("OT_DB_NAME") {
            config.database = database;
        }
        if let Ok(user) = std::env::var("OT_DB_USER") {
            config.user = user;
        }
        if let Ok(password) = std::env::var("OT_DB_PASSWORD") {
            config.password = password;
        }
        if let Ok(language) = std::env::var("OT_LANGUAGE") {
            config.language = language.parse().map_err(ThesaurusError::Configuration)?;
        }
        if let Ok(backend) = std::env::var("OT_BACKEND") {
            config.backend = backend.parse().map_err(ThesaurusError::Configuration)?;
        }
        if let Ok(fixture) = std::env::var("OT_FIXTURE") {
            match &mut config.backend {
                BackendType::Memory { fixture: slot } => *slot = Some(PathBuf::from(fixture)),
                BackendType::MySql => {
                    return Err(ThesaurusError::Configuration(
                        "OT_FIXTURE requires OT_BACKEND=memory".to_string(),
                    ))
                }
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ThesaurusResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ThesaurusError::Configuration(format!("Failed to read {:?}: {}", path, e))
        })?;
        let config: DatabaseConfiguration = serde_json::from_str(&content).map_err(|e| {
            ThesaurusError::Configuration(format!("Failed to parse {:?}: {}", path, e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ThesaurusResult<()> {
        if let BackendType::MySql = self.backend {
            for (field, value) in [
                ("host", &self.host),
                ("database", &self.database),
                ("user", &self.user),
            ] {
                if value.trim().is_empty() {
                    return Err(ThesaurusError::Configuration(format!(
                        "{} must not be empty",
                        field
                    )));
                }
            }
        }
        Ok(())
    }

    /// Host and port, defaulting to the MySQL port
    ///
    /// Accepts `host`, `host:port`, a bare IPv6 address, or `[address]:port`.
    pub fn host_and_port(&self) -> ThesaurusResult<(String, u16)> {
        let invalid = || ThesaurusError::Configuration(format!("Invalid host '{}'", self.host));
        let parse_port = |port: &str| port.parse::<u16>().map_err(|_| invalid());

        if let Some(rest) = self.host.strip_prefix('[') {
            let (address, tail) = rest.split_once(']').ok_or_else(invalid)?;
            return match tail {
                "" => Ok((address.to_string(), DEFAULT_PORT)),
                _ => {
                    let port = tail.strip_prefix(':').ok_or_else(invalid)?;
                    Ok((address.to_string(), parse_port(port)?))
                }
            };
        }
        match self.host.matches(':').count() {
            0 => Ok((self.host.clone(), DEFAULT_PORT)),
            1 => {
                let (host, port) = self.host.split_once(':').ok_or_else(invalid)?;
                Ok((host.to_string(), parse_port(port)?))
            }
            _ => Ok((self.host.clone(), DEFAULT_PORT)),
        }
    }

    /// Connection URL including the password
    pub fn connection_url(&self) -> String {
        match &self.backend {
            BackendType::MySql => format!(
                "mysql://{}:{}@{}/{}",
                self.user, self.password, self.host, self.database
            ),
            BackendType::Memory { fixture } => match fixture {
                Some(path) => format!("memory://{}", path.display()),
                None => "memory://".to_string(),
            },
        }
    }

    /// Connection URL safe for logs
    pub fn masked_url(&self) -> String {
        match &self.backend {
            BackendType::MySql => format!(
                "mysql://{}:***@{}/{}",
                self.user, self.host, self.database
            ),
            BackendType::Memory { .. } => self.connection_url(),
        }
    }
}

impl fmt::Debug for DatabaseConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfiguration")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("language", &self.language)
            .field("backend", &self.backend)
            .finish()
    }
}

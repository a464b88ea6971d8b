// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Store connection factory
//!
//! Creates the store driver selected by a [`DatabaseConfiguration`].

use super::memory::{MemoryStore, ThesaurusSnapshot};
use super::traits::StoreConnection;
use super::types::{BackendType, StoreResult};
use crate::config::DatabaseConfiguration;

/// Open a connection to the store described by `config`
///
/// # Returns
/// A boxed trait object that implements [`StoreConnection`]
///
/// # Examples
/// ```ignore
/// let config = DatabaseConfiguration::in_memory(Some("fixture.json".into()));
/// let mut connection = connect(&config)?;
/// ```
pub fn connect(config: &DatabaseConfiguration) -> StoreResult<Box<dyn StoreConnection>> {
    match &config.backend {
        BackendType::MySql => connect_mysql(config),
        BackendType::Memory { fixture } => {
            let store = match fixture {
                Some(path) => MemoryStore::from_json_file(path)?,
                None => MemoryStore::new(ThesaurusSnapshot::default()),
            };
            Ok(Box::new(store))
        }
    }
}

#[cfg(feature = "mysql-backend")]
fn connect_mysql(config: &DatabaseConfiguration) -> StoreResult<Box<dyn StoreConnection>> {
    let store = super::mysql::MySqlStore::connect(config)?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "mysql-backend"))]
fn connect_mysql(_config: &DatabaseConfiguration) -> StoreResult<Box<dyn StoreConnection>> {
    Err(super::types::StoreError::Unsupported(
        "MySQL backend not compiled in; enable the `mysql-backend` feature".to_string(),
    ))
}

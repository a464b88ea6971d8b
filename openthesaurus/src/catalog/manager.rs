// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query catalog
//!
//! Maps every [`QueryName`] to a statement prepared on one connection. A
//! catalog is either complete or not built at all.

use super::queries::{QueryName, Statement};
use crate::store::{PreparedHandle, StoreConnection, StoreResult};
use crate::vocab::Language;
use std::collections::HashMap;

/// Prepared statements for all named queries of one connection
#[derive(Debug)]
pub struct QueryCatalog {
    entries: HashMap<QueryName, PreparedHandle>,
    case_sensitive: bool,
    language: Language,
}

impl QueryCatalog {
    /// Prepare every named query on `connection`
    ///
    /// If any preparation fails, the statements prepared so far are released
    /// and the error is returned.
    pub fn build(
        connection: &mut dyn StoreConnection,
        case_sensitive: bool,
        language: Language,
    ) -> StoreResult<Self> {
        let mut entries = HashMap::with_capacity(QueryName::ALL.len());
        for name in QueryName::ALL {
            match connection.prepare(&Statement::new(name, case_sensitive, language)) {
                Ok(handle) => {
                    entries.insert(name, handle);
                }
                Err(e) => {
                    log::warn!("Failed to prepare {}: {}", name, e);
                    release_handles(connection, entries.into_values());
                    return Err(e);
                }
            }
        }

        log::debug!(
            "Prepared {} queries on {} (case sensitive: {})",
            entries.len(),
            connection.backend_name(),
            case_sensitive
        );
        Ok(Self {
            entries,
            case_sensitive,
            language,
        })
    }

    /// Build the catalog for another case-sensitivity setting
    ///
    /// Only case-dependent queries are prepared again, the other handles are
    /// shared with `self`. Use [`QueryCatalog::release_stale`] on the old
    /// catalog once the new one is installed.
    pub fn rebuild_case_sensitive_queries(
        &self,
        connection: &mut dyn StoreConnection,
        case_sensitive: bool,
    ) -> StoreResult<Self> {
        let mut entries = self.entries.clone();
        let mut fresh = Vec::new();
        for name in QueryName::ALL.into_iter().filter(|n| n.is_case_dependent()) {
            match connection.prepare(&Statement::new(name, case_sensitive, self.language)) {
                Ok(handle) => {
                    entries.insert(name, handle);
                    fresh.push(handle);
                }
                Err(e) => {
                    release_handles(connection, fresh);
                    return Err(e);
                }
            }
        }

        Ok(Self {
            entries,
            case_sensitive,
            language: self.language,
        })
    }

    pub fn get(&self, name: QueryName) -> Option<PreparedHandle> {
        self.entries.get(&name).copied()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Release the handles of `self` that `current` no longer uses
    pub fn release_stale(self, connection: &mut dyn StoreConnection, current: &QueryCatalog) {
        let stale = self
            .entries
            .into_iter()
            .filter(|(name, handle)| current.get(*name) != Some(*handle))
            .map(|(_, handle)| handle);
        release_handles(connection, stale);
    }

    /// Release every handle of this catalog
    pub fn release_all(&mut self, connection: &mut dyn StoreConnection) {
        release_handles(connection, self.entries.drain().map(|(_, handle)| handle));
    }
}

fn release_handles(
    connection: &mut dyn StoreConnection,
    handles: impl IntoIterator<Item = PreparedHandle>,
) {
    for handle in handles {
        if let Err(e) = connection.release(handle) {
            log::warn!("Failed to release statement #{}: {}", handle.id(), e);
        }
    }
}

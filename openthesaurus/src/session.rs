// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Connection session
//!
//! A session owns the live store connection together with the query catalog
//! prepared on it. Every node created by one facade shares the same session,
//! so a reconfiguration is visible to nodes that already exist.

use crate::catalog::{QueryCatalog, QueryName};
use crate::config::DatabaseConfiguration;
use crate::error::{ThesaurusError, ThesaurusResult};
use crate::store::{self, Param, PreparedHandle, Row, StoreConnection};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Connection, catalog and the configuration they were built from
struct SessionState {
    config: DatabaseConfiguration,
    connection: Box<dyn StoreConnection>,
    catalog: QueryCatalog,
}

impl SessionState {
    fn open(config: DatabaseConfiguration, case_sensitive: bool) -> ThesaurusResult<Self> {
        config.validate()?;
        let connection = store::connect(&config)
            .map_err(|e| ThesaurusError::connection(config.masked_url(), e))?;
        Self::with_connection(config, connection, case_sensitive)
    }

    fn with_connection(
        config: DatabaseConfiguration,
        mut connection: Box<dyn StoreConnection>,
        case_sensitive: bool,
    ) -> ThesaurusResult<Self> {
        match QueryCatalog::build(connection.as_mut(), case_sensitive, config.language) {
            Ok(catalog) => {
                log::info!(
                    "Session ready on {} ({} backend)",
                    config.masked_url(),
                    connection.backend_name()
                );
                Ok(Self {
                    config,
                    connection,
                    catalog,
                })
            }
            Err(e) => {
                if let Err(close_err) = connection.close() {
                    log::warn!("Failed to close connection: {}", close_err);
                }
                Err(ThesaurusError::connection(
                    format!("preparing queries on {}", config.masked_url()),
                    e,
                ))
            }
        }
    }
}

impl Drop for SessionState {
    fn drop(&mut self) {
        self.catalog.release_all(self.connection.as_mut());
        if let Err(e) = self.connection.close() {
            log::warn!(
                "Failed to close connection to {}: {}",
                self.config.masked_url(),
                e
            );
        }
    }
}

/// Shared broker for all queries of one facade
///
/// The connection and catalog sit behind one mutex: a rebuild never overlaps
/// an in-flight query, and queries on one connection are serialized.
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    /// Connect with `config` and prepare the full query catalog
    pub fn open(config: DatabaseConfiguration, case_sensitive: bool) -> ThesaurusResult<Self> {
        Ok(Self {
            state: Mutex::new(SessionState::open(config, case_sensitive)?),
        })
    }

    /// Use an already established connection
    pub fn with_connection(
        config: DatabaseConfiguration,
        connection: Box<dyn StoreConnection>,
        case_sensitive: bool,
    ) -> ThesaurusResult<Self> {
        Ok(Self {
            state: Mutex::new(SessionState::with_connection(
                config,
                connection,
                case_sensitive,
            )?),
        })
    }

    /// Prepared handle registered for `name`
    pub fn query(&self, name: QueryName) -> ThesaurusResult<PreparedHandle> {
        self.state
            .lock()
            .catalog
            .get(name)
            .ok_or(ThesaurusError::UnknownQuery(name))
    }

    /// Execute a named query and drain its rows
    ///
    /// `context` is only evaluated on failure and describes the operation,
    /// e.g. the id or word the query was issued for.
    pub fn execute<F>(
        &self,
        name: QueryName,
        params: &[Param],
        context: F,
    ) -> ThesaurusResult<Vec<Row>>
    where
        F: FnOnce() -> String,
    {
        let mut state = self.state.lock();
        let handle = state
            .catalog
            .get(name)
            .ok_or(ThesaurusError::UnknownQuery(name))?;

        log::debug!("Executing {} with {:?}", name, params);
        state
            .connection
            .execute(handle, params)
            .map_err(|source| ThesaurusError::Query {
                context: context(),
                source,
            })
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.state.lock().catalog.is_case_sensitive()
    }

    /// Switch word lookups between byte-exact and case-folding comparison
    ///
    /// Only the word lookup is prepared again; its previous statement is
    /// released once the new catalog is in place.
    pub fn set_case_sensitive(&self, case_sensitive: bool) -> ThesaurusResult<()> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.catalog.is_case_sensitive() == case_sensitive {
            return Ok(());
        }

        let fresh = state
            .catalog
            .rebuild_case_sensitive_queries(state.connection.as_mut(), case_sensitive)
            .map_err(|e| {
                ThesaurusError::connection(
                    format!("preparing case-sensitive={} queries", case_sensitive),
                    e,
                )
            })?;
        let stale = std::mem::replace(&mut state.catalog, fresh);
        stale.release_stale(state.connection.as_mut(), &state.catalog);
        log::debug!("Case-sensitive word lookup: {}", case_sensitive);
        Ok(())
    }

    pub fn configuration(&self) -> DatabaseConfiguration {
        self.state.lock().config.clone()
    }

    /// Reconnect with `config` and rebuild the whole catalog
    ///
    /// The current case-sensitivity setting is kept. On failure the previous
    /// connection and catalog stay in use.
    pub fn set_configuration(&self, config: DatabaseConfiguration) -> ThesaurusResult<()> {
        let mut guard = self.state.lock();
        let case_sensitive = guard.catalog.is_case_sensitive();
        log::info!(
            "Reconfiguring session: {} -> {}",
            guard.config.masked_url(),
            config.masked_url()
        );
        let fresh = SessionState::open(config, case_sensitive)?;
        let stale = std::mem::replace(&mut *guard, fresh);
        drop(guard);
        drop(stale);
        Ok(())
    }

    /// Name of the store driver in use
    pub fn backend_name(&self) -> &'static str {
        self.state.lock().connection.backend_name()
    }
}

/// Upgrade a node's back-reference to its session
pub(crate) fn live_session(session: &Weak<Session>) -> ThesaurusResult<Arc<Session>> {
    session
        .upgrade()
        .ok_or(ThesaurusError::UninitializedSession)
}

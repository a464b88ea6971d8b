// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! OpenThesaurus facade
//!
//! Entry point for all lookups. The facade owns the session; every node it
//! returns holds only a weak reference to it.

use crate::catalog::QueryName;
use crate::config::DatabaseConfiguration;
use crate::error::ThesaurusResult;
use crate::model::{decode, Synset, Term};
use crate::session::Session;
use crate::store::{Param, StoreConnection, StoreError};
use std::collections::HashSet;
use std::sync::{Arc, Weak};

/// Read-only access to an OpenThesaurus database
///
/// # Examples
/// ```ignore
/// let thesaurus = OpenThesaurus::open(DatabaseConfiguration::from_env()?)?;
/// for synset in thesaurus.synsets_by_word("Fission")? {
///     println!("{}", synset);
/// }
/// ```
pub struct OpenThesaurus {
    session: Arc<Session>,
}

impl OpenThesaurus {
    /// Connect with case-insensitive word lookups
    pub fn open(config: DatabaseConfiguration) -> ThesaurusResult<Self> {
        Self::open_with_case_sensitivity(config, false)
    }

    pub fn open_with_case_sensitivity(
        config: DatabaseConfiguration,
        case_sensitive: bool,
    ) -> ThesaurusResult<Self> {
        let session = Session::open(config, case_sensitive)?;
        Ok(Self {
            session: Arc::new(session),
        })
    }

    /// Use an existing store connection, e.g. a prepared [`crate::store::MemoryStore`]
    pub fn with_connection(
        config: DatabaseConfiguration,
        connection: Box<dyn StoreConnection>,
        case_sensitive: bool,
    ) -> ThesaurusResult<Self> {
        let session = Session::with_connection(config, connection, case_sensitive)?;
        Ok(Self {
            session: Arc::new(session),
        })
    }

    fn weak(&self) -> Weak<Session> {
        Arc::downgrade(&self.session)
    }

    /// Term with the given id, `None` if it does not exist
    pub fn term_by_id(&self, id: i64) -> ThesaurusResult<Option<Term>> {
        let context = || format!("term {}", id);
        let rows = self
            .session
            .execute(QueryName::SelectTermById, &[Param::Int(id)], context)?;
        let weak = self.weak();
        Ok(Term::from_rows(&rows, &weak, context)?.into_iter().next())
    }

    /// Terms whose normalized or raw word matches `word`
    ///
    /// Comparison follows the case-sensitivity setting; only terms of the
    /// configured language are returned.
    pub fn terms_by_word(&self, word: &str) -> ThesaurusResult<HashSet<Term>> {
        let context = || format!("terms with word '{}'", word);
        let rows = self.session.execute(
            QueryName::SelectTermByWord,
            &[Param::from(word), Param::from(word)],
            context,
        )?;
        let weak = self.weak();
        Ok(Term::from_rows(&rows, &weak, context)?.into_iter().collect())
    }

    /// Synset with the given id, `None` if it does not exist
    pub fn synset_by_id(&self, id: i64) -> ThesaurusResult<Option<Synset>> {
        let context = || format!("synset {}", id);
        let rows = self
            .session
            .execute(QueryName::SelectSynset, &[Param::Int(id)], context)?;
        match rows.first() {
            Some(row) => {
                let id = decode(row.get_i64("id"), context)?;
                Ok(Some(Synset::new(id, self.weak())))
            }
            None => Ok(None),
        }
    }

    /// Synsets containing a term that matches `word`
    pub fn synsets_by_word(&self, word: &str) -> ThesaurusResult<HashSet<Synset>> {
        let context = || format!("synsets with word '{}'", word);
        let rows = self.session.execute(
            QueryName::SelectTermByWord,
            &[Param::from(word), Param::from(word)],
            context,
        )?;
        rows.iter()
            .map(|row| -> ThesaurusResult<Synset> {
                let id = decode(row.get_i64("synset_id"), context)?;
                Ok(Synset::new(id, self.weak()))
            })
            .collect()
    }

    /// Synset owning the given term, `None` if the term does not exist
    pub fn synset_by_term_id(&self, term_id: i64) -> ThesaurusResult<Option<Synset>> {
        let context = || format!("synset of term {}", term_id);
        let rows = self
            .session
            .execute(QueryName::SelectTermById, &[Param::Int(term_id)], context)?;
        match rows.first() {
            Some(row) => {
                let id = decode(row.get_i64("synset_id"), context)?;
                Ok(Some(Synset::new(id, self.weak())))
            }
            None => Ok(None),
        }
    }

    /// Every synset, with nothing loaded yet
    pub fn all_synsets(&self) -> ThesaurusResult<HashSet<Synset>> {
        let context = || "all synsets".to_string();
        let rows = self.session.execute(QueryName::AllSynsets, &[], context)?;
        let weak = self.weak();
        rows.iter()
            .map(|row| -> ThesaurusResult<Synset> {
                let id = decode(row.get_i64("id"), context)?;
                Ok(Synset::new(id, weak.clone()))
            })
            .collect()
    }

    pub fn synset_count(&self) -> ThesaurusResult<usize> {
        let context = || "synset count".to_string();
        let rows = self.session.execute(QueryName::CountSynsets, &[], context)?;
        match rows.first() {
            Some(row) => {
                let count = decode(row.get_i64("num"), context)?;
                let count = usize::try_from(count).map_err(|_| StoreError::ColumnType {
                    column: "num".to_string(),
                    expected: "a non-negative count",
                    found: count.to_string(),
                });
                decode(count, context)
            }
            None => Ok(0),
        }
    }

    pub fn set_case_sensitive(&self, case_sensitive: bool) -> ThesaurusResult<()> {
        self.session.set_case_sensitive(case_sensitive)
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.session.is_case_sensitive()
    }

    /// Switch to another database; existing nodes use the new connection
    pub fn set_configuration(&self, config: DatabaseConfiguration) -> ThesaurusResult<()> {
        self.session.set_configuration(config)
    }

    pub fn configuration(&self) -> DatabaseConfiguration {
        self.session.configuration()
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

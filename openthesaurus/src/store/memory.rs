// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory store driver
//!
//! Holds the thesaurus tables as plain vectors loaded from a
//! [`ThesaurusSnapshot`] and evaluates each named query with the same row
//! semantics as its SQL text. Used for tests, demos and offline fixtures.

use super::traits::StoreConnection;
use super::types::{Param, PreparedHandle, Row, StoreError, StoreResult};
use crate::catalog::{QueryName, Statement};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Row of the `term` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: i64,
    pub synset_id: i64,
    pub word: String,
    #[serde(default)]
    pub normalized_word: Option<String>,
    #[serde(default)]
    pub level_id: Option<i32>,
    #[serde(default)]
    pub is_acronym: bool,
    #[serde(default)]
    pub is_short_form: bool,
    pub language_id: i32,
    #[serde(default)]
    pub word_grammar_id: Option<i32>,
}

impl TermRecord {
    /// Plain term without register, flags or grammar information
    pub fn new(id: i64, synset_id: i64, word: &str, language_id: i32) -> Self {
        Self {
            id,
            synset_id,
            word: word.to_string(),
            normalized_word: None,
            level_id: None,
            is_acronym: false,
            is_short_form: false,
            language_id,
            word_grammar_id: None,
        }
    }

    fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id)
            .with("word", self.word.as_str())
            .with("normalized_word", self.normalized_word.clone())
            .with("level_id", self.level_id)
            .with("is_acronym", self.is_acronym)
            .with("is_short_form", self.is_short_form)
            .with("language_id", self.language_id)
            .with("word_grammar_id", self.word_grammar_id)
            .with("synset_id", self.synset_id)
    }
}

/// Directed typed edge of `synset_link` or `term_link`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source_id: i64,
    pub target_id: i64,
    pub link_type_id: i32,
}

/// Row of the `category` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: i64,
    pub category_name: String,
    #[serde(default)]
    pub category_type_id: i32,
    #[serde(default)]
    pub is_disabled: bool,
}

/// Row of the `category_link` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLinkRecord {
    pub category_id: i64,
    pub synset_id: i64,
}

/// Row of the `tag` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: i64,
    pub name: String,
}

/// Row of the `term_tag` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermTagRecord {
    pub tag_id: i64,
    pub term_id: i64,
}

/// Complete content of the thesaurus tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThesaurusSnapshot {
    #[serde(default)]
    pub synsets: Vec<i64>,
    #[serde(default)]
    pub terms: Vec<TermRecord>,
    #[serde(default)]
    pub synset_links: Vec<LinkRecord>,
    #[serde(default)]
    pub term_links: Vec<LinkRecord>,
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub category_links: Vec<CategoryLinkRecord>,
    #[serde(default)]
    pub tags: Vec<TagRecord>,
    #[serde(default)]
    pub term_tags: Vec<TermTagRecord>,
}

impl ThesaurusSnapshot {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: ThesaurusSnapshot = serde_json::from_str(&content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check key uniqueness and referential integrity between the tables
    pub fn validate(&self) -> StoreResult<()> {
        let synsets = unique_ids("synset", self.synsets.iter().copied())?;
        let terms = unique_ids("term", self.terms.iter().map(|t| t.id))?;
        let categories = unique_ids("category", self.categories.iter().map(|c| c.id))?;
        let tags = unique_ids("tag", self.tags.iter().map(|t| t.id))?;

        for term in &self.terms {
            if !synsets.contains(&term.synset_id) {
                return Err(StoreError::Fixture(format!(
                    "term {} references unknown synset {}",
                    term.id, term.synset_id
                )));
            }
        }
        for link in &self.synset_links {
            if !synsets.contains(&link.source_id) || !synsets.contains(&link.target_id) {
                return Err(StoreError::Fixture(format!(
                    "synset link {} -> {} references an unknown synset",
                    link.source_id, link.target_id
                )));
            }
        }
        for link in &self.term_links {
            if !terms.contains(&link.source_id) || !terms.contains(&link.target_id) {
                return Err(StoreError::Fixture(format!(
                    "term link {} -> {} references an unknown term",
                    link.source_id, link.target_id
                )));
            }
        }
        for link in &self.category_links {
            if !categories.contains(&link.category_id) || !synsets.contains(&link.synset_id) {
                return Err(StoreError::Fixture(format!(
                    "category link {} -> {} references an unknown category or synset",
                    link.category_id, link.synset_id
                )));
            }
        }
        for tag in &self.term_tags {
            if !tags.contains(&tag.tag_id) || !terms.contains(&tag.term_id) {
                return Err(StoreError::Fixture(format!(
                    "term tag {} -> {} references an unknown tag or term",
                    tag.tag_id, tag.term_id
                )));
            }
        }
        Ok(())
    }

    pub fn add_synset(&mut self, id: i64) -> &mut Self {
        if !self.synsets.contains(&id) {
            self.synsets.push(id);
        }
        self
    }

    /// Add a synset together with its terms, ids allocated after the current maximum
    pub fn add_synset_with_words(
        &mut self,
        synset_id: i64,
        words: &[&str],
        language_id: i32,
    ) -> &mut Self {
        self.add_synset(synset_id);
        let mut next_id = self.terms.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        for word in words {
            self.terms.push(TermRecord::new(next_id, synset_id, word, language_id));
            next_id += 1;
        }
        self
    }

    pub fn add_term(&mut self, term: TermRecord) -> &mut Self {
        self.add_synset(term.synset_id);
        self.terms.push(term);
        self
    }

    pub fn add_synset_link(
        &mut self,
        source_id: i64,
        target_id: i64,
        link_type_id: i32,
    ) -> &mut Self {
        self.synset_links.push(LinkRecord {
            source_id,
            target_id,
            link_type_id,
        });
        self
    }

    pub fn add_term_link(
        &mut self,
        source_id: i64,
        target_id: i64,
        link_type_id: i32,
    ) -> &mut Self {
        self.term_links.push(LinkRecord {
            source_id,
            target_id,
            link_type_id,
        });
        self
    }

    pub fn add_category(&mut self, category: CategoryRecord, synset_ids: &[i64]) -> &mut Self {
        for synset_id in synset_ids {
            self.category_links.push(CategoryLinkRecord {
                category_id: category.id,
                synset_id: *synset_id,
            });
        }
        self.categories.push(category);
        self
    }

    pub fn add_tag(&mut self, tag: TagRecord, term_ids: &[i64]) -> &mut Self {
        for term_id in term_ids {
            self.term_tags.push(TermTagRecord {
                tag_id: tag.id,
                term_id: *term_id,
            });
        }
        self.tags.push(tag);
        self
    }
}

/// Statement and execution counters shared with observers
#[derive(Debug, Default)]
pub struct StoreStats {
    live_statements: AtomicUsize,
    prepared_total: AtomicUsize,
    executions: Mutex<BTreeMap<QueryName, usize>>,
}

impl StoreStats {
    /// Statements prepared and not yet released
    pub fn live_statements(&self) -> usize {
        self.live_statements.load(Ordering::SeqCst)
    }

    /// Statements prepared over the lifetime of the store
    pub fn prepared_total(&self) -> usize {
        self.prepared_total.load(Ordering::SeqCst)
    }

    pub fn executions(&self, name: QueryName) -> usize {
        self.executions.lock().get(&name).copied().unwrap_or(0)
    }

    pub fn total_executions(&self) -> usize {
        self.executions.lock().values().sum()
    }
}

/// In-memory store driver for testing
pub struct MemoryStore {
    data: Arc<ThesaurusSnapshot>,
    statements: HashMap<u64, Statement>,
    next_handle: u64,
    stats: Arc<StoreStats>,
}

impl MemoryStore {
    pub fn new(snapshot: ThesaurusSnapshot) -> Self {
        Self::from_shared(Arc::new(snapshot))
    }

    /// Create a store over tables shared with other stores
    pub fn from_shared(data: Arc<ThesaurusSnapshot>) -> Self {
        Self {
            data,
            statements: HashMap::new(),
            next_handle: 1,
            stats: Arc::new(StoreStats::default()),
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        log::info!("Loading thesaurus snapshot from {:?}", path);
        Ok(Self::new(ThesaurusSnapshot::from_json_file(path)?))
    }

    /// Counters that stay readable after the store moved into a session
    pub fn stats(&self) -> Arc<StoreStats> {
        self.stats.clone()
    }

    fn run(&self, statement: &Statement, params: &[Param]) -> StoreResult<Vec<Row>> {
        let data = &self.data;
        let rows = match statement.name {
            QueryName::SelectSynset => {
                let id = int_param(statement, params, 0)?;
                data.synsets
                    .iter()
                    .filter(|s| **s == id)
                    .map(|s| Row::new().with("id", *s))
                    .collect()
            }
            QueryName::AllSynsets => data
                .synsets
                .iter()
                .map(|s| Row::new().with("id", *s))
                .collect(),
            QueryName::CountSynsets => {
                vec![Row::new().with("num", data.synsets.len() as i64)]
            }
            QueryName::SelectTermById => {
                let id = int_param(statement, params, 0)?;
                term_rows(data.terms.iter().filter(|t| t.id == id))
            }
            QueryName::SelectTermBySynset => {
                let synset_id = int_param(statement, params, 0)?;
                term_rows(data.terms.iter().filter(|t| t.synset_id == synset_id))
            }
            QueryName::SelectTermByWord => {
                let normalized = text_param(statement, params, 0)?;
                let word = text_param(statement, params, 1)?;
                let eq = |a: &str, b: &str| {
                    if statement.case_sensitive {
                        a == b
                    } else {
                        a.to_lowercase() == b.to_lowercase()
                    }
                };
                let language = statement.language.code();
                term_rows(data.terms.iter().filter(|t| {
                    let normalized_match = t
                        .normalized_word
                        .as_deref()
                        .is_some_and(|n| !n.is_empty() && eq(n, normalized));
                    (normalized_match || eq(&t.word, word)) && t.language_id == language
                }))
            }
            QueryName::SynsetLinks | QueryName::SynsetLinksBackwards => {
                let id = int_param(statement, params, 0)?;
                let link_type = int_param(statement, params, 1)?;
                let outgoing = statement.name == QueryName::SynsetLinks;
                data.synset_links
                    .iter()
                    .filter(|l| {
                        let anchor = if outgoing { l.source_id } else { l.target_id };
                        anchor == id && l.link_type_id as i64 == link_type
                    })
                    .map(|l| {
                        Row::new()
                            .with("synset_id", l.source_id)
                            .with("target_synset_id", l.target_id)
                            .with("link_type_id", l.link_type_id)
                    })
                    .collect()
            }
            QueryName::TermLinks | QueryName::TermLinksBackwards => {
                let id = int_param(statement, params, 0)?;
                let link_type = int_param(statement, params, 1)?;
                let outgoing = statement.name == QueryName::TermLinks;
                let related: Vec<i64> = data
                    .term_links
                    .iter()
                    .filter(|l| l.link_type_id as i64 == link_type)
                    .filter_map(|l| match outgoing {
                        true if l.source_id == id => Some(l.target_id),
                        false if l.target_id == id => Some(l.source_id),
                        _ => None,
                    })
                    .collect();
                term_rows(data.terms.iter().filter(|t| related.contains(&t.id)))
            }
            QueryName::SynsetCategories => {
                let synset_id = int_param(statement, params, 0)?;
                let mut categories: Vec<&CategoryRecord> = data
                    .categories
                    .iter()
                    .filter(|c| {
                        data.category_links
                            .iter()
                            .any(|l| l.category_id == c.id && l.synset_id == synset_id)
                    })
                    .collect();
                categories.sort_by_key(|c| c.id);
                categories
                    .into_iter()
                    .map(|c| {
                        Row::new()
                            .with("id", c.id)
                            .with("category_name", c.category_name.as_str())
                            .with("category_type_id", c.category_type_id)
                            .with("is_disabled", c.is_disabled)
                    })
                    .collect()
            }
            QueryName::TermTags => {
                let term_id = int_param(statement, params, 0)?;
                let mut names: Vec<&str> = data
                    .tags
                    .iter()
                    .filter(|tag| {
                        data.term_tags
                            .iter()
                            .any(|tt| tt.tag_id == tag.id && tt.term_id == term_id)
                    })
                    .map(|tag| tag.name.as_str())
                    .collect();
                names.sort_unstable();
                names
                    .into_iter()
                    .map(|name| Row::new().with("name", name))
                    .collect()
            }
        };
        Ok(rows)
    }
}

impl StoreConnection for MemoryStore {
    fn prepare(&mut self, statement: &Statement) -> StoreResult<PreparedHandle> {
        let id = self.next_handle;
        self.next_handle += 1;
        self.statements.insert(id, statement.clone());
        self.stats.live_statements.fetch_add(1, Ordering::SeqCst);
        self.stats.prepared_total.fetch_add(1, Ordering::SeqCst);
        log::debug!("Prepared {} as memory statement #{}", statement.name, id);
        Ok(PreparedHandle::new(id))
    }

    fn execute(&mut self, handle: PreparedHandle, params: &[Param]) -> StoreResult<Vec<Row>> {
        let statement = self
            .statements
            .get(&handle.id())
            .ok_or(StoreError::UnknownHandle(handle.id()))?;
        *self.stats.executions.lock().entry(statement.name).or_insert(0) += 1;
        self.run(statement, params)
    }

    fn release(&mut self, handle: PreparedHandle) -> StoreResult<()> {
        self.statements
            .remove(&handle.id())
            .ok_or(StoreError::UnknownHandle(handle.id()))?;
        self.stats.live_statements.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn close(&mut self) -> StoreResult<()> {
        let open = self.statements.len();
        self.statements.clear();
        self.stats.live_statements.fetch_sub(open, Ordering::SeqCst);
        Ok(())
    }
}

fn term_rows<'a>(terms: impl Iterator<Item = &'a TermRecord>) -> Vec<Row> {
    let mut terms: Vec<&TermRecord> = terms.collect();
    terms.sort_by_key(|t| t.id);
    terms.into_iter().map(TermRecord::to_row).collect()
}

/// Collect primary keys, failing on the first duplicate
fn unique_ids(table: &str, ids: impl Iterator<Item = i64>) -> StoreResult<HashSet<i64>> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StoreError::Fixture(format!("duplicate {} id {}", table, id)));
        }
    }
    Ok(seen)
}

fn int_param(statement: &Statement, params: &[Param], position: usize) -> StoreResult<i64> {
    params
        .get(position)
        .and_then(Param::as_int)
        .ok_or_else(|| StoreError::Execute {
            query: statement.name.to_string(),
            message: format!("expected integer parameter at position {}", position + 1),
        })
}

fn text_param<'p>(
    statement: &Statement,
    params: &'p [Param],
    position: usize,
) -> StoreResult<&'p str> {
    params
        .get(position)
        .and_then(Param::as_text)
        .ok_or_else(|| StoreError::Execute {
            query: statement.name.to_string(),
            message: format!("expected text parameter at position {}", position + 1),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Language;

    fn store() -> MemoryStore {
        let mut snapshot = ThesaurusSnapshot::default();
        snapshot
            .add_synset_with_words(1, &["Fission", "Kernspaltung"], 1)
            .add_synset_with_words(2, &["Kernreaktor"], 1)
            .add_synset_link(1, 2, 1);
        MemoryStore::new(snapshot)
    }

    fn prepare(store: &mut MemoryStore, name: QueryName, case_sensitive: bool) -> PreparedHandle {
        store
            .prepare(&Statement::new(name, case_sensitive, Language::German))
            .unwrap()
    }

    #[test]
    fn test_word_lookup_case_modes() {
        let mut store = store();
        let folding = prepare(&mut store, QueryName::SelectTermByWord, false);
        let exact = prepare(&mut store, QueryName::SelectTermByWord, true);
        let params = [Param::from("fission"), Param::from("fission")];

        assert_eq!(store.execute(folding, &params).unwrap().len(), 1);
        assert!(store.execute(exact, &params).unwrap().is_empty());
    }

    #[test]
    fn test_directed_links() {
        let mut store = store();
        let outgoing = prepare(&mut store, QueryName::SynsetLinks, false);
        let incoming = prepare(&mut store, QueryName::SynsetLinksBackwards, false);

        let rows = store
            .execute(outgoing, &[Param::Int(1), Param::Int(1)])
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_i64("target_synset_id").unwrap(), 2);

        assert!(store
            .execute(outgoing, &[Param::Int(2), Param::Int(1)])
            .unwrap()
            .is_empty());
        let rows = store
            .execute(incoming, &[Param::Int(2), Param::Int(1)])
            .unwrap();
        assert_eq!(rows[0].get_i64("synset_id").unwrap(), 1);
    }

    #[test]
    fn test_release_tracks_live_statements() {
        let mut store = store();
        let stats = store.stats();
        let handle = prepare(&mut store, QueryName::AllSynsets, false);
        assert_eq!(stats.live_statements(), 1);

        store.release(handle).unwrap();
        assert_eq!(stats.live_statements(), 0);
        assert!(matches!(
            store.execute(handle, &[]),
            Err(StoreError::UnknownHandle(_))
        ));
    }

    #[test]
    fn test_missing_parameter_is_an_error() {
        let mut store = store();
        let handle = prepare(&mut store, QueryName::SelectSynset, false);
        assert!(matches!(
            store.execute(handle, &[]),
            Err(StoreError::Execute { .. })
        ));
    }

    #[test]
    fn test_snapshot_validation() {
        let mut snapshot = ThesaurusSnapshot::default();
        snapshot.terms.push(TermRecord::new(1, 99, "Waise", 1));
        assert!(matches!(
            snapshot.validate(),
            Err(StoreError::Fixture(_))
        ));
    }

    #[test]
    fn test_snapshot_rejects_duplicate_synsets() {
        let snapshot = ThesaurusSnapshot {
            synsets: vec![1, 1, 2],
            ..ThesaurusSnapshot::default()
        };
        match snapshot.validate() {
            Err(StoreError::Fixture(message)) => assert_eq!(message, "duplicate synset id 1"),
            other => panic!("expected a fixture error, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_rejects_dangling_references() {
        let mut snapshot = ThesaurusSnapshot::default();
        snapshot.add_synset_with_words(1, &["Kernspaltung"], Language::German.code());
        assert!(snapshot.validate().is_ok());

        let mut dangling_category = snapshot.clone();
        dangling_category.category_links.push(CategoryLinkRecord {
            category_id: 7,
            synset_id: 1,
        });
        assert!(matches!(
            dangling_category.validate(),
            Err(StoreError::Fixture(_))
        ));

        let mut dangling_tag = snapshot.clone();
        dangling_tag.add_tag(
            TagRecord {
                id: 1,
                name: "figurativ".to_string(),
            },
            &[99],
        );
        assert!(matches!(
            dangling_tag.validate(),
            Err(StoreError::Fixture(_))
        ));

        let mut dangling_link = snapshot;
        dangling_link.add_term_link(1, 99, 1);
        assert!(matches!(
            dangling_link.validate(),
            Err(StoreError::Fixture(_))
        ));
    }

    #[test]
    fn test_duplicate_synsets_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, r#"{"synsets":[1,1,2]}"#).unwrap();
        assert!(matches!(
            MemoryStore::from_json_file(&path),
            Err(StoreError::Fixture(_))
        ));
    }
}

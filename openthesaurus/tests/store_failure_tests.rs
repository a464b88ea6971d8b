//! Store failure tests
//!
//! Runs the facade over a store that fails selected queries a fixed number
//! of times or reports a corrupt synset count.

#[path = "testutils/mod.rs"]
mod testutils;

use openthesaurus::catalog::{QueryName, Statement};
use openthesaurus::store::{MemoryStore, Param, PreparedHandle, Row, StoreResult, Value};
use openthesaurus::{
    DatabaseConfiguration, OpenThesaurus, StoreConnection, StoreError, SynsetLinkType,
    ThesaurusError,
};
use std::collections::HashMap;
use testutils::test_fixture::*;

struct FlakyStore {
    inner: MemoryStore,
    names: HashMap<u64, QueryName>,
    failures: HashMap<QueryName, usize>,
    synset_count: Option<i64>,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(TestFixture::snapshot()),
            names: HashMap::new(),
            failures: HashMap::new(),
            synset_count: None,
        }
    }

    fn failing(mut self, name: QueryName, times: usize) -> Self {
        self.failures.insert(name, times);
        self
    }

    fn with_synset_count(mut self, count: i64) -> Self {
        self.synset_count = Some(count);
        self
    }

    fn into_thesaurus(self) -> OpenThesaurus {
        OpenThesaurus::with_connection(
            DatabaseConfiguration::in_memory(None),
            Box::new(self),
            false,
        )
        .expect("Failed to open thesaurus over flaky store")
    }
}

impl StoreConnection for FlakyStore {
    fn prepare(&mut self, statement: &Statement) -> StoreResult<PreparedHandle> {
        let handle = self.inner.prepare(statement)?;
        self.names.insert(handle.id(), statement.name);
        Ok(handle)
    }

    fn execute(&mut self, handle: PreparedHandle, params: &[Param]) -> StoreResult<Vec<Row>> {
        let name = self.names.get(&handle.id()).copied();
        if let Some(name) = name {
            if let Some(remaining) = self.failures.get_mut(&name) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(StoreError::Execute {
                        query: name.to_string(),
                        message: "lost connection to server during query".to_string(),
                    });
                }
            }
            if name == QueryName::CountSynsets {
                if let Some(count) = self.synset_count {
                    return Ok(vec![Row::new().with("num", Value::Integer(count))]);
                }
            }
        }
        self.inner.execute(handle, params)
    }

    fn release(&mut self, handle: PreparedHandle) -> StoreResult<()> {
        self.names.remove(&handle.id());
        self.inner.release(handle)
    }

    fn backend_name(&self) -> &'static str {
        "flaky"
    }
}

#[test]
fn test_failed_terms_load_can_be_retried() {
    let thesaurus = FlakyStore::new()
        .failing(QueryName::SelectTermBySynset, 1)
        .into_thesaurus();
    let synset = thesaurus.synset_by_id(FISSION_SYNSET).unwrap().unwrap();

    let err = synset.terms().unwrap_err();
    assert!(matches!(
        err,
        ThesaurusError::Query {
            source: StoreError::Execute { .. },
            ..
        }
    ));
    assert!(!synset.terms_loaded());

    let terms = synset.terms().unwrap();
    assert_eq!(terms.len(), 4);
    assert!(synset.terms_loaded());
}

#[test]
fn test_failed_link_load_can_be_retried() {
    let thesaurus = FlakyStore::new()
        .failing(QueryName::SynsetLinks, 1)
        .into_thesaurus();
    let synset = thesaurus.synset_by_id(FISSION_SYNSET).unwrap().unwrap();

    assert!(synset.synset_links(SynsetLinkType::Hypernymy).is_err());
    let ids: Vec<i64> = synset
        .synset_links(SynsetLinkType::Hypernymy)
        .unwrap()
        .iter()
        .map(|s| s.id())
        .collect();
    assert_eq!(ids, vec![REACTOR_SYNSET, BOMB_SYNSET]);
}

#[test]
fn test_negative_synset_count_is_a_decode_error() {
    let thesaurus = FlakyStore::new().with_synset_count(-1).into_thesaurus();

    match thesaurus.synset_count().unwrap_err() {
        ThesaurusError::Decode { context, source } => {
            assert_eq!(context, "synset count");
            assert!(matches!(source, StoreError::ColumnType { .. }));
        }
        other => panic!("expected a decode error, got {:?}", other),
    }
}

#[test]
fn test_synset_count_reported_by_store() {
    let thesaurus = FlakyStore::new().with_synset_count(42).into_thesaurus();
    assert_eq!(thesaurus.synset_count().unwrap(), 42);
}

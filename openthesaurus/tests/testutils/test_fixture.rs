//! Test fixture for OpenThesaurus integration tests
//!
//! Every fixture gets its own in-memory store, so tests never share
//! statements or counters.

#![allow(dead_code)]

use openthesaurus::store::{
    CategoryRecord, MemoryStore, StoreStats, TagRecord, TermRecord, ThesaurusSnapshot,
};
use openthesaurus::{DatabaseConfiguration, OpenThesaurus, Synset, TermLevel};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const GERMAN: i32 = 1;
pub const ENGLISH: i32 = 2;
pub const HYPERNYMY: i32 = 1;
pub const ASSOCIATION: i32 = 2;
pub const ANTONYMY: i32 = 1;

pub const FISSION_SYNSET: i64 = 1;
pub const REACTOR_SYNSET: i64 = 2;
pub const BOMB_SYNSET: i64 = 3;
pub const FACILITY_SYNSET: i64 = 4;
pub const WEAPON_SYNSET: i64 = 5;
pub const DEFICIENCY_SYNSET: i64 = 7;
pub const STATE_SYNSET: i64 = 8;
pub const CONCENTRATION_SYNSET: i64 = 9;
pub const DISTRACTION_SYNSET: i64 = 10;
pub const PNEUMONIA_SYNSET: i64 = 11;
pub const SHAMBLES_SYNSET: i64 = 12;
pub const LOST_SYNSET: i64 = 13;
pub const ENGLISH_SYNSET: i64 = 14;
pub const CYCLE_A_SYNSET: i64 = 20;
pub const CYCLE_B_SYNSET: i64 = 21;

pub const CONCENTRATION_TERM: i64 = 89100;
pub const DISTRACTION_TERM: i64 = 89101;
pub const PNEUMONIA_TERM: i64 = 95000;
pub const SHAMBLES_TERM: i64 = 103319;

pub const SYNSET_COUNT: usize = 15;

/// Test fixture with an isolated in-memory thesaurus
pub struct TestFixture {
    thesaurus: OpenThesaurus,
    stats: Arc<StoreStats>,
}

impl TestFixture {
    /// Case-insensitive fixture
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_case_sensitivity(false)
    }

    pub fn with_case_sensitivity(case_sensitive: bool) -> Result<Self, Box<dyn std::error::Error>> {
        let store = MemoryStore::new(Self::snapshot());
        let stats = store.stats();
        let thesaurus = OpenThesaurus::with_connection(
            DatabaseConfiguration::in_memory(None),
            Box::new(store),
            case_sensitive,
        )?;
        Ok(Self { thesaurus, stats })
    }

    pub fn thesaurus(&self) -> &OpenThesaurus {
        &self.thesaurus
    }

    /// Statement and execution counters of the underlying store
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    pub fn into_parts(self) -> (OpenThesaurus, Arc<StoreStats>) {
        (self.thesaurus, self.stats)
    }

    /// Synset that must exist in the fixture data
    pub fn synset(&self, id: i64) -> Synset {
        self.thesaurus
            .synset_by_id(id)
            .expect("synset lookup failed")
            .unwrap_or_else(|| panic!("synset {} missing from fixture", id))
    }

    /// Display words of a synset's terms
    pub fn words(synset: &Synset) -> BTreeSet<String> {
        synset
            .terms()
            .expect("failed to load terms")
            .iter()
            .map(|t| t.word().to_string())
            .collect()
    }

    pub fn word_set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    /// Write the fixture data as a JSON snapshot into `dir`
    pub fn write_snapshot(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = dir.join("thesaurus.json");
        std::fs::write(&path, serde_json::to_string_pretty(&Self::snapshot())?)?;
        Ok(path)
    }

    /// Excerpt of the German OpenThesaurus
    pub fn snapshot() -> ThesaurusSnapshot {
        let mut data = ThesaurusSnapshot::default();
        data.add_synset_with_words(
            FISSION_SYNSET,
            &["Fission", "Atomspaltung", "Kernspaltung", "Kernfission"],
            GERMAN,
        )
        .add_synset_with_words(
            REACTOR_SYNSET,
            &[
                "Kernreaktor",
                "Atomreaktor",
                "Atombrenner",
                "Atommeiler",
                "Nuklearmeiler",
            ],
            GERMAN,
        )
        .add_synset_with_words(
            BOMB_SYNSET,
            &[
                "A-Bombe",
                "Atombombe",
                "Nuklearwaffe",
                "Kernwaffe",
                "die Bombe",
                "Nuklearbombe",
            ],
            GERMAN,
        )
        .add_synset_with_words(FACILITY_SYNSET, &["Anlage"], GERMAN)
        .add_synset_with_words(WEAPON_SYNSET, &["Waffe"], GERMAN)
        .add_synset_with_words(DEFICIENCY_SYNSET, &["Mangelhaftigkeit", "Defizienz"], GERMAN)
        .add_synset_with_words(
            STATE_SYNSET,
            &[
                "Stand",
                "Zustand",
                "Status",
                "Konstitution",
                "Verfassung",
                "Befindlichkeit",
            ],
            GERMAN,
        )
        .add_synset_with_words(ENGLISH_SYNSET, &["nuclear fission"], ENGLISH)
        .add_synset_with_words(CYCLE_A_SYNSET, &["Henne"], GERMAN)
        .add_synset_with_words(CYCLE_B_SYNSET, &["Ei"], GERMAN);

        // terms whose ids are referenced directly by the tests
        data.add_term(TermRecord::new(
            CONCENTRATION_TERM,
            CONCENTRATION_SYNSET,
            "Konzentration",
            GERMAN,
        ))
        .add_term(TermRecord::new(
            DISTRACTION_TERM,
            DISTRACTION_SYNSET,
            "Ablenkung",
            GERMAN,
        ))
        .add_term(TermRecord {
            level_id: Some(TermLevel::Jargon.code()),
            ..TermRecord::new(PNEUMONIA_TERM, PNEUMONIA_SYNSET, "Pneumonie", GERMAN)
        })
        .add_term(TermRecord::new(
            PNEUMONIA_TERM + 1,
            PNEUMONIA_SYNSET,
            "Lungenentzündung",
            GERMAN,
        ))
        .add_term(TermRecord::new(
            SHAMBLES_TERM,
            SHAMBLES_SYNSET,
            "Scherbenhaufen",
            GERMAN,
        ))
        .add_term(TermRecord {
            normalized_word: Some("verfahren".to_string()),
            ..TermRecord::new(110000, LOST_SYNSET, "(sich) verfahren", GERMAN)
        })
        .add_term(TermRecord {
            normalized_word: Some("verirren".to_string()),
            ..TermRecord::new(110001, LOST_SYNSET, "(sich) verirren", GERMAN)
        })
        .add_term(TermRecord {
            normalized_word: Some(String::new()),
            is_acronym: true,
            ..TermRecord::new(110002, LOST_SYNSET, "sich verlaufen", GERMAN)
        });

        data.add_synset_link(FISSION_SYNSET, REACTOR_SYNSET, HYPERNYMY)
            .add_synset_link(FISSION_SYNSET, BOMB_SYNSET, HYPERNYMY)
            .add_synset_link(REACTOR_SYNSET, FACILITY_SYNSET, HYPERNYMY)
            .add_synset_link(BOMB_SYNSET, WEAPON_SYNSET, HYPERNYMY)
            .add_synset_link(DEFICIENCY_SYNSET, STATE_SYNSET, HYPERNYMY)
            .add_synset_link(REACTOR_SYNSET, BOMB_SYNSET, ASSOCIATION)
            .add_synset_link(CYCLE_A_SYNSET, CYCLE_B_SYNSET, HYPERNYMY)
            .add_synset_link(CYCLE_B_SYNSET, CYCLE_A_SYNSET, HYPERNYMY)
            .add_term_link(CONCENTRATION_TERM, DISTRACTION_TERM, ANTONYMY);

        data.add_category(
            CategoryRecord {
                id: 1,
                category_name: "Physik".to_string(),
                category_type_id: 1,
                is_disabled: false,
            },
            &[FISSION_SYNSET, REACTOR_SYNSET],
        )
        .add_category(
            CategoryRecord {
                id: 2,
                category_name: "Militär".to_string(),
                category_type_id: 1,
                is_disabled: false,
            },
            &[BOMB_SYNSET],
        )
        .add_tag(
            TagRecord {
                id: 1,
                name: "figurativ".to_string(),
            },
            &[SHAMBLES_TERM],
        );

        data
    }
}

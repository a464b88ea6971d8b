//! Synset lookup and lazy resolution tests
//!
//! Covers synset lookups by id, word and term, the hypernymy scenario of the
//! fission synset, categories, and at-most-once loading.

#[path = "testutils/mod.rs"]
mod testutils;

use openthesaurus::catalog::QueryName;
use openthesaurus::{LinkDirection, Synset, SynsetLinkType};
use std::collections::{BTreeSet, HashSet};
use testutils::test_fixture::*;

#[test]
fn test_synset_by_id_round_trips_id() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let thesaurus = fixture.thesaurus();

    for synset in thesaurus.all_synsets().unwrap() {
        let found = thesaurus.synset_by_id(synset.id()).unwrap().unwrap();
        assert_eq!(found.id(), synset.id());
    }
}

#[test]
fn test_missing_ids_are_not_errors() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let thesaurus = fixture.thesaurus();

    assert!(thesaurus.synset_by_id(999_999).unwrap().is_none());
    assert!(thesaurus.synset_by_term_id(999_999).unwrap().is_none());
    assert!(thesaurus.term_by_id(999_999).unwrap().is_none());
}

#[test]
fn test_count_matches_enumeration() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let thesaurus = fixture.thesaurus();

    let all = thesaurus.all_synsets().unwrap();
    assert_eq!(all.len(), thesaurus.synset_count().unwrap());
    assert_eq!(all.len(), SYNSET_COUNT);
    // enumeration does not load any terms
    assert!(all.iter().all(|s| !s.terms_loaded()));
}

#[test]
fn test_fission_scenario() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let fission = fixture.synset(FISSION_SYNSET);

    assert_eq!(
        TestFixture::words(&fission),
        TestFixture::word_set(&["Fission", "Atomspaltung", "Kernspaltung", "Kernfission"])
    );

    let hypernyms: BTreeSet<BTreeSet<String>> = fission
        .synset_links(SynsetLinkType::Hypernymy)
        .unwrap()
        .iter()
        .map(TestFixture::words)
        .collect();
    let expected: BTreeSet<BTreeSet<String>> = [
        TestFixture::word_set(&[
            "Kernreaktor",
            "Atomreaktor",
            "Atombrenner",
            "Atommeiler",
            "Nuklearmeiler",
        ]),
        TestFixture::word_set(&[
            "A-Bombe",
            "Atombombe",
            "Nuklearwaffe",
            "Kernwaffe",
            "die Bombe",
            "Nuklearbombe",
        ]),
    ]
    .into_iter()
    .collect();
    assert_eq!(hypernyms, expected);

    let categories: Vec<&str> = fission
        .categories()
        .unwrap()
        .iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(categories, vec!["Physik"]);
}

#[test]
fn test_deficiency_hypernym() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let deficiency = fixture.synset(DEFICIENCY_SYNSET);
    assert_eq!(
        TestFixture::words(&deficiency),
        TestFixture::word_set(&["Mangelhaftigkeit", "Defizienz"])
    );

    let parents = deficiency.synset_links(SynsetLinkType::Hypernymy).unwrap();
    assert_eq!(parents.len(), 1);
    assert_eq!(parents[0].id(), STATE_SYNSET);
    assert!(!parents[0].terms_loaded());
    assert_eq!(
        TestFixture::words(&parents[0]),
        TestFixture::word_set(&[
            "Stand",
            "Zustand",
            "Status",
            "Konstitution",
            "Verfassung",
            "Befindlichkeit",
        ])
    );
}

#[test]
fn test_links_are_directed() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let reactor = fixture.synset(REACTOR_SYNSET);

    let broader: Vec<i64> = reactor
        .synset_links(SynsetLinkType::Hypernymy)
        .unwrap()
        .iter()
        .map(Synset::id)
        .collect();
    assert_eq!(broader, vec![FACILITY_SYNSET]);

    let narrower: Vec<i64> = reactor
        .synset_links_backwards(SynsetLinkType::Hypernymy)
        .unwrap()
        .iter()
        .map(Synset::id)
        .collect();
    assert_eq!(narrower, vec![FISSION_SYNSET]);

    // the link type filter applies to both directions
    let associated: Vec<i64> = reactor
        .links(SynsetLinkType::Association, LinkDirection::Outgoing)
        .unwrap()
        .iter()
        .map(Synset::id)
        .collect();
    assert_eq!(associated, vec![BOMB_SYNSET]);
    assert!(reactor
        .synset_links_backwards(SynsetLinkType::Association)
        .unwrap()
        .is_empty());
}

#[test]
fn test_terms_load_at_most_once() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let fission = fixture.synset(FISSION_SYNSET);
    let before = fixture.stats().executions(QueryName::SelectTermBySynset);

    assert!(!fission.terms_loaded());
    for _ in 0..5 {
        assert_eq!(fission.terms().unwrap().len(), 4);
    }
    assert!(fission.terms_loaded());
    assert_eq!(
        fixture.stats().executions(QueryName::SelectTermBySynset),
        before + 1
    );

    for _ in 0..3 {
        fission.synset_links(SynsetLinkType::Hypernymy).unwrap();
        fission.categories().unwrap();
    }
    assert_eq!(fixture.stats().executions(QueryName::SynsetLinks), 1);
    assert_eq!(fixture.stats().executions(QueryName::SynsetCategories), 1);
}

#[test]
fn test_concurrent_first_access_loads_once() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let state = fixture.synset(STATE_SYNSET);

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                assert_eq!(state.terms().unwrap().len(), 6);
            });
        }
    });
    assert_eq!(fixture.stats().executions(QueryName::SelectTermBySynset), 1);
}

#[test]
fn test_synsets_by_word_and_term() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let thesaurus = fixture.thesaurus();

    let synsets = thesaurus.synsets_by_word("Atombombe").unwrap();
    let ids: HashSet<i64> = synsets.iter().map(Synset::id).collect();
    assert_eq!(ids, HashSet::from([BOMB_SYNSET]));

    let synset = thesaurus
        .synset_by_term_id(CONCENTRATION_TERM)
        .unwrap()
        .unwrap();
    assert_eq!(synset.id(), CONCENTRATION_SYNSET);

    assert!(thesaurus.synsets_by_word("Quark").unwrap().is_empty());
}

#[test]
fn test_hypernym_root() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");

    // two parents: the smaller id (reactor) is followed up to its root
    let root = fixture.synset(FISSION_SYNSET).hypernym_root().unwrap();
    assert_eq!(root.id(), FACILITY_SYNSET);

    // a synset without parents is its own root
    let root = fixture.synset(STATE_SYNSET).hypernym_root().unwrap();
    assert_eq!(root.id(), STATE_SYNSET);

    // cyclic data terminates
    let root = fixture.synset(CYCLE_A_SYNSET).hypernym_root().unwrap();
    assert_eq!(root.id(), CYCLE_B_SYNSET);
}

#[test]
fn test_display() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let deficiency = fixture.synset(DEFICIENCY_SYNSET);
    let text = deficiency.to_string();
    assert!(text.starts_with("7: "));
    assert!(text.contains("Mangelhaftigkeit#"));
    assert!(text.contains("Defizienz#"));
    assert!(text.ends_with('|'));
}

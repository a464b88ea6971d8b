// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Named queries against the thesaurus tables
//!
//! Every query the access layer issues is listed here once, together with its
//! SQL text and positional parameters. Only the word lookup depends on the
//! case-sensitivity setting.

use crate::vocab::Language;
use std::fmt;

/// Columns selected for every term row
const TERM_COLUMNS: [&str; 9] = [
    "id",
    "word",
    "normalized_word",
    "level_id",
    "is_acronym",
    "is_short_form",
    "language_id",
    "word_grammar_id",
    "synset_id",
];

/// Symbolic names of the catalog queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryName {
    /// 1: synset.id
    SelectSynset,
    AllSynsets,
    CountSynsets,
    /// 1: term.id
    SelectTermById,
    /// 1: term.synset_id
    SelectTermBySynset,
    /// 1: normalized_word, 2: word
    SelectTermByWord,
    /// 1: synset_link.synset_id, 2: link_type_id
    SynsetLinks,
    /// 1: synset_link.target_synset_id, 2: link_type_id
    SynsetLinksBackwards,
    /// 1: term_link.term_id, 2: link_type_id
    TermLinks,
    /// 1: term_link.target_term_id, 2: link_type_id
    TermLinksBackwards,
    /// 1: category_link.synset_id
    SynsetCategories,
    /// 1: term_tag.term_tags_id
    TermTags,
}

impl QueryName {
    pub const ALL: [QueryName; 12] = [
        QueryName::SelectSynset,
        QueryName::AllSynsets,
        QueryName::CountSynsets,
        QueryName::SelectTermById,
        QueryName::SelectTermBySynset,
        QueryName::SelectTermByWord,
        QueryName::SynsetLinks,
        QueryName::SynsetLinksBackwards,
        QueryName::TermLinks,
        QueryName::TermLinksBackwards,
        QueryName::SynsetCategories,
        QueryName::TermTags,
    ];

    /// Whether the SQL text changes with the case-sensitivity setting
    pub fn is_case_dependent(self) -> bool {
        matches!(self, QueryName::SelectTermByWord)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QueryName::SelectSynset => "SelectSynset",
            QueryName::AllSynsets => "AllSynsets",
            QueryName::CountSynsets => "CountSynsets",
            QueryName::SelectTermById => "SelectTermById",
            QueryName::SelectTermBySynset => "SelectTermBySynset",
            QueryName::SelectTermByWord => "SelectTermByWord",
            QueryName::SynsetLinks => "SynsetLinks",
            QueryName::SynsetLinksBackwards => "SynsetLinksBackwards",
            QueryName::TermLinks => "TermLinks",
            QueryName::TermLinksBackwards => "TermLinksBackwards",
            QueryName::SynsetCategories => "SynsetCategories",
            QueryName::TermTags => "TermTags",
        }
    }

    /// SQL text for this query
    ///
    /// `case_sensitive` switches the word comparison to `BINARY`; `language`
    /// restricts the word lookup to one language.
    pub fn sql(self, case_sensitive: bool, language: Language) -> String {
        match self {
            QueryName::SelectSynset => "SELECT id FROM synset WHERE id = ?".to_string(),
            QueryName::AllSynsets => "SELECT id FROM synset".to_string(),
            QueryName::CountSynsets => "SELECT COUNT(id) AS num FROM synset".to_string(),
            QueryName::SelectTermById => {
                format!("SELECT {} FROM term t WHERE t.id = ?", term_columns("t"))
            }
            QueryName::SelectTermBySynset => format!(
                "SELECT {} FROM term t WHERE t.synset_id = ? ORDER BY t.id",
                term_columns("t")
            ),
            QueryName::SelectTermByWord => {
                let binary = if case_sensitive { "BINARY " } else { "" };
                format!(
                    "SELECT {cols} FROM term t \
                     WHERE ((t.normalized_word != '' AND {b}t.normalized_word = ?) \
                     OR {b}t.word = ?) \
                     AND t.language_id = {lang}",
                    cols = term_columns("t"),
                    b = binary,
                    lang = language.code()
                )
            }
            QueryName::SynsetLinks => "SELECT synset_id, target_synset_id, link_type_id \
                 FROM synset_link WHERE synset_id = ? AND link_type_id = ?"
                .to_string(),
            QueryName::SynsetLinksBackwards => {
                "SELECT synset_id, target_synset_id, link_type_id \
                 FROM synset_link WHERE target_synset_id = ? AND link_type_id = ?"
                    .to_string()
            }
            QueryName::TermLinks => format!(
                "SELECT {} FROM term t \
                 INNER JOIN term_link l ON t.id = l.target_term_id \
                 WHERE l.term_id = ? AND l.link_type_id = ? ORDER BY t.id",
                term_columns("t")
            ),
            QueryName::TermLinksBackwards => format!(
                "SELECT {} FROM term t \
                 INNER JOIN term_link l ON t.id = l.term_id \
                 WHERE l.target_term_id = ? AND l.link_type_id = ? ORDER BY t.id",
                term_columns("t")
            ),
            QueryName::SynsetCategories => {
                "SELECT c.id, c.category_name, c.category_type_id, c.is_disabled \
                 FROM category c INNER JOIN category_link l ON l.category_id = c.id \
                 WHERE l.synset_id = ? ORDER BY c.id"
                    .to_string()
            }
            QueryName::TermTags => "SELECT t.name FROM tag t \
                 INNER JOIN term_tag tt ON tt.tag_id = t.id \
                 WHERE tt.term_tags_id = ? ORDER BY t.name"
                .to_string(),
        }
    }
}

impl fmt::Display for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn term_columns(alias: &str) -> String {
    TERM_COLUMNS
        .iter()
        .map(|c| format!("{}.{}", alias, c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A query ready to be handed to a store driver for preparation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub name: QueryName,
    pub sql: String,
    pub case_sensitive: bool,
    pub language: Language,
}

impl Statement {
    pub fn new(name: QueryName, case_sensitive: bool, language: Language) -> Self {
        Self {
            name,
            sql: name.sql(case_sensitive, language),
            case_sensitive,
            language,
        }
    }
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Terms (word senses)

use super::decode;
use super::synset::Synset;
use crate::catalog::QueryName;
use crate::error::ThesaurusResult;
use crate::session::{live_session, Session};
use crate::store::{Param, Row, StoreResult};
use crate::vocab::{Language, LinkDirection, TermLevel, TermLinkType};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Weak;

/// A single word sense belonging to exactly one synset
///
/// Terms are immutable. Two terms are equal when their ids are equal,
/// regardless of the query they were decoded from.
#[derive(Debug, Clone)]
pub struct Term {
    id: i64,
    synset_id: i64,
    /// Normalized word if present, else the raw word
    word: String,
    raw_word: String,
    normalized_word: Option<String>,
    level_id: Option<i32>,
    is_acronym: bool,
    is_short_form: bool,
    language_id: i32,
    grammar_id: Option<i32>,
    session: Weak<Session>,
}

impl Term {
    /// Decode a `term` row
    pub(crate) fn from_row(row: &Row, session: &Weak<Session>) -> StoreResult<Self> {
        let raw_word = row.get_str("word")?.to_string();
        let normalized_word = row
            .get_opt_str("normalized_word")?
            .filter(|w| !w.is_empty())
            .map(str::to_string);
        let word = normalized_word.clone().unwrap_or_else(|| raw_word.clone());

        Ok(Self {
            id: row.get_i64("id")?,
            synset_id: row.get_i64("synset_id")?,
            word,
            raw_word,
            normalized_word,
            level_id: row.get_opt_i32("level_id")?,
            is_acronym: row.get_flag("is_acronym")?,
            is_short_form: row.get_flag("is_short_form")?,
            language_id: row.get_i32("language_id")?,
            grammar_id: row.get_opt_i32("word_grammar_id")?,
            session: session.clone(),
        })
    }

    /// Decode every row, failing on the first row that does not decode
    pub(crate) fn from_rows<F>(
        rows: &[Row],
        session: &Weak<Session>,
        context: F,
    ) -> ThesaurusResult<Vec<Term>>
    where
        F: Fn() -> String,
    {
        rows.iter()
            .map(|row| decode(Term::from_row(row, session), &context))
            .collect()
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn synset_id(&self) -> i64 {
        self.synset_id
    }

    /// Display word: the normalized form when it is set, else the raw word
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Word exactly as stored, possibly with annotations such as "(ugs.)"
    pub fn raw_word(&self) -> &str {
        &self.raw_word
    }

    pub fn normalized_word(&self) -> Option<&str> {
        self.normalized_word.as_deref()
    }

    pub fn level_id(&self) -> Option<i32> {
        self.level_id
    }

    /// Usage level; `None` for unmarked terms and unknown codes
    pub fn level(&self) -> Option<TermLevel> {
        self.level_id.and_then(TermLevel::from_code)
    }

    pub fn is_acronym(&self) -> bool {
        self.is_acronym
    }

    pub fn is_short_form(&self) -> bool {
        self.is_short_form
    }

    pub fn language_id(&self) -> i32 {
        self.language_id
    }

    pub fn language(&self) -> Option<Language> {
        Language::from_code(self.language_id)
    }

    pub fn grammar_id(&self) -> Option<i32> {
        self.grammar_id
    }

    /// Whether the session that created this term is still alive
    pub fn has_session(&self) -> bool {
        self.session.strong_count() > 0
    }

    /// The owning synset, with nothing loaded yet
    pub fn synset(&self) -> Synset {
        Synset::new(self.synset_id, self.session.clone())
    }

    /// Terms this term links to with the given relation
    pub fn term_links(&self, link_type: TermLinkType) -> ThesaurusResult<HashSet<Term>> {
        self.links(link_type, LinkDirection::Outgoing)
    }

    /// Terms linking to this term with the given relation
    pub fn term_links_backwards(&self, link_type: TermLinkType) -> ThesaurusResult<HashSet<Term>> {
        self.links(link_type, LinkDirection::Incoming)
    }

    fn links(
        &self,
        link_type: TermLinkType,
        direction: LinkDirection,
    ) -> ThesaurusResult<HashSet<Term>> {
        let session = live_session(&self.session)?;
        let query = match direction {
            LinkDirection::Outgoing => QueryName::TermLinks,
            LinkDirection::Incoming => QueryName::TermLinksBackwards,
        };
        let context = || format!("{} {} links of term {}", direction, link_type, self.id);

        let rows = session.execute(
            query,
            &[Param::Int(self.id), Param::from(link_type.code())],
            context,
        )?;
        let terms = Term::from_rows(&rows, &self.session, context)?;
        Ok(terms.into_iter().collect())
    }

    /// Usage tags such as "figurativ", ordered by name
    pub fn tags(&self) -> ThesaurusResult<Vec<String>> {
        let session = live_session(&self.session)?;
        let context = || format!("tags of term {}", self.id);
        let rows = session.execute(QueryName::TermTags, &[Param::Int(self.id)], context)?;

        let mut tags: Vec<String> = Vec::with_capacity(rows.len());
        for row in &rows {
            let name = decode(row.get_str("name"), context)?;
            if !tags.iter().any(|t| t == name) {
                tags.push(name.to_string());
            }
        }
        Ok(tags)
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.word, self.id)
    }
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Synsets (sets of synonymous terms)
//!
//! A synset built from an id alone (for instance as a link target) knows
//! nothing but that id. Its terms, categories and links are loaded through
//! the session on first access and cached in once-cells afterwards. A failed
//! load leaves the cell empty so the next access queries again.

use super::category::Category;
use super::decode;
use super::term::Term;
use crate::catalog::QueryName;
use crate::error::ThesaurusResult;
use crate::session::{live_session, Session};
use crate::store::Param;
use crate::vocab::{LinkDirection, SynsetLinkType};
use once_cell::sync::OnceCell;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Weak;

/// Lazily loaded neighbours for one link type
#[derive(Clone, Default)]
struct LinkSlots {
    outgoing: OnceCell<Vec<Synset>>,
    incoming: OnceCell<Vec<Synset>>,
}

impl LinkSlots {
    fn slot(&self, direction: LinkDirection) -> &OnceCell<Vec<Synset>> {
        match direction {
            LinkDirection::Outgoing => &self.outgoing,
            LinkDirection::Incoming => &self.incoming,
        }
    }
}

/// A set of terms sharing one meaning
#[derive(Clone)]
pub struct Synset {
    id: i64,
    session: Weak<Session>,
    terms: OnceCell<Vec<Term>>,
    categories: OnceCell<Vec<Category>>,
    links: [LinkSlots; SynsetLinkType::COUNT],
}

impl Synset {
    pub(crate) fn new(id: i64, session: Weak<Session>) -> Self {
        Self {
            id,
            session,
            terms: OnceCell::new(),
            categories: OnceCell::new(),
            links: std::array::from_fn(|_| LinkSlots::default()),
        }
    }

    /// Synset without a session; only its id is available
    pub fn detached(id: i64) -> Self {
        Self::new(id, Weak::new())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn has_session(&self) -> bool {
        self.session.strong_count() > 0
    }

    /// Whether the terms have been loaded already
    pub fn terms_loaded(&self) -> bool {
        self.terms.get().is_some()
    }

    /// Terms of this synset ordered by id, loaded once
    pub fn terms(&self) -> ThesaurusResult<&[Term]> {
        self.terms
            .get_or_try_init(|| {
                let session = live_session(&self.session)?;
                let context = || format!("terms of synset {}", self.id);
                let rows = session.execute(
                    QueryName::SelectTermBySynset,
                    &[Param::Int(self.id)],
                    context,
                )?;
                log::debug!("Loaded {} terms of synset {}", rows.len(), self.id);
                Term::from_rows(&rows, &self.session, context)
            })
            .map(Vec::as_slice)
    }

    /// Categories assigned to this synset ordered by id, loaded once
    pub fn categories(&self) -> ThesaurusResult<&[Category]> {
        self.categories
            .get_or_try_init(|| {
                let session = live_session(&self.session)?;
                let context = || format!("categories of synset {}", self.id);
                let rows =
                    session.execute(QueryName::SynsetCategories, &[Param::Int(self.id)], context)?;
                rows.iter()
                    .map(|row| decode(Category::from_row(row), context))
                    .collect::<ThesaurusResult<Vec<Category>>>()
            })
            .map(Vec::as_slice)
    }

    /// Synsets this synset links to with the given relation
    ///
    /// For hypernymy these are the broader synsets.
    pub fn synset_links(&self, link_type: SynsetLinkType) -> ThesaurusResult<&[Synset]> {
        self.links(link_type, LinkDirection::Outgoing)
    }

    /// Synsets linking to this synset with the given relation
    ///
    /// For hypernymy these are the narrower synsets.
    pub fn synset_links_backwards(&self, link_type: SynsetLinkType) -> ThesaurusResult<&[Synset]> {
        self.links(link_type, LinkDirection::Incoming)
    }

    /// Neighbours in either direction, as unloaded stubs ordered by id
    pub fn links(
        &self,
        link_type: SynsetLinkType,
        direction: LinkDirection,
    ) -> ThesaurusResult<&[Synset]> {
        self.links[link_type.index()]
            .slot(direction)
            .get_or_try_init(|| self.load_links(link_type, direction))
            .map(Vec::as_slice)
    }

    fn load_links(
        &self,
        link_type: SynsetLinkType,
        direction: LinkDirection,
    ) -> ThesaurusResult<Vec<Synset>> {
        let session = live_session(&self.session)?;
        let (query, column) = match direction {
            LinkDirection::Outgoing => (QueryName::SynsetLinks, "target_synset_id"),
            LinkDirection::Incoming => (QueryName::SynsetLinksBackwards, "synset_id"),
        };
        let context = || format!("{} {} links of synset {}", direction, link_type, self.id);

        let rows = session.execute(
            query,
            &[Param::Int(self.id), Param::from(link_type.code())],
            context,
        )?;
        let mut ids = rows
            .iter()
            .map(|row| decode(row.get_i64(column), context))
            .collect::<ThesaurusResult<Vec<i64>>>()?;
        ids.sort_unstable();
        ids.dedup();

        Ok(ids
            .into_iter()
            .map(|id| Synset::new(id, self.session.clone()))
            .collect())
    }

    /// Follow hypernymy links upward until a synset without a broader parent
    ///
    /// With several parents the one with the smallest id is followed. Cycles
    /// in the data end the walk at the last synset not yet visited.
    pub fn hypernym_root(&self) -> ThesaurusResult<Synset> {
        let mut visited = HashSet::from([self.id]);
        let mut current = self.clone();
        loop {
            let parent = current
                .synset_links(SynsetLinkType::Hypernymy)?
                .iter()
                .find(|parent| !visited.contains(&parent.id))
                .cloned();
            match parent {
                Some(parent) => {
                    visited.insert(parent.id);
                    current = parent;
                }
                None => return Ok(current),
            }
        }
    }
}

impl PartialEq for Synset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Synset {}

impl Hash for Synset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Synset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Synset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for Synset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synset")
            .field("id", &self.id)
            .field("terms", &self.terms.get())
            .field("has_session", &self.has_session())
            .finish()
    }
}

/// `id: word#id|word#id|`, loading the terms if needed
impl fmt::Display for Synset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.id)?;
        match self.terms() {
            Ok(terms) => {
                for term in terms {
                    write!(f, "{}|", term)?;
                }
                Ok(())
            }
            Err(e) => write!(f, "{}", e),
        }
    }
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! OpenThesaurus - read-only access to the OpenThesaurus database
//!
//! The crate exposes the synonym sets ("synsets") of an OpenThesaurus dump as
//! a lazily resolved object graph on top of a relational store.
//!
//! # Features
//!
//! - **Lookups**: terms and synsets by id or by word, enumeration and counting
//! - **Lazy graph**: terms, categories and links load on first access, once
//! - **Case modes**: byte-exact or case-folding word matching, switchable at runtime
//! - **Pluggable stores**: MySQL through `sqlx`, or in-memory JSON snapshots
//!
//! # Usage
//!
//! ```ignore
//! use openthesaurus::{DatabaseConfiguration, Language, OpenThesaurus, SynsetLinkType};
//!
//! let config =
//!     DatabaseConfiguration::new("localhost", "openthesaurus", "root", "", Language::German);
//! let thesaurus = OpenThesaurus::open(config)?;
//! for synset in thesaurus.synsets_by_word("Fission")? {
//!     for hypernym in synset.synset_links(SynsetLinkType::Hypernymy)? {
//!         println!("{}", hypernym);
//!     }
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod thesaurus;
pub mod vocab;

pub use config::DatabaseConfiguration;
pub use error::{ThesaurusError, ThesaurusResult};
pub use model::{Category, Synset, Term};
pub use store::{BackendType, MemoryStore, StoreConnection, StoreError, ThesaurusSnapshot};
pub use thesaurus::OpenThesaurus;
pub use vocab::{Language, LinkDirection, SynsetLinkType, TermLevel, TermLinkType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

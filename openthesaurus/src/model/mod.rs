// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Lexical nodes
//!
//! Terms and synsets are identified by their integer id alone. They keep a
//! non-owning reference to the session that created them and resolve their
//! associations on first access. Categories are plain values.

pub mod category;
pub mod synset;
pub mod term;

pub use category::Category;
pub use synset::Synset;
pub use term::Term;

use crate::error::{ThesaurusError, ThesaurusResult};
use crate::store::StoreResult;

/// Attach node context to a row decoding failure
pub(crate) fn decode<T, F>(result: StoreResult<T>, context: F) -> ThesaurusResult<T>
where
    F: FnOnce() -> String,
{
    result.map_err(|source| ThesaurusError::Decode {
        context: context(),
        source,
    })
}

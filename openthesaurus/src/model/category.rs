// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Synset categories

use crate::store::{Row, StoreResult};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Subject category attached to synsets (e.g. "Physik")
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    id: i64,
    name: String,
    category_type: i32,
    disabled: bool,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>, category_type: i32, disabled: bool) -> Self {
        Self {
            id,
            name: name.into(),
            category_type,
            disabled,
        }
    }

    pub(crate) fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.get_i64("id")?,
            name: row.get_str("category_name")?.to_string(),
            category_type: row.get_opt_i32("category_type_id")?.unwrap_or(0),
            disabled: row.get_flag("is_disabled")?,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category_type(&self) -> i32 {
        self.category_type
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

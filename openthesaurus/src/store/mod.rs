// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Backing store drivers
//!
//! This module provides the narrow interface between the query layer and the
//! relational store holding the thesaurus tables, plus its implementations.
//!
//! # Architecture
//!
//! ```text
//! Session (named queries, lazy loads)
//!     ↓
//! StoreConnection (prepare / execute / release)
//!     ↓
//! Concrete drivers (MySQL via sqlx, in-memory tables)
//! ```

pub mod factory;
pub mod memory;
#[cfg(feature = "mysql-backend")]
pub mod mysql;
pub mod traits;
pub mod types;

pub use factory::connect;
pub use memory::{
    CategoryRecord, LinkRecord, MemoryStore, StoreStats, TagRecord, TermRecord,
    ThesaurusSnapshot,
};
#[cfg(feature = "mysql-backend")]
pub use mysql::MySqlStore;
pub use traits::StoreConnection;
pub use types::{BackendType, Param, PreparedHandle, Row, StoreError, StoreResult, Value};

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query catalog
//!
//! Named queries and the per-connection set of prepared statements.

pub mod manager;
pub mod queries;

pub use manager::QueryCatalog;
pub use queries::{QueryName, Statement};

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Store connection trait
//!
//! This module defines the narrow interface the query layer consumes from a
//! backing store. All store drivers must implement it to be used by a session.

use super::types::{Param, PreparedHandle, Row, StoreResult};
use crate::catalog::Statement;

/// One live connection to a backing store
///
/// A connection prepares named statements once and executes them many times
/// with different parameters. Results are returned fully drained, so no cursor
/// outlives the call that produced it.
pub trait StoreConnection: Send {
    /// Prepare a statement and return a handle for later execution
    ///
    /// # Returns
    /// * `Ok(PreparedHandle)` valid until released or the connection closes
    /// * `Err(StoreError)` on malformed text or an unreachable store
    fn prepare(&mut self, statement: &Statement) -> StoreResult<PreparedHandle>;

    /// Execute a prepared statement with positional parameters
    fn execute(&mut self, handle: PreparedHandle, params: &[Param]) -> StoreResult<Vec<Row>>;

    /// Release a prepared statement
    fn release(&mut self, handle: PreparedHandle) -> StoreResult<()>;

    /// Driver name (`mysql`, `memory`, ...)
    fn backend_name(&self) -> &'static str;

    /// Explicitly close the connection before it is dropped
    fn close(&mut self) -> StoreResult<()> {
        Ok(())
    }
}

impl StoreConnection for Box<dyn StoreConnection> {
    fn prepare(&mut self, statement: &Statement) -> StoreResult<PreparedHandle> {
        (**self).prepare(statement)
    }

    fn execute(&mut self, handle: PreparedHandle, params: &[Param]) -> StoreResult<Vec<Row>> {
        (**self).execute(handle, params)
    }

    fn release(&mut self, handle: PreparedHandle) -> StoreResult<()> {
        (**self).release(handle)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn close(&mut self) -> StoreResult<()> {
        (**self).close()
    }
}

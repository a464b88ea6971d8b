// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! MySQL store driver
//!
//! Wraps a single `sqlx` MySQL connection behind the blocking
//! [`StoreConnection`] interface. The async driver runs on a private
//! current-thread tokio runtime owned by the connection. Calls made from a
//! multi-threaded tokio runtime are moved off the worker with
//! `block_in_place`; a current-thread caller cannot block and is refused.

use super::traits::StoreConnection;
use super::types::{Param, PreparedHandle, Row, StoreError, StoreResult, Value};
use crate::catalog::{QueryName, Statement};
use crate::config::DatabaseConfiguration;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow, MySqlStatement};
use sqlx::{Column, ConnectOptions, Connection, Executor, Row as _, Statement as _, ValueRef};
use std::collections::HashMap;
use std::future::Future;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// MySQL store driver holding exactly one connection
pub struct MySqlStore {
    runtime: Option<Runtime>,
    connection: Option<MySqlConnection>,
    statements: HashMap<u64, (QueryName, MySqlStatement<'static>)>,
    next_handle: u64,
}

impl MySqlStore {
    /// Open a connection using the given configuration
    pub fn connect(config: &DatabaseConfiguration) -> StoreResult<Self> {
        let (host, port) = config
            .host_and_port()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::Connection(format!("Failed to create runtime: {}", e)))?;

        let options = MySqlConnectOptions::new()
            .host(&host)
            .port(port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);

        log::info!("Connecting to {}", config.masked_url());
        let connected = block_on(&runtime, options.connect()).and_then(|result| {
            result.map_err(|e| {
                log::warn!("Failed to connect to {}: {}", config.masked_url(), e);
                StoreError::Connection(e.to_string())
            })
        });
        let connection = match connected {
            Ok(connection) => connection,
            Err(e) => {
                runtime.shutdown_background();
                return Err(e);
            }
        };

        Ok(Self {
            runtime: Some(runtime),
            connection: Some(connection),
            statements: HashMap::new(),
            next_handle: 1,
        })
    }
}

impl StoreConnection for MySqlStore {
    fn prepare(&mut self, statement: &Statement) -> StoreResult<PreparedHandle> {
        let (runtime, connection) = open_parts(&self.runtime, &mut self.connection)?;

        let prepared = block_on(runtime, connection.prepare(statement.sql.as_str()))?
            .map_err(|e| StoreError::Prepare {
                query: statement.name.to_string(),
                message: e.to_string(),
            })?;
        let prepared: MySqlStatement<'static> = sqlx::Statement::to_owned(&prepared);

        let id = self.next_handle;
        self.next_handle += 1;
        self.statements.insert(id, (statement.name, prepared));
        log::debug!("Prepared {} as statement #{}", statement.name, id);
        Ok(PreparedHandle::new(id))
    }

    fn execute(&mut self, handle: PreparedHandle, params: &[Param]) -> StoreResult<Vec<Row>> {
        let (runtime, connection) = open_parts(&self.runtime, &mut self.connection)?;
        let (name, prepared) = self
            .statements
            .get(&handle.id())
            .ok_or(StoreError::UnknownHandle(handle.id()))?;

        let mut query = prepared.query();
        for param in params {
            query = match param {
                Param::Int(v) => query.bind(*v),
                Param::Text(s) => query.bind(s.clone()),
            };
        }

        let rows: Vec<MySqlRow> = block_on(runtime, query.fetch_all(&mut *connection))?
            .map_err(|e| StoreError::Execute {
                query: name.to_string(),
                message: e.to_string(),
            })?;

        rows.iter().map(convert_row).collect()
    }

    fn release(&mut self, handle: PreparedHandle) -> StoreResult<()> {
        // sqlx closes the server-side statement when it leaves its cache
        self.statements
            .remove(&handle.id())
            .map(|_| ())
            .ok_or(StoreError::UnknownHandle(handle.id()))
    }

    fn backend_name(&self) -> &'static str {
        "mysql"
    }

    fn close(&mut self) -> StoreResult<()> {
        self.statements.clear();
        if let (Some(runtime), Some(connection)) = (self.runtime.as_ref(), self.connection.take()) {
            block_on(runtime, connection.close())?
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            log::info!("MySQL connection closed");
        }
        Ok(())
    }
}

impl Drop for MySqlStore {
    fn drop(&mut self) {
        // a blocking shutdown panics when the store is dropped inside async code
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Runtime and connection of a store that has not been closed
fn open_parts<'a>(
    runtime: &'a Option<Runtime>,
    connection: &'a mut Option<MySqlConnection>,
) -> StoreResult<(&'a Runtime, &'a mut MySqlConnection)> {
    match (runtime.as_ref(), connection.as_mut()) {
        (Some(runtime), Some(connection)) => Ok((runtime, connection)),
        _ => Err(StoreError::Connection("connection is closed".to_string())),
    }
}

/// Drive `future` to completion on the store's private runtime
fn block_on<F: Future>(runtime: &Runtime, future: F) -> StoreResult<F::Output> {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::CurrentThread => {
            Err(StoreError::Unsupported(
                "the MySQL driver cannot block inside a current-thread tokio runtime".to_string(),
            ))
        }
        Ok(_) => Ok(tokio::task::block_in_place(|| runtime.block_on(future))),
        Err(_) => Ok(runtime.block_on(future)),
    }
}

/// Convert a driver row into an owned, name-addressable row
fn convert_row(row: &MySqlRow) -> StoreResult<Row> {
    let mut converted = Row::new();
    for column in row.columns() {
        let index = column.ordinal();
        let is_null = row
            .try_get_raw(index)
            .map(|raw| raw.is_null())
            .map_err(|e| StoreError::MissingColumn(format!("{}: {}", column.name(), e)))?;

        let value = if is_null {
            Value::Null
        } else {
            decode_value(row, index, column.name())?
        };
        converted.insert(column.name(), value);
    }
    Ok(converted)
}

/// Decode a non-NULL column as integer or text
///
/// Flags may be stored as `BIT(1)` or `TINYINT(1)`, words as `VARCHAR` or, in
/// binary collations, as `VARBINARY`.
fn decode_value(row: &MySqlRow, index: usize, column: &str) -> StoreResult<Value> {
    if let Ok(v) = row.try_get::<i64, _>(index) {
        return Ok(Value::Integer(v));
    }
    if let Ok(v) = row.try_get::<u64, _>(index) {
        let v = i64::try_from(v).map_err(|_| StoreError::ColumnType {
            column: column.to_string(),
            expected: "a 64-bit signed integer",
            found: v.to_string(),
        })?;
        return Ok(Value::Integer(v));
    }
    if let Ok(v) = row.try_get::<bool, _>(index) {
        return Ok(Value::Integer(v as i64));
    }
    if let Ok(v) = row.try_get::<String, _>(index) {
        return Ok(Value::Text(v));
    }
    if let Ok(bytes) = row.try_get::<Vec<u8>, _>(index) {
        return Ok(Value::Text(String::from_utf8_lossy(&bytes).into_owned()));
    }
    Err(StoreError::ColumnType {
        column: column.to_string(),
        expected: "an integer or text",
        found: "an unsupported SQL type".to_string(),
    })
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Backing store types and error handling
//!
//! This module defines the values, rows, parameters and errors exchanged
//! between the query layer and a store driver.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Backing store driver selection
///
/// Specifies which store technology serves the thesaurus tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendType {
    /// MySQL server holding an OpenThesaurus dump
    #[default]
    MySql,

    /// In-memory tables, optionally loaded from a JSON snapshot file
    /// Best for: tests, demos, offline fixtures
    Memory {
        #[serde(default)]
        fixture: Option<PathBuf>,
    },
}

impl BackendType {
    /// Short driver name used in logs and URLs
    pub fn name(&self) -> &'static str {
        match self {
            BackendType::MySql => "mysql",
            BackendType::Memory { .. } => "memory",
        }
    }
}

impl std::str::FromStr for BackendType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(BackendType::MySql),
            "memory" => Ok(BackendType::Memory { fixture: None }),
            _ => Err(format!(
                "Unknown backend type: {}. Valid options: mysql, memory",
                s
            )),
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error type for store driver operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Failed to prepare query '{query}': {message}")]
    Prepare { query: String, message: String },

    #[error("Failed to execute query '{query}': {message}")]
    Execute { query: String, message: String },

    #[error("Unknown prepared statement handle: {0}")]
    UnknownHandle(u64),

    #[error("Column not found in result row: {0}")]
    MissingColumn(String),

    #[error("Column '{column}' holds {found}, expected {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        found: String,
    },

    #[error("Invalid fixture: {0}")]
    Fixture(String),

    #[error("Not supported: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for store driver operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A single column value as delivered by a store driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "an integer",
            Value::Text(_) => "text",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A fully drained result row, addressable by column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used by drivers and tests
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<Value>) {
        self.values.insert(column.to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn require(&self, column: &str) -> StoreResult<&Value> {
        self.values
            .get(column)
            .ok_or_else(|| StoreError::MissingColumn(column.to_string()))
    }

    fn mismatch(column: &str, expected: &'static str, found: &Value) -> StoreError {
        StoreError::ColumnType {
            column: column.to_string(),
            expected,
            found: found.type_name().to_string(),
        }
    }

    /// Integer column; NULL yields `None`
    pub fn get_opt_i64(&self, column: &str) -> StoreResult<Option<i64>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Integer(v) => Ok(Some(*v)),
            other => Err(Self::mismatch(column, "an integer", other)),
        }
    }

    pub fn get_i64(&self, column: &str) -> StoreResult<i64> {
        match self.get_opt_i64(column)? {
            Some(v) => Ok(v),
            None => Err(Self::mismatch(column, "an integer", &Value::Null)),
        }
    }

    pub fn get_i32(&self, column: &str) -> StoreResult<i32> {
        let v = self.get_i64(column)?;
        i32::try_from(v).map_err(|_| StoreError::ColumnType {
            column: column.to_string(),
            expected: "a 32-bit integer",
            found: v.to_string(),
        })
    }

    /// 32-bit integer column; NULL yields `None`
    pub fn get_opt_i32(&self, column: &str) -> StoreResult<Option<i32>> {
        self.get_opt_i64(column)?
            .map(|v| {
                i32::try_from(v).map_err(|_| StoreError::ColumnType {
                    column: column.to_string(),
                    expected: "a 32-bit integer",
                    found: v.to_string(),
                })
            })
            .transpose()
    }

    /// Integer flag column, true when greater than zero; NULL is false
    pub fn get_flag(&self, column: &str) -> StoreResult<bool> {
        Ok(self.get_opt_i64(column)?.unwrap_or(0) > 0)
    }

    pub fn get_opt_str(&self, column: &str) -> StoreResult<Option<&str>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s.as_str())),
            other => Err(Self::mismatch(column, "text", other)),
        }
    }

    pub fn get_str(&self, column: &str) -> StoreResult<&str> {
        match self.get_opt_str(column)? {
            Some(s) => Ok(s),
            None => Err(Self::mismatch(column, "text", &Value::Null)),
        }
    }
}

/// Bound query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Int(i64),
    Text(String),
}

impl Param {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Param::Int(v) => Some(*v),
            Param::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Param::Text(s) => Some(s.as_str()),
            Param::Int(_) => None,
        }
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<i32> for Param {
    fn from(v: i32) -> Self {
        Param::Int(v as i64)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

/// Opaque handle of a statement prepared on one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreparedHandle(u64);

impl PreparedHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

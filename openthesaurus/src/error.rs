// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the thesaurus access layer

use crate::catalog::QueryName;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThesaurusError {
    /// Connecting or preparing the query catalog failed
    #[error("Connection failed ({context}): {source}")]
    Connection {
        context: String,
        #[source]
        source: StoreError,
    },

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Executing a query failed; `context` names the query and its parameters
    #[error("Query failed ({context}): {source}")]
    Query {
        context: String,
        #[source]
        source: StoreError,
    },

    /// A result row could not be turned into a node
    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: StoreError,
    },

    /// The node's session no longer exists
    #[error("Session is not initialized")]
    UninitializedSession,

    #[error("Query not registered in catalog: {0}")]
    UnknownQuery(QueryName),
}

impl ThesaurusError {
    pub(crate) fn connection(context: impl Into<String>, source: StoreError) -> Self {
        ThesaurusError::Connection {
            context: context.into(),
            source,
        }
    }

    /// Underlying store error, if any
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            ThesaurusError::Connection { source, .. }
            | ThesaurusError::Query { source, .. }
            | ThesaurusError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type ThesaurusResult<T> = Result<T, ThesaurusError>;

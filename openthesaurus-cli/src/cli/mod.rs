// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for OpenThesaurus
//!
//! Provides one-off lookups of terms and synsets against a configured store.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_count, handle_links, handle_lookup, handle_synset, handle_term};

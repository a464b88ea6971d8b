// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command line definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use openthesaurus::SynsetLinkType;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "otl")]
#[command(about = "Look up terms and synsets in an OpenThesaurus database", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<log::Level>,
}

/// Where to connect; flags override `--config` and `OT_*` variables
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use the in-memory store loaded from this JSON snapshot
    #[arg(long, global = true, conflicts_with_all = ["host", "database"])]
    pub fixture: Option<PathBuf>,

    #[arg(long, global = true)]
    pub host: Option<String>,

    #[arg(long, global = true)]
    pub database: Option<String>,

    #[arg(short, long, global = true)]
    pub user: Option<String>,

    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Prompt for the password
    #[arg(long, global = true, conflicts_with = "password")]
    pub ask_password: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Print the number of synsets
    Count,

    /// Show a synset with its terms and categories
    Synset { id: i64 },

    /// Show a term with its level, tags and antonyms
    Term { id: i64 },

    /// Find the synsets containing a word
    Lookup {
        word: String,

        /// Match the word byte-exact instead of ignoring case
        #[arg(long)]
        case_sensitive: bool,
    },

    /// Show the synsets linked to a synset
    Links {
        id: i64,

        /// Relation to follow (hypernymy, association)
        #[arg(short = 't', long = "type", default_value = "hypernymy")]
        link_type: SynsetLinkType,

        /// Follow links pointing to the synset instead
        #[arg(long)]
        incoming: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

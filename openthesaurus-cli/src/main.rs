// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! OpenThesaurus CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // RUST_LOG can still raise it
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let format = cli.format;
    let connection = cli.connection;

    match cli.command {
        Commands::Version => {
            println!(
                "{} {}",
                "OpenThesaurus".bold().green(),
                openthesaurus::VERSION
            );
            Ok(())
        }

        Commands::Count => cli::handle_count(connection, format),

        Commands::Synset { id } => cli::handle_synset(connection, id, format),

        Commands::Term { id } => cli::handle_term(connection, id, format),

        Commands::Lookup {
            word,
            case_sensitive,
        } => cli::handle_lookup(connection, word, case_sensitive, format),

        Commands::Links {
            id,
            link_type,
            incoming,
        } => cli::handle_links(connection, id, link_type, incoming, format),
    }
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for OpenThesaurus

use colored::Colorize;
use openthesaurus::{
    BackendType, DatabaseConfiguration, LinkDirection, OpenThesaurus, SynsetLinkType,
};

use super::commands::{ConnectionArgs, OutputFormat};
use super::output::ResultFormatter;

/// Build the connection configuration
///
/// Precedence: command line flags, then `--config`, then `OT_*` variables.
pub fn build_configuration(
    args: ConnectionArgs,
) -> Result<DatabaseConfiguration, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => DatabaseConfiguration::from_json_file(path)?,
        None => DatabaseConfiguration::from_env()?,
    };

    if let Some(fixture) = args.fixture {
        config.backend = BackendType::Memory {
            fixture: Some(fixture),
        };
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(database) = args.database {
        config.database = database;
    }
    if let Some(user) = args.user {
        config.user = user;
    }
    if let Some(password) = args.password {
        config.password = password;
    }
    if args.ask_password {
        print!("Password for {}: ", config.user);
        std::io::Write::flush(&mut std::io::stdout())?;
        config.password = rpassword::read_password()?;
    }

    config.validate()?;
    Ok(config)
}

fn open(
    args: ConnectionArgs,
    case_sensitive: bool,
) -> Result<OpenThesaurus, Box<dyn std::error::Error>> {
    let config = build_configuration(args)?;
    log::info!("Opening {}", config.masked_url());
    OpenThesaurus::open_with_case_sensitivity(config, case_sensitive).map_err(|e| {
        eprintln!("{}", format!("Error: {}", e).red());
        e.into()
    })
}

/// Handle the count command
pub fn handle_count(
    args: ConnectionArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let thesaurus = open(args, false)?;
    let count = thesaurus.synset_count()?;
    println!("{}", ResultFormatter::format_count(count, format));
    Ok(())
}

/// Handle the synset command
pub fn handle_synset(
    args: ConnectionArgs,
    id: i64,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let thesaurus = open(args, false)?;
    let synsets: Vec<_> = thesaurus.synset_by_id(id)?.into_iter().collect();
    println!("{}", ResultFormatter::format_synsets(&synsets, format)?);
    Ok(())
}

/// Handle the term command
pub fn handle_term(
    args: ConnectionArgs,
    id: i64,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let thesaurus = open(args, false)?;
    match thesaurus.term_by_id(id)? {
        Some(term) => println!("{}", ResultFormatter::format_term(&term, format)?),
        None => println!("{}", ResultFormatter::not_found(format)),
    }
    Ok(())
}

/// Handle the lookup command
pub fn handle_lookup(
    args: ConnectionArgs,
    word: String,
    case_sensitive: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let thesaurus = open(args, case_sensitive)?;
    let mut synsets: Vec<_> = thesaurus.synsets_by_word(&word)?.into_iter().collect();
    synsets.sort();
    println!("{}", ResultFormatter::format_synsets(&synsets, format)?);
    Ok(())
}

/// Handle the links command
pub fn handle_links(
    args: ConnectionArgs,
    id: i64,
    link_type: SynsetLinkType,
    incoming: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let thesaurus = open(args, false)?;
    let Some(synset) = thesaurus.synset_by_id(id)? else {
        println!("{}", ResultFormatter::not_found(format));
        return Ok(());
    };

    let direction = if incoming {
        LinkDirection::Incoming
    } else {
        LinkDirection::Outgoing
    };
    let linked = synset.links(link_type, direction)?;
    if format == OutputFormat::Table {
        println!(
            "{}",
            format!("{} {} links of synset {}", direction, link_type, id).bold()
        );
    }
    println!("{}", ResultFormatter::format_synsets(linked, format)?);
    Ok(())
}

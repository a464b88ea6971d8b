// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use openthesaurus::{Synset, Term, TermLinkType, ThesaurusResult};

use super::commands::OutputFormat;

/// Result formatter for the supported output formats
pub struct ResultFormatter;

impl ResultFormatter {
    pub fn format_count(count: usize, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => format!("{} {}", "Synsets:".bold().green(), count),
            OutputFormat::Json => serde_json::json!({ "synsets": count }).to_string(),
        }
    }

    pub fn not_found(format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => format!("{}", "No results found".yellow()),
            OutputFormat::Json => "null".to_string(),
        }
    }

    /// Format synsets with their terms and categories
    pub fn format_synsets(synsets: &[Synset], format: OutputFormat) -> ThesaurusResult<String> {
        match format {
            OutputFormat::Table => Self::synsets_table(synsets),
            OutputFormat::Json => Self::synsets_json(synsets),
        }
    }

    fn synsets_table(synsets: &[Synset]) -> ThesaurusResult<String> {
        if synsets.is_empty() {
            return Ok(format!("{}", "No results found".yellow()));
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("Synset").fg(Color::Green),
            Cell::new("Terms").fg(Color::Green),
            Cell::new("Categories").fg(Color::Green),
        ]);

        for synset in synsets {
            let terms = synset
                .terms()?
                .iter()
                .map(|t| t.word())
                .collect::<Vec<_>>()
                .join(", ");
            let categories = synset
                .categories()?
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(vec![synset.id().to_string(), terms, categories]);
        }

        Ok(format!(
            "{}\n{}",
            format!("Synsets returned: {}", synsets.len()).bold(),
            table
        ))
    }

    fn synsets_json(synsets: &[Synset]) -> ThesaurusResult<String> {
        let mut items = Vec::with_capacity(synsets.len());
        for synset in synsets {
            let terms: Vec<serde_json::Value> =
                synset.terms()?.iter().map(Self::term_json).collect();
            items.push(serde_json::json!({
                "id": synset.id(),
                "terms": terms,
                "categories": synset.categories()?,
            }));
        }
        Ok(Self::pretty(&serde_json::Value::Array(items)))
    }

    /// Format one term with its tags and antonyms
    pub fn format_term(term: &Term, format: OutputFormat) -> ThesaurusResult<String> {
        let tags = term.tags()?;
        let mut antonyms: Vec<Term> = term
            .term_links(TermLinkType::Antonymy)?
            .into_iter()
            .collect();
        antonyms.sort();

        match format {
            OutputFormat::Table => {
                let mut table = Table::new();
                table.load_preset(UTF8_FULL);
                let level = term
                    .level()
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let antonyms = antonyms
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                for (key, value) in [
                    ("Id", term.id().to_string()),
                    ("Word", term.word().to_string()),
                    ("Raw word", term.raw_word().to_string()),
                    ("Synset", term.synset_id().to_string()),
                    ("Level", level),
                    ("Acronym", term.is_acronym().to_string()),
                    ("Short form", term.is_short_form().to_string()),
                    ("Tags", tags.join(", ")),
                    ("Antonyms", antonyms),
                ] {
                    table.add_row(vec![Cell::new(key).fg(Color::Green), Cell::new(value)]);
                }
                Ok(table.to_string())
            }
            OutputFormat::Json => {
                let mut value = Self::term_json(term);
                if let serde_json::Value::Object(ref mut map) = value {
                    map.insert("tags".to_string(), serde_json::json!(tags));
                    map.insert(
                        "antonyms".to_string(),
                        serde_json::Value::Array(antonyms.iter().map(Self::term_json).collect()),
                    );
                }
                Ok(Self::pretty(&value))
            }
        }
    }

    fn term_json(term: &Term) -> serde_json::Value {
        serde_json::json!({
            "id": term.id(),
            "word": term.word(),
            "raw_word": term.raw_word(),
            "synset_id": term.synset_id(),
            "level": term.level().map(|l| l.to_string()),
            "is_acronym": term.is_acronym(),
            "is_short_form": term.is_short_form(),
        })
    }

    fn pretty(value: &serde_json::Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| {
            "{\"status\": \"error\", \"error\": \"Could not serialize results to JSON\"}"
                .to_string()
        })
    }
}

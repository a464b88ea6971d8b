// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Closed code vocabularies used by the thesaurus tables
//!
//! Every vocabulary maps onto the integer codes stored in the database. Link
//! types are bound as query parameters, levels and languages classify terms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of the thesaurus data, stored as `language_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "i32", into = "i32")]
pub enum Language {
    /// German OpenThesaurus (`language_id = 1`)
    #[default]
    German,
}

impl Language {
    pub const ALL: [Language; 1] = [Language::German];

    /// Integer code stored in the `language_id` column
    pub const fn code(self) -> i32 {
        match self {
            Language::German => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl TryFrom<i32> for Language {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Language::from_code(code).ok_or_else(|| format!("Unknown language code: {}", code))
    }
}

impl From<Language> for i32 {
    fn from(language: Language) -> Self {
        language.code()
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "german" | "de" | "1" => Ok(Language::German),
            _ => Err(format!("Unknown language: {}. Valid options: german", s)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::German => write!(f, "german"),
        }
    }
}

/// Typed relation between two synsets (`synset_link.link_type_id`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynsetLinkType {
    /// Broader meaning
    Hypernymy,
    /// Related meaning
    Association,
}

impl SynsetLinkType {
    pub const ALL: [SynsetLinkType; 2] = [SynsetLinkType::Hypernymy, SynsetLinkType::Association];

    /// Number of link types, used to size per-type lazy slots
    pub const COUNT: usize = Self::ALL.len();

    pub const fn code(self) -> i32 {
        match self {
            SynsetLinkType::Hypernymy => 1,
            SynsetLinkType::Association => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Dense position of this type inside [`SynsetLinkType::ALL`]
    pub(crate) const fn index(self) -> usize {
        match self {
            SynsetLinkType::Hypernymy => 0,
            SynsetLinkType::Association => 1,
        }
    }
}

impl FromStr for SynsetLinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hypernymy" | "hypernym" | "1" => Ok(SynsetLinkType::Hypernymy),
            "association" | "assoc" | "2" => Ok(SynsetLinkType::Association),
            _ => Err(format!(
                "Unknown synset link type: {}. Valid options: hypernymy, association",
                s
            )),
        }
    }
}

impl fmt::Display for SynsetLinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SynsetLinkType::Hypernymy => "hypernymy",
            SynsetLinkType::Association => "association",
        };
        write!(f, "{}", name)
    }
}

/// Typed relation between two terms (`term_link.link_type_id`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermLinkType {
    /// Opposite meaning
    Antonymy,
}

impl TermLinkType {
    pub const ALL: [TermLinkType; 1] = [TermLinkType::Antonymy];

    pub const fn code(self) -> i32 {
        match self {
            TermLinkType::Antonymy => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl FromStr for TermLinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "antonymy" | "antonym" | "1" => Ok(TermLinkType::Antonymy),
            _ => Err(format!(
                "Unknown term link type: {}. Valid options: antonymy",
                s
            )),
        }
    }
}

impl fmt::Display for TermLinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermLinkType::Antonymy => write!(f, "antonymy"),
        }
    }
}

/// Direction in which a stored edge is traversed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkDirection {
    /// From the node as `source` to the `target` column
    Outgoing,
    /// From the node as `target` back to the `source` column
    Incoming,
}

impl fmt::Display for LinkDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkDirection::Outgoing => write!(f, "outgoing"),
            LinkDirection::Incoming => write!(f, "incoming"),
        }
    }
}

/// Usage level of a term (`term.level_id`)
///
/// Terms without a special register carry level code 0 (or NULL), which maps
/// to no level at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermLevel {
    Colloquial,
    Rude,
    Vulgar,
    Jargon,
    Formal,
}

impl TermLevel {
    pub const ALL: [TermLevel; 5] = [
        TermLevel::Colloquial,
        TermLevel::Rude,
        TermLevel::Vulgar,
        TermLevel::Jargon,
        TermLevel::Formal,
    ];

    pub const fn code(self) -> i32 {
        match self {
            TermLevel::Colloquial => 2,
            TermLevel::Rude => 3,
            TermLevel::Vulgar => 4,
            TermLevel::Jargon => 5,
            TermLevel::Formal => 6,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl fmt::Display for TermLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TermLevel::Colloquial => "colloquial",
            TermLevel::Rude => "rude",
            TermLevel::Vulgar => "vulgar",
            TermLevel::Jargon => "jargon",
            TermLevel::Formal => "formal",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synset_link_codes() {
        assert_eq!(SynsetLinkType::Hypernymy.code(), 1);
        assert_eq!(SynsetLinkType::Association.code(), 2);
        assert_eq!(SynsetLinkType::from_code(2), Some(SynsetLinkType::Association));
        assert_eq!(SynsetLinkType::from_code(9), None);
    }

    #[test]
    fn test_link_type_indexes_are_dense() {
        for (i, link_type) in SynsetLinkType::ALL.iter().enumerate() {
            assert_eq!(link_type.index(), i);
        }
    }

    #[test]
    fn test_term_level_from_code() {
        assert_eq!(TermLevel::from_code(5), Some(TermLevel::Jargon));
        assert_eq!(TermLevel::from_code(0), None);
    }

    #[test]
    fn test_language_serializes_as_code() {
        let json = serde_json::to_string(&Language::German).unwrap();
        assert_eq!(json, "1");
        let parsed: Language = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Language::German);
        assert!(serde_json::from_str::<Language>("42").is_err());
    }

    #[test]
    fn test_parse_link_type() {
        assert_eq!(
            "Hypernymy".parse::<SynsetLinkType>().unwrap(),
            SynsetLinkType::Hypernymy
        );
        assert!("meronymy".parse::<SynsetLinkType>().is_err());
        assert_eq!(
            "antonym".parse::<TermLinkType>().unwrap(),
            TermLinkType::Antonymy
        );
    }
}

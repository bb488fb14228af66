//! Oracle candidates and their normalization
//!
//! A candidate uses the short generation-contract keys:
//!
//! ```json
//! {"t": "ELMA", "f": ["Meyve", "Kırmızı", "Ağaç", "Yemek", "Vitamin"], "c": 3, "d": 1}
//! ```
//!
//! Before it can join the corpus the target is trimmed and upper-cased,
//! every forbidden word is trimmed and title-cased, and the structure is
//! checked. Anything that fails becomes `ValidationSkipped`.

use serde::Deserialize;
use serde_json::Value;
use tabulaxy_common::models::{normalize_target, FORBIDDEN_PER_CARD};
use tabulaxy_common::{Category, Difficulty, Error, ModeFlags, Result, WordEntry};

/// One generated card as returned by the oracle
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(rename = "t", alias = "target")]
    pub target: String,

    #[serde(rename = "f", alias = "forbidden")]
    pub forbidden: Vec<String>,

    #[serde(rename = "c", alias = "categoryId")]
    pub category_id: i64,

    #[serde(rename = "d", alias = "difficultyId")]
    pub difficulty_id: i64,
}

impl Candidate {
    /// Decode one element of the response array
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::ValidationSkipped(format!("Malformed candidate: {}", e)))
    }

    /// Normalize and validate into a corpus entry eligible for every mode
    pub fn into_entry(self) -> Result<WordEntry> {
        let target = normalize_target(&self.target);
        if target.is_empty() {
            return Err(Error::ValidationSkipped("Empty target".to_string()));
        }

        let forbidden: Vec<String> = self.forbidden.iter().map(|f| title_case(f)).collect();
        if forbidden.len() != FORBIDDEN_PER_CARD {
            return Err(Error::ValidationSkipped(format!(
                "{}: expected {} forbidden words, got {}",
                target,
                FORBIDDEN_PER_CARD,
                forbidden.len()
            )));
        }
        if forbidden.iter().any(String::is_empty) {
            return Err(Error::ValidationSkipped(format!(
                "{}: empty forbidden word",
                target
            )));
        }

        let category = Category::from_id(self.category_id).ok_or_else(|| {
            Error::ValidationSkipped(format!("{}: unknown category {}", target, self.category_id))
        })?;
        let difficulty = Difficulty::from_id(self.difficulty_id).ok_or_else(|| {
            Error::ValidationSkipped(format!(
                "{}: unknown difficulty {}",
                target, self.difficulty_id
            ))
        })?;

        Ok(WordEntry {
            target,
            forbidden,
            category,
            difficulty,
            mode_flags: ModeFlags::ALL,
        })
    }
}

/// Trim and title-case: each run of letters starts upper-case, the rest
/// is lower-cased
pub fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_start = true;

    for ch in word.trim().chars() {
        if ch.is_alphabetic() {
            if at_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_start = false;
        } else {
            out.push(ch);
            at_start = true;
        }
    }

    out
}

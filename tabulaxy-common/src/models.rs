//! Word entry model
//!
//! Shared by the relational `words` table and the JSON corpus file. The
//! JSON form uses camelCase keys (`target`, `forbidden`, `categoryId`,
//! `difficultyId`, `modeFlags`); the short keys of the generation contract
//! (`t`, `f`, `c`, `d`) are accepted as aliases on load.

use crate::catalog::{Category, Difficulty};
use crate::modes::ModeFlags;
use serde::{Deserialize, Serialize};

/// Number of forbidden words on a fully seeded classic card
pub const FORBIDDEN_PER_CARD: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    #[serde(alias = "t")]
    pub target: String,

    #[serde(alias = "f")]
    pub forbidden: Vec<String>,

    #[serde(rename = "categoryId", alias = "c")]
    pub category: Category,

    #[serde(rename = "difficultyId", alias = "d")]
    pub difficulty: Difficulty,

    #[serde(rename = "modeFlags", default = "default_mode_flags")]
    pub mode_flags: ModeFlags,
}

fn default_mode_flags() -> ModeFlags {
    ModeFlags::ALL
}

impl WordEntry {
    /// Forbidden list encoded the way the `words.forbidden` column stores it
    pub fn forbidden_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.forbidden)
    }

    /// Key used for target uniqueness checks
    pub fn target_key(&self) -> String {
        normalize_target(&self.target)
    }
}

/// Canonical form of a target word: trimmed and upper-cased
pub fn normalize_target(target: &str) -> String {
    target.trim().to_uppercase()
}

//! Category and difficulty catalog
//!
//! Both enumerations are fixed. Their integer ids are the primary keys of
//! the `categories` and `difficulties` reference tables and the values
//! written to `categoryId`/`difficultyId` in the JSON corpus.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Word category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Category {
    Entertainment = 1,
    Science = 2,
    DailyLife = 3,
    Culture = 4,
    Technology = 5,
    /// Reserved; never used for attribution-sensitive generation
    Mixed = 6,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Entertainment,
        Category::Science,
        Category::DailyLife,
        Category::Culture,
        Category::Technology,
        Category::Mixed,
    ];

    /// Every category except `Mixed`, in id order
    pub const ATTRIBUTABLE: [Category; 5] = [
        Category::Entertainment,
        Category::Science,
        Category::DailyLife,
        Category::Culture,
        Category::Technology,
    ];

    pub const fn id(self) -> i64 {
        self as i64
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.id() == id)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::Entertainment => "Entertainment",
            Category::Science => "Science",
            Category::DailyLife => "Daily Life",
            Category::Culture => "Culture",
            Category::Technology => "Technology",
            Category::Mixed => "Mixed",
        }
    }

    pub const fn name_tr(self) -> &'static str {
        match self {
            Category::Entertainment => "Eğlence",
            Category::Science => "Bilim",
            Category::DailyLife => "Günlük Hayat",
            Category::Culture => "Kültür",
            Category::Technology => "Teknoloji",
            Category::Mixed => "Karışık",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Category::Entertainment => "🎬",
            Category::Science => "🔬",
            Category::DailyLife => "🏠",
            Category::Culture => "🎭",
            Category::Technology => "💻",
            Category::Mixed => "🎲",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Category::Entertainment => "#FF6B6B",
            Category::Science => "#4ECDC4",
            Category::DailyLife => "#45B7D1",
            Category::Culture => "#96CEB4",
            Category::Technology => "#9B59B6",
            Category::Mixed => "#F39C12",
        }
    }
}

impl TryFrom<i64> for Category {
    type Error = String;

    fn try_from(id: i64) -> std::result::Result<Self, Self::Error> {
        Category::from_id(id).ok_or_else(|| format!("unknown category id {}", id))
    }
}

impl From<Category> for i64 {
    fn from(category: Category) -> i64 {
        category.id()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Word difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
    Expert = 4,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub const fn id(self) -> i64 {
        self as i64
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Difficulty::ALL.into_iter().find(|d| d.id() == id)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    pub const fn name_tr(self) -> &'static str {
        match self {
            Difficulty::Easy => "Kolay",
            Difficulty::Medium => "Orta",
            Difficulty::Hard => "Zor",
            Difficulty::Expert => "Çok Zor",
        }
    }

    /// Selection weight used by the game client; stored, never enforced here
    pub const fn weight(self) -> f64 {
        match self {
            Difficulty::Easy => 1.5,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 0.7,
            Difficulty::Expert => 0.4,
        }
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = String;

    fn try_from(id: i64) -> std::result::Result<Self, Self::Error> {
        Difficulty::from_id(id).ok_or_else(|| format!("unknown difficulty id {}", id))
    }
}

impl From<Difficulty> for i64 {
    fn from(difficulty: Difficulty) -> i64 {
        difficulty.id()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

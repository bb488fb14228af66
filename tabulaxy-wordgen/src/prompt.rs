//! Generation request text

use tabulaxy_common::{Category, Difficulty};

/// Topic description quoted in the request
pub fn category_description(category: Category) -> &'static str {
    match category {
        Category::Entertainment => "Entertainment (Eğlence) - Movies, Series, Music, Games, Media",
        Category::Science => "Science (Bilim) - Biology, Physics, Space, Chemistry, Nature",
        Category::DailyLife => "Daily Life (Günlük Hayat) - Household, Routine, Food, Objects",
        Category::Culture => "Culture (Kültür) - Art, History, Literature, Traditions, Holidays",
        Category::Technology => "Technology (Teknoloji) - Computers, Internet, Gadgets, Innovation",
        Category::Mixed => "Mixed (Karışık) - Random simple concepts",
    }
}

pub fn difficulty_description(difficulty: Difficulty) -> String {
    format!("{} ({})", difficulty.name(), difficulty.name_tr())
}

/// One batch request to the oracle
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub category: Category,
    pub difficulty: Difficulty,
    pub count: usize,
    /// Recently added targets the oracle should not repeat
    pub known_sample: Vec<String>,
}

impl GenerationRequest {
    pub fn new(
        category: Category,
        difficulty: Difficulty,
        count: usize,
        known_sample: Vec<String>,
    ) -> Self {
        Self {
            category,
            difficulty,
            count,
            known_sample,
        }
    }

    pub fn render(&self) -> String {
        let known = if self.known_sample.is_empty() {
            "(none yet)".to_string()
        } else {
            self.known_sample.join(", ")
        };

        format!(
            r#"Generate {count} unique Taboo game cards in Turkish for the category: '{category}' with difficulty: '{difficulty}'.

Format must be a valid JSON array of objects. Each object must have:
- "t": Target word (Uppercase string)
- "f": Array of 5 Forbidden words (Title Case strings)
- "c": Category ID ({category_id})
- "d": Difficulty ID ({difficulty_id})

Rules:
1. Target words must be common Turkish terms fitting the category.
2. Forbidden words must be the most obvious clues someone would use.
3. Do NOT include these existing words: {known} (and others already known).
4. STRICT JSON format only. No markdown, no explanations.

Example:
[
  {{"t": "ELMA", "f": ["Meyve", "Kırmızı", "Ağaç", "Yemek", "Vitamin"], "c": 3, "d": 1}}
]
"#,
            count = self.count,
            category = category_description(self.category),
            difficulty = difficulty_description(self.difficulty),
            category_id = self.category.id(),
            difficulty_id = self.difficulty.id(),
            known = known,
        )
    }
}

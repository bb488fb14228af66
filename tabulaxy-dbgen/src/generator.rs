//! Deterministic synthetic corpus
//!
//! Each generated mode gets exactly `count` placeholder entries. Entry `i`
//! of a mode is a pure function of `(mode, i)`:
//!
//! - target: `KELIME_{C|S|M}_{i}`
//! - difficulty: `Difficulty::ALL[i % 4]`
//! - category: `Category::ATTRIBUTABLE[i % 5]` for classic, `Mixed` otherwise
//! - mode flags: the mode's own bit plus the journey bit
//!
//! so a re-run produces the same corpus byte for byte.

use tabulaxy_common::{Category, Difficulty, Error, GameMode, ModeFlags, Result, WordEntry};

/// Silent cards carry the rule reminder instead of clue words
pub const SILENT_FORBIDDEN: [&str; 2] = ["KONUŞMAK YASAK!", "SES ÇIKARMAK YASAK!"];

/// Marathon cards carry the pace reminder instead of clue words
pub const MARATHON_FORBIDDEN: [&str; 2] = ["Hızlı Ol!", "Kelime Say!"];

/// How one generated mode shapes its entries
#[derive(Debug, Clone, Copy)]
struct ModeRecipe {
    mode: GameMode,
    prefix: char,
}

impl ModeRecipe {
    fn for_mode(mode: GameMode) -> Result<Self> {
        let prefix = match mode {
            GameMode::Classic => 'C',
            GameMode::Silent => 'S',
            GameMode::Marathon => 'M',
            GameMode::Journey => {
                return Err(Error::InvalidMode(format!(
                    "{} is composite and has no generated entries",
                    mode
                )))
            }
        };
        Ok(Self { mode, prefix })
    }

    fn flags(&self) -> ModeFlags {
        ModeFlags::from(self.mode).with(GameMode::Journey)
    }

    fn entry(&self, index: usize) -> WordEntry {
        let target = format!("KELIME_{}_{}", self.prefix, index);

        let (category, forbidden) = match self.mode {
            GameMode::Classic => (
                Category::ATTRIBUTABLE[index % Category::ATTRIBUTABLE.len()],
                (1..=5).map(|j| format!("Yasak_{}_{}", target, j)).collect(),
            ),
            GameMode::Silent => (Category::Mixed, to_strings(&SILENT_FORBIDDEN)),
            _ => (Category::Mixed, to_strings(&MARATHON_FORBIDDEN)),
        };

        WordEntry {
            target,
            forbidden,
            category,
            difficulty: Difficulty::ALL[index % Difficulty::ALL.len()],
            mode_flags: self.flags(),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn with_room(total: usize) -> Result<Vec<WordEntry>> {
    let mut entries = Vec::new();
    entries
        .try_reserve_exact(total)
        .map_err(|e| Error::Config(format!("Cannot hold {} words: {}", total, e)))?;
    Ok(entries)
}

/// Generate `count` entries for one mode
pub fn generate_mode(mode: GameMode, count: usize) -> Result<Vec<WordEntry>> {
    let recipe = ModeRecipe::for_mode(mode)?;
    let mut entries = with_room(count)?;
    entries.extend((0..count).map(|i| recipe.entry(i)));
    Ok(entries)
}

/// Generate `count_per_mode` entries for every generated mode, classic first
///
/// Fails with `Config` when the total does not fit in memory.
pub fn generate_corpus(count_per_mode: usize) -> Result<Vec<WordEntry>> {
    let total = count_per_mode
        .checked_mul(GameMode::GENERATED.len())
        .ok_or_else(|| {
            Error::Config(format!(
                "{} words per mode overflows the corpus size",
                count_per_mode
            ))
        })?;
    let mut entries = with_room(total)?;

    for mode in GameMode::GENERATED {
        tracing::info!("Generating {} {} words", count_per_mode, mode);
        entries.extend(generate_mode(mode, count_per_mode)?);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_cycles_by_index() {
        for mode in GameMode::GENERATED {
            let entries = generate_mode(mode, 12).unwrap();
            for (i, entry) in entries.iter().enumerate() {
                assert_eq!(entry.difficulty, Difficulty::ALL[i % 4], "{} index {}", mode, i);
            }
        }
    }

    #[test]
    fn test_classic_category_cycles_through_attributable() {
        let entries = generate_mode(GameMode::Classic, 15).unwrap();

        for i in 0..10 {
            assert_eq!(entries[i].category, entries[i + 5].category);
        }
        let first_five: Vec<Category> = entries[..5].iter().map(|e| e.category).collect();
        assert_eq!(first_five, Category::ATTRIBUTABLE.to_vec());
        assert!(entries.iter().all(|e| e.category != Category::Mixed));
    }

    #[test]
    fn test_other_modes_are_mixed() {
        for mode in [GameMode::Silent, GameMode::Marathon] {
            let entries = generate_mode(mode, 7).unwrap();
            assert!(entries.iter().all(|e| e.category == Category::Mixed));
        }
    }

    #[test]
    fn test_flags_include_journey_bit() {
        for mode in GameMode::GENERATED {
            for entry in generate_mode(mode, 3).unwrap() {
                assert!(entry.mode_flags.contains(GameMode::Journey));
                assert!(entry.mode_flags.contains(mode));
                assert_eq!(entry.mode_flags.bits(), mode.bit() | 8);
            }
        }
    }

    #[test]
    fn test_targets_and_forbidden_are_deterministic() {
        let classic = generate_mode(GameMode::Classic, 3).unwrap();
        assert_eq!(classic[2].target, "KELIME_C_2");
        assert_eq!(
            classic[2].forbidden,
            vec![
                "Yasak_KELIME_C_2_1",
                "Yasak_KELIME_C_2_2",
                "Yasak_KELIME_C_2_3",
                "Yasak_KELIME_C_2_4",
                "Yasak_KELIME_C_2_5",
            ]
        );

        let silent = generate_mode(GameMode::Silent, 1).unwrap();
        assert_eq!(silent[0].target, "KELIME_S_0");
        assert_eq!(silent[0].forbidden, SILENT_FORBIDDEN.to_vec());

        let marathon = generate_mode(GameMode::Marathon, 1).unwrap();
        assert_eq!(marathon[0].target, "KELIME_M_0");
        assert_eq!(marathon[0].forbidden, MARATHON_FORBIDDEN.to_vec());

        assert_eq!(generate_corpus(40).unwrap(), generate_corpus(40).unwrap());
    }

    #[test]
    fn test_journey_is_not_generated() {
        assert!(matches!(
            generate_mode(GameMode::Journey, 1),
            Err(Error::InvalidMode(_))
        ));
    }

    #[test]
    fn test_corpus_has_count_per_mode() {
        let corpus = generate_corpus(25).unwrap();
        assert_eq!(corpus.len(), 75);
        for mode in GameMode::GENERATED {
            let n = corpus.iter().filter(|e| e.mode_flags.contains(mode)).count();
            assert_eq!(n, 25, "{}", mode);
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(generate_corpus(0).unwrap().is_empty());
    }

    #[test]
    fn test_oversized_count_is_config_error() {
        // Total overflows usize
        assert!(matches!(generate_corpus(usize::MAX), Err(Error::Config(_))));
        // Total fits in usize but not in an allocation
        assert!(matches!(generate_corpus(usize::MAX / 4), Err(Error::Config(_))));
        assert!(matches!(
            generate_mode(GameMode::Classic, usize::MAX),
            Err(Error::Config(_))
        ));
    }
}

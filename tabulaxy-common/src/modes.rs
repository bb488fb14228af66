//! Game mode eligibility bitmask
//!
//! Every word entry carries a `mode_flags` integer whose set bits name the
//! game modes it may be served in. An entry can satisfy several modes at
//! once; the stored value is the bitwise OR of all of them.
//!
//! | Mode     | Bit |
//! |----------|-----|
//! | Classic  | 1   |
//! | Silent   | 2   |
//! | Marathon | 4   |
//! | Journey  | 8   |
//!
//! Journey is the composite map mode that strings the other three together,
//! so generated entries carry it alongside their own mode bit.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Classic,
    Silent,
    Marathon,
    Journey,
}

impl GameMode {
    /// All known modes in bit order
    pub const ALL: [GameMode; 4] = [
        GameMode::Classic,
        GameMode::Silent,
        GameMode::Marathon,
        GameMode::Journey,
    ];

    /// Modes the bulk generator produces entries for
    pub const GENERATED: [GameMode; 3] = [GameMode::Classic, GameMode::Silent, GameMode::Marathon];

    pub const fn bit(self) -> u8 {
        match self {
            GameMode::Classic => 1,
            GameMode::Silent => 2,
            GameMode::Marathon => 4,
            GameMode::Journey => 8,
        }
    }

    /// Identifier used in configuration and on the command line
    pub const fn name(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Silent => "silent",
            GameMode::Marathon => "marathon",
            GameMode::Journey => "journey",
        }
    }

    /// Label shown by the game client
    pub const fn label_tr(self) -> &'static str {
        match self {
            GameMode::Classic => "KLASİK",
            GameMode::Silent => "SESSİZLİK",
            GameMode::Marathon => "15 KELİME MARATONU",
            GameMode::Journey => "BÜYÜK TABU TURU",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameMode {
    type Err = Error;

    /// Accepts the English identifier in any ASCII case, or the exact
    /// Turkish label the game client uses.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();

        if let Some(mode) = GameMode::ALL.into_iter().find(|m| m.label_tr() == trimmed) {
            return Ok(mode);
        }

        let lowered = trimmed.to_ascii_lowercase();
        GameMode::ALL
            .into_iter()
            .find(|m| m.name() == lowered)
            .ok_or_else(|| Error::InvalidMode(s.to_string()))
    }
}

/// Bit value for a mode name
pub fn mode_bit(name: &str) -> Result<u8> {
    name.parse::<GameMode>().map(GameMode::bit)
}

/// OR-combined set of game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeFlags(u8);

impl ModeFlags {
    pub const NONE: ModeFlags = ModeFlags(0);

    /// Eligible for every known mode (15)
    pub const ALL: ModeFlags = ModeFlags(15);

    pub const fn from_bits(bits: u8) -> Self {
        ModeFlags(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn with(self, mode: GameMode) -> Self {
        ModeFlags(self.0 | mode.bit())
    }

    pub const fn contains(self, mode: GameMode) -> bool {
        self.0 & mode.bit() != 0
    }

    pub fn from_modes<I>(modes: I) -> Self
    where
        I: IntoIterator<Item = GameMode>,
    {
        modes.into_iter().fold(ModeFlags::NONE, ModeFlags::with)
    }

    /// Combine mode names; the first unknown name fails the whole call
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .try_fold(ModeFlags::NONE, |flags, name| {
                Ok(flags.with(name.as_ref().parse::<GameMode>()?))
            })
    }

    /// Modes whose bits are set, in bit order
    pub fn modes(self) -> impl Iterator<Item = GameMode> {
        GameMode::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl From<GameMode> for ModeFlags {
    fn from(mode: GameMode) -> Self {
        ModeFlags(mode.bit())
    }
}

impl fmt::Display for ModeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

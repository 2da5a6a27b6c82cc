//! Per-game options: mode, difficulty and category selection
//!
//! These are the choices made on the mode-selection screen before a game
//! starts. They are validated with `garde` when a [`crate::game::Game`] is
//! created.

use std::sync::LazyLock;

use enum_map::{Enum, EnumMap, enum_map};
use garde::Validate;
use heck::ToTitleCase;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::constants;

/// Difficulty tier of a game
///
/// The tier controls how many options a round shows and whether the
/// player answers against a countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Three options, no countdown
    #[default]
    Easy,
    /// Four options, 15 second countdown
    Medium,
    /// Five options, 8 second countdown
    Hard,
}

/// Round rules attached to a difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Number of options shown per round (correct answer included)
    pub option_count: usize,
    /// Countdown budget per round, `None` for untimed rounds
    pub time_budget: Option<Duration>,
}

static RULES: LazyLock<EnumMap<Difficulty, Rules>> = LazyLock::new(|| {
    enum_map! {
        Difficulty::Easy => Rules {
            option_count: 3,
            time_budget: None,
        },
        Difficulty::Medium => Rules {
            option_count: 4,
            time_budget: Some(Duration::from_secs(constants::timer::MEDIUM_BUDGET_SECS)),
        },
        Difficulty::Hard => Rules {
            option_count: 5,
            time_budget: Some(Duration::from_secs(constants::timer::HARD_BUDGET_SECS)),
        },
    }
});

impl Difficulty {
    /// Every tier, easiest first
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Returns the round rules for this tier
    pub fn rules(self) -> Rules {
        RULES[self]
    }

    /// Human readable label, e.g. `"Medium"`
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Whether a game is played alone or by several players taking turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// One player; the result goes to the high-score list
    #[default]
    Single,
    /// Local multiplayer with turn-taking
    Multi,
}

impl GameMode {
    /// Inclusive bounds on the number of players for this mode
    pub fn player_bounds(self) -> (usize, usize) {
        match self {
            Self::Single => (
                constants::player::SINGLE_PLAYER_COUNT,
                constants::player::SINGLE_PLAYER_COUNT,
            ),
            Self::Multi => (
                constants::player::MIN_MULTIPLAYER_COUNT,
                constants::player::MAX_MULTIPLAYER_COUNT,
            ),
        }
    }
}

/// Which part of the catalog a game draws its questions from
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Every item in the catalog
    #[default]
    All,
    /// Only items of the named category
    Named(String),
}

impl CategoryFilter {
    /// Human readable label, e.g. `"Application Integration"`
    pub fn label(&self) -> String {
        match self {
            Self::All => "All Services".to_owned(),
            Self::Named(name) => category_label(name),
        }
    }
}

/// Turns a catalog category key such as `application-integration` into a
/// display label
pub fn category_label(name: &str) -> String {
    name.to_title_case()
}

/// Checks that the number of names matches what the game mode allows
fn player_count_matches(
    mode: &GameMode,
) -> impl FnOnce(&Vec<String>, &()) -> garde::Result + '_ {
    move |names, _| {
        let (min, max) = mode.player_bounds();
        if (min..=max).contains(&names.len()) {
            Ok(())
        } else {
            Err(garde::Error::new(format!(
                "player count {} is outside of the bounds [{min},{max}]",
                names.len()
            )))
        }
    }
}

/// Everything chosen before a game starts
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GameOptions {
    /// Single-player or multiplayer
    #[garde(skip)]
    pub mode: GameMode,
    /// Difficulty tier
    #[garde(skip)]
    pub difficulty: Difficulty,
    /// Category the questions are drawn from
    #[garde(skip)]
    pub category: CategoryFilter,
    /// Player names as typed, one per seat (normalized when the game starts)
    #[garde(
        custom(player_count_matches(&self.mode)),
        inner(length(max = constants::player::MAX_NAME_LENGTH))
    )]
    pub player_names: Vec<String>,
}

impl GameOptions {
    /// Options for a single-player game on easy over the whole catalog
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            mode: GameMode::Single,
            difficulty: Difficulty::default(),
            category: CategoryFilter::All,
            player_names: vec![name.into()],
        }
    }

    /// Options for a multiplayer game on easy over the whole catalog
    pub fn multi<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: GameMode::Multi,
            difficulty: Difficulty::default(),
            category: CategoryFilter::All,
            player_names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Replaces the difficulty tier
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Replaces the category filter
    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }
}

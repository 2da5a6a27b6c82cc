//! Player records

use serde::{Deserialize, Serialize};

use crate::constants;

/// A participant's running score and remaining lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    score: u64,
    lives: u32,
}

impl Player {
    /// Creates a player with zero score and the starting number of lives
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_lives(name, constants::player::STARTING_LIVES)
    }

    /// Creates a player with a specific number of lives
    pub fn with_lives(name: impl Into<String>, lives: u32) -> Self {
        Self {
            name: name.into(),
            score: 0,
            lives,
        }
    }

    /// The player's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Correct answers so far
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Lives left
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Whether the player still takes turns
    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub(crate) fn record_correct(&mut self) {
        self.score += 1;
    }

    /// Never drops below zero
    pub(crate) fn record_incorrect(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }
}

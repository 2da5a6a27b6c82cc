//! Turn-taking between players
//!
//! Tracks whose turn it is, skips eliminated players, and decides when the
//! game is over.

use serde::{Deserialize, Serialize};

use crate::{
    leaderboard::{self, Standing},
    options::GameMode,
    player::Player,
};

/// Where the game stands between answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// The player at this index answers next
    Active(usize),
    /// The game has ended, with the winner's index if there is one
    GameOver(Option<usize>),
}

/// Owns the players of a game and the turn order between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnController {
    mode: GameMode,
    players: Vec<Player>,
    state: TurnState,
}

impl TurnController {
    /// Starts a game with the first player to move
    pub fn new(mode: GameMode, players: Vec<Player>) -> Self {
        Self {
            mode,
            players,
            state: TurnState::Active(0),
        }
    }

    /// Builds a controller in an arbitrary state
    #[cfg(test)]
    pub(crate) fn with_state(mode: GameMode, players: Vec<Player>, state: TurnState) -> Self {
        Self {
            mode,
            players,
            state,
        }
    }

    /// Current turn state
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Every player, in join order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Index of the player whose turn it is, `None` once the game is over
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            TurnState::Active(index) => Some(index),
            TurnState::GameOver(_) => None,
        }
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> Option<&Player> {
        self.current_index().and_then(|index| self.players.get(index))
    }

    pub(crate) fn current_player_mut(&mut self) -> Option<&mut Player> {
        self.current_index()
            .and_then(|index| self.players.get_mut(index))
    }

    /// The winner, once the game is over and someone won
    pub fn winner(&self) -> Option<&Player> {
        match self.state {
            TurnState::GameOver(Some(index)) => self.players.get(index),
            _ => None,
        }
    }

    /// Moves the turn to the next player with lives left
    ///
    /// Players are scanned in circular order starting after the current
    /// one. If nobody else has lives the turn stays where it is. Does
    /// nothing once the game is over.
    pub fn advance_turn(&mut self) -> TurnState {
        if let TurnState::Active(current) = self.state {
            let count = self.players.len();
            let next = (1..count)
                .map(|offset| (current + offset) % count)
                .find(|index| self.players[*index].is_alive());
            if let Some(next) = next {
                self.state = TurnState::Active(next);
            }
        }
        self.state
    }

    /// Ends the game if the remaining lives call for it
    ///
    /// A single player's game ends when they run out of lives, and they are
    /// reported as the winner of their own game. A multiplayer game ends
    /// when at most one player has lives left.
    ///
    /// # Returns
    ///
    /// `true` if the game is over
    pub fn check_game_over(&mut self) -> bool {
        if let TurnState::GameOver(_) = self.state {
            return true;
        }

        let alive = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, player)| player.is_alive())
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        let over = match (self.mode, alive.as_slice()) {
            (GameMode::Single, []) => Some(TurnState::GameOver(Some(0))),
            (GameMode::Single, _) => None,
            (GameMode::Multi, []) => Some(TurnState::GameOver(None)),
            (GameMode::Multi, [winner]) => Some(TurnState::GameOver(Some(*winner))),
            (GameMode::Multi, _) => None,
        };

        if let Some(state) = over {
            self.state = state;
            true
        } else {
            false
        }
    }

    /// All players ranked by score
    pub fn standings(&self) -> Vec<Standing> {
        leaderboard::standings(&self.players)
    }
}

//! Final standings
//!
//! Orders the players of a finished game by score so the end-of-game
//! summary can show who came out on top.

use std::cmp::Reverse;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::player::Player;

/// One row of the end-of-game summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position in the table
    pub position: usize,
    /// Player name
    pub name: String,
    /// Correct answers
    pub score: u64,
    /// Lives left when the game ended
    pub lives: u32,
}

/// Ranks players by score, highest first
///
/// The sort is stable, so players with equal scores stay in the order they
/// joined.
pub fn standings(players: &[Player]) -> Vec<Standing> {
    players
        .iter()
        .sorted_by_key(|player| Reverse(player.score()))
        .enumerate()
        .map(|(index, player)| Standing {
            position: index + 1,
            name: player.name().to_owned(),
            score: player.score(),
            lives: player.lives(),
        })
        .collect_vec()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn scored(name: &str, score: u64) -> Player {
        let mut player = Player::new(name);
        for _ in 0..score {
            player.record_correct();
        }
        player
    }

    #[test]
    fn test_standings_sorted_descending() {
        let players = vec![scored("A", 1), scored("B", 5), scored("C", 3)];
        let names = standings(&players)
            .into_iter()
            .map(|s| s.name)
            .collect_vec();
        assert_eq!(names, ["B", "C", "A"]);
    }

    #[test]
    fn test_standings_ties_keep_join_order() {
        let players = vec![scored("A", 2), scored("B", 4), scored("C", 2), scored("D", 2)];
        let table = standings(&players);
        let names = table.iter().map(|s| s.name.as_str()).collect_vec();
        assert_eq!(names, ["B", "A", "C", "D"]);
        assert_eq!(
            table.iter().map(|s| s.position).collect_vec(),
            [1, 2, 3, 4]
        );
    }

    #[test]
    fn test_standings_empty() {
        assert!(standings(&[]).is_empty());
    }
}

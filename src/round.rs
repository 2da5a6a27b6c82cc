//! Round generation and answer scoring
//!
//! A round shows one service icon together with a shuffled set of service
//! names. This module picks the item to quiz, samples distractors without
//! replacement, and scores a player's choice against the round.

use fastrand::Rng;
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, ServiceItem},
    constants,
    player::Player,
};

/// Errors that can occur while generating a round
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested option count is outside the supported range
    #[error(
        "option count {0} is outside of the bounds [{min},{max}]",
        min = constants::round::MIN_OPTION_COUNT,
        max = constants::round::MAX_OPTION_COUNT
    )]
    InvalidOptionCount(usize),
    /// Even the full catalog cannot supply enough distinct distractors
    #[error("{needed} distractors are needed but only {available} are available")]
    NotEnoughItems {
        /// Distractors the option set needs
        needed: usize,
        /// Distractors the catalog could offer
        available: usize,
    },
    /// There is nothing to quiz
    #[error("no items to choose from")]
    EmptyPool,
}

/// Picks the next item to quiz, uniformly at random from the pool
///
/// Repeating the previous question is allowed. Pass `exclude` to skip one
/// item; it is ignored when the pool has nothing else to offer.
///
/// # Returns
///
/// `None` only if the pool is empty
pub fn select_next_item<'a>(
    rng: &mut Rng,
    pool: &[&'a ServiceItem],
    exclude: Option<&ServiceItem>,
) -> Option<&'a ServiceItem> {
    let candidates = match exclude {
        Some(last) => pool
            .iter()
            .copied()
            .filter(|item| *item != last)
            .collect_vec(),
        None => Vec::new(),
    };

    if candidates.is_empty() {
        rng.choice(pool.iter().copied())
    } else {
        rng.choice(candidates)
    }
}

/// The item being quizzed and the options shown for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundState {
    current: ServiceItem,
    options: Vec<ServiceItem>,
    correct_index: usize,
}

impl RoundState {
    /// Builds the option set for `correct`
    ///
    /// Distractors are sampled without replacement from `pool` minus the
    /// correct item. If the pool cannot supply `option_count - 1` of them,
    /// the whole catalog is sampled instead.
    ///
    /// # Arguments
    ///
    /// * `rng` - Source of randomness
    /// * `pool` - The active items (whole catalog or one category)
    /// * `catalog` - The full catalog, used as fallback for distractors
    /// * `correct` - The item being quizzed
    /// * `option_count` - Total options to show, correct one included
    ///
    /// # Errors
    ///
    /// * `Error::InvalidOptionCount` - `option_count` is outside 3..=5
    /// * `Error::NotEnoughItems` - the catalog is too small for the option count
    pub fn build(
        rng: &mut Rng,
        pool: &[&ServiceItem],
        catalog: &Catalog,
        correct: &ServiceItem,
        option_count: usize,
    ) -> Result<Self, Error> {
        if !(constants::round::MIN_OPTION_COUNT..=constants::round::MAX_OPTION_COUNT)
            .contains(&option_count)
        {
            return Err(Error::InvalidOptionCount(option_count));
        }
        let needed = option_count - 1;

        let mut candidates = pool
            .iter()
            .copied()
            .filter(|item| *item != correct)
            .collect_vec();
        if candidates.len() < needed {
            candidates = catalog
                .items()
                .iter()
                .filter(|item| *item != correct)
                .collect_vec();
        }
        if candidates.len() < needed {
            return Err(Error::NotEnoughItems {
                needed,
                available: candidates.len(),
            });
        }

        rng.shuffle(&mut candidates);
        candidates.truncate(needed);

        // Distractors are already in random order, so a uniform insert
        // position gives a uniform shuffle of the full option list.
        let mut options = candidates.into_iter().cloned().collect_vec();
        let correct_index = rng.usize(..=options.len());
        options.insert(correct_index, correct.clone());

        Ok(Self {
            current: correct.clone(),
            options,
            correct_index,
        })
    }

    /// Picks an item from the pool and builds its option set
    ///
    /// # Errors
    ///
    /// `Error::EmptyPool` if there is nothing to quiz, otherwise the errors
    /// of [`RoundState::build`].
    pub fn generate(
        rng: &mut Rng,
        pool: &[&ServiceItem],
        catalog: &Catalog,
        option_count: usize,
        exclude: Option<&ServiceItem>,
    ) -> Result<Self, Error> {
        let correct = select_next_item(rng, pool, exclude).ok_or(Error::EmptyPool)?;
        Self::build(rng, pool, catalog, correct, option_count)
    }

    /// The item whose icon is shown
    pub fn current(&self) -> &ServiceItem {
        &self.current
    }

    /// The options in display order
    pub fn options(&self) -> &[ServiceItem] {
        &self.options
    }

    /// Position of the current item within the options
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }
}

/// Result of scoring one answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Whether the chosen option was the current item
    pub correct: bool,
    /// The option the player picked, `None` if the countdown ran out
    pub chosen: Option<usize>,
    /// Where the correct option was
    pub correct_index: usize,
    /// Name of the correct service, for the answer reveal
    pub correct_name: String,
}

/// Scores a choice and updates the player
///
/// A correct choice adds one point. Anything else, including no choice at
/// all, costs one life. Lives stop at zero. Deciding what happens next is
/// left to the caller.
pub fn submit_answer(player: &mut Player, round: &RoundState, chosen: Option<usize>) -> Outcome {
    let correct = chosen == Some(round.correct_index);
    if correct {
        player.record_correct();
    } else {
        player.record_incorrect();
    }

    Outcome {
        correct,
        chosen,
        correct_index: round.correct_index,
        correct_name: round.current.name().to_owned(),
    }
}

//! # Icon Quiz Library
//!
//! This library provides the game engine for a cloud-service icon quiz: the
//! player is shown a service icon and picks its name from three to five
//! options. It handles the service catalog, round generation, scoring and
//! lives, difficulty tiers with answer countdowns, local multiplayer turn
//! order, and persisted high scores.
//!
//! The engine does no drawing. A [`game::Game`] reports every change to a
//! [`presenter::Presenter`] and asks its host to deliver timer alarms back
//! to it, so any front end can drive it.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
use derive_where::derive_where;
use itertools::Itertools;
use serde::Serialize;

pub mod catalog;
pub mod constants;
pub mod game;
pub mod high_scores;
pub mod icon;
pub mod leaderboard;
pub mod names;
pub mod options;
pub mod player;
pub mod presenter;
pub mod round;
pub mod settings;
pub mod timer;
pub mod turn;

/// The first few entries of a list together with the length of the whole list
///
/// The high-score screen shows e.g. "top 10 of 37".
#[derive(Debug, Clone, Serialize)]
#[derive_where(Default)]
pub struct TruncatedVec<T> {
    exact_count: usize,
    items: Vec<T>,
}

impl<T: Clone> TruncatedVec<T> {
    /// Keeps at most `limit` items of `list`; `exact_count` is the full length
    pub fn new<I: Iterator<Item = T>>(list: I, limit: usize, exact_count: usize) -> Self {
        let items = list.take(limit).collect_vec();
        Self { exact_count, items }
    }

    /// Maps a function over the kept items
    pub fn map<F, U>(self, f: F) -> TruncatedVec<U>
    where
        F: Fn(T) -> U,
    {
        TruncatedVec {
            exact_count: self.exact_count,
            items: self.items.into_iter().map(f).collect_vec(),
        }
    }

    /// Length of the whole list
    pub fn exact_count(&self) -> usize {
        self.exact_count
    }

    /// The kept items
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

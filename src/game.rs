//! Core game logic and state management
//!
//! This module contains the [`Game`] struct, which runs one quiz from the
//! first question to game over. It picks rounds, scores answers, drives the
//! countdown, passes turns between players and reports every change to a
//! [`Presenter`].
//!
//! The game is single-threaded and event-driven: it only changes in
//! response to [`Game::play`], [`Game::receive_message`] and
//! [`Game::receive_alarm`].

use std::sync::Arc;

use fastrand::Rng;
use garde::Validate;
use itertools::Itertools;
use serde::Serialize;
use serde_with::skip_serializing_none;
use thiserror::Error;
use web_time::Duration;

use crate::{
    catalog::{Catalog, IconReference, ServiceItem},
    high_scores::HighScoreEntry,
    leaderboard::Standing,
    names::{self, Names},
    options::{GameMode, GameOptions, Rules},
    player::Player,
    presenter::Presenter,
    round::{self, Outcome, RoundState},
    timer::{AlarmMessage, TICK_INTERVAL, TickResult, Timer},
    turn::{TurnController, TurnState},
};

/// Errors that can occur while setting up or running a game
#[derive(Error, Debug)]
pub enum Error {
    /// The chosen category (or the whole catalog) has no items
    #[error("there are no services to quiz in {0}")]
    EmptySelection(String),
    /// The options failed validation
    #[error("invalid game options: {0}")]
    InvalidOptions(#[from] garde::Report),
    /// A player name was rejected
    #[error("player {}: {source}", .seat + 1)]
    Name {
        /// Zero-based seat of the rejected name
        seat: usize,
        /// Why it was rejected
        #[source]
        source: names::Error,
    },
    /// A round could not be generated
    #[error(transparent)]
    Round(#[from] round::Error),
}

/// Input from the player(s)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomingMessage {
    /// The current player picked the option at this index
    Answer(usize),
    /// Move on from the answer reveal to the next question
    Next,
}

/// Final result of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    /// The last player standing, or the sole player of a single-player game
    pub winner: Option<String>,
    /// Every player, best score first
    pub standings: Vec<Standing>,
    /// Entry to add to the high-score list (single-player only)
    pub high_score: Option<HighScoreEntry>,
}

/// Incremental changes reported to the [`Presenter`]
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UpdateMessage {
    /// A new question is being asked
    RoundStarted {
        /// 1-based round number
        round: usize,
        /// Index of the player who answers
        player: usize,
        /// Icon to show
        icon: IconReference,
        /// Service names on the answer buttons, in order
        options: Vec<String>,
        /// Countdown budget, `None` when untimed
        #[serde_as(as = "Option<serde_with::DurationMilliSeconds<u64>>")]
        time_budget: Option<Duration>,
    },
    /// Time left to answer
    Countdown {
        /// Remaining budget
        #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
        remaining: Duration,
    },
    /// The current question was answered (or timed out)
    AnswerRevealed {
        /// Index of the player who answered
        player: usize,
        /// What was chosen and what was right
        outcome: Outcome,
        /// The player's score after scoring
        score: u64,
        /// The player's lives after scoring
        lives: u32,
    },
    /// A player ran out of lives in a multiplayer game
    PlayerEliminated {
        /// Index of the player
        player: usize,
        /// Name of the player
        name: String,
    },
    /// The game has ended
    GameOver(GameOutcome),
}

/// The question currently on screen, as sent in a [`SyncMessage`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// 1-based round number
    pub round: usize,
    /// Index of the player who answers
    pub player: usize,
    /// Icon to show
    pub icon: IconReference,
    /// Service names on the answer buttons, in order
    pub options: Vec<String>,
}

/// Full snapshots of the game, for redrawing from scratch
#[skip_serializing_none]
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SyncMessage {
    /// Created but [`Game::play`] has not been called yet
    NotStarted {
        /// Every player, in join order
        players: Vec<Player>,
    },
    /// Waiting for an answer
    Question {
        /// The question on screen
        question: QuestionView,
        /// Every player, in join order
        players: Vec<Player>,
        /// Time left, `None` when untimed
        #[serde_as(as = "Option<serde_with::DurationMilliSeconds<u64>>")]
        remaining: Option<Duration>,
    },
    /// Showing the answer to the last question
    Reveal {
        /// The question that was answered
        question: QuestionView,
        /// Every player, in join order
        players: Vec<Player>,
        /// How it was answered
        outcome: Outcome,
    },
    /// The game has ended
    Done(GameOutcome),
}

#[derive(Debug, Clone)]
enum State {
    Unstarted,
    Question(RoundState),
    Reveal { round: RoundState, outcome: Outcome },
    Done(GameOutcome),
}

/// One quiz session
#[derive(Debug)]
pub struct Game {
    catalog: Arc<Catalog>,
    pool: Vec<ServiceItem>,
    options: GameOptions,
    rules: Rules,
    turns: TurnController,
    timer: Timer,
    rng: Rng,
    avoid_repeats: bool,
    round_number: usize,
    last_item: Option<ServiceItem>,
    state: State,
}

impl Game {
    /// Sets up a game; nothing is presented until [`Game::play`]
    ///
    /// # Arguments
    ///
    /// * `catalog` - The full catalog, shared between games
    /// * `options` - Mode, difficulty, category and player names
    /// * `rng` - Source of randomness for question and option order
    ///
    /// # Errors
    ///
    /// * `Error::InvalidOptions` - wrong number of players or names too long
    /// * `Error::Name` - a name is inappropriate or used twice
    /// * `Error::EmptySelection` - nothing to quiz in the chosen category
    /// * `Error::Round` - the catalog is too small for the difficulty
    pub fn new(catalog: Arc<Catalog>, options: GameOptions, rng: Rng) -> Result<Self, Error> {
        options.validate()?;

        let mut names = Names::default();
        let players = options
            .player_names
            .iter()
            .enumerate()
            .map(|(seat, requested)| {
                names
                    .assign(seat, requested)
                    .map(Player::new)
                    .map_err(|source| Error::Name { seat, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pool = catalog
            .pool(&options.category)
            .into_iter()
            .cloned()
            .collect_vec();
        if pool.is_empty() {
            return Err(Error::EmptySelection(options.category.label()));
        }

        let rules = options.difficulty.rules();
        if catalog.len() < rules.option_count {
            return Err(round::Error::NotEnoughItems {
                needed: rules.option_count - 1,
                available: catalog.len().saturating_sub(1),
            }
            .into());
        }

        tracing::info!(
            mode = ?options.mode,
            difficulty = options.difficulty.label(),
            category = %options.category.label(),
            players = players.len(),
            pool = pool.len(),
            "game created"
        );

        Ok(Self {
            turns: TurnController::new(options.mode, players),
            catalog,
            pool,
            options,
            rules,
            timer: Timer::default(),
            rng,
            avoid_repeats: false,
            round_number: 0,
            last_item: None,
            state: State::Unstarted,
        })
    }

    /// Never asks the same item twice in a row when enabled
    #[must_use]
    pub fn avoid_repeats(mut self, enabled: bool) -> Self {
        self.avoid_repeats = enabled;
        self
    }

    /// Starts the first round
    ///
    /// Does nothing if the game is already running.
    ///
    /// # Arguments
    ///
    /// * `schedule_message` - Called with an alarm and the delay after which
    ///   it should be passed back to [`Game::receive_alarm`]
    /// * `presenter` - Receives the updates
    ///
    /// # Errors
    ///
    /// Returns an error if the round cannot be generated.
    pub fn play<S: FnMut(AlarmMessage, Duration), P: Presenter>(
        &mut self,
        mut schedule_message: S,
        mut presenter: P,
    ) -> Result<(), Error> {
        if matches!(self.state, State::Unstarted) {
            self.start_round(&mut schedule_message, &mut presenter)?;
        }
        Ok(())
    }

    /// Handles input from the player(s)
    ///
    /// Answers are only taken while a question is open and the index is one
    /// of the shown options. `Next` is only taken during the answer reveal.
    /// Everything else is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the next round cannot be generated.
    pub fn receive_message<S: FnMut(AlarmMessage, Duration), P: Presenter>(
        &mut self,
        message: IncomingMessage,
        mut schedule_message: S,
        mut presenter: P,
    ) -> Result<(), Error> {
        match (message, &self.state) {
            (IncomingMessage::Answer(index), State::Question(round))
                if index < round.options().len() =>
            {
                self.submit(Some(index), &mut presenter);
            }
            (IncomingMessage::Next, State::Reveal { .. }) => {
                self.turns.advance_turn();
                self.start_round(&mut schedule_message, &mut presenter)?;
            }
            (message, _) => {
                tracing::debug!(?message, "ignoring message in current state");
            }
        }
        Ok(())
    }

    /// Handles an alarm previously passed to `schedule_message`
    ///
    /// Ticks of a countdown that was cancelled or replaced are ignored. When
    /// the countdown runs out, the question is scored as unanswered.
    pub fn receive_alarm<S: FnMut(AlarmMessage, Duration), P: Presenter>(
        &mut self,
        message: AlarmMessage,
        mut schedule_message: S,
        mut presenter: P,
    ) {
        let AlarmMessage::Tick { token } = message;
        if !matches!(self.state, State::Question(_)) {
            return;
        }

        match self.timer.tick(token) {
            TickResult::Stale => {}
            TickResult::Running(remaining) => {
                presenter.present(&UpdateMessage::Countdown { remaining });
                schedule_message(message, TICK_INTERVAL);
            }
            TickResult::Expired => {
                presenter.present(&UpdateMessage::Countdown {
                    remaining: Duration::ZERO,
                });
                tracing::debug!(round = self.round_number, "time ran out");
                self.submit(None, &mut presenter);
            }
        }
    }

    fn start_round<S: FnMut(AlarmMessage, Duration), P: Presenter>(
        &mut self,
        schedule_message: &mut S,
        presenter: &mut P,
    ) -> Result<(), Error> {
        let Some(player) = self.turns.current_index() else {
            return Ok(());
        };

        self.timer.cancel();

        let pool = self.pool.iter().collect_vec();
        let exclude = self.last_item.as_ref().filter(|_| self.avoid_repeats);
        let round = RoundState::generate(
            &mut self.rng,
            &pool,
            &self.catalog,
            self.rules.option_count,
            exclude,
        )?;

        self.round_number += 1;
        self.last_item = Some(round.current().clone());
        tracing::debug!(
            round = self.round_number,
            player,
            service = round.current().name(),
            "round started"
        );

        if let Some(budget) = self.rules.time_budget {
            schedule_message(self.timer.start(budget), TICK_INTERVAL);
        }

        presenter.present(&UpdateMessage::RoundStarted {
            round: self.round_number,
            player,
            icon: round.current().icon().clone(),
            options: option_names(&round),
            time_budget: self.rules.time_budget,
        });

        self.state = State::Question(round);
        Ok(())
    }

    fn submit<P: Presenter>(&mut self, chosen: Option<usize>, presenter: &mut P) {
        let State::Question(round) = &self.state else {
            return;
        };
        let Some(index) = self.turns.current_index() else {
            return;
        };
        let Some(player) = self.turns.current_player_mut() else {
            return;
        };

        self.timer.cancel();
        let outcome = round::submit_answer(player, round, chosen);
        let (score, lives) = (player.score(), player.lives());
        let eliminated = (!player.is_alive()).then(|| player.name().to_owned());
        tracing::debug!(
            round = self.round_number,
            player = index,
            correct = outcome.correct,
            score,
            lives,
            "answer scored"
        );

        presenter.present(&UpdateMessage::AnswerRevealed {
            player: index,
            outcome: outcome.clone(),
            score,
            lives,
        });

        if let (Some(name), GameMode::Multi) = (eliminated, self.options.mode) {
            tracing::info!(player = index, %name, "player eliminated");
            presenter.present(&UpdateMessage::PlayerEliminated {
                player: index,
                name,
            });
        }

        let round = round.clone();
        if self.turns.check_game_over() {
            self.finish(presenter);
        } else {
            self.state = State::Reveal { round, outcome };
        }
    }

    fn finish<P: Presenter>(&mut self, presenter: &mut P) {
        self.timer.cancel();

        let high_score = match self.options.mode {
            GameMode::Single => self
                .turns
                .players()
                .first()
                .map(|player| HighScoreEntry::today(player.name(), player.score())),
            GameMode::Multi => None,
        };
        let outcome = GameOutcome {
            winner: self.turns.winner().map(|player| player.name().to_owned()),
            standings: self.turns.standings(),
            high_score,
        };

        tracing::info!(
            winner = ?outcome.winner,
            rounds = self.round_number,
            "game over"
        );
        presenter.present(&UpdateMessage::GameOver(outcome.clone()));
        self.state = State::Done(outcome);
    }

    /// A full snapshot of what should be on screen
    pub fn state_message(&self) -> SyncMessage {
        let players = self.turns.players().to_vec();
        match &self.state {
            State::Unstarted => SyncMessage::NotStarted { players },
            State::Question(round) => SyncMessage::Question {
                question: self.question_view(round),
                players,
                remaining: self.timer.remaining(),
            },
            State::Reveal { round, outcome } => SyncMessage::Reveal {
                question: self.question_view(round),
                players,
                outcome: outcome.clone(),
            },
            State::Done(outcome) => SyncMessage::Done(outcome.clone()),
        }
    }

    fn question_view(&self, round: &RoundState) -> QuestionView {
        QuestionView {
            round: self.round_number,
            player: self.turns.current_index().unwrap_or_default(),
            icon: round.current().icon().clone(),
            options: option_names(round),
        }
    }

    /// The final result, once the game is over
    pub fn outcome(&self) -> Option<&GameOutcome> {
        match &self.state {
            State::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Whether the game has ended
    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done(_))
    }

    /// Every player, in join order
    pub fn players(&self) -> &[Player] {
        self.turns.players()
    }

    /// Whose turn it is, or who won
    pub fn turn_state(&self) -> TurnState {
        self.turns.state()
    }

    /// The options the game was created with
    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Rounds started so far
    pub fn round_number(&self) -> usize {
        self.round_number
    }
}

fn option_names(round: &RoundState) -> Vec<String> {
    round
        .options()
        .iter()
        .map(|item| item.name().to_owned())
        .collect_vec()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::options::{CategoryFilter, Difficulty};

    type Alarms = Vec<(AlarmMessage, Duration)>;

    fn create_test_catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(vec![
                ServiceItem::new("Amazon EC2", "ec2.png").with_category("compute"),
                ServiceItem::new("Amazon S3", "s3.png").with_category("storage"),
                ServiceItem::new("Amazon RDS", "rds.png").with_category("database"),
            ])
            .unwrap(),
        )
    }

    fn create_game(options: GameOptions) -> Game {
        Game::new(Arc::new(Catalog::builtin()), options, Rng::with_seed(17)).unwrap()
    }

    fn correct_index(game: &Game) -> usize {
        match &game.state {
            State::Question(round) => round.correct_index(),
            other => panic!("expected a question, got {other:?}"),
        }
    }

    fn wrong_index(game: &Game) -> usize {
        (correct_index(game) + 1) % game.rules.option_count
    }

    fn answer(game: &mut Game, index: usize, updates: &mut Vec<UpdateMessage>) {
        let mut alarms = Alarms::new();
        game.receive_message(
            IncomingMessage::Answer(index),
            |a, d| alarms.push((a, d)),
            &mut *updates,
        )
        .unwrap();
        assert!(alarms.is_empty());
    }

    fn next(game: &mut Game, updates: &mut Vec<UpdateMessage>) -> Alarms {
        let mut alarms = Alarms::new();
        game.receive_message(
            IncomingMessage::Next,
            |a, d| alarms.push((a, d)),
            &mut *updates,
        )
        .unwrap();
        alarms
    }

    fn count(updates: &[UpdateMessage], predicate: impl Fn(&UpdateMessage) -> bool) -> usize {
        updates.iter().filter(|u| predicate(u)).count()
    }

    #[test]
    fn test_single_player_three_wrong_answers() {
        let mut game =
            Game::new(create_test_catalog(), GameOptions::single("Ada"), Rng::with_seed(1))
                .unwrap();
        let mut updates = Vec::new();
        let mut alarms = Alarms::new();
        game.play(|a, d| alarms.push((a, d)), &mut updates).unwrap();
        assert!(alarms.is_empty());

        for round in 1..=3 {
            assert_eq!(game.round_number(), round);
            let wrong = wrong_index(&game);
            answer(&mut game, wrong, &mut updates);

            if round < 3 {
                assert!(!game.is_done());
                assert_eq!(game.players()[0].lives(), 3 - round as u32);
                next(&mut game, &mut updates);
            }
        }

        assert!(game.is_done());
        assert_eq!(count(&updates, |u| matches!(u, UpdateMessage::GameOver(_))), 1);
        assert_eq!(count(&updates, |u| matches!(u, UpdateMessage::RoundStarted { .. })), 3);
        assert_eq!(
            count(&updates, |u| matches!(u, UpdateMessage::PlayerEliminated { .. })),
            0
        );

        let outcome = game.outcome().unwrap();
        assert_eq!(outcome.winner.as_deref(), Some("Ada"));
        assert_eq!(outcome.standings[0].score, 0);
        let entry = outcome.high_score.as_ref().unwrap();
        assert_eq!(entry.name, "Ada");
        assert_eq!(entry.score, 0);
        assert_eq!(game.turn_state(), TurnState::GameOver(Some(0)));
    }

    #[test]
    fn test_correct_answers_keep_single_player_going() {
        let mut game = create_game(GameOptions::single("Ada"));
        let mut updates = Vec::new();
        game.play(|_, _| {}, &mut updates).unwrap();

        for _ in 0..10 {
            let correct = correct_index(&game);
            answer(&mut game, correct, &mut updates);
            next(&mut game, &mut updates);
        }

        assert_eq!(game.players()[0].score(), 10);
        assert_eq!(game.players()[0].lives(), 3);
        assert!(!game.is_done());
    }

    #[test]
    fn test_multiplayer_last_player_standing() {
        let mut game = Game::new(
            create_test_catalog(),
            GameOptions::multi(["A", "B"]),
            Rng::with_seed(2),
        )
        .unwrap();
        let mut updates = Vec::new();
        game.play(|_, _| {}, &mut updates).unwrap();

        for turn in 0..5 {
            let expected_player = turn % 2;
            assert_eq!(game.turn_state(), TurnState::Active(expected_player));
            let index = if expected_player == 0 {
                wrong_index(&game)
            } else {
                correct_index(&game)
            };
            answer(&mut game, index, &mut updates);
            if turn < 4 {
                next(&mut game, &mut updates);
            }
        }

        assert!(game.is_done());
        assert_eq!(game.turn_state(), TurnState::GameOver(Some(1)));
        let outcome = game.outcome().unwrap();
        assert_eq!(outcome.winner.as_deref(), Some("B"));
        assert_eq!(outcome.high_score, None);
        assert_eq!(outcome.standings[0].name, "B");
        assert_eq!(
            updates.iter().rev().nth(1),
            Some(&UpdateMessage::PlayerEliminated {
                player: 0,
                name: "A".to_owned()
            })
        );

        let rounds = game.round_number();
        next(&mut game, &mut updates);
        assert_eq!(game.round_number(), rounds);
    }

    #[test]
    fn test_multiplayer_skips_eliminated_player() {
        let mut game = create_game(GameOptions::multi(["A", "B", "C"]));
        let mut updates = Vec::new();
        game.play(|_, _| {}, &mut updates).unwrap();

        for turn in 0..7 {
            let index = if turn % 3 == 0 {
                wrong_index(&game)
            } else {
                correct_index(&game)
            };
            answer(&mut game, index, &mut updates);
            next(&mut game, &mut updates);
        }

        assert!(!game.is_done());
        assert_eq!(game.players()[0].lives(), 0);
        assert_eq!(game.turn_state(), TurnState::Active(1));

        for _ in 0..4 {
            assert_ne!(game.turn_state(), TurnState::Active(0));
            let correct = correct_index(&game);
            answer(&mut game, correct, &mut updates);
            next(&mut game, &mut updates);
        }
    }

    #[test]
    fn test_timer_expiry_scores_as_incorrect() {
        let mut game = create_game(GameOptions::single("Ada").with_difficulty(Difficulty::Medium));
        let mut updates = Vec::new();
        let mut pending = Alarms::new();
        game.play(|a, d| pending.push((a, d)), &mut updates).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].1, TICK_INTERVAL);

        let mut delivered = 0;
        while let Some((alarm, _)) = pending.pop() {
            game.receive_alarm(alarm, |a, d| pending.push((a, d)), &mut updates);
            delivered += 1;
        }

        assert_eq!(delivered, 150);
        assert_eq!(game.players()[0].lives(), 2);
        assert_eq!(game.players()[0].score(), 0);
        let revealed = updates
            .iter()
            .find_map(|u| match u {
                UpdateMessage::AnswerRevealed { outcome, .. } => Some(outcome),
                _ => None,
            })
            .unwrap();
        assert!(!revealed.correct);
        assert_eq!(revealed.chosen, None);
        assert!(matches!(game.state_message(), SyncMessage::Reveal { .. }));
    }

    #[test]
    fn test_stale_alarm_ignored_after_answer() {
        let mut game = create_game(GameOptions::single("Ada").with_difficulty(Difficulty::Hard));
        let mut updates = Vec::new();
        let mut first = Alarms::new();
        game.play(|a, d| first.push((a, d)), &mut updates).unwrap();

        let correct = correct_index(&game);
        answer(&mut game, correct, &mut updates);

        let seen = updates.len();
        let mut scheduled = Alarms::new();
        game.receive_alarm(first[0].0, |a, d| scheduled.push((a, d)), &mut updates);
        assert!(scheduled.is_empty());
        assert_eq!(updates.len(), seen);

        let second = next(&mut game, &mut updates);
        assert_eq!(second.len(), 1);
        assert_ne!(second[0].0, first[0].0);

        let seen = updates.len();
        game.receive_alarm(first[0].0, |a, d| scheduled.push((a, d)), &mut updates);
        assert!(scheduled.is_empty());
        assert_eq!(updates.len(), seen);
        assert!(matches!(
            game.state_message(),
            SyncMessage::Question {
                remaining: Some(remaining),
                ..
            } if remaining == Duration::from_secs(8)
        ));

        game.receive_alarm(second[0].0, |a, d| scheduled.push((a, d)), &mut updates);
        assert_eq!(scheduled.len(), 1);
        assert_eq!(
            updates.last(),
            Some(&UpdateMessage::Countdown {
                remaining: Duration::from_millis(7900)
            })
        );
    }

    #[test]
    fn test_easy_rounds_are_untimed() {
        let mut game = create_game(GameOptions::single("Ada"));
        let mut updates = Vec::new();
        let mut alarms = Alarms::new();
        game.play(|a, d| alarms.push((a, d)), &mut updates).unwrap();

        assert!(alarms.is_empty());
        assert!(matches!(
            &updates[0],
            UpdateMessage::RoundStarted {
                time_budget: None,
                options,
                ..
            } if options.len() == 3
        ));
    }

    #[test]
    fn test_hard_round_has_five_options() {
        let mut game = create_game(GameOptions::single("Ada").with_difficulty(Difficulty::Hard));
        let mut updates = Vec::new();
        game.play(|_, _| {}, &mut updates).unwrap();
        match game.state_message() {
            SyncMessage::Question {
                question, players, ..
            } => {
                assert_eq!(question.options.len(), 5);
                assert_eq!(question.round, 1);
                assert_eq!(players.len(), 1);
                let unique: HashSet<_> = question.options.iter().collect();
                assert_eq!(unique.len(), 5);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_messages_out_of_phase_are_ignored() {
        let mut game = create_game(GameOptions::single("Ada"));
        let mut updates = Vec::new();

        next(&mut game, &mut updates);
        assert!(matches!(game.state_message(), SyncMessage::NotStarted { .. }));

        game.play(|_, _| {}, &mut updates).unwrap();
        next(&mut game, &mut updates);
        assert_eq!(game.round_number(), 1);

        answer(&mut game, 7, &mut updates);
        assert!(matches!(game.state_message(), SyncMessage::Question { .. }));

        let correct = correct_index(&game);
        answer(&mut game, correct, &mut updates);
        answer(&mut game, correct, &mut updates);
        assert_eq!(game.players()[0].score(), 1);

        game.play(|_, _| {}, &mut updates).unwrap();
        assert_eq!(game.round_number(), 1);
    }

    #[test]
    fn test_category_restricts_questions() {
        let mut game = create_game(
            GameOptions::single("Ada").with_category(CategoryFilter::Named("storage".to_owned())),
        );
        let catalog = Catalog::builtin();
        let storage = catalog
            .category("storage")
            .into_iter()
            .map(|item| item.icon().clone())
            .collect::<HashSet<_>>();
        let mut updates = Vec::new();
        game.play(|_, _| {}, &mut updates).unwrap();

        for _ in 0..20 {
            let correct = correct_index(&game);
            answer(&mut game, correct, &mut updates);
            next(&mut game, &mut updates);
        }

        for update in &updates {
            if let UpdateMessage::RoundStarted { icon, .. } = update {
                assert!(storage.contains(icon));
            }
        }
    }

    #[test]
    fn test_avoid_repeats() {
        let mut game = Game::new(
            create_test_catalog(),
            GameOptions::single("Ada"),
            Rng::with_seed(4),
        )
        .unwrap()
        .avoid_repeats(true);
        let mut updates = Vec::new();
        game.play(|_, _| {}, &mut updates).unwrap();
        for _ in 0..30 {
            let correct = correct_index(&game);
            answer(&mut game, correct, &mut updates);
            next(&mut game, &mut updates);
        }

        let icons = updates
            .iter()
            .filter_map(|u| match u {
                UpdateMessage::RoundStarted { icon, .. } => Some(icon.clone()),
                _ => None,
            })
            .collect_vec();
        assert_eq!(icons.len(), 31);
        assert!(icons.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_empty_category_rejected() {
        let result = Game::new(
            Arc::new(Catalog::builtin()),
            GameOptions::single("Ada").with_category(CategoryFilter::Named("quantum".to_owned())),
            Rng::with_seed(1),
        );
        assert!(matches!(result, Err(Error::EmptySelection(label)) if label == "Quantum"));
    }

    #[test]
    fn test_catalog_too_small_for_difficulty() {
        let result = Game::new(
            create_test_catalog(),
            GameOptions::single("Ada").with_difficulty(Difficulty::Medium),
            Rng::with_seed(1),
        );
        assert!(matches!(
            result,
            Err(Error::Round(round::Error::NotEnoughItems {
                needed: 3,
                available: 2
            }))
        ));
    }

    #[test]
    fn test_invalid_player_count_rejected() {
        let result = Game::new(
            create_test_catalog(),
            GameOptions::multi(["Solo"]),
            Rng::with_seed(1),
        );
        assert!(matches!(result, Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Game::new(
            create_test_catalog(),
            GameOptions::multi(["Ada", " Ada "]),
            Rng::with_seed(1),
        );
        match result {
            Err(error @ Error::Name { seat: 1, source: names::Error::Used }) => {
                assert_eq!(error.to_string(), "player 2: name already in-use");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_blank_names_get_defaults() {
        let game = create_game(GameOptions::multi(["", "Grace", "  "]));
        let names = game.players().iter().map(Player::name).collect_vec();
        assert_eq!(names, ["Player 1", "Grace", "Player 3"]);
    }

    #[test]
    fn test_update_message_serialization() {
        let message = UpdateMessage::Countdown {
            remaining: Duration::from_millis(1500),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["Countdown"]["remaining"], 1500);
    }
}

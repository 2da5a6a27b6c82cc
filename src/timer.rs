//! Answer countdown
//!
//! A round on a timed difficulty runs a countdown that is driven by tick
//! alarms. Every countdown gets a fresh [`TimerToken`]; a tick carrying any
//! other token is stale and ignored, so at most one countdown is ever live.

use web_time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Time between two countdown ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(constants::timer::TICK_INTERVAL_MILLIS);

/// Identifies one countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

/// Alarms the game asks its host to deliver later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// One countdown step has elapsed
    Tick {
        /// Countdown the tick belongs to
        token: TimerToken,
    },
}

/// What a tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// The tick belongs to a countdown that is no longer live
    Stale,
    /// Time is left; another tick should be scheduled
    Running(Duration),
    /// The budget is used up and the countdown has stopped
    Expired,
}

#[derive(Debug, Clone, Copy)]
struct Countdown {
    token: TimerToken,
    remaining: Duration,
}

/// The single live countdown of a game, if any
#[derive(Debug, Default)]
pub struct Timer {
    issued: u64,
    live: Option<Countdown>,
}

impl Timer {
    /// Starts a new countdown, replacing any live one
    ///
    /// # Returns
    ///
    /// The alarm to schedule after [`TICK_INTERVAL`]
    pub fn start(&mut self, budget: Duration) -> AlarmMessage {
        self.issued += 1;
        let token = TimerToken(self.issued);
        self.live = Some(Countdown {
            token,
            remaining: budget,
        });
        AlarmMessage::Tick { token }
    }

    /// Stops the live countdown; its pending ticks become stale
    pub fn cancel(&mut self) {
        self.live = None;
    }

    /// Time left on the live countdown
    pub fn remaining(&self) -> Option<Duration> {
        self.live.map(|countdown| countdown.remaining)
    }

    /// Applies one tick
    pub fn tick(&mut self, token: TimerToken) -> TickResult {
        let Some(countdown) = self.live.as_mut().filter(|c| c.token == token) else {
            return TickResult::Stale;
        };

        countdown.remaining = countdown.remaining.saturating_sub(TICK_INTERVAL);
        if countdown.remaining.is_zero() {
            self.live = None;
            TickResult::Expired
        } else {
            TickResult::Running(countdown.remaining)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn token(alarm: AlarmMessage) -> TimerToken {
        let AlarmMessage::Tick { token } = alarm;
        token
    }

    #[test]
    fn test_countdown_runs_to_expiry() {
        let mut timer = Timer::default();
        let token = token(timer.start(Duration::from_millis(300)));

        assert_eq!(
            timer.tick(token),
            TickResult::Running(Duration::from_millis(200))
        );
        assert_eq!(
            timer.tick(token),
            TickResult::Running(Duration::from_millis(100))
        );
        assert_eq!(timer.tick(token), TickResult::Expired);
        assert_eq!(timer.remaining(), None);
        assert_eq!(timer.tick(token), TickResult::Stale);
    }

    #[test]
    fn test_tick_interval_offsets_instants() {
        let start = web_time::Instant::now();
        let due = start + TICK_INTERVAL;
        assert_eq!(due.duration_since(start), Duration::from_millis(100));
    }

    #[test]
    fn test_hard_budget_tick_count() {
        let mut timer = Timer::default();
        let token = token(timer.start(Duration::from_secs(8)));
        let running = std::iter::repeat_with(|| timer.tick(token))
            .take_while(|result| matches!(result, TickResult::Running(_)))
            .count();
        assert_eq!(running, 79);
        assert_eq!(timer.remaining(), None);
    }

    #[test]
    fn test_cancel_makes_ticks_stale() {
        let mut timer = Timer::default();
        let token = token(timer.start(Duration::from_secs(15)));
        timer.cancel();
        assert_eq!(timer.tick(token), TickResult::Stale);
    }

    #[test]
    fn test_restart_invalidates_previous_countdown() {
        let mut timer = Timer::default();
        let first = token(timer.start(Duration::from_secs(15)));
        let second = token(timer.start(Duration::from_secs(8)));

        assert_ne!(first, second);
        assert_eq!(timer.tick(first), TickResult::Stale);
        assert_eq!(timer.remaining(), Some(Duration::from_secs(8)));
        assert_eq!(
            timer.tick(second),
            TickResult::Running(Duration::from_millis(7900))
        );
    }
}

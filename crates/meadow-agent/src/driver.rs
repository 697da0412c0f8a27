//! Periodic randomized re-rolling of bunny states.
//!
//! Each firing draws one uniform value per agent and maps it onto a state:
//!
//! | draw          | state       |
//! |---------------|-------------|
//! | `[0.0, 0.3]`  | `LookLeft`  |
//! | `(0.3, 0.6]`  | `LookRight` |
//! | `(0.6, 0.8]`  | `RunLeft`   |
//! | `(0.8, 1.0)`  | `RunRight`  |
//!
//! A run is never re-entered while already running that way. Idle states
//! are re-applied.

use std::time::{Duration, Instant};

use meadow_core::timer::IntervalTimer;

use crate::agent::Agent;
use crate::sprite::Sprite;
use crate::types::State;

/// Upper bound (inclusive) of the look-left bucket.
pub const LOOK_LEFT_UPPER: f64 = 0.3;
/// Upper bound (inclusive) of the look-right bucket.
pub const LOOK_RIGHT_UPPER: f64 = 0.6;
/// Upper bound (inclusive) of the run-left bucket; the rest runs right.
pub const RUN_LEFT_UPPER: f64 = 0.8;

/// Source of uniform draws in `[0, 1)`.
pub trait DecisionSource {
    fn draw(&mut self) -> f64;
}

/// Map a draw onto the state to enter, or `None` to leave the agent alone.
pub fn decide(draw: f64, current: State) -> Option<State> {
    let wanted = if draw <= LOOK_LEFT_UPPER {
        State::LookLeft
    } else if draw <= LOOK_RIGHT_UPPER {
        State::LookRight
    } else if draw <= RUN_LEFT_UPPER {
        State::RunLeft
    } else {
        State::RunRight
    };

    if wanted.is_running() && wanted == current {
        None
    } else {
        Some(wanted)
    }
}

/// Timer-driven behavior process for a population of agents.
///
/// The driver never holds agents; each firing visits whatever slice the
/// scene passes in, so agents removed in between are simply not seen.
pub struct BehaviorDriver<D> {
    timer: IntervalTimer,
    source: D,
    rounds: u64,
}

impl<D: DecisionSource> BehaviorDriver<D> {
    /// Arm the driver; the first firing is one `interval` after `now`.
    pub fn new(interval: Duration, source: D, now: Instant) -> Self {
        Self {
            timer: IntervalTimer::new(interval, now),
            source,
            rounds: 0,
        }
    }

    /// Fire if the interval has elapsed at `now`. Returns whether it fired.
    pub fn poll<S: Sprite>(&mut self, now: Instant, agents: &mut [Agent<S>]) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        self.fire(agents);
        true
    }

    /// Re-roll every agent once. Returns how many transitions were applied.
    pub fn fire<S: Sprite>(&mut self, agents: &mut [Agent<S>]) -> usize {
        self.rounds += 1;
        let mut applied = 0;
        for agent in agents.iter_mut() {
            let draw = self.source.draw();
            match decide(draw, agent.state()) {
                Some(next) => {
                    tracing::debug!(
                        agent = %agent.id(),
                        draw,
                        from = ?agent.state(),
                        to = ?next,
                        "behavior decision"
                    );
                    agent.set_state(next);
                    applied += 1;
                }
                None => {
                    tracing::debug!(agent = %agent.id(), draw, state = ?agent.state(), "already running, kept cycle");
                }
            }
        }
        applied
    }

    /// Stop firing. Later polls are no-ops.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.timer.is_cancelled()
    }

    /// Time until the next firing, `None` once cancelled.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn interval(&self) -> Duration {
        self.timer.period()
    }
}

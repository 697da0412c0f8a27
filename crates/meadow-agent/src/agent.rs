use std::time::Instant;

use anyhow::{bail, Result};

use crate::clip::{self, REQUIRED_FRAMES};
use crate::sprite::{AnimatedSprite, Sprite};
use crate::types::{AgentId, Position, State};

/// One bunny: its behavior state, its speed, and the sprite it drives.
///
/// Every transition issues the clip table's entry command to the sprite, so
/// the displayed frame always belongs to the current state. The frame source
/// is a single strip shared by both run cycles; [`animate`](Self::animate)
/// feeds each frame change back through
/// [`on_frame_change`](Self::on_frame_change) to keep a run inside its cycle.
pub struct Agent<S = AnimatedSprite> {
    id: AgentId,
    speed: f32,
    state: State,
    sprite: S,
}

impl<S: Sprite> Agent<S> {
    /// Create an agent looking left.
    ///
    /// Fails when the sprite's strip is too short for the clip table or the
    /// speed is not a positive finite number.
    pub fn new(id: AgentId, sprite: S, speed: f32) -> Result<Self> {
        if sprite.frame_count() < REQUIRED_FRAMES {
            bail!(
                "bunny {id}: sprite has {} frames, the clip table needs {REQUIRED_FRAMES}",
                sprite.frame_count()
            );
        }
        if !speed.is_finite() || speed <= 0.0 {
            bail!("bunny {id}: speed must be positive, got {speed}");
        }

        let mut agent = Self {
            id,
            speed,
            state: State::LookLeft,
            sprite,
        };
        agent.look_left();
        Ok(agent)
    }

    pub fn look_left(&mut self) {
        self.enter(State::LookLeft);
    }

    pub fn look_right(&mut self) {
        self.enter(State::LookRight);
    }

    pub fn run_left(&mut self) {
        self.enter(State::RunLeft);
    }

    pub fn run_right(&mut self) {
        self.enter(State::RunRight);
    }

    pub fn set_state(&mut self, state: State) {
        match state {
            State::LookLeft => self.look_left(),
            State::LookRight => self.look_right(),
            State::RunLeft => self.run_left(),
            State::RunRight => self.run_right(),
        }
    }

    /// Stop running and keep facing the same way. No-op while idle.
    pub fn stop(&mut self) {
        if self.state.is_running() {
            self.enter(self.state.at_rest());
        }
    }

    fn enter(&mut self, state: State) {
        let previous = self.state;
        self.state = state;
        self.sprite.apply(clip::entry_command(state));
        tracing::trace!(agent = %self.id, from = ?previous, to = ?state, "state transition");
    }

    /// Per-frame motion: a running bunny moves `speed` pixels its way.
    pub fn update(&mut self) {
        let dx = match self.state {
            State::RunLeft => -self.speed,
            State::RunRight => self.speed,
            State::LookLeft | State::LookRight => return,
        };
        let x = self.sprite.position().x + dx;
        self.sprite.set_x(x);
    }

    /// Frame-change notification from the sprite engine.
    ///
    /// Returns `true` when playback was sent back to the start of the cycle.
    pub fn on_frame_change(&mut self, frame: usize) -> bool {
        match clip::loop_back(self.state, frame, self.sprite.frame_count()) {
            Some(command) => {
                self.sprite.apply(command);
                true
            }
            None => false,
        }
    }

    /// Run the sprite engine up to `now`, handling each frame change.
    /// Returns the number of frame changes observed.
    pub fn animate(&mut self, now: Instant) -> usize {
        let mut changes = 0;
        while let Some(frame) = self.sprite.step(now) {
            self.on_frame_change(frame);
            changes += 1;
        }
        changes
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn position(&self) -> Position {
        self.sprite.position()
    }

    pub fn sprite(&self) -> &S {
        &self.sprite
    }

    #[cfg(test)]
    pub(crate) fn sprite_mut(&mut self) -> &mut S {
        &mut self.sprite
    }
}

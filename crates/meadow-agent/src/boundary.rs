use crate::agent::Agent;
use crate::sprite::Sprite;
use crate::types::State;

/// Per-frame edge check that turns bunnies around.
///
/// Applied every frame the condition holds, not only on crossing, and
/// unconditionally overrides the behavior driver: a bunny past the left
/// bound runs right, a bunny past the right bound runs left. The right check
/// is evaluated second, so it wins if the bounds ever overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryGuard {
    left: f32,
    right: f32,
}

impl BoundaryGuard {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Bounds `margin` pixels in from each edge of a `width`-wide viewport.
    pub fn from_viewport(width: f32, margin: f32) -> Self {
        Self::new(margin, width - margin)
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    /// Force a reversal if `agent` is out of bounds. Returns the forced state.
    pub fn enforce<S: Sprite>(&self, agent: &mut Agent<S>) -> Option<State> {
        let x = agent.position().x;
        let mut forced = None;

        if x < self.left {
            agent.run_right();
            forced = Some(State::RunRight);
        }
        if x > self.right {
            agent.run_left();
            forced = Some(State::RunLeft);
        }

        if let Some(state) = forced {
            tracing::trace!(agent = %agent.id(), x, to = ?state, "boundary forced reversal");
        }
        forced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::FrameCommand;
    use crate::testing::RecordingSprite;
    use crate::types::AgentId;

    const GUARD: BoundaryGuard = BoundaryGuard {
        left: 50.0,
        right: 974.0,
    };

    fn agent_at(x: f32, state: State) -> Agent<RecordingSprite> {
        let mut agent = Agent::new(AgentId(0), RecordingSprite::at(x), 2.0).unwrap();
        agent.set_state(state);
        agent
    }

    #[test]
    fn from_viewport_insets_both_edges() {
        assert_eq!(BoundaryGuard::from_viewport(1024.0, 50.0), GUARD);
    }

    #[test]
    fn past_left_bound_runs_right_from_any_state() {
        for state in State::ALL {
            let mut agent = agent_at(GUARD.left() - 1.0, state);
            assert_eq!(GUARD.enforce(&mut agent), Some(State::RunRight));
            assert_eq!(agent.state(), State::RunRight);
        }
    }

    #[test]
    fn past_right_bound_runs_left_from_any_state() {
        for state in State::ALL {
            let mut agent = agent_at(GUARD.right() + 1.0, state);
            assert_eq!(GUARD.enforce(&mut agent), Some(State::RunLeft));
            assert_eq!(agent.state(), State::RunLeft);
        }
    }

    #[test]
    fn inside_bounds_is_untouched() {
        for x in [GUARD.left(), 512.0, GUARD.right()] {
            let mut agent = agent_at(x, State::LookRight);
            let issued = agent.sprite().commands.len();
            assert_eq!(GUARD.enforce(&mut agent), None);
            assert_eq!(agent.state(), State::LookRight);
            assert_eq!(agent.sprite().commands.len(), issued);
        }
    }

    #[test]
    fn fires_every_tick_while_out_of_bounds() {
        let mut agent = agent_at(10.0, State::LookLeft);
        agent.sprite_mut().commands.clear();
        for _ in 0..3 {
            GUARD.enforce(&mut agent);
        }
        assert_eq!(agent.sprite().commands, vec![FrameCommand::Play(1); 3]);
    }

    #[test]
    fn overlapping_bounds_resolve_to_run_left() {
        let degenerate = BoundaryGuard::new(600.0, 400.0);
        let mut agent = agent_at(500.0, State::LookRight);
        assert_eq!(degenerate.enforce(&mut agent), Some(State::RunLeft));
        assert_eq!(agent.state(), State::RunLeft);
    }
}

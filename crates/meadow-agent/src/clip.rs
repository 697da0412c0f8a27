//! The state → animation table and the loop-back rule.
//!
//! All four clips share one frame strip:
//!
//! ```text
//! index:  0          1  2  3       4          5  6  7
//!         look-right run-right     look-left  run-left
//! ```
//!
//! The sprite engine plays the strip linearly and wraps at its end, so a run
//! cycle is kept in range by watching frame-change notifications: when the
//! engine steps onto a cycle's `end` frame (one past its last pose, wrapped
//! to the strip length), playback is sent back to the cycle's first frame.

use crate::types::State;

/// Held frame while looking right.
pub const LOOK_RIGHT_FRAME: usize = 0;
/// Held frame while looking left.
pub const LOOK_LEFT_FRAME: usize = 4;
pub const RUN_RIGHT_FIRST: usize = 1;
pub const RUN_RIGHT_END: usize = 4;
pub const RUN_LEFT_FIRST: usize = 5;
pub const RUN_LEFT_END: usize = 8;

/// Minimum strip length addressed by the table.
pub const REQUIRED_FRAMES: usize = 8;

/// Playback mode and frame range for one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clip {
    /// Show one frame, stopped.
    Hold(usize),
    /// Play `first..end` repeatedly.
    Loop { first: usize, end: usize },
}

impl Clip {
    /// Whether `frame` is a pose of this clip.
    pub fn contains(self, frame: usize) -> bool {
        match self {
            Clip::Hold(held) => frame == held,
            Clip::Loop { first, end } => (first..end).contains(&frame),
        }
    }

    /// Command that starts this clip from the top.
    pub fn entry(self) -> FrameCommand {
        match self {
            Clip::Hold(frame) => FrameCommand::Stop(frame),
            Clip::Loop { first, .. } => FrameCommand::Play(first),
        }
    }
}

const CLIPS: [Clip; State::COUNT] = [
    Clip::Hold(LOOK_LEFT_FRAME),
    Clip::Hold(LOOK_RIGHT_FRAME),
    Clip::Loop {
        first: RUN_LEFT_FIRST,
        end: RUN_LEFT_END,
    },
    Clip::Loop {
        first: RUN_RIGHT_FIRST,
        end: RUN_RIGHT_END,
    },
];

pub fn clip_for(state: State) -> Clip {
    CLIPS[state as usize]
}

/// A request to the sprite engine's playback cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCommand {
    /// Jump to the frame and stop.
    Stop(usize),
    /// Jump to the frame and play on from it.
    Play(usize),
}

/// Command issued on entering `state`.
pub fn entry_command(state: State) -> FrameCommand {
    clip_for(state).entry()
}

/// Loop-back transition: what to do when the engine reports `notified` as
/// the new current frame while the agent is in `state`.
///
/// Returns `None` unless `state` is a run and `notified` is that run's
/// overrun frame on a strip of `frame_count` frames.
pub fn loop_back(state: State, notified: usize, frame_count: usize) -> Option<FrameCommand> {
    match clip_for(state) {
        Clip::Hold(_) => None,
        Clip::Loop { first, end } => {
            let overrun = end % frame_count.max(1);
            (notified == overrun).then_some(FrameCommand::Play(first))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_clips_hold_fixed_frames() {
        assert_eq!(clip_for(State::LookLeft), Clip::Hold(4));
        assert_eq!(clip_for(State::LookRight), Clip::Hold(0));
        assert_eq!(entry_command(State::LookLeft), FrameCommand::Stop(4));
        assert_eq!(entry_command(State::LookRight), FrameCommand::Stop(0));
    }

    #[test]
    fn run_clips_start_at_first_pose() {
        assert_eq!(entry_command(State::RunRight), FrameCommand::Play(1));
        assert_eq!(entry_command(State::RunLeft), FrameCommand::Play(5));
    }

    #[test]
    fn run_cycles_are_disjoint() {
        let right = clip_for(State::RunRight);
        let left = clip_for(State::RunLeft);
        for frame in 0..REQUIRED_FRAMES {
            assert!(
                !(right.contains(frame) && left.contains(frame)),
                "frame {frame} is in both run cycles"
            );
        }
        assert!((1..=3).all(|f| right.contains(f)));
        assert!((5..=7).all(|f| left.contains(f)));
        assert!(!right.contains(LOOK_RIGHT_FRAME) && !right.contains(LOOK_LEFT_FRAME));
        assert!(!left.contains(LOOK_RIGHT_FRAME) && !left.contains(LOOK_LEFT_FRAME));
    }

    #[test]
    fn run_right_loops_back_from_overrun() {
        for frame in 0..REQUIRED_FRAMES {
            let expected = (frame == 4).then_some(FrameCommand::Play(1));
            assert_eq!(loop_back(State::RunRight, frame, 8), expected, "frame {frame}");
        }
    }

    #[test]
    fn run_left_loops_back_after_strip_wrap() {
        for frame in 0..REQUIRED_FRAMES {
            let expected = (frame == 0).then_some(FrameCommand::Play(5));
            assert_eq!(loop_back(State::RunLeft, frame, 8), expected, "frame {frame}");
        }
    }

    #[test]
    fn longer_strip_moves_left_overrun() {
        assert_eq!(loop_back(State::RunLeft, 8, 10), Some(FrameCommand::Play(5)));
        assert_eq!(loop_back(State::RunLeft, 0, 10), None);
    }

    #[test]
    fn idle_states_never_loop_back() {
        for state in [State::LookLeft, State::LookRight] {
            for frame in 0..REQUIRED_FRAMES {
                assert_eq!(loop_back(state, frame, 8), None);
            }
        }
    }
}

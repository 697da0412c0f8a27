use std::time::{Duration, Instant};

use crate::clip::FrameCommand;
use crate::types::Position;

/// Handle to an animatable drawable placed in the scene.
///
/// The agent drives playback through this trait and never sees pixels.
/// [`step`](Sprite::step) is the engine's frame-change notification channel:
/// it advances at most one frame and reports the new current frame.
pub trait Sprite {
    /// Jump to `frame` and stop playback.
    fn goto_and_stop(&mut self, frame: usize);

    /// Jump to `frame` and play on from it.
    fn goto_and_play(&mut self, frame: usize);

    fn current_frame(&self) -> usize;

    fn is_playing(&self) -> bool;

    fn frame_count(&self) -> usize;

    fn position(&self) -> Position;

    /// Move horizontally. The vertical coordinate belongs to the scene.
    fn set_x(&mut self, x: f32);

    /// Advance one frame if one is due at `now`, returning the new frame.
    fn step(&mut self, now: Instant) -> Option<usize>;

    fn apply(&mut self, command: FrameCommand) {
        match command {
            FrameCommand::Stop(frame) => self.goto_and_stop(frame),
            FrameCommand::Play(frame) => self.goto_and_play(frame),
        }
    }
}

/// Timer-driven playback over a linear frame strip.
///
/// While playing, the cursor moves forward one frame per `frame_interval`
/// and wraps from the last frame to frame 0. Jumps keep the running clock,
/// so restarting a cycle mid-interval does not shift the cadence.
#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    frame_count: usize,
    current: usize,
    playing: bool,
    frame_interval: Duration,
    last_advance: Instant,
    position: Position,
    scale: f32,
}

impl AnimatedSprite {
    pub fn new(
        frame_count: usize,
        frame_interval: Duration,
        position: Position,
        scale: f32,
        now: Instant,
    ) -> Self {
        Self {
            frame_count,
            current: 0,
            playing: false,
            frame_interval: frame_interval.max(Duration::from_millis(1)),
            last_advance: now,
            position,
            scale,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    fn clamp(&self, frame: usize) -> usize {
        frame.min(self.frame_count.saturating_sub(1))
    }
}

impl Sprite for AnimatedSprite {
    fn goto_and_stop(&mut self, frame: usize) {
        self.current = self.clamp(frame);
        self.playing = false;
    }

    fn goto_and_play(&mut self, frame: usize) {
        self.current = self.clamp(frame);
        self.playing = true;
    }

    fn current_frame(&self) -> usize {
        self.current
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_x(&mut self, x: f32) {
        self.position.x = x;
    }

    fn step(&mut self, now: Instant) -> Option<usize> {
        if !self.playing || self.frame_count == 0 {
            // A stopped sprite keeps its clock current so that starting a
            // run does not replay the idle time as a burst of frames.
            self.last_advance = now;
            return None;
        }
        let elapsed = now.checked_duration_since(self.last_advance)?;
        if elapsed < self.frame_interval {
            return None;
        }
        self.last_advance += self.frame_interval;
        self.current = (self.current + 1) % self.frame_count;
        Some(self.current)
    }
}

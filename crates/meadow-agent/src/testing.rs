//! Test doubles shared by the unit tests in this crate.

use std::collections::VecDeque;
use std::time::Instant;

use crate::clip::FrameCommand;
use crate::driver::DecisionSource;
use crate::sprite::Sprite;
use crate::types::Position;

/// Sprite that records every playback command and replays scripted
/// frame-change notifications from [`step`](Sprite::step).
pub(crate) struct RecordingSprite {
    pub commands: Vec<FrameCommand>,
    pub notifications: VecDeque<usize>,
    current: usize,
    playing: bool,
    frame_count: usize,
    position: Position,
}

impl RecordingSprite {
    pub fn new(frame_count: usize) -> Self {
        Self {
            commands: Vec::new(),
            notifications: VecDeque::new(),
            current: 0,
            playing: false,
            frame_count,
            position: Position { x: 500.0, y: 600.0 },
        }
    }

    pub fn at(x: f32) -> Self {
        let mut sprite = Self::new(8);
        sprite.position.x = x;
        sprite
    }
}

impl Sprite for RecordingSprite {
    fn goto_and_stop(&mut self, frame: usize) {
        self.commands.push(FrameCommand::Stop(frame));
        self.current = frame;
        self.playing = false;
    }

    fn goto_and_play(&mut self, frame: usize) {
        self.commands.push(FrameCommand::Play(frame));
        self.current = frame;
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

    fn step(&mut self, _now: Instant) -> Option<usize> {
        let frame = self.notifications.pop_front()?;
        self.current = frame;
        Some(frame)
    }
}

/// Decision source returning a fixed script of draws, then repeating the last.
pub(crate) struct ScriptedDraws {
    draws: VecDeque<f64>,
    last: f64,
}

impl ScriptedDraws {
    pub fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            last: 0.0,
        }
    }
}

impl DecisionSource for ScriptedDraws {
    fn draw(&mut self) -> f64 {
        if let Some(next) = self.draws.pop_front() {
            self.last = next;
        }
        self.last
    }
}

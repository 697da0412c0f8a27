use std::fmt;

use serde::Deserialize;

/// What a bunny is doing: facing one way idle, or running one way.
///
/// Variant order is the row order of the clip table, so `State as usize`
/// indexes it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    LookLeft = 0,
    LookRight = 1,
    RunLeft = 2,
    RunRight = 3,
}

impl State {
    pub const COUNT: usize = 4;

    pub const ALL: [State; Self::COUNT] = [
        State::LookLeft,
        State::LookRight,
        State::RunLeft,
        State::RunRight,
    ];

    pub fn is_running(self) -> bool {
        matches!(self, State::RunLeft | State::RunRight)
    }

    pub fn facing(self) -> Facing {
        match self {
            State::LookLeft | State::RunLeft => Facing::Left,
            State::LookRight | State::RunRight => Facing::Right,
        }
    }

    /// The idle state facing the same way.
    pub fn at_rest(self) -> State {
        match self.facing() {
            Facing::Left => State::LookLeft,
            Facing::Right => State::LookRight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Stable identifier of a bunny within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sprite anchor in world pixels (top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// A single animation frame: raw RGBA pixels, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The bunny's frame strip: every pose, in strip order, at one size.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    frames: Vec<Frame>,
    frame_width: u32,
    frame_height: u32,
}

impl SpriteSheet {
    /// Build a sheet, checking that every frame has the same dimensions and
    /// a pixel buffer of matching length.
    pub fn new(frames: Vec<Frame>) -> anyhow::Result<Self> {
        let Some(first) = frames.first() else {
            anyhow::bail!("sprite sheet has no frames");
        };
        let (frame_width, frame_height) = (first.width, first.height);
        if frame_width == 0 || frame_height == 0 {
            anyhow::bail!("sprite frames must not be empty ({frame_width}x{frame_height})");
        }

        for (i, frame) in frames.iter().enumerate() {
            if frame.width != frame_width || frame.height != frame_height {
                anyhow::bail!(
                    "frame {i} is {}x{}, expected {frame_width}x{frame_height}",
                    frame.width,
                    frame.height
                );
            }
            let expected = (frame_width * frame_height * 4) as usize;
            if frame.data.len() != expected {
                anyhow::bail!(
                    "frame {i} holds {} bytes, expected {expected}",
                    frame.data.len()
                );
            }
        }

        Ok(Self {
            frames,
            frame_width,
            frame_height,
        })
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }
}

/// JSON metadata accompanying a PNG sprite strip.
#[derive(Debug, Deserialize)]
pub(crate) struct SpriteSheetMeta {
    /// `[width, height]` of one frame.
    pub sprite_size: [u32; 2],
    /// Number of frames laid out left to right.
    pub frame_count: usize,
}

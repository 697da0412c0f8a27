use std::time::Instant;

/// Host events flowing through the [`EventBus`](crate::bus::EventBus).
#[derive(Debug, Clone)]
pub enum Event {
    /// The frame timer elapsed; advance motion and animation.
    Frame { now: Instant },
    /// The behavior interval elapsed; re-roll agent states.
    Behavior { now: Instant },
    Key(crossterm::event::KeyEvent),
    Resize { cols: u16, rows: u16 },
    Quit,
}

use std::collections::VecDeque;

use crate::logging::{LogBuffer, LogEntry, LogLevel};

/// Drop-down log viewer state.
///
/// Holds a copy of recent log lines pulled from the shared [`LogBuffer`],
/// a scroll position counted in lines up from the newest entry, and a
/// minimum level used to hide chatty output.
pub struct Console {
    visible: bool,
    lines: VecDeque<LogEntry>,
    scroll_offset: usize,
    capacity: usize,
    min_level: LogLevel,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(500)
    }
}

impl Console {
    pub fn new(capacity: usize) -> Self {
        Self {
            visible: false,
            lines: VecDeque::with_capacity(capacity),
            scroll_offset: 0,
            capacity: capacity.max(1),
            min_level: LogLevel::Debug,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
            self.scroll_offset = self.scroll_offset.saturating_sub(1);
        }
        self.lines.push_back(entry);
    }

    /// Move every pending entry out of the shared buffer. Returns how many
    /// were taken.
    pub fn sync_from(&mut self, buffer: &LogBuffer) -> usize {
        let Ok(mut shared) = buffer.lock() else {
            return 0;
        };
        let taken = shared.len();
        for entry in shared.drain(..) {
            self.push(entry);
        }
        taken
    }

    /// Lines at or above the console's minimum level, oldest first.
    pub fn visible_lines(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + '_ {
        self.lines.iter().filter(move |e| e.level >= self.min_level)
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
        self.scroll_offset = 0;
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn scroll_up(&mut self, amount: usize) {
        let max_offset = self.visible_lines().count().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + amount).min(max_offset);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll_offset = 0;
    }
}

use std::collections::VecDeque;

use crate::event::Event;

/// FIFO queue decoupling event producers (input, timers) from the loop
/// that applies them.
pub struct EventBus<E = Event> {
    queue: VecDeque<E>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn publish(&mut self, event: E) {
        self.queue.push_back(event);
    }

    /// Take every pending event in publish order.
    pub fn drain(&mut self) -> impl Iterator<Item = E> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

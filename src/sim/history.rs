//! Bounded position history
//!
//! A fixed-capacity LIFO ring buffer. Pushing onto a full buffer silently
//! drops the oldest entry; popping an empty buffer returns `None`.

use crate::consts::HISTORY_CAPACITY;

/// Last `HISTORY_CAPACITY` positions of a shape, newest on top
#[derive(Debug, Clone)]
pub struct PositionHistory<T: Copy> {
    items: [Option<T>; HISTORY_CAPACITY],
    /// Index of the next free slot
    top: usize,
    len: usize,
}

impl<T: Copy> Default for PositionHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> PositionHistory<T> {
    pub fn new() -> Self {
        Self {
            items: [None; HISTORY_CAPACITY],
            top: 0,
            len: 0,
        }
    }

    /// Record a position, overwriting the oldest one when full
    pub fn push(&mut self, item: T) {
        self.items[self.top] = Some(item);
        self.top = (self.top + 1) % HISTORY_CAPACITY;
        self.len = (self.len + 1).min(HISTORY_CAPACITY);
    }

    /// Remove and return the newest position
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.top = (self.top + HISTORY_CAPACITY - 1) % HISTORY_CAPACITY;
        self.len -= 1;
        self.items[self.top].take()
    }

    /// Newest position without removing it
    pub fn peek(&self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.items[(self.top + HISTORY_CAPACITY - 1) % HISTORY_CAPACITY]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        HISTORY_CAPACITY
    }

    pub fn clear(&mut self) {
        self.items = [None; HISTORY_CAPACITY];
        self.top = 0;
        self.len = 0;
    }
}

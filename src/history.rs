// Bounded undo/redo stacks of full-surface snapshots. Linear history: any new
// record drops the redo side.

use crate::types::PixelBuffer;
use std::collections::VecDeque;

/// Default maximum depth of each stack.
pub const MAX_HISTORY: usize = 30;

#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<PixelBuffer>, // front = oldest
    redo_stack: VecDeque<PixelBuffer>, // back = most recent undo
    cap: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }
}

impl History {
    /// A cap of 0 is raised to 1.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            cap: cap.max(1),
        }
    }

    /// Record the pre-mutation state. Evicts the oldest entry past the cap
    /// and clears the redo stack.
    pub fn record(&mut self, snapshot: PixelBuffer) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.cap {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Swap `current` onto the redo stack and hand back the state to restore.
    pub fn undo(&mut self, current: PixelBuffer) -> Option<PixelBuffer> {
        let prev = self.undo_stack.pop_back()?;
        self.redo_stack.push_back(current);
        while self.redo_stack.len() > self.cap {
            self.redo_stack.pop_front();
        }
        Some(prev)
    }

    /// Swap `current` onto the undo stack and hand back the state to restore.
    pub fn redo(&mut self, current: PixelBuffer) -> Option<PixelBuffer> {
        let next = self.redo_stack.pop_back()?;
        self.undo_stack.push_back(current);
        while self.undo_stack.len() > self.cap {
            self.undo_stack.pop_front();
        }
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Oldest recorded snapshot still available.
    #[cfg(test)]
    pub(crate) fn oldest(&self) -> Option<&PixelBuffer> {
        self.undo_stack.front()
    }
}

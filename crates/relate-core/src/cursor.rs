//! Focus cursor: one-at-a-time navigation over the composed queue.
//!
//! The cursor is a plain index over a queue snapshot. It has no terminal
//! state; an empty queue ("inbox zero") is just `len() == 0` with the index
//! parked at 0. The caller resolves items through the dispatcher and then
//! hands the recomposed queue back via [`FocusCursor::sync`] or
//! [`FocusCursor::sync_after_resolve`].
//!
//! Bounds invariant: after any operation, `index < len()` whenever the queue
//! is non-empty, and `index == 0` when it is empty.

use serde::{Deserialize, Serialize};

use crate::queue::FocusItem;

/// Stateful pointer into the focus queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FocusCursor {
    queue: Vec<FocusItem>,
    index: usize,
}

impl FocusCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queue(queue: Vec<FocusItem>) -> Self {
        Self { queue, index: 0 }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn queue(&self) -> &[FocusItem] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The item under the cursor, or `None` on an empty queue.
    pub fn current(&self) -> Option<&FocusItem> {
        self.queue.get(self.index)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance to the next item. No-op at the tail. Returns whether the
    /// cursor moved.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.queue.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Step back to the previous item. No-op at the head. Returns whether
    /// the cursor moved.
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Replace the queue after an external data change, clamping the index
    /// into bounds.
    pub fn sync(&mut self, queue: Vec<FocusItem>) {
        self.queue = queue;
        self.clamp();
    }

    /// Replace the queue after the current item was resolved.
    ///
    /// If the cursor sat on the last item before resolution, it moves to
    /// `max(0, new_len - 2)`; otherwise it stays put so the next pending
    /// item slides up into view without an explicit `next()`.
    pub fn sync_after_resolve(&mut self, queue: Vec<FocusItem>) {
        let was_last = !self.queue.is_empty() && self.index == self.queue.len() - 1;
        self.queue = queue;
        if was_last {
            self.index = self.queue.len().saturating_sub(2);
        }
        self.clamp();
    }

    fn clamp(&mut self) {
        if self.queue.is_empty() {
            self.index = 0;
        } else if self.index >= self.queue.len() {
            self.index = self.queue.len() - 1;
        }
    }
}

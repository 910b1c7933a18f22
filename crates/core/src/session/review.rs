use crate::model::Card;

/// Outcome of stepping forward through a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStep {
    Moved { cursor: usize },
    Finished,
}

/// Cursor over a snapshot of missed cards. Inspection only; nothing is re-scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewState {
    queue: Vec<Card>,
    cursor: usize,
}

impl ReviewState {
    /// Returns `None` when there is nothing to review.
    #[must_use]
    pub fn new(queue: Vec<Card>) -> Option<Self> {
        if queue.is_empty() {
            return None;
        }
        Some(Self { queue, cursor: 0 })
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> &Card {
        &self.queue[self.cursor]
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.queue.len()
    }

    /// Advance, or report `Finished` when already on the last card.
    pub fn next(&mut self) -> ReviewStep {
        if self.has_next() {
            self.cursor += 1;
            ReviewStep::Moved {
                cursor: self.cursor,
            }
        } else {
            ReviewStep::Finished
        }
    }

    /// Step back; no-op at the first card.
    pub fn prev(&mut self) -> usize {
        if self.has_prev() {
            self.cursor -= 1;
        }
        self.cursor
    }
}

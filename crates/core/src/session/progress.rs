use crate::model::DeckKind;

use super::state::SessionPhase;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub phase: SessionPhase,
    pub total: usize,
    pub position: usize,
    pub known: usize,
    pub unknown: usize,
    pub missed: usize,
}

impl SessionProgress {
    /// One-based index of the card on screen, if any.
    #[must_use]
    pub fn display_index(&self) -> Option<usize> {
        (self.position < self.total).then_some(self.position + 1)
    }
}

/// Review cursor as shown to the user ("Review: 2 of 3").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewProgress {
    pub cursor: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// What to tell someone who opened a deck with nothing in it.
#[must_use]
pub fn empty_deck_guidance(kind: &DeckKind) -> &'static str {
    match kind {
        DeckKind::Generated { .. } => "No flashcards available. Try a different topic.",
        DeckKind::Custom => "No custom flashcards available. Please create some cards first.",
    }
}

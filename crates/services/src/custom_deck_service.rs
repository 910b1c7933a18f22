use tracing::debug;

use flashdeck_core::Clock;
use flashdeck_core::model::{Card, CardDraft, CardId, Deck, DeckError, DeckKind};
use flashdeck_core::session::{SessionError, StudySession};

/// In-memory list of hand-authored cards.
///
/// Sessions study a snapshot, so later edits never reach a pass in progress.
#[derive(Clone, Debug)]
pub struct CustomDeckManager {
    clock: Clock,
    deck: Deck,
}

impl Default for CustomDeckManager {
    fn default() -> Self {
        Self::new(Clock::system())
    }
}

impl CustomDeckManager {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            deck: Deck::empty(DeckKind::Custom),
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.deck.cards()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Validate a typed question/answer and append it under a fresh
    /// timestamp-derived id.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::Card` with the field-level message when the question
    /// or answer is blank. Nothing is added in that case.
    pub fn author(&mut self, draft: CardDraft) -> Result<CardId, DeckError> {
        let validated = draft.validate()?;
        let id = self.mint_id();
        let card = validated.assign_id(id.clone())?;
        self.deck.push(card)?;
        debug!(id = %id, total = self.deck.len(), "added custom card");
        Ok(id)
    }

    /// Append a card whose id the caller chose.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::DuplicateCardId` if the id is already used.
    pub fn add(&mut self, card: Card) -> Result<(), DeckError> {
        self.deck.push(card)
    }

    /// Remove the card with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &CardId) -> bool {
        let removed = self.deck.remove(id).is_some();
        debug!(id = %id, removed, "delete custom card");
        removed
    }

    /// Copy of the current collection.
    #[must_use]
    pub fn snapshot(&self) -> Deck {
        self.deck.clone()
    }

    /// Start studying a snapshot of the collection.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when there are no cards.
    pub fn start_study(&self) -> Result<StudySession, SessionError> {
        StudySession::start(self.snapshot())
    }

    // `custom-{millis}`, with a `-n` suffix if that millisecond is taken.
    fn mint_id(&self) -> CardId {
        let base = CardId::custom(self.clock.now_millis());
        let mut candidate = base.clone();
        let mut n = 1;
        while self.deck.contains_id(&candidate) {
            n += 1;
            candidate = CardId::new(format!("{base}-{n}"));
        }
        candidate
    }
}

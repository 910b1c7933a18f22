use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::model::card::{Card, CardError};
use crate::model::ids::CardId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("duplicate card id in deck: {0}")]
    DuplicateCardId(CardId),

    #[error("topic cannot be empty")]
    EmptyTopic,

    #[error(transparent)]
    Card(#[from] CardError),
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// Where a deck came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeckKind {
    /// Produced by a generation request; replaced wholesale on the next one.
    Generated { topic: String },
    /// Authored by hand; survives generation requests.
    Custom,
}

impl DeckKind {
    /// # Errors
    ///
    /// Returns `DeckError::EmptyTopic` if `topic` is blank.
    pub fn generated(topic: impl Into<String>) -> Result<Self, DeckError> {
        let topic = topic.into();
        let trimmed = topic.trim();
        if trimmed.is_empty() {
            return Err(DeckError::EmptyTopic);
        }
        Ok(Self::Generated {
            topic: trimmed.to_owned(),
        })
    }

    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }

    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        match self {
            Self::Generated { topic } => Some(topic),
            Self::Custom => None,
        }
    }
}

/// An ordered sequence of cards with ids unique within the deck.
///
/// Order is presentation order and is never rearranged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck {
    kind: DeckKind,
    cards: Vec<Card>,
}

impl Deck {
    /// # Errors
    ///
    /// Returns `DeckError::DuplicateCardId` for the first repeated id.
    pub fn new(kind: DeckKind, cards: Vec<Card>) -> Result<Self, DeckError> {
        ensure_unique_ids(&cards)?;
        Ok(Self { kind, cards })
    }

    #[must_use]
    pub fn empty(kind: DeckKind) -> Self {
        Self {
            kind,
            cards: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &DeckKind {
        &self.kind
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn contains_id(&self, id: &CardId) -> bool {
        self.cards.iter().any(|card| card.id() == id)
    }

    /// Append a card to the end of the deck.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::DuplicateCardId` if the id is already present.
    pub fn push(&mut self, card: Card) -> Result<(), DeckError> {
        if self.contains_id(card.id()) {
            return Err(DeckError::DuplicateCardId(card.id().clone()));
        }
        self.cards.push(card);
        Ok(())
    }

    /// Remove the card with `id`, returning it. Absent ids are not an error.
    pub fn remove(&mut self, id: &CardId) -> Option<Card> {
        let index = self.cards.iter().position(|card| card.id() == id)?;
        Some(self.cards.remove(index))
    }
}

pub(crate) fn ensure_unique_ids(cards: &[Card]) -> Result<(), DeckError> {
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if !seen.insert(card.id()) {
            return Err(DeckError::DuplicateCardId(card.id().clone()));
        }
    }
    Ok(())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> Card {
        Card::new(id, format!("Q{id}"), format!("A{id}")).unwrap()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Deck::new(DeckKind::Custom, vec![card("1"), card("2"), card("1")]).unwrap_err();
        assert_eq!(err, DeckError::DuplicateCardId(CardId::new("1")));
    }

    #[test]
    fn preserves_order() {
        let deck = Deck::new(DeckKind::Custom, vec![card("b"), card("a"), card("c")]).unwrap();
        let ids: Vec<_> = deck.cards().iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn push_rejects_existing_id() {
        let mut deck = Deck::new(DeckKind::Custom, vec![card("1")]).unwrap();
        assert!(deck.push(card("1")).is_err());
        deck.push(card("2")).unwrap();
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut deck = Deck::new(DeckKind::Custom, vec![card("1")]).unwrap();
        assert!(deck.remove(&CardId::new("nope")).is_none());
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.remove(&CardId::new("1")).unwrap().id().as_str(), "1");
        assert!(deck.is_empty());
    }

    #[test]
    fn generated_kind_trims_topic() {
        let kind = DeckKind::generated("  Capitals ").unwrap();
        assert_eq!(kind.topic(), Some("Capitals"));
        assert_eq!(DeckKind::generated("  ").unwrap_err(), DeckError::EmptyTopic);
    }
}

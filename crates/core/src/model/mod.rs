mod card;
mod deck;
mod ids;

pub use ids::CardId;

pub use card::{Card, CardDraft, CardError, ValidatedCard};
pub use deck::{Deck, DeckError, DeckKind};

pub(crate) use deck::ensure_unique_ids;

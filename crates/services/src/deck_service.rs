use tracing::{error, info};

use flashdeck_core::model::{Deck, DeckKind};

use crate::generator::FlashcardGenerator;

/// Shown alongside every failed generation.
pub const RETRY_GUIDANCE: &str = "Please try again with a different topic or refresh the page.";

/// What a generation request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    /// A non-empty deck ready to study.
    Ready(Deck),
    /// Nothing usable came back; `message` names the topic.
    Failed { topic: String, message: String },
}

impl GenerationResult {
    fn failed(topic: &str) -> Self {
        Self::Failed {
            topic: topic.to_owned(),
            message: format!("Could not generate flashcards for \"{topic}\""),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn deck(&self) -> Option<&Deck> {
        match self {
            Self::Ready(deck) => Some(deck),
            Self::Failed { .. } => None,
        }
    }
}

/// Turns a topic into a generated deck, or a failure the UI can show.
#[derive(Clone)]
pub struct DeckService {
    generator: FlashcardGenerator,
}

impl DeckService {
    #[must_use]
    pub fn new(generator: FlashcardGenerator) -> Self {
        Self { generator }
    }

    /// Request `count` cards about `topic`. Never errors.
    pub async fn request_deck(&self, topic: &str, count: usize) -> GenerationResult {
        let topic = topic.trim();
        let Ok(kind) = DeckKind::generated(topic) else {
            error!("refusing to generate flashcards for an empty topic");
            return GenerationResult::failed(topic);
        };
        if count == 0 {
            error!(topic, "refusing to generate zero flashcards");
            return GenerationResult::failed(topic);
        }

        info!(topic, count, "generating flashcards");
        let cards = match self.generator.generate(topic, count).await {
            Ok(cards) => cards,
            Err(err) => {
                error!(topic, error = %err, "flashcard generation failed");
                return GenerationResult::failed(topic);
            }
        };

        if cards.is_empty() {
            error!(topic, "generator returned no flashcards");
            return GenerationResult::failed(topic);
        }

        match Deck::new(kind, cards) {
            Ok(deck) => {
                info!(topic, cards = deck.len(), "generated flashcards");
                GenerationResult::Ready(deck)
            }
            Err(err) => {
                error!(topic, error = %err, "generated flashcards do not form a deck");
                GenerationResult::failed(topic)
            }
        }
    }
}

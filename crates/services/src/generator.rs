use std::sync::Arc;

use tracing::{debug, info, warn};

use flashdeck_core::generation::{ParseOutcome, fallback_cards, flashcard_prompt, parse_cards};
use flashdeck_core::model::Card;

use crate::ai::{GenerationOptions, TextModel};
use crate::error::ModelError;

/// Longest slice of a bad reply copied into logs.
const RAW_PREVIEW_CHARS: usize = 500;

/// Asks a text model for cards and repairs whatever comes back.
///
/// Malformed replies never escape: they become the placeholder deck. An
/// empty card array is passed through unchanged for the caller to reject.
/// Only transport-level failures are returned as errors.
#[derive(Clone)]
pub struct FlashcardGenerator {
    model: Arc<dyn TextModel>,
    options: GenerationOptions,
}

impl FlashcardGenerator {
    #[must_use]
    pub fn new(model: Arc<dyn TextModel>, options: GenerationOptions) -> Self {
        Self { model, options }
    }

    /// Generate cards for `topic`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError` when the model cannot be reached.
    pub async fn generate(&self, topic: &str, count: usize) -> Result<Vec<Card>, ModelError> {
        let prompt = flashcard_prompt(topic, count);
        info!(topic, count, backend = self.model.name(), "requesting flashcards");

        let raw = self.model.generate(&prompt, &self.options).await?;

        match parse_cards(&raw) {
            ParseOutcome::Parsed(cards) if cards.is_empty() => {
                warn!(topic, "model returned an empty card array");
                Ok(cards)
            }
            ParseOutcome::Parsed(cards) => {
                if cards.len() != count {
                    debug!(
                        requested = count,
                        received = cards.len(),
                        "model returned a different card count"
                    );
                }
                info!(topic, cards = cards.len(), "parsed flashcards from model reply");
                Ok(cards)
            }
            ParseOutcome::Malformed(reason) => {
                warn!(
                    topic,
                    %reason,
                    raw = %preview(&raw),
                    "model reply was not a card array; using placeholder cards"
                );
                Ok(fallback_cards(topic, count))
            }
        }
    }
}

fn preview(raw: &str) -> &str {
    match raw.char_indices().nth(RAW_PREVIEW_CHARS) {
        Some((cut, _)) => &raw[..cut],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cuts_on_char_boundary() {
        let long = "é".repeat(RAW_PREVIEW_CHARS + 10);
        assert_eq!(preview(&long).chars().count(), RAW_PREVIEW_CHARS);
        assert_eq!(preview("short"), "short");
    }
}

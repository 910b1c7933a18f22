use crate::model::{Card, CardId};

/// Placeholder deck used when a model reply cannot be turned into cards.
///
/// Always returns exactly `count` cards with ids `"1"..="count"`.
#[must_use]
pub fn fallback_cards(topic: &str, count: usize) -> Vec<Card> {
    (1..=count)
        .map(|i| {
            Card::from_trusted(
                CardId::new(i.to_string()),
                format!("Question {i} about {topic}?"),
                format!(
                    "This is a placeholder answer for question {i} about {topic}. \
                     Please try regenerating the flashcards."
                ),
            )
        })
        .collect()
}

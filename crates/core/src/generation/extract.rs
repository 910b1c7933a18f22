use serde::Deserialize;
use thiserror::Error;

use crate::model::{Card, CardError, CardId, DeckError, ensure_unique_ids};

/// Result of reading a card array out of free-form model text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed(Vec<Card>),
    Malformed(MalformedReason),
}

impl ParseOutcome {
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MalformedReason {
    #[error("response is not a JSON array of cards: {0}")]
    InvalidJson(String),

    #[error("card {index} is invalid: {source}")]
    InvalidCard {
        index: usize,
        #[source]
        source: CardError,
    },

    #[error("duplicate card id: {0}")]
    DuplicateId(CardId),
}

/// Narrow `raw` to the JSON array it most likely contains.
///
/// Trimmed text starting with `[` is returned as is. Otherwise the slice from
/// the first `[` to the last `]` (inclusive) is returned. With no usable pair,
/// the trimmed text comes back unchanged and will fail to parse.
#[must_use]
pub fn locate_json_array(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return trimmed;
    }
    match (trimmed.find('['), trimmed.rfind(']')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

#[derive(Debug, Deserialize)]
struct CardRecord {
    id: RecordId,
    question: String,
    answer: String,
}

// Models sometimes emit numeric ids.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RecordId> for CardId {
    fn from(value: RecordId) -> Self {
        match value {
            RecordId::Text(s) => CardId::new(s),
            RecordId::Number(n) => CardId::new(n.to_string()),
        }
    }
}

/// Extract and parse the card array in a model reply.
///
/// Never errors: every failure is reported as `ParseOutcome::Malformed`.
/// An empty array parses to no cards; rejecting that is up to the caller.
#[must_use]
pub fn parse_cards(raw: &str) -> ParseOutcome {
    let candidate = locate_json_array(raw);
    let records: Vec<CardRecord> = match serde_json::from_str(candidate) {
        Ok(records) => records,
        Err(err) => return ParseOutcome::Malformed(MalformedReason::InvalidJson(err.to_string())),
    };

    let mut cards = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match Card::new(record.id, record.question, record.answer) {
            Ok(card) => cards.push(card),
            Err(source) => {
                return ParseOutcome::Malformed(MalformedReason::InvalidCard { index, source });
            }
        }
    }

    match ensure_unique_ids(&cards) {
        Ok(()) => ParseOutcome::Parsed(cards),
        Err(DeckError::DuplicateCardId(id)) => {
            ParseOutcome::Malformed(MalformedReason::DuplicateId(id))
        }
        Err(other) => ParseOutcome::Malformed(MalformedReason::InvalidJson(other.to_string())),
    }
}

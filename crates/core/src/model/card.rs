use serde::Serialize;
use thiserror::Error;

use crate::model::ids::CardId;

//
// ─── CARD TYPES ────────────────────────────────────────────────────────────────
//

/// Unvalidated question/answer pair, as typed by a user or emitted by a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub question: String,
    pub answer: String,
}

impl CardDraft {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Trim both sides and reject blanks. The question is checked first.
    ///
    /// # Errors
    ///
    /// Returns `CardError::EmptyQuestion` or `CardError::EmptyAnswer`.
    pub fn validate(self) -> Result<ValidatedCard, CardError> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(CardError::EmptyQuestion);
        }
        let answer = self.answer.trim();
        if answer.is_empty() {
            return Err(CardError::EmptyAnswer);
        }
        Ok(ValidatedCard {
            question: question.to_owned(),
            answer: answer.to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCard {
    question: String,
    answer: String,
}

impl ValidatedCard {
    /// # Errors
    ///
    /// Returns `CardError::EmptyId` if `id` is blank.
    pub fn assign_id(self, id: CardId) -> Result<Card, CardError> {
        if id.is_blank() {
            return Err(CardError::EmptyId);
        }
        Ok(Card {
            id,
            question: self.question,
            answer: self.answer,
        })
    }
}

/// A question/answer pair. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    id: CardId,
    question: String,
    answer: String,
}

impl Card {
    /// Validate and build a card in one step.
    ///
    /// # Errors
    ///
    /// Returns `CardError` if any field is blank after trimming.
    pub fn new(
        id: impl Into<CardId>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, CardError> {
        CardDraft::new(question, answer).validate()?.assign_id(id.into())
    }

    /// Build from text known to be non-blank.
    pub(crate) fn from_trusted(id: CardId, question: String, answer: String) -> Self {
        debug_assert!(!id.is_blank() && !question.trim().is_empty() && !answer.trim().is_empty());
        Self {
            id,
            question,
            answer,
        }
    }

    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

//
// ─── CARD VALIDATION ERRORS ────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Answer cannot be empty")]
    EmptyAnswer,

    #[error("card id cannot be empty")]
    EmptyId,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

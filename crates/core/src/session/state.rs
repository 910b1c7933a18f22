use std::fmt;

use crate::model::{Card, Deck, DeckKind};

use super::progress::{ReviewProgress, SessionProgress};
use super::review::{ReviewState, ReviewStep};
use super::SessionError;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where a study pass currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// The deck had no cards. Distinct from `Completed`.
    NoCards,
    /// A card is on screen waiting for "know" / "don't know".
    Active,
    /// Every card answered and nothing missed.
    Completed,
    /// Every card answered, some missed, review not started yet.
    AwaitingReview,
    /// Stepping through missed cards.
    Reviewing,
    /// At least one review pass over the missed cards has ended.
    ReviewFinished,
}

impl SessionPhase {
    /// True once every card has been answered.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::AwaitingReview | Self::Reviewing | Self::ReviewFinished
        )
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One study pass over a deck snapshot.
///
/// `known + unknown == position` holds until the pass is over, and `missed`
/// is the subsequence of the deck answered "don't know", in encounter order.
#[derive(Clone, PartialEq, Eq)]
pub struct StudySession {
    deck: Deck,
    position: usize,
    known: usize,
    unknown: usize,
    missed: Vec<Card>,
    review: Option<ReviewState>,
    review_passes: usize,
}

impl StudySession {
    /// Start a pass over `deck`. An empty deck lands in `SessionPhase::NoCards`.
    #[must_use]
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            position: 0,
            known: 0,
            unknown: 0,
            missed: Vec::new(),
            review: None,
            review_passes: 0,
        }
    }

    /// Like `new`, but refuses an empty deck.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the deck has no cards.
    pub fn start(deck: Deck) -> Result<Self, SessionError> {
        if deck.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self::new(deck))
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.deck.is_empty() {
            SessionPhase::NoCards
        } else if self.position < self.deck.len() {
            SessionPhase::Active
        } else if self.review.is_some() {
            SessionPhase::Reviewing
        } else if self.missed.is_empty() {
            SessionPhase::Completed
        } else if self.review_passes > 0 {
            SessionPhase::ReviewFinished
        } else {
            SessionPhase::AwaitingReview
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn kind(&self) -> &DeckKind {
        self.deck.kind()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn known_count(&self) -> usize {
        self.known
    }

    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.unknown
    }

    #[must_use]
    pub fn missed(&self) -> &[Card] {
        &self.missed
    }

    #[must_use]
    pub fn review(&self) -> Option<&ReviewState> {
        self.review.as_ref()
    }

    /// Completed review passes.
    #[must_use]
    pub fn review_passes(&self) -> usize {
        self.review_passes
    }

    /// The card awaiting an answer, if the pass is still running.
    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.deck.get(self.position)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            phase: self.phase(),
            total: self.deck.len(),
            position: self.position,
            known: self.known,
            unknown: self.unknown,
            missed: self.missed.len(),
        }
    }

    #[must_use]
    pub fn review_progress(&self) -> Option<ReviewProgress> {
        self.review.as_ref().map(|review| ReviewProgress {
            cursor: review.cursor(),
            total: review.len(),
            has_prev: review.has_prev(),
            has_next: review.has_next(),
        })
    }

    /// Record "know" for the current card and advance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside `SessionPhase::Active`.
    pub fn report_known(&mut self) -> Result<SessionPhase, SessionError> {
        self.ensure_active()?;
        self.known += 1;
        self.position += 1;
        Ok(self.phase())
    }

    /// Record "don't know" for the current card, queue it for review, and advance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside `SessionPhase::Active`.
    pub fn report_unknown(&mut self) -> Result<SessionPhase, SessionError> {
        self.ensure_active()?;
        let card = self
            .current_card()
            .cloned()
            .ok_or(SessionError::NotActive(self.phase()))?;
        self.missed.push(card);
        self.unknown += 1;
        self.position += 1;
        Ok(self.phase())
    }

    /// Begin (or restart) a review pass over the missed cards at cursor 0.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ReviewUnavailable` while cards remain unanswered
    /// and `SessionError::NoMissedCards` when nothing was missed.
    pub fn enter_review(&mut self) -> Result<&ReviewState, SessionError> {
        let phase = self.phase();
        match phase {
            SessionPhase::AwaitingReview | SessionPhase::ReviewFinished => {}
            SessionPhase::Completed => return Err(SessionError::NoMissedCards),
            _ => return Err(SessionError::ReviewUnavailable(phase)),
        }
        let review = ReviewState::new(self.missed.clone()).ok_or(SessionError::NoMissedCards)?;
        Ok(self.review.insert(review))
    }

    /// Move forward in the review; past the last card the review ends.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotReviewing` if no review is in progress.
    pub fn review_next(&mut self) -> Result<ReviewStep, SessionError> {
        let review = self.review.as_mut().ok_or(SessionError::NotReviewing)?;
        let step = review.next();
        if step == ReviewStep::Finished {
            self.end_review();
        }
        Ok(step)
    }

    /// Move back in the review. At the first card this changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotReviewing` if no review is in progress.
    pub fn review_prev(&mut self) -> Result<usize, SessionError> {
        let review = self.review.as_mut().ok_or(SessionError::NotReviewing)?;
        Ok(review.prev())
    }

    /// Leave the review from any cursor.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotReviewing` if no review is in progress.
    pub fn finish_review(&mut self) -> Result<(), SessionError> {
        if self.review.is_none() {
            return Err(SessionError::NotReviewing);
        }
        self.end_review();
        Ok(())
    }

    fn end_review(&mut self) {
        self.review = None;
        self.review_passes += 1;
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.phase() {
            SessionPhase::Active => Ok(()),
            other => Err(SessionError::NotActive(other)),
        }
    }
}

impl fmt::Debug for StudySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudySession")
            .field("kind", self.deck.kind())
            .field("cards_len", &self.deck.len())
            .field("position", &self.position)
            .field("known", &self.known)
            .field("unknown", &self.unknown)
            .field("missed_len", &self.missed.len())
            .field("review_cursor", &self.review.as_ref().map(ReviewState::cursor))
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

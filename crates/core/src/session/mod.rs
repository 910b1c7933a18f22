mod progress;
mod review;
mod state;

use thiserror::Error;

pub use progress::{ReviewProgress, SessionProgress, empty_deck_guidance};
pub use review::{ReviewState, ReviewStep};
pub use state::{SessionPhase, StudySession};

/// Errors for transitions attempted in the wrong phase.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no cards available for session")]
    Empty,
    #[error("session is not accepting answers (phase: {0:?})")]
    NotActive(SessionPhase),
    #[error("there are no missed cards to review")]
    NoMissedCards,
    #[error("review can only start once every card is answered (phase: {0:?})")]
    ReviewUnavailable(SessionPhase),
    #[error("no review in progress")]
    NotReviewing,
}

use tracing::info;

use flashdeck_core::model::{Card, CardDraft, CardId, DeckError, DeckKind};
use flashdeck_core::session::{ReviewStep, SessionPhase, StudySession};

use crate::custom_deck_service::CustomDeckManager;
use crate::deck_service::{DeckService, GenerationResult};
use crate::error::ControllerError;

/// Suggestions offered on the topic screen.
pub const POPULAR_TOPICS: [&str; 5] = [
    "JavaScript Basics",
    "React Hooks",
    "World Capitals",
    "Human Anatomy",
    "Spanish Vocabulary",
];

/// What the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    TopicSelection,
    Studying(StudySession),
    GenerationFailed { topic: String, message: String },
    CustomCards,
}

impl Screen {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::TopicSelection => "topic selection",
            Self::Studying(session) if session.kind().is_generated() => "generated study",
            Self::Studying(_) => "custom study",
            Self::GenerationFailed { .. } => "generation failed",
            Self::CustomCards => "custom cards",
        }
    }
}

/// Owns every piece of app state; views read `screen()` and call transitions.
pub struct StudyController {
    decks: DeckService,
    custom: CustomDeckManager,
    card_count: usize,
    topic: Option<String>,
    screen: Screen,
}

impl StudyController {
    #[must_use]
    pub fn new(decks: DeckService, custom: CustomDeckManager, card_count: usize) -> Self {
        Self {
            decks,
            custom,
            card_count,
            topic: None,
            screen: Screen::TopicSelection,
        }
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Topic of the last generation request, if any.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.card_count
    }

    #[must_use]
    pub fn custom_cards(&self) -> &[Card] {
        self.custom.cards()
    }

    #[must_use]
    pub fn session(&self) -> Option<&StudySession> {
        match &self.screen {
            Screen::Studying(session) => Some(session),
            _ => None,
        }
    }

    //
    // ─── GENERATED DECKS ───────────────────────────────────────────────────────
    //

    /// Generate a deck for `topic` and start studying it.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Deck` for a blank topic (state is unchanged)
    /// and `InvalidTransition` outside the topic screen. Generation failures
    /// are not errors; they land on `Screen::GenerationFailed`.
    pub async fn select_topic(&mut self, topic: &str) -> Result<&Screen, ControllerError> {
        self.require(matches!(self.screen, Screen::TopicSelection), "selecting a topic")?;
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DeckError::EmptyTopic.into());
        }
        self.topic = Some(topic.to_owned());
        self.load_generated().await
    }

    /// Regenerate the deck for the current topic, discarding all progress.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless a generated deck (or a failed
    /// generation) is on screen.
    pub async fn retry_generation(&mut self) -> Result<&Screen, ControllerError> {
        let allowed = match &self.screen {
            Screen::GenerationFailed { .. } => true,
            Screen::Studying(session) => session.kind().is_generated(),
            _ => false,
        };
        self.require(allowed && self.topic.is_some(), "retrying generation")?;
        self.load_generated().await
    }

    /// "Generate New Cards" from the summary of a finished generated deck.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless every card of a generated deck has
    /// been answered.
    pub async fn generate_new_cards(&mut self) -> Result<&Screen, ControllerError> {
        let finished = self
            .session()
            .is_some_and(|session| session.kind().is_generated() && session.phase().is_terminal());
        self.require(finished, "generating new cards")?;
        self.retry_generation().await
    }

    async fn load_generated(&mut self) -> Result<&Screen, ControllerError> {
        let topic = self.topic.clone().ok_or(ControllerError::InvalidTransition {
            action: "generating cards",
            screen: self.screen.label(),
        })?;
        self.screen = match self.decks.request_deck(&topic, self.card_count).await {
            GenerationResult::Ready(deck) => Screen::Studying(StudySession::new(deck)),
            GenerationResult::Failed { topic, message } => {
                Screen::GenerationFailed { topic, message }
            }
        };
        Ok(&self.screen)
    }

    /// Back to the topic screen. The custom collection is kept.
    pub fn reset(&mut self) {
        info!(from = self.screen.label(), "reset to topic selection");
        self.topic = None;
        self.screen = Screen::TopicSelection;
    }

    //
    // ─── CUSTOM DECKS ──────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `InvalidTransition` outside the topic screen.
    pub fn open_custom_cards(&mut self) -> Result<(), ControllerError> {
        self.require(
            matches!(self.screen, Screen::TopicSelection),
            "opening custom cards",
        )?;
        self.screen = Screen::CustomCards;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ControllerError::Deck` for blank fields and
    /// `InvalidTransition` outside the custom cards screen.
    pub fn add_custom_card(&mut self, draft: CardDraft) -> Result<CardId, ControllerError> {
        self.require(matches!(self.screen, Screen::CustomCards), "adding a card")?;
        Ok(self.custom.author(draft)?)
    }

    /// # Errors
    ///
    /// Returns `InvalidTransition` outside the custom cards screen.
    pub fn delete_custom_card(&mut self, id: &CardId) -> Result<bool, ControllerError> {
        self.require(matches!(self.screen, Screen::CustomCards), "deleting a card")?;
        Ok(self.custom.delete(id))
    }

    /// Study a snapshot of the custom collection.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` (wrapped) when there are no custom cards;
    /// the screen does not change.
    pub fn start_custom_study(&mut self) -> Result<&StudySession, ControllerError> {
        self.require(matches!(self.screen, Screen::CustomCards), "starting custom study")?;
        let session = self.custom.start_study()?;
        self.screen = Screen::Studying(session);
        self.session().ok_or(ControllerError::InvalidTransition {
            action: "starting custom study",
            screen: "custom cards",
        })
    }

    /// Leave a custom study pass for the custom cards screen.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless a custom deck is being studied.
    pub fn back_to_custom_cards(&mut self) -> Result<(), ControllerError> {
        let studying_custom = self
            .session()
            .is_some_and(|session| *session.kind() == DeckKind::Custom);
        self.require(studying_custom, "returning to custom cards")?;
        self.screen = Screen::CustomCards;
        Ok(())
    }

    //
    // ─── SESSION PASS-THROUGH ──────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `InvalidTransition` without a session, or the session's error.
    pub fn report_known(&mut self) -> Result<SessionPhase, ControllerError> {
        Ok(self.session_mut("answering")?.report_known()?)
    }

    /// # Errors
    ///
    /// Returns `InvalidTransition` without a session, or the session's error.
    pub fn report_unknown(&mut self) -> Result<SessionPhase, ControllerError> {
        Ok(self.session_mut("answering")?.report_unknown()?)
    }

    /// # Errors
    ///
    /// Returns `InvalidTransition` without a session, or the session's error.
    pub fn enter_review(&mut self) -> Result<(), ControllerError> {
        self.session_mut("reviewing")?.enter_review()?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `InvalidTransition` without a session, or the session's error.
    pub fn review_next(&mut self) -> Result<ReviewStep, ControllerError> {
        Ok(self.session_mut("reviewing")?.review_next()?)
    }

    /// # Errors
    ///
    /// Returns `InvalidTransition` without a session, or the session's error.
    pub fn review_prev(&mut self) -> Result<usize, ControllerError> {
        Ok(self.session_mut("reviewing")?.review_prev()?)
    }

    /// # Errors
    ///
    /// Returns `InvalidTransition` without a session, or the session's error.
    pub fn finish_review(&mut self) -> Result<(), ControllerError> {
        Ok(self.session_mut("finishing review")?.finish_review()?)
    }

    fn session_mut(&mut self, action: &'static str) -> Result<&mut StudySession, ControllerError> {
        let screen = self.screen.label();
        match &mut self.screen {
            Screen::Studying(session) => Ok(session),
            _ => Err(ControllerError::InvalidTransition { action, screen }),
        }
    }

    fn require(&self, allowed: bool, action: &'static str) -> Result<(), ControllerError> {
        if allowed {
            Ok(())
        } else {
            Err(ControllerError::InvalidTransition {
                action,
                screen: self.screen.label(),
            })
        }
    }
}

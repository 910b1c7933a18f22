use std::sync::Arc;

use tracing::{info, warn};

use flashdeck_core::Clock;

use crate::ai::{TextModel, model_from_config};
use crate::config::FlashdeckConfig;
use crate::controller::StudyController;
use crate::custom_deck_service::CustomDeckManager;
use crate::deck_service::DeckService;
use crate::generator::FlashcardGenerator;

/// Assembles app-facing services from configuration.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    card_count: usize,
    deck_service: Arc<DeckService>,
}

impl AppServices {
    /// Build services backed by the configured hosted model.
    #[must_use]
    pub fn from_config(config: &FlashdeckConfig, clock: Clock) -> Self {
        match &config.model {
            Some(model) => info!(
                provider = %model.provider,
                model = %config.options.model,
                "text generation enabled"
            ),
            None => warn!("no API key configured; only custom decks will work"),
        }
        let model = model_from_config(config.model.as_ref());
        Self::with_model(model, config, clock)
    }

    /// Build services around an explicit model (useful for tests).
    #[must_use]
    pub fn with_model(model: Arc<dyn TextModel>, config: &FlashdeckConfig, clock: Clock) -> Self {
        let generator = FlashcardGenerator::new(model, config.options.clone());
        Self {
            clock,
            card_count: config.card_count,
            deck_service: Arc::new(DeckService::new(generator)),
        }
    }

    #[must_use]
    pub fn deck_service(&self) -> Arc<DeckService> {
        Arc::clone(&self.deck_service)
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.card_count
    }

    /// Fresh controller with an empty custom collection.
    #[must_use]
    pub fn controller(&self) -> StudyController {
        StudyController::new(
            self.deck_service.as_ref().clone(),
            CustomDeckManager::new(self.clock),
            self.card_count,
        )
    }
}

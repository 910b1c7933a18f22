#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod config;
pub mod controller;
pub mod custom_deck_service;
pub mod deck_service;
pub mod error;
pub mod generator;

pub use flashdeck_core::Clock;

pub use ai::{GenerationOptions, TextModel};
pub use app_services::AppServices;
pub use config::{ConfigOverrides, FlashdeckConfig, ModelConfig, Provider};
pub use controller::{POPULAR_TOPICS, Screen, StudyController};
pub use custom_deck_service::CustomDeckManager;
pub use deck_service::{DeckService, GenerationResult, RETRY_GUIDANCE};
pub use error::{ConfigError, ControllerError, ModelError};
pub use generator::FlashcardGenerator;

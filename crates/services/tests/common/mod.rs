#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use services::{
    AppServices, Clock, FlashcardGenerator, FlashdeckConfig, GenerationOptions, ModelError,
    TextModel,
};

use flashdeck_core::time::fixed_now;

pub const CAPITALS_JSON: &str = r#"[
    {"id":"1","question":"Capital of France?","answer":"Paris"},
    {"id":"2","question":"Capital of Japan?","answer":"Tokyo"},
    {"id":"3","question":"Capital of Peru?","answer":"Lima"}
]"#;

/// Replays canned replies in order and records every prompt it sees.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, ModelError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, ModelError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![Ok(text.to_owned())])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn generate(
        &self,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ModelError::Disabled))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

pub fn options() -> GenerationOptions {
    GenerationOptions {
        model: "test-model".into(),
        temperature: 0.7,
        max_output_tokens: 2000,
    }
}

pub fn generator(model: Arc<ScriptedModel>) -> FlashcardGenerator {
    FlashcardGenerator::new(model, options())
}

pub fn config(card_count: usize) -> FlashdeckConfig {
    FlashdeckConfig {
        model: None,
        options: options(),
        card_count,
    }
}

pub fn app(model: Arc<ScriptedModel>, card_count: usize) -> AppServices {
    AppServices::with_model(model, &config(card_count), Clock::fixed(fixed_now()))
}

//! Environment-driven configuration.
//!
//! Variables are read through a lookup function so tests never touch the
//! process environment. The binary loads `.env` before calling `from_env`.

use std::env;
use std::fmt;
use std::str::FromStr;

use flashdeck_core::generation::DEFAULT_CARD_COUNT;

use crate::ai::GenerationOptions;
use crate::error::ConfigError;

pub const PROVIDER_VAR: &str = "FLASHDECK_PROVIDER";
pub const BASE_URL_VAR: &str = "FLASHDECK_BASE_URL";
pub const MODEL_VAR: &str = "FLASHDECK_MODEL";
pub const TEMPERATURE_VAR: &str = "FLASHDECK_TEMPERATURE";
pub const MAX_TOKENS_VAR: &str = "FLASHDECK_MAX_TOKENS";
pub const CARD_COUNT_VAR: &str = "FLASHDECK_CARD_COUNT";

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 2000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    #[default]
    Gemini,
    /// Any OpenAI-compatible chat-completions endpoint; Groq by default.
    Groq,
}

impl Provider {
    #[must_use]
    pub fn api_key_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::Groq => "GROQ_API_KEY",
        }
    }

    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Self::Groq => "https://api.groq.com/openai/v1",
        }
    }

    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.0-flash-lite",
            Self::Groq => "llama3-70b-8192",
        }
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "groq" | "openai" => Ok(Self::Groq),
            _ => Err(ConfigError::UnknownProvider(raw.to_owned())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => f.write_str("gemini"),
            Self::Groq => f.write_str("groq"),
        }
    }
}

/// Where and how to reach the text model.
#[derive(Clone, PartialEq)]
pub struct ModelConfig {
    pub provider: Provider,
    pub base_url: String,
    pub api_key: String,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Everything the app needs at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct FlashdeckConfig {
    /// `None` when no API key is set; generation is then disabled.
    pub model: Option<ModelConfig>,
    pub options: GenerationOptions,
    pub card_count: usize,
}

/// Overrides taken from the command line; they win over the environment.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub card_count: Option<usize>,
}

impl FlashdeckConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown provider or unparsable numbers.
    pub fn from_env(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok(), overrides)
    }

    /// Read configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown provider or unparsable numbers.
    pub fn from_lookup<F>(lookup: F, overrides: &ConfigOverrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let provider = match overrides.provider {
            Some(provider) => provider,
            None => lookup(PROVIDER_VAR)
                .map(|raw| raw.parse())
                .transpose()?
                .unwrap_or_default(),
        };

        let model = lookup(provider.api_key_var()).map(|api_key| ModelConfig {
            provider,
            base_url: lookup(BASE_URL_VAR)
                .unwrap_or_else(|| provider.default_base_url().to_owned()),
            api_key: api_key.trim().to_owned(),
        });

        let options = GenerationOptions {
            model: overrides
                .model
                .clone()
                .or_else(|| lookup(MODEL_VAR))
                .unwrap_or_else(|| provider.default_model().to_owned()),
            temperature: parse_var(&lookup, TEMPERATURE_VAR)?.unwrap_or(DEFAULT_TEMPERATURE),
            max_output_tokens: parse_var(&lookup, MAX_TOKENS_VAR)?.unwrap_or(DEFAULT_MAX_TOKENS),
        };

        let card_count = match overrides.card_count {
            Some(count) => count,
            None => parse_var(&lookup, CARD_COUNT_VAR)?.unwrap_or(DEFAULT_CARD_COUNT),
        };
        if card_count == 0 {
            return Err(ConfigError::InvalidNumber {
                var: CARD_COUNT_VAR,
                raw: "0".into(),
            });
        }

        Ok(Self {
            model,
            options,
            card_count,
        })
    }

    #[must_use]
    pub fn generation_enabled(&self) -> bool {
        self.model.is_some()
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { var, raw })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_to_gemini_without_credentials() {
        let config =
            FlashdeckConfig::from_lookup(lookup(&[]), &ConfigOverrides::default()).unwrap();
        assert!(!config.generation_enabled());
        assert_eq!(config.options.model, "gemini-2.0-flash-lite");
        assert!((config.options.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.options.max_output_tokens, 2000);
        assert_eq!(config.card_count, 5);
    }

    #[test]
    fn groq_provider_reads_its_own_key() {
        let config = FlashdeckConfig::from_lookup(
            lookup(&[
                ("FLASHDECK_PROVIDER", "groq"),
                ("GROQ_API_KEY", " secret "),
                ("GEMINI_API_KEY", "other"),
            ]),
            &ConfigOverrides::default(),
        )
        .unwrap();
        let model = config.model.unwrap();
        assert_eq!(model.provider, Provider::Groq);
        assert_eq!(model.api_key, "secret");
        assert_eq!(model.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.options.model, "llama3-70b-8192");
    }

    #[test]
    fn overrides_win_over_environment() {
        let overrides = ConfigOverrides {
            provider: Some(Provider::Gemini),
            model: Some("gemini-pro".into()),
            card_count: Some(8),
        };
        let config = FlashdeckConfig::from_lookup(
            lookup(&[
                ("FLASHDECK_PROVIDER", "groq"),
                ("FLASHDECK_MODEL", "ignored"),
                ("FLASHDECK_CARD_COUNT", "3"),
                ("GEMINI_API_KEY", "k"),
            ]),
            &overrides,
        )
        .unwrap();
        assert_eq!(config.model.unwrap().provider, Provider::Gemini);
        assert_eq!(config.options.model, "gemini-pro");
        assert_eq!(config.card_count, 8);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = FlashdeckConfig::from_lookup(
            lookup(&[("GEMINI_API_KEY", "  ")]),
            &ConfigOverrides::default(),
        )
        .unwrap();
        assert!(config.model.is_none());
    }

    #[test]
    fn bad_numbers_and_providers_are_reported() {
        let err = FlashdeckConfig::from_lookup(
            lookup(&[("FLASHDECK_MAX_TOKENS", "lots")]),
            &ConfigOverrides::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "FLASHDECK_MAX_TOKENS",
                raw: "lots".into()
            }
        );

        let err = FlashdeckConfig::from_lookup(
            lookup(&[("FLASHDECK_PROVIDER", "claude")]),
            &ConfigOverrides::default(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::UnknownProvider("claude".into()));

        let err = FlashdeckConfig::from_lookup(
            lookup(&[("FLASHDECK_CARD_COUNT", "0")]),
            &ConfigOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = ModelConfig {
            provider: Provider::Gemini,
            base_url: "u".into(),
            api_key: "super-secret".into(),
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}

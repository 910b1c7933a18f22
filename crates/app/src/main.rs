use std::io;

use clap::{Parser, Subcommand, ValueEnum};
use services::{AppServices, Clock, ConfigOverrides, FlashdeckConfig, GenerationResult, Provider};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod terminal;

use terminal::Terminal;

const DEFAULT_LOG_FILTER: &str = "flashdeck=info,services=info";

/// Study AI-generated or hand-written flashcards in the terminal.
///
/// Credentials and defaults come from the environment (a `.env` file is read
/// if present): GEMINI_API_KEY, GROQ_API_KEY, FLASHDECK_PROVIDER,
/// FLASHDECK_MODEL, FLASHDECK_BASE_URL, FLASHDECK_TEMPERATURE,
/// FLASHDECK_MAX_TOKENS, FLASHDECK_CARD_COUNT and RUST_LOG.
#[derive(Debug, Parser)]
#[command(name = "flashdeck", version)]
struct Cli {
    /// Text generation backend
    #[arg(long, global = true)]
    provider: Option<ProviderArg>,

    /// Model id sent to the backend
    #[arg(long, global = true)]
    model: Option<String>,

    /// Cards per generated deck
    #[arg(
        long,
        global = true,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    count: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// Interactive study session (the default)
    Study,
    /// Generate one deck and print it as JSON
    Generate {
        /// Topic to generate flashcards about
        topic: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderArg {
    Gemini,
    /// Groq or any other OpenAI-compatible endpoint
    #[value(alias = "openai")]
    Groq,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Gemini => Provider::Gemini,
            ProviderArg::Groq => Provider::Groq,
        }
    }
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            provider: self.provider.map(Provider::from),
            model: self.model.clone(),
            card_count: self.count,
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // A missing .env is the normal case outside development.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = FlashdeckConfig::from_env(&cli.overrides())?;
    let app = AppServices::from_config(&config, Clock::system());

    match cli.command.unwrap_or(Command::Study) {
        Command::Study => {
            info!(cards_per_deck = app.card_count(), "starting study session");
            let mut controller = app.controller();
            let stdin = io::stdin();
            let mut terminal = Terminal::new(stdin.lock(), io::stdout());
            terminal.run(&mut controller).await?;
            Ok(())
        }
        Command::Generate { topic } => {
            info!(%topic, count = app.card_count(), "generating a single deck");
            match app.deck_service().request_deck(&topic, app.card_count()).await {
                GenerationResult::Ready(deck) => {
                    println!("{}", serde_json::to_string_pretty(&deck)?);
                    Ok(())
                }
                GenerationResult::Failed { message, .. } => Err(io::Error::other(message).into()),
            }
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_means_study() {
        let cli = Cli::try_parse_from(["flashdeck"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.overrides().provider.is_none());
    }

    #[test]
    fn generate_takes_topic_and_flags() {
        let cli = Cli::try_parse_from([
            "flashdeck",
            "generate",
            "World Capitals",
            "--provider",
            "groq",
            "--count",
            "3",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Generate {
                topic: "World Capitals".into()
            })
        );
        let overrides = cli.overrides();
        assert_eq!(overrides.provider, Some(Provider::Groq));
        assert_eq!(overrides.card_count, Some(3));
    }

    #[test]
    fn openai_is_an_alias_for_groq() {
        let cli = Cli::try_parse_from(["flashdeck", "--provider", "openai", "study"]).unwrap();
        assert_eq!(cli.overrides().provider, Some(Provider::Groq));
        assert_eq!(cli.command, Some(Command::Study));
    }

    #[test]
    fn generate_without_topic_is_rejected() {
        let err = Cli::try_parse_from(["flashdeck", "generate", "--count", "3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn bad_flag_values_are_rejected() {
        let zero = Cli::try_parse_from(["flashdeck", "--count", "0"]).unwrap_err();
        assert_eq!(zero.kind(), ErrorKind::ValueValidation);

        let provider = Cli::try_parse_from(["flashdeck", "--provider", "claude"]).unwrap_err();
        assert_eq!(provider.kind(), ErrorKind::InvalidValue);

        let unknown = Cli::try_parse_from(["flashdeck", "--verbose"]).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn help_is_reported_as_display_help() {
        let err = Cli::try_parse_from(["flashdeck", "study", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}

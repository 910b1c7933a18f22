//! Pure pieces of flashcard generation: prompt text, reply extraction,
//! the placeholder deck, and assembly of streamed reply fragments.
//!
//! Nothing here performs I/O; the services crate wires these around a model call.

mod chunks;
mod extract;
mod fallback;
mod prompt;

pub use chunks::ChunkAccumulator;
pub use extract::{MalformedReason, ParseOutcome, locate_json_array, parse_cards};
pub use fallback::fallback_cards;
pub use prompt::flashcard_prompt;

/// Cards requested when the caller does not say otherwise.
pub const DEFAULT_CARD_COUNT: usize = 5;

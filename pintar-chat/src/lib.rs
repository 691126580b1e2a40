//! Chat surface for pintar.
//!
//! Wires the retrieval core to a hosted generation backend: prompt
//! composition, reply post-processing, follow-up suggestions, and the
//! interactive session that ties them together.

pub mod errors;
pub mod postprocess;
pub mod prompt;
pub mod providers;
pub mod session;
pub mod suggest;

pub use errors::{ChatError, ChatResult};
pub use providers::{GeminiClient, ProviderError, TextGenerator};
pub use session::{ChatSession, TurnOutput};

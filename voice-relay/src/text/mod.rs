//! Text processing for TTS: cleaning, sentence splitting and chunking.

pub mod chunker;
mod cleaner;
mod sentences;

pub use chunker::process_text;
pub use cleaner::clean_text;

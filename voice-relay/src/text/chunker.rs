//! Text chunking for TTS processing.

use super::cleaner::clean_text;
use super::sentences::split_into_sentences;

/// Soft per-chunk budget in characters.
pub const MAX_CHUNK_CHARS: usize = 400;

/// Group sentences into chunks that stay under `max_chars`.
///
/// A sentence is added to the running chunk only while the chunk (including a
/// trailing separator space) plus the sentence stays strictly below
/// `max_chars`. A sentence that is already too long on its own becomes a chunk
/// by itself; sentences are never cut.
///
/// Lengths are counted in characters, not bytes.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let text = text.trim();

    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current_chunk = String::new();
    let mut current_len = 0;

    for sentence in split_into_sentences(text) {
        let sentence_len = sentence.chars().count();

        if current_len + sentence_len < max_chars {
            current_chunk.push_str(sentence);
            current_chunk.push(' ');
            current_len += sentence_len + 1;
        } else {
            if !current_chunk.is_empty() {
                chunks.push(current_chunk.trim().to_string());
            }
            current_chunk = format!("{} ", sentence);
            current_len = sentence_len + 1;
        }
    }

    // Don't forget the last chunk
    let trimmed = current_chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }

    chunks
}

/// Clean raw text and split it into speech-sized chunks.
pub fn process_text(text: &str) -> Vec<String> {
    chunk_text(&clean_text(text), MAX_CHUNK_CHARS)
}

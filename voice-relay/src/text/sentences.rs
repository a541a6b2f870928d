//! Sentence boundary splitting.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that close a sentence when followed by whitespace. An ellipsis
/// ends in `.`, so it is covered too.
const SENTENCE_END: &[char] = &['.', '!', '?'];

static GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"));

/// Split text into sentences at every whitespace run that follows `.`, `!` or `?`.
///
/// The closing punctuation stays with its sentence and the whitespace is
/// dropped. Whitespace inside a sentence is kept as-is.
pub fn split_into_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for gap in GAP.find_iter(text) {
        let closes_sentence = text[..gap.start()]
            .chars()
            .next_back()
            .is_some_and(|c| SENTENCE_END.contains(&c));

        if closes_sentence {
            sentences.push(&text[start..gap.start()]);
            start = gap.end();
        }
    }
    sentences.push(&text[start..]);

    sentences.retain(|s| !s.is_empty());
    sentences
}

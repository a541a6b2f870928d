//! Text cleaning and sanitization for TTS processing.
//!
//! Cleaning is an ordered list of small rules, each a plain `&str -> String`
//! function. Later rules assume the earlier ones already ran.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Pause token for a long run of dots (9 or more).
const LONG_PAUSE: &str = "..............";

/// Pause token for a regular ellipsis (3 to 8 dots).
const STANDARD_PAUSE: &str = "...";

/// Dot runs at least this long become a `LONG_PAUSE`.
const LONG_PAUSE_MIN_DOTS: usize = 9;

/// Symbols that mean nothing to a speech engine.
const SPEECH_BLOCKLIST: &[char] = &[
    '#', '@', '$', '%', '^', '&', '*', '_', '+', '=', '[', ']', '{', '}', '|', '\\', '<', '>', '~',
];

static BOLD: Lazy<Regex> = Lazy::new(|| compile(r"\*\*(.+?)\*\*"));
static ITALIC: Lazy<Regex> = Lazy::new(|| compile(r"\*(.+?)\*"));
static CODE: Lazy<Regex> = Lazy::new(|| compile(r"`(.+?)`"));
static BULLET: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^\s*[-*•]\s+"));
static ORDINAL: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^\s*\d+\.\s+"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| compile(r"\s+"));
static RUN_ON: Lazy<Regex> = Lazy::new(|| compile(r"([.!?])([A-Z])"));
static DOT_RUN: Lazy<Regex> = Lazy::new(|| compile(r"\.{3,}"));
static BANGS: Lazy<Regex> = Lazy::new(|| compile(r"!{2,}"));
static QUESTIONS: Lazy<Regex> = Lazy::new(|| compile(r"\?{2,}"));
static SPACE_BEFORE_DOT: Lazy<Regex> = Lazy::new(|| compile(r"\s+\."));
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| compile(r"\s{2,}"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("cleaner patterns are valid regexes")
}

type Rule = fn(&str) -> String;

/// Cleaning rules, applied left to right.
const RULES: &[Rule] = &[
    strip_emphasis,
    strip_list_markers,
    collapse_whitespace,
    split_run_on_sentences,
    normalize_pauses,
    collapse_repeated_marks,
    strip_symbols,
    tidy_spacing,
    trim,
];

/// Clean text for TTS processing.
///
/// This function:
/// - Strips markdown emphasis and list markers
/// - Normalizes whitespace and run-together sentences
/// - Rewrites dot runs into pause tokens (`...` or 14 dots)
/// - Collapses repeated `!`/`?` and drops symbols that confuse TTS
///
/// Never fails: input that no rule matches passes through untouched.
pub fn clean_text(text: &str) -> String {
    RULES.iter().fold(text.to_string(), |acc, rule| rule(&acc))
}

/// `**bold**`, `*italic*` and `` `code` `` lose their markers. Unpaired markers stay.
fn strip_emphasis(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    CODE.replace_all(&text, "$1").into_owned()
}

/// Drop `-`, `*`, `•` bullets and `1.` style ordinals at the start of each line.
fn strip_list_markers(text: &str) -> String {
    let text = BULLET.replace_all(text, "");
    ORDINAL.replace_all(&text, "").into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// `end.Next` becomes `end. Next`.
fn split_run_on_sentences(text: &str) -> String {
    RUN_ON.replace_all(text, "${1} ${2}").into_owned()
}

/// Single pass, so a long pause token is never re-read as a standard one.
fn normalize_pauses(text: &str) -> String {
    DOT_RUN
        .replace_all(text, |caps: &Captures| {
            if caps[0].len() >= LONG_PAUSE_MIN_DOTS {
                LONG_PAUSE
            } else {
                STANDARD_PAUSE
            }
        })
        .into_owned()
}

fn collapse_repeated_marks(text: &str) -> String {
    let text = BANGS.replace_all(text, "!");
    QUESTIONS.replace_all(&text, "?").into_owned()
}

fn strip_symbols(text: &str) -> String {
    text.chars()
        .filter(|c| !SPEECH_BLOCKLIST.contains(c))
        .collect()
}

fn tidy_spacing(text: &str) -> String {
    let text = SPACE_BEFORE_DOT.replace_all(text, ".");
    MULTI_SPACE.replace_all(&text, " ").into_owned()
}

fn trim(text: &str) -> String {
    text.trim().to_string()
}

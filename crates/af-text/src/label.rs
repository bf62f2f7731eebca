use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::WHITESPACE_RUN;

/// Words dropped from labels: articles, auxiliaries, pronouns, conjunctions
/// and prepositions.
pub const FILLER_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "should", "could", "may", "might", "must", "can", "this",
    "that", "these", "those", "it", "its", "they", "them", "their", "there", "here", "where",
    "when", "what", "which", "who", "how", "why", "to", "of", "in", "on", "at", "by", "for",
    "with", "from", "as", "and", "or", "but", "if", "then", "so",
];

/// Length of the raw-text fallback when every word is filler.
pub const LABEL_FALLBACK_CHARS: usize = 30;

/// Words among the first few filtered positions are always kept.
const LEADING_IMPORTANT_WORDS: usize = 3;

static FILLER_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| FILLER_WORDS.iter().copied().collect());
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

/// Reduce a text fragment to a short capitalized label.
///
/// Filler words and punctuation are dropped. A surviving word at filtered
/// position `i` is "important" when `i < 3` or when the *raw* whitespace
/// token at the same position `i` starts capitalized. The two sequences are
/// indexed independently, so once a filler word has been removed the raw
/// token being inspected is no longer the word being kept. Labels rely on
/// this alignment; see `positional_drift_promotes_following_word`.
///
/// Falls back to the first non-filler words when nothing is important, and
/// to the first 30 characters of the input when every word is filler.
#[must_use]
pub fn minimize(text: &str, max_words: usize) -> String {
    let max_words = max_words.max(1);

    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lowered, " ");
    let words: Vec<&str> = stripped
        .split_whitespace()
        .filter(|word| !FILLER_SET.contains(word))
        .collect();

    let raw_tokens: Vec<&str> = WHITESPACE_RUN.split(text).collect();
    let important: Vec<&str> = words
        .iter()
        .enumerate()
        .filter(|(index, _)| {
            *index < LEADING_IMPORTANT_WORDS
                || starts_capitalized(raw_tokens.get(*index).copied().unwrap_or(""))
        })
        .map(|(_, word)| *word)
        .take(max_words)
        .collect();

    let chosen = if important.is_empty() {
        words.into_iter().take(max_words).collect()
    } else {
        important
    };

    let label = chosen
        .into_iter()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if label.is_empty() {
        text.graphemes(true).take(LABEL_FALLBACK_CHARS).collect()
    } else {
        label
    }
}

/// True when uppercasing leaves the first character unchanged; an absent
/// token counts as capitalized.
fn starts_capitalized(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_none_or(|first| first.to_uppercase().eq(std::iter::once(first)))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#![forbid(unsafe_code)]

//! Text analysis primitives for turning prose into diagram structure.
//!
//! Everything here is a pure function of its input: no I/O, no shared
//! mutable state. Keyword tables are process-wide constants.

mod classify;
mod label;
mod list;
mod segment;

use std::sync::LazyLock;

use regex::Regex;

pub use classify::{
    SignalFamily, has_decision_signal, has_flow_signal, has_hierarchy_signal,
};
pub use label::{FILLER_WORDS, LABEL_FALLBACK_CHARS, minimize};
pub use list::{LIST_KEYWORDS, ListExtraction, MAX_LIST_ITEMS, extract_list, extract_list_capped};
pub use segment::{Segmentation, SplitStrategy, segment, segment_detailed};

pub(crate) static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Title of a text: the part of the first sentence before a colon, or its
/// first five words.
#[must_use]
pub fn main_concept(text: &str) -> String {
    let sentences = segment(text);
    let first = sentences.first().map_or(text, String::as_str);

    if let Some(colon) = first.find(':') {
        return first[..colon].trim().to_string();
    }

    WHITESPACE_RUN
        .split(first)
        .take(5)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::main_concept;

    #[test]
    fn concept_stops_at_colon() {
        assert_eq!(
            main_concept("OSI layers: Physical, Data Link, Network"),
            "OSI layers"
        );
    }

    #[test]
    fn concept_takes_first_five_words() {
        assert_eq!(
            main_concept("The water cycle moves water around the planet. It never stops."),
            "The water cycle moves water"
        );
    }

    #[test]
    fn concept_only_looks_at_first_sentence() {
        assert_eq!(main_concept("Short one. Second part: ignored"), "Short one");
    }

    #[test]
    fn concept_of_blank_text_is_blank() {
        assert_eq!(main_concept("   ").trim(), "");
    }
}

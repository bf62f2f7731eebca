use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::WHITESPACE_RUN;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence pattern is valid"));
static COMMA_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s+").expect("comma pattern is valid"));
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("newline pattern is valid"));

/// Delimiter family that produced a segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitStrategy {
    /// `.`, `!` or `?` followed by whitespace.
    SentencePunctuation,
    /// Comma followed by whitespace.
    Comma,
    /// One or more newlines.
    Newline,
    /// No delimiter matched; the whole text is one unit.
    Whole,
}

impl SplitStrategy {
    /// Attempted in this order; the first to yield more than one unit wins.
    pub const CASCADE: [Self; 3] = [Self::SentencePunctuation, Self::Comma, Self::Newline];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SentencePunctuation => "sentence-punctuation",
            Self::Comma => "comma",
            Self::Newline => "newline",
            Self::Whole => "whole",
        }
    }

    /// `collapsed` has whitespace runs folded to single spaces, which erases
    /// newlines, so the newline split reads the trimmed input instead.
    fn split<'a>(self, trimmed: &'a str, collapsed: &'a str) -> Vec<&'a str> {
        match self {
            Self::SentencePunctuation => SENTENCE_BREAK.split(collapsed).collect(),
            Self::Comma => COMMA_BREAK.split(collapsed).collect(),
            Self::Newline => LINE_BREAK.split(trimmed).collect(),
            Self::Whole => vec![collapsed],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segmentation {
    pub strategy: SplitStrategy,
    pub sentences: Vec<String>,
}

/// Split text into ordered sentence units.
#[must_use]
pub fn segment(text: &str) -> Vec<String> {
    segment_detailed(text).sentences
}

/// Like [`segment`], also reporting which delimiter family was used.
#[must_use]
pub fn segment_detailed(text: &str) -> Segmentation {
    let trimmed = text.trim();
    let collapsed = WHITESPACE_RUN.replace_all(trimmed, " ");

    let (strategy, units) = SplitStrategy::CASCADE
        .into_iter()
        .map(|strategy| (strategy, strategy.split(trimmed, &collapsed)))
        .find(|(_, units)| units.len() > 1)
        .unwrap_or_else(|| {
            (
                SplitStrategy::Whole,
                SplitStrategy::Whole.split(trimmed, &collapsed),
            )
        });

    let sentences = units
        .into_iter()
        .map(|unit| WHITESPACE_RUN.replace_all(unit.trim(), " ").into_owned())
        .filter(|unit| !unit.is_empty())
        .collect();

    Segmentation {
        strategy,
        sentences,
    }
}

#[cfg(test)]
mod tests {
    use super::{SplitStrategy, segment, segment_detailed};
    use proptest::prelude::*;

    #[test]
    fn splits_on_sentence_punctuation_first() {
        assert_eq!(segment("A. B. C"), vec!["A", "B", "C"]);
        assert_eq!(
            segment("Start here! Is it valid? Finish now."),
            vec!["Start here", "Is it valid", "Finish now."]
        );
    }

    #[test]
    fn falls_back_to_commas() {
        let result = segment_detailed("A, B, C");
        assert_eq!(result.sentences, vec!["A", "B", "C"]);
        assert_eq!(result.strategy, SplitStrategy::Comma);
    }

    #[test]
    fn falls_back_to_newlines() {
        let result = segment_detailed("A\nB\nC");
        assert_eq!(result.sentences, vec!["A", "B", "C"]);
        assert_eq!(result.strategy, SplitStrategy::Newline);
    }

    #[test]
    fn newline_units_have_whitespace_collapsed() {
        assert_eq!(
            segment("first   line\n\n\tsecond  line  "),
            vec!["first line", "second line"]
        );
    }

    #[test]
    fn sentences_win_over_commas() {
        // Comma-separated pieces stay inside their sentence.
        assert_eq!(
            segment("Mix flour, sugar and eggs. Bake it"),
            vec!["Mix flour, sugar and eggs", "Bake it"]
        );
    }

    #[test]
    fn undelimited_text_is_one_unit() {
        let result = segment_detailed("  just   one thing  ");
        assert_eq!(result.sentences, vec!["just one thing"]);
        assert_eq!(result.strategy, SplitStrategy::Whole);
    }

    #[test]
    fn blank_text_has_no_units() {
        assert!(segment("").is_empty());
        assert!(segment(" \n\t ").is_empty());
    }

    #[test]
    fn empty_units_are_dropped() {
        assert_eq!(segment("A.  ! B"), vec!["A", "B"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_units_are_trimmed_and_non_empty(input in ".{0,200}") {
            for unit in segment(&input) {
                prop_assert!(!unit.is_empty());
                prop_assert_eq!(unit.trim(), unit.as_str());
            }
        }

        #[test]
        fn prop_segment_is_deterministic(input in ".{0,200}") {
            prop_assert_eq!(segment_detailed(&input), segment_detailed(&input));
        }
    }
}

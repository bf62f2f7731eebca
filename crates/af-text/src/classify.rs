use serde::Serialize;

/// A keyword family whose presence anywhere in the text triggers a
/// structural branch. Matching is case-insensitive substring search, so
/// `"if"` also fires inside `"different"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalFamily {
    Decision,
    Hierarchy,
    Flow,
}

impl SignalFamily {
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Decision => &[
                "if", "else", "condition", "decision", "check", "verify", "whether",
            ],
            Self::Hierarchy => &[
                "layers",
                "types of",
                "components of",
                "categories",
                "consists of",
                "includes",
                "contains",
            ],
            Self::Flow => &[
                "steps", "process", "first", "next", "then", "after", "finally", "sequence",
            ],
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decision => "decision",
            Self::Hierarchy => "hierarchy",
            Self::Flow => "flow",
        }
    }

    #[must_use]
    pub fn matches(self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// The first keyword of this family, in table order, found in `text`.
    #[must_use]
    pub fn first_match(self, text: &str) -> Option<&'static str> {
        let lower = text.to_lowercase();
        self.keywords()
            .iter()
            .copied()
            .find(|keyword| lower.contains(keyword))
    }
}

#[must_use]
pub fn has_decision_signal(text: &str) -> bool {
    SignalFamily::Decision.matches(text)
}

#[must_use]
pub fn has_hierarchy_signal(text: &str) -> bool {
    SignalFamily::Hierarchy.matches(text)
}

#[must_use]
pub fn has_flow_signal(text: &str) -> bool {
    SignalFamily::Flow.matches(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_keywords_match_case_insensitively() {
        assert!(has_decision_signal("Check if valid"));
        assert!(has_decision_signal("VERIFY the token"));
        assert!(has_decision_signal("Decide WHETHER to continue"));
        assert!(!has_decision_signal("Mix the batter"));
    }

    #[test]
    fn decision_substring_matches_inside_words() {
        assert!(has_decision_signal("A different approach"));
    }

    #[test]
    fn hierarchy_keywords() {
        assert!(has_hierarchy_signal("OSI layers: Physical, Network"));
        assert!(has_hierarchy_signal("There are three Types Of rock"));
        assert!(has_hierarchy_signal("The kit contains a hammer"));
        assert!(!has_hierarchy_signal("A single layer"));
    }

    #[test]
    fn flow_keywords() {
        assert!(has_flow_signal("First boil water"));
        assert!(has_flow_signal("and finally serve"));
        assert!(!has_flow_signal("Cats sleep a lot"));
    }

    #[test]
    fn first_match_follows_table_order() {
        assert_eq!(
            SignalFamily::Flow.first_match("then after that the next steps"),
            Some("steps")
        );
        assert_eq!(SignalFamily::Hierarchy.first_match("plain"), None);
    }
}

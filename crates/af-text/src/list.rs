use serde::Serialize;

/// Keywords that introduce an enumeration, in priority order.
///
/// The first keyword in this table that occurs anywhere in the text wins,
/// regardless of where in the text the other keywords appear.
pub const LIST_KEYWORDS: [&str; 5] = ["layers:", "types:", "components:", "includes:", "contains:"];

pub const MAX_LIST_ITEMS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListExtraction {
    /// Matched keyword without its trailing colon.
    pub keyword: String,
    pub items: Vec<String>,
}

/// Find a keyword-introduced list and split what follows on `,` and `;`.
#[must_use]
pub fn extract_list(text: &str) -> Option<ListExtraction> {
    extract_list_capped(text, MAX_LIST_ITEMS)
}

#[must_use]
pub fn extract_list_capped(text: &str, max_items: usize) -> Option<ListExtraction> {
    // ASCII folding keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();

    LIST_KEYWORDS.iter().find_map(|keyword| {
        let index = lower.find(keyword)?;
        let items: Vec<String> = text[index + keyword.len()..]
            .split([',', ';'])
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .take(max_items)
            .map(str::to_string)
            .collect();

        if items.is_empty() {
            None
        } else {
            Some(ListExtraction {
                keyword: keyword.trim_end_matches(':').to_string(),
                items,
            })
        }
    })
}

/// Keywords at or below this length only match whole tokens, so that
/// "ein" does not fire inside "weinstein" or "zip" inside "unzipped".
const TOKEN_KEYWORD_MAX_LEN: usize = 3;

/// Longer keywords that are also common word stems ("auth" in "authors",
/// "join" in "adjoining"). Like short keywords, they only match whole tokens.
pub const WHOLE_TOKEN_KEYWORDS: [&str; 8] = [
    "auth", "session", "join", "find", "apply", "order", "poll", "quiz",
];

/// Does lowercased `text` contain `keyword`?
///
/// Short keywords and `WHOLE_TOKEN_KEYWORDS` are matched against
/// alphanumeric tokens (so URL path segments count); longer ones as plain
/// substrings.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    if keyword.len() <= TOKEN_KEYWORD_MAX_LEN || WHOLE_TOKEN_KEYWORDS.contains(&keyword) {
        text.split(|c: char| !c.is_alphanumeric())
            .any(|token| token == keyword)
    } else {
        text.contains(keyword)
    }
}

pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| contains_keyword(text, k))
}

/// Keywords from `keywords` present in `text`, in list order.
pub fn matched_keywords<'a>(text: &str, keywords: &[&'a str]) -> Vec<&'a str> {
    keywords
        .iter()
        .copied()
        .filter(|k| contains_keyword(text, k))
        .collect()
}

/// Result of scoring one text against a set of synonym groups.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMatch {
    /// Number of groups with at least one synonym present.
    pub matched: usize,
    /// `matched / groups.len()`.
    pub percentage: f32,
    /// First matching synonym of each matched group.
    pub hits: Vec<String>,
}

/// Score `text` against synonym groups: a group counts once no matter how
/// many of its synonyms appear.
pub fn match_groups(text: &str, groups: &[&[&str]]) -> GroupMatch {
    let hits: Vec<String> = groups
        .iter()
        .filter_map(|group| {
            group
                .iter()
                .find(|k| contains_keyword(text, k))
                .map(|k| k.to_string())
        })
        .collect();

    let matched = hits.len();
    let percentage = if groups.is_empty() {
        0.0
    } else {
        matched as f32 / groups.len() as f32
    };

    GroupMatch {
        matched,
        percentage,
        hits,
    }
}

/// Collapse whitespace and lowercase.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

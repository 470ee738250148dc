// Platform length limits, enforced before any compliance work
use crate::jurisdiction::JurisdictionConfig;
use shared_types::{Campaign, FieldPath, PathSegment};
use tracing::info;

pub const TWITTER_MAX: usize = 280;
pub const GOOGLE_HEADLINE_MAX: usize = 30;
pub const GOOGLE_DESCRIPTION_MAX: usize = 90;
pub const META_HEADLINE_MAX: usize = 40;

/// Character limit for a leaf, if its platform has one
pub fn limit_for(path: &FieldPath, mls_max: usize) -> Option<usize> {
    let fields: Vec<&str> = path
        .segments()
        .iter()
        .filter_map(|s| match s {
            PathSegment::Field(name) => Some(name.as_str()),
            PathSegment::Index(_) => None,
        })
        .collect();

    match fields.as_slice() {
        ["twitter"] => Some(TWITTER_MAX),
        ["googleAds", "headline"] => Some(GOOGLE_HEADLINE_MAX),
        ["googleAds", "description"] => Some(GOOGLE_DESCRIPTION_MAX),
        ["metaAd", "headline"] => Some(META_HEADLINE_MAX),
        ["mlsDescription"] => Some(mls_max),
        _ => None,
    }
}

/// Cut `text` to at most `limit` characters, at a word boundary when possible
pub fn truncate_at_word(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(limit)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let head = &text[..cut];

    // Keep the whole head if the cut already falls between words
    let at_boundary = text[cut..].starts_with(char::is_whitespace);
    let kept = if at_boundary {
        head
    } else {
        match head.rfind(char::is_whitespace) {
            Some(i) if i > 0 => &head[..i],
            _ => head,
        }
    };

    kept.trim_end().to_string()
}

/// Truncate every over-long leaf
///
/// Returns the new campaign and the paths that were cut.
pub fn enforce_constraints(
    document: &Campaign,
    config: &JurisdictionConfig,
) -> (Campaign, Vec<FieldPath>) {
    let mut updates = Vec::new();

    for extracted in document.extract_ad_copy() {
        let Some(limit) = limit_for(&extracted.path, config.max_length) else {
            continue;
        };
        if extracted.text.chars().count() <= limit {
            continue;
        }
        info!(
            path = %extracted.path,
            limit,
            length = extracted.text.chars().count(),
            "Truncating over-long copy"
        );
        let cut = truncate_at_word(&extracted.text, limit);
        updates.push((extracted.path, cut));
    }

    let truncated: Vec<FieldPath> = updates.iter().map(|(p, _)| p.clone()).collect();
    let (next, _) = document.with_texts(updates);
    (next, truncated)
}

//! Keyword-based category inference for seeding.
//!
//! Given the descriptive text of a candidate entry, pick the first rule in
//! the table whose keywords hit the text and whose category list survives
//! resolution against the slugs that actually exist in the store. Rule order
//! is a priority list: specific keyword sets are declared before generic
//! ones, and the first winning rule ends the scan.

use std::collections::HashSet;

use super::rules::CategoryRule;

/// Number of category labels a winning rule must resolve, and the exact
/// length of a winning result.
pub const LABELS_PER_MATCH: usize = 3;

/// Infer category slugs for a candidate.
///
/// `candidate_text` is the concatenation of the candidate's alternative-to
/// names, tagline, and description; matching is case-insensitive substring
/// containment. Partial-word hits (e.g. "api" inside "rapid") are accepted
/// on purpose; existing category assignments depend on this behavior.
///
/// A rule whose keywords hit the text wins only if at least
/// [`LABELS_PER_MATCH`] of its category slugs exist in `available`; the
/// resolved list keeps the rule's declared order and is truncated to exactly
/// that many. A rule that matches but resolves short is skipped and the scan
/// continues with later rules.
///
/// When no rule wins, `defaults` is resolved the same way; with an empty
/// store this returns an empty vec, which callers treat as a valid,
/// uncategorized record. Never errors.
pub fn match_categories(
    candidate_text: &str,
    rules: &[CategoryRule],
    available: &HashSet<String>,
    defaults: &[&str],
) -> Vec<String> {
    let text = candidate_text.to_lowercase();

    for rule in rules {
        let hit = rule.keywords.iter().any(|keyword| text.contains(keyword));
        if !hit {
            continue;
        }

        let mut resolved: Vec<String> = rule
            .categories
            .iter()
            .filter(|slug| available.contains(**slug))
            .map(|slug| slug.to_string())
            .collect();

        if resolved.len() >= LABELS_PER_MATCH {
            resolved.truncate(LABELS_PER_MATCH);
            return resolved;
        }
        // Under-resolved rule (labels renamed or missing from the store):
        // keep scanning rather than assign a thin taxonomy branch.
    }

    defaults
        .iter()
        .filter(|slug| available.contains(**slug))
        .take(LABELS_PER_MATCH)
        .map(|slug| slug.to_string())
        .collect()
}

/// Build the lower-cased match subject from a candidate's text fields.
pub fn candidate_text(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::taxonomy::rules::{CATEGORY_RULES, DEFAULT_CATEGORIES};

    fn store_with(slugs: &[&str]) -> HashSet<String> {
        slugs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_text_returns_defaults() {
        let available = store_with(&["developer-tools", "productivity", "utilities"]);
        let got = match_categories("", CATEGORY_RULES, &available, DEFAULT_CATEGORIES);
        assert_eq!(got, vec!["developer-tools", "productivity", "utilities"]);
    }

    #[test]
    fn empty_store_returns_empty_uncategorized() {
        let available = HashSet::new();
        let got = match_categories(
            "kanban board alternative to trello",
            CATEGORY_RULES,
            &available,
            DEFAULT_CATEGORIES,
        );
        assert!(got.is_empty());
    }

    #[test]
    fn substring_containment_not_word_boundary() {
        let rules = [CategoryRule {
            keywords: &["api"],
            categories: ["api-tools", "developer-tools", "integrations"],
        }];
        let available = store_with(&["api-tools", "developer-tools", "integrations"]);
        // "api" inside "rapid" is a hit; the imprecision is intentional.
        let got = match_categories("rapid prototyping tool", &rules, &available, &[]);
        assert_eq!(got, vec!["api-tools", "developer-tools", "integrations"]);
    }

    #[test]
    fn candidate_text_joins_and_lowercases() {
        let text = candidate_text(&["Trello", "", "  Kanban Board  "]);
        assert_eq!(text, "trello kanban board");
    }
}

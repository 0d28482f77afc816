//! Tiered ranking for search results.
//!
//! Every candidate gets a precomputed `SearchRank`; derived `Ord` gives the
//! lexicographic comparison and lower sorts first. The tier always dominates:
//! an alias whole-word hit beats a tag whole-word hit regardless of length.

use crate::interface::Emoji;
use regex::{Regex, RegexBuilder};

/// Where the prompt matched as a whole word, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    AliasWord,
    TagWord,
    DescriptionWord,
    /// Matched only as a substring somewhere
    Substring,
}

/// Rank tuple. Derived Ord compares tier first, then description length.
///
/// Substring-only matches carry a zero length so they keep their pool order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchRank {
    pub tier: MatchTier,
    pub description_len: usize,
}

/// Case-insensitive whole-word matcher for one prompt (`\b<prompt>\b`, prompt
/// taken literally).
pub struct WordMatcher {
    pattern: Option<Regex>,
}

impl WordMatcher {
    pub fn new(term: &str) -> Self {
        let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(term)))
            .case_insensitive(true)
            .build();
        match pattern {
            Ok(pattern) => Self { pattern: Some(pattern) },
            Err(e) => {
                // Only reachable for prompts exceeding the regex size limit
                tracing::warn!(error = %e, "whole-word matching disabled for prompt");
                Self { pattern: None }
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().map_or(false, |p| p.is_match(text))
    }

    fn any_match(&self, texts: &[String]) -> bool {
        texts.iter().any(|t| self.is_match(t))
    }
}

/// Compute the rank of an emoji already known to match the prompt
pub fn compute_rank(emoji: &Emoji, matcher: &WordMatcher) -> SearchRank {
    let tier = if matcher.any_match(&emoji.aliases) {
        MatchTier::AliasWord
    } else if matcher.any_match(&emoji.tags) {
        MatchTier::TagWord
    } else if matcher.is_match(&emoji.description) {
        MatchTier::DescriptionWord
    } else {
        MatchTier::Substring
    };

    let description_len = match tier {
        MatchTier::Substring => 0,
        _ => emoji.description.chars().count(),
    };

    SearchRank { tier, description_len }
}

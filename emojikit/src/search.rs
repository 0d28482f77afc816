//! Search Engine (substring recall + tiered whole-word ranking)
//!
//! Recall is a case-insensitive substring test against aliases, tags and the
//! description. Candidates are then ranked by `ranking::compute_rank` with a
//! stable sort, so equal ranks keep pool order.

use crate::interface::{Emoji, EmojiSection, SearchProvider};
use crate::ranking::{compute_rank, SearchRank, WordMatcher};
use rayon::prelude::*;

/// Normalize a raw prompt: drop one trailing space and lowercase.
/// Returns `None` when nothing searchable is left.
pub fn normalize_prompt(prompt: &str) -> Option<String> {
    let prompt = prompt.strip_suffix(' ').unwrap_or(prompt);
    if prompt.trim().is_empty() {
        return None;
    }
    Some(prompt.to_lowercase())
}

fn contains_term(text: &str, term: &str) -> bool {
    text.to_lowercase().contains(term)
}

/// Substring recall against aliases, tags, then description
fn matches_term(emoji: &Emoji, term: &str) -> bool {
    emoji.aliases.iter().any(|a| contains_term(a, term))
        || emoji.tags.iter().any(|t| contains_term(t, term))
        || contains_term(&emoji.description, term)
}

/// Ranked emoji matching `prompt`, drawn from `sections` in order.
///
/// Empty and whitespace-only prompts return nothing. Sections are not
/// de-duplicated against each other.
pub fn search(prompt: &str, sections: &[EmojiSection]) -> Vec<Emoji> {
    let Some(term) = normalize_prompt(prompt) else {
        return Vec::new();
    };

    #[cfg(feature = "perf-log")]
    let t0 = std::time::Instant::now();

    let matcher = WordMatcher::new(&term);
    let pool: Vec<&Emoji> = sections.iter().flat_map(|s| s.emojis.iter()).collect();
    #[cfg(feature = "perf-log")]
    let pool_len = pool.len();

    // Indexed parallel collect keeps pool order
    let mut ranked: Vec<(SearchRank, &Emoji)> = pool
        .into_par_iter()
        .filter(|emoji| matches_term(emoji, &term))
        .map(|emoji| (compute_rank(emoji, &matcher), emoji))
        .collect();

    // Stable: equal ranks keep their pool order
    ranked.sort_by_key(|(rank, _)| *rank);

    #[cfg(feature = "perf-log")]
    tracing::debug!(
        pool = pool_len,
        matched = ranked.len(),
        elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0,
        "search"
    );

    ranked.into_iter().map(|(_, emoji)| emoji.clone()).collect()
}

/// Search with the default algorithm
#[uniffi::export]
pub fn search_emoji(prompt: String, sections: Vec<EmojiSection>) -> Vec<Emoji> {
    search(&prompt, &sections)
}

/// The built-in search algorithm as a provider
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSearch;

impl SearchProvider for DefaultSearch {
    fn search_results(&self, prompt: String, available: Vec<EmojiSection>) -> Vec<Emoji> {
        search(&prompt, &available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::EmojiCategory;

    fn emoji(description: &str, aliases: &[&str], tags: &[&str]) -> Emoji {
        Emoji {
            glyph: description.chars().next().map(String::from).unwrap_or_default(),
            description: description.to_string(),
            category: EmojiCategory::SmileysAndEmotion,
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            supports_skin_tones: false,
            min_version: "6.0".to_string(),
        }
    }

    fn section(emojis: Vec<Emoji>) -> EmojiSection {
        EmojiSection {
            category: Some(EmojiCategory::SmileysAndEmotion),
            title: "Smileys & Emotion".to_string(),
            icon: None,
            emojis,
        }
    }

    fn descriptions(results: &[Emoji]) -> Vec<&str> {
        results.iter().map(|e| e.description.as_str()).collect()
    }

    // ── normalize_prompt tests ───────────────────────────────────

    #[test]
    fn test_normalize_strips_one_trailing_space() {
        assert_eq!(normalize_prompt("Happy ").as_deref(), Some("happy"));
        assert_eq!(normalize_prompt("red heart  ").as_deref(), Some("red heart "));
    }

    #[test]
    fn test_normalize_rejects_blank() {
        assert_eq!(normalize_prompt(""), None);
        assert_eq!(normalize_prompt(" "), None);
        assert_eq!(normalize_prompt("   "), None);
        assert_eq!(normalize_prompt("\t"), None);
    }

    // ── search tests ─────────────────────────────────────────────

    #[test]
    fn test_empty_prompt_returns_nothing() {
        let sections = vec![section(vec![emoji("grinning face", &["grinning"], &["smile"])])];
        assert!(search("", &sections).is_empty());
        assert!(search(" ", &sections).is_empty());
    }

    #[test]
    fn test_matches_each_field_once() {
        let sections = vec![section(vec![
            emoji("cat face", &["cat"], &["cat", "pet"]),
            emoji("dog face", &["dog"], &["pet"]),
            emoji("pizza", &["pizza"], &[]),
        ])];
        assert_eq!(descriptions(&search("cat", &sections)), vec!["cat face"]);
        // Same tier and length: pool order decides
        assert_eq!(descriptions(&search("pet", &sections)), vec!["cat face", "dog face"]);
        assert_eq!(descriptions(&search("face", &sections)), vec!["cat face", "dog face"]);
    }

    #[test]
    fn test_case_insensitive_recall() {
        let sections = vec![section(vec![emoji("flag: Japan", &["jp"], &["japan"])])];
        assert_eq!(search("JAPAN", &sections).len(), 1);
    }

    #[test]
    fn test_alias_beats_tag_regardless_of_length() {
        let a = emoji("a twenty char descrip", &["happy"], &[]);
        let b = emoji("bbbbb", &[], &["happy"]);
        let results = search("happy", &[section(vec![b, a])]);
        assert_eq!(descriptions(&results), vec!["a twenty char descrip", "bbbbb"]);
    }

    #[test]
    fn test_whole_word_beats_substring() {
        let c = emoji("frowning", &["unhappy"], &[]);
        let d = emoji("happy", &[], &[]);
        let results = search("happy", &[section(vec![c, d])]);
        assert_eq!(descriptions(&results), vec!["happy", "frowning"]);
    }

    #[test]
    fn test_substring_only_keeps_pool_order() {
        let sections = vec![section(vec![
            emoji("a much longer first entry", &["unhappy"], &[]),
            emoji("short", &["happyish"], &[]),
            emoji("mid length", &["xhappyx"], &[]),
        ])];
        let results = search("happy", &sections);
        assert_eq!(
            descriptions(&results),
            vec!["a much longer first entry", "short", "mid length"]
        );
    }

    #[test]
    fn test_pool_spans_sections_without_dedup() {
        let pizza = emoji("pizza", &["pizza"], &[]);
        let sections = vec![section(vec![pizza.clone()]), section(vec![pizza])];
        assert_eq!(search("pizza", &sections).len(), 2);
    }

    #[test]
    fn test_trailing_space_matches_whole_word() {
        let sections = vec![section(vec![emoji("red heart", &["heart"], &["love"])])];
        assert_eq!(search("heart ", &sections).len(), 1);
    }

    #[test]
    fn test_default_provider_delegates() {
        let sections = vec![section(vec![emoji("pizza", &["pizza"], &[])])];
        let results = DefaultSearch.search_results("piz".to_string(), sections);
        assert_eq!(descriptions(&results), vec!["pizza"]);
    }
}

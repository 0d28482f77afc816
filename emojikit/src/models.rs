//! Core data models for emojikit
//!
//! Behaviour attached to the FFI types declared in `interface.rs`.

use std::collections::HashMap;

use crate::interface::{
    Emoji, EmojiCategory, Localization, PickerConfiguration, SectionIcon, SkinTone, SkinTonePreference,
};

// ─────────────────────────────────────────────────────────────────────────────
// SKIN TONES
// ─────────────────────────────────────────────────────────────────────────────

impl SkinTone {
    pub const ALL: [SkinTone; 5] = [
        SkinTone::Light,
        SkinTone::MediumLight,
        SkinTone::Medium,
        SkinTone::MediumDark,
        SkinTone::Dark,
    ];

    /// The emoji modifier scalar for this tone
    pub fn modifier(self) -> char {
        match self {
            SkinTone::Light => '\u{1F3FB}',
            SkinTone::MediumLight => '\u{1F3FC}',
            SkinTone::Medium => '\u{1F3FD}',
            SkinTone::MediumDark => '\u{1F3FE}',
            SkinTone::Dark => '\u{1F3FF}',
        }
    }

    /// Persisted representation: the modifier scalar as a string
    pub fn token(self) -> String {
        self.modifier().to_string()
    }

    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let modifier = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::ALL.into_iter().find(|tone| tone.modifier() == modifier)
    }
}

impl SkinTonePreference {
    /// Interpret a raw persisted entry. Unknown tokens are treated as no preference.
    pub(crate) fn from_token(token: Option<&str>) -> Self {
        match token {
            None => SkinTonePreference::NoPreference,
            Some("") => SkinTonePreference::ExplicitNone,
            Some(t) => match SkinTone::from_token(t) {
                Some(tone) => SkinTonePreference::Tone { tone },
                None => {
                    tracing::warn!(token = t, "ignoring unrecognized skin tone token");
                    SkinTonePreference::NoPreference
                }
            },
        }
    }

    /// Raw entry to persist; `None` means the key is removed
    pub(crate) fn to_token(self) -> Option<String> {
        match self {
            SkinTonePreference::NoPreference => None,
            SkinTonePreference::ExplicitNone => Some(String::new()),
            SkinTonePreference::Tone { tone } => Some(tone.token()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CATEGORIES
// ─────────────────────────────────────────────────────────────────────────────

impl EmojiCategory {
    /// All categories in display order
    pub const ALL: [EmojiCategory; 9] = [
        EmojiCategory::SmileysAndEmotion,
        EmojiCategory::PeopleAndBody,
        EmojiCategory::AnimalsAndNature,
        EmojiCategory::FoodAndDrink,
        EmojiCategory::TravelAndPlaces,
        EmojiCategory::Activities,
        EmojiCategory::Objects,
        EmojiCategory::Symbols,
        EmojiCategory::Flags,
    ];

    /// Label as it appears in the dataset
    pub fn label(self) -> &'static str {
        match self {
            EmojiCategory::SmileysAndEmotion => "Smileys & Emotion",
            EmojiCategory::PeopleAndBody => "People & Body",
            EmojiCategory::AnimalsAndNature => "Animals & Nature",
            EmojiCategory::FoodAndDrink => "Food & Drink",
            EmojiCategory::TravelAndPlaces => "Travel & Places",
            EmojiCategory::Activities => "Activities",
            EmojiCategory::Objects => "Objects",
            EmojiCategory::Symbols => "Symbols",
            EmojiCategory::Flags => "Flags",
        }
    }

    /// Fixed display position, independent of declaration order
    pub fn index(self) -> u8 {
        match self {
            EmojiCategory::SmileysAndEmotion => 0,
            EmojiCategory::PeopleAndBody => 1,
            EmojiCategory::AnimalsAndNature => 2,
            EmojiCategory::FoodAndDrink => 3,
            EmojiCategory::TravelAndPlaces => 4,
            EmojiCategory::Activities => 5,
            EmojiCategory::Objects => 6,
            EmojiCategory::Symbols => 7,
            EmojiCategory::Flags => 8,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn icon(self) -> SectionIcon {
        match self {
            EmojiCategory::PeopleAndBody => SectionIcon::SystemSymbol { name: "hand.wave".to_string() },
            other => SectionIcon::Asset { name: other.label().to_string() },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EMOJI
// ─────────────────────────────────────────────────────────────────────────────

impl Emoji {
    /// Render this emoji with another skin tone.
    ///
    /// Returns `None` when the emoji has no skin tone variants. A `None` tone
    /// yields the standard yellow rendering.
    pub fn with_skin_tone(&self, tone: Option<SkinTone>) -> Option<String> {
        if !self.supports_skin_tones {
            return None;
        }
        Some(crate::skin_tone::apply_tone(&self.glyph, tone))
    }

    /// Copy of this emoji carrying the toned glyph (unchanged if tones are unsupported)
    pub fn duplicate(&self, tone: Option<SkinTone>) -> Emoji {
        Emoji {
            glyph: self.with_skin_tone(tone).unwrap_or_else(|| self.glyph.clone()),
            ..self.clone()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CONFIGURATION
// ─────────────────────────────────────────────────────────────────────────────

impl Default for PickerConfiguration {
    fn default() -> Self {
        Self {
            show_search: true,
            show_random: true,
            show_reset: true,
            show_close: true,
            show_toolbar: true,
            supports_preview: true,
            categories: EmojiCategory::ALL.to_vec(),
            supports_skin_tones: true,
            persist_skin_tones: true,
            default_skin_tone: None,
        }
    }
}

impl PickerConfiguration {
    /// Replace the category allow-list, keeping it in display order
    pub fn with_categories(mut self, categories: Vec<EmojiCategory>) -> Self {
        self.categories = categories;
        self.normalized()
    }

    pub fn with_default_skin_tone(mut self, tone: Option<SkinTone>) -> Self {
        self.default_skin_tone = tone;
        self
    }

    /// Sort categories by their fixed index and drop duplicates
    pub fn normalized(mut self) -> Self {
        self.categories.sort_by_key(|c| c.index());
        self.categories.dedup();
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LOCALIZATION
// ─────────────────────────────────────────────────────────────────────────────

impl Default for Localization {
    fn default() -> Self {
        Self {
            search_field_placeholder: "Search".to_string(),
            search_results_title: "Search results".to_string(),
            search_results_empty_title: "No emoji found".to_string(),
            random_button_title: "Random".to_string(),
            category_titles: EmojiCategory::ALL
                .into_iter()
                .map(|c| (c, c.label().to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }
}

impl Localization {
    /// Localized section title, falling back to the dataset label
    pub fn category_title(&self, category: EmojiCategory) -> String {
        self.category_titles
            .get(&category)
            .cloned()
            .unwrap_or_else(|| category.label().to_string())
    }
}

//! emojikit FFI Interface Definition
//!
//! This file defines the public interface exposed to the host UI via UniFFI.
//! It acts as the source of truth for shared types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ENUMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Fitzpatrick skin tone modifiers (U+1F3FB through U+1F3FF)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "snake_case")]
pub enum SkinTone {
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

/// The fixed set of emoji categories found in the dataset.
///
/// Declaration order is not the display order; use [`EmojiCategory::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
pub enum EmojiCategory {
    #[serde(rename = "Smileys & Emotion")]
    SmileysAndEmotion,
    #[serde(rename = "People & Body")]
    PeopleAndBody,
    #[serde(rename = "Animals & Nature")]
    AnimalsAndNature,
    #[serde(rename = "Food & Drink")]
    FoodAndDrink,
    #[serde(rename = "Travel & Places")]
    TravelAndPlaces,
    #[serde(rename = "Activities")]
    Activities,
    #[serde(rename = "Objects")]
    Objects,
    #[serde(rename = "Symbols")]
    Symbols,
    #[serde(rename = "Flags")]
    Flags,
}

/// Icon to show for a section in the category toolbar
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum SectionIcon {
    /// Platform symbol looked up by name (e.g. SF Symbols)
    SystemSymbol { name: String },
    /// Image shipped in the host's asset bundle
    Asset { name: String },
}

/// What the preference store holds for one emoji description
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum SkinTonePreference {
    /// Nothing recorded; the configured default tone (if any) applies
    NoPreference,
    /// The user explicitly picked the standard yellow emoji
    ExplicitNone,
    Tone { tone: SkinTone },
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// A single emoji from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Record)]
pub struct Emoji {
    /// Character sequence, possibly with ZWJ and variation selectors
    pub glyph: String,
    /// Unicode name; stable across skin tone variants and used as preference key
    pub description: String,
    pub category: EmojiCategory,
    pub aliases: Vec<String>,
    pub tags: Vec<String>,
    pub supports_skin_tones: bool,
    /// Earliest platform version able to render this emoji
    pub min_version: String,
}

/// A titled group of emoji
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct EmojiSection {
    /// `None` for sections that are not a catalog category (e.g. search results)
    pub category: Option<EmojiCategory>,
    pub title: String,
    pub icon: Option<SectionIcon>,
    pub emojis: Vec<Emoji>,
}

/// Picker settings supplied by the host. Never mutated by the core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct PickerConfiguration {
    pub show_search: bool,
    pub show_random: bool,
    pub show_reset: bool,
    pub show_close: bool,
    pub show_toolbar: bool,
    /// Allow previewing emoji with a long press
    pub supports_preview: bool,
    /// Categories offered to users, kept sorted by category index
    pub categories: Vec<EmojiCategory>,
    pub supports_skin_tones: bool,
    /// Remember the user's skin tone choice per emoji between sessions
    pub persist_skin_tones: bool,
    /// Tone applied when the user has not chosen one; `None` means standard yellow
    pub default_skin_tone: Option<SkinTone>,
}

/// Texts for every label the picker shows
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct Localization {
    pub search_field_placeholder: String,
    pub search_results_title: String,
    pub search_results_empty_title: String,
    pub random_button_title: String,
    pub category_titles: HashMap<EmojiCategory, String>,
}

/// Result of a search prompt change while in search mode
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct SearchOutcome {
    /// Header title: results title, or the empty-results title when nothing matched
    pub title: String,
    pub emojis: Vec<Emoji>,
}

/// Error type for emojikit operations
#[derive(Debug, Error, uniffi::Error)]
pub enum EmojiKitError {
    #[error("Failed to load emoji data: {0}")]
    DataLoad(String),
    #[error("Preference storage error: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
// HOST INTERFACES
// ═══════════════════════════════════════════════════════════════════════════════

/// Supplies the sections a picker offers. Hosts implement this to provide
/// their own emoji; the core falls back to the bundled catalog.
#[uniffi::export(with_foreign)]
pub trait SectionProvider: Send + Sync {
    fn load_sections(&self, config: PickerConfiguration, localization: Localization) -> Vec<EmojiSection>;
}

/// Produces search results for a prompt. Called off the UI thread.
#[uniffi::export(with_foreign)]
pub trait SearchProvider: Send + Sync {
    fn search_results(&self, prompt: String, available: Vec<EmojiSection>) -> Vec<Emoji>;
}

/// Notifications from a picker session to its host
#[uniffi::export(with_foreign)]
pub trait PickerObserver: Send + Sync {
    /// `None` when the user reset their selection
    fn did_select_emoji(&self, emoji: Option<Emoji>);

    fn focused_section_changed(&self, to: u32, from: u32);

    fn did_start_searching(&self);

    fn did_end_searching(&self);

    /// Whether the host should dismiss the picker once a selection was made
    fn should_dismiss_after_selection(&self) -> bool;
}

impl From<crate::catalog::CatalogError> for EmojiKitError {
    fn from(e: crate::catalog::CatalogError) -> Self {
        EmojiKitError::DataLoad(e.to_string())
    }
}

impl From<crate::database::DatabaseError> for EmojiKitError {
    fn from(e: crate::database::DatabaseError) -> Self {
        EmojiKitError::Storage(e.to_string())
    }
}

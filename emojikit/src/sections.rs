//! Sectioning: catalog emoji grouped into the category sections a picker shows.
//!
//! Steps, in order:
//! 1. Resolve each toneable emoji's glyph from the preference snapshot
//! 2. Drop emoji newer than the running platform
//! 3. Group by category in first-occurrence order, keeping allowed categories
//!
//! Sections come out in catalog encounter order, not in the order of
//! `config.categories`.

use crate::catalog::EmojiCatalog;
use crate::interface::{Emoji, EmojiKitError, EmojiSection, Localization, PickerConfiguration, SectionProvider, SkinTonePreference};
use crate::store::{shared_preferences, PreferenceStore, SkinToneSnapshot};
use crate::version::PlatformVersion;
use std::sync::Arc;

/// Glyph to display for `emoji` given the user's stored choice and the
/// configured default tone
fn resolve_glyph(emoji: &Emoji, preference: SkinTonePreference, config: &PickerConfiguration) -> Option<String> {
    match (preference, config.default_skin_tone) {
        (SkinTonePreference::Tone { tone }, _) => emoji.with_skin_tone(Some(tone)),
        (SkinTonePreference::NoPreference, Some(default)) => emoji.with_skin_tone(Some(default)),
        _ => None,
    }
}

/// Build the ordered category sections for a picker.
pub fn build_sections(
    emojis: &[Emoji],
    config: &PickerConfiguration,
    localization: &Localization,
    preferences: &SkinToneSnapshot,
    platform_version: &str,
) -> Vec<EmojiSection> {
    #[cfg(feature = "perf-log")]
    let t0 = std::time::Instant::now();

    let platform = PlatformVersion::parse(platform_version);
    let mut sections: Vec<EmojiSection> = Vec::new();

    for emoji in emojis {
        if PlatformVersion::parse(&emoji.min_version) > platform {
            continue;
        }
        if !config.categories.contains(&emoji.category) {
            continue;
        }

        let mut emoji = emoji.clone();
        if emoji.supports_skin_tones {
            if let Some(glyph) = resolve_glyph(&emoji, preferences.get(&emoji.description), config) {
                emoji.glyph = glyph;
            }
        }

        match sections.iter_mut().find(|s| s.category == Some(emoji.category)) {
            Some(section) => section.emojis.push(emoji),
            None => sections.push(new_section(emoji, localization)),
        }
    }

    #[cfg(feature = "perf-log")]
    tracing::debug!(
        sections = sections.len(),
        elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0,
        "build_sections"
    );

    sections
}

fn new_section(first: Emoji, localization: &Localization) -> EmojiSection {
    let category = first.category;
    EmojiSection {
        category: Some(category),
        title: localization.category_title(category),
        icon: Some(category.icon()),
        emojis: vec![first],
    }
}

/// Sections from a catalog, personalised with a preference store
pub struct DefaultSections {
    catalog: Arc<EmojiCatalog>,
    preferences: Arc<PreferenceStore>,
    platform_version: String,
}

impl DefaultSections {
    pub fn new(catalog: Arc<EmojiCatalog>, preferences: Arc<PreferenceStore>, platform_version: impl Into<String>) -> Self {
        Self {
            catalog,
            preferences,
            platform_version: platform_version.into(),
        }
    }
}

impl SectionProvider for DefaultSections {
    fn load_sections(&self, config: PickerConfiguration, localization: Localization) -> Vec<EmojiSection> {
        build_sections(
            self.catalog.emojis(),
            &config.normalized(),
            &localization,
            &self.preferences.snapshot(),
            &self.platform_version,
        )
    }
}

/// Sections from the bundled catalog and the shared preference store
#[uniffi::export]
pub fn default_sections(
    config: PickerConfiguration,
    localization: Localization,
    platform_version: String,
) -> Result<Vec<EmojiSection>, EmojiKitError> {
    let provider = DefaultSections::new(EmojiCatalog::bundled()?, shared_preferences(), platform_version);
    Ok(provider.load_sections(config, localization))
}

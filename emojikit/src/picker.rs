//! EmojiPicker - the host-facing picker session
//!
//! Holds the UI-independent state of one picker: cached sections, the search
//! lifecycle, the focused section and the skin tone persistence policy.
//!
//! Locking rules:
//! - `state` guards only small flags and is never held across a host callback
//! - Observer notifications are sent after every lock has been released, so a
//!   host may call back into the session from inside a notification
//! - Sections are computed outside the cache lock. Every invalidation bumps the
//!   cache generation, and a build only lands in the cache if the generation is
//!   unchanged, so a build that raced a preference change is never cached

use crate::catalog::EmojiCatalog;
use crate::interface::{
    Emoji, EmojiKitError, EmojiSection, Localization, PickerConfiguration, PickerObserver, SearchOutcome,
    SearchProvider, SectionProvider, SkinTone, SkinTonePreference,
};
use crate::search::DefaultSearch;
use crate::sections::DefaultSections;
use crate::store::PreferenceStore;
use parking_lot::{Mutex, RwLock};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long a toolbar section jump wins over scroll-driven focus updates
const SECTION_JUMP_OVERRIDE: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
struct SessionState {
    is_searching: bool,
    focused_section: u32,
    /// Scroll-driven focus updates are ignored until then
    focus_override_until: Option<Instant>,
}

#[derive(Default)]
struct SectionCache {
    generation: u64,
    sections: Option<Arc<Vec<EmojiSection>>>,
}

/// One emoji picker session
#[derive(uniffi::Object)]
pub struct EmojiPicker {
    config: PickerConfiguration,
    localization: Localization,
    catalog: Arc<EmojiCatalog>,
    preferences: Arc<PreferenceStore>,
    section_provider: RwLock<Arc<dyn SectionProvider>>,
    search_provider: RwLock<Arc<dyn SearchProvider>>,
    observer: RwLock<Option<Arc<dyn PickerObserver>>>,
    sections: RwLock<SectionCache>,
    state: Mutex<SessionState>,
}

// Internal implementation (not exported via FFI)
impl EmojiPicker {
    /// Session over an already loaded catalog
    pub fn with_catalog(
        catalog: Arc<EmojiCatalog>,
        config: PickerConfiguration,
        localization: Localization,
        preferences: Arc<PreferenceStore>,
        platform_version: impl Into<String>,
    ) -> Self {
        let section_provider = DefaultSections::new(Arc::clone(&catalog), Arc::clone(&preferences), platform_version);
        Self {
            config: config.normalized(),
            localization,
            catalog,
            preferences,
            section_provider: RwLock::new(Arc::new(section_provider)),
            search_provider: RwLock::new(Arc::new(DefaultSearch)),
            observer: RwLock::new(None),
            sections: RwLock::new(SectionCache::default()),
            state: Mutex::new(SessionState::default()),
        }
    }

    fn cached_sections(&self) -> Arc<Vec<EmojiSection>> {
        let generation = {
            let cache = self.sections.read();
            if let Some(sections) = cache.sections.as_ref() {
                return Arc::clone(sections);
            }
            cache.generation
        };

        let provider = Arc::clone(&*self.section_provider.read());
        let sections = Arc::new(provider.load_sections(self.config.clone(), self.localization.clone()));

        let mut cache = self.sections.write();
        if cache.generation != generation {
            // Invalidated while building: hand the result to this caller only
            tracing::debug!("discarding sections built before an invalidation");
            return sections;
        }
        Arc::clone(cache.sections.get_or_insert(sections))
    }

    fn invalidate_sections(&self) {
        let mut cache = self.sections.write();
        cache.generation = cache.generation.wrapping_add(1);
        cache.sections = None;
    }

    fn notify_focus_change(&self, focused: u32, previous: u32) {
        if focused == previous {
            return;
        }
        if let Some(observer) = self.observer() {
            observer.focused_section_changed(focused, previous);
        }
    }

    /// Jump to a section as of `now`; see [`EmojiPicker::select_section`]
    pub(crate) fn select_section_at(&self, index: u32, now: Instant) {
        let previous = {
            let mut state = self.state.lock();
            let previous = state.focused_section;
            state.focused_section = index;
            state.focus_override_until = Some(now + SECTION_JUMP_OVERRIDE);
            previous
        };
        self.notify_focus_change(index, previous);
    }

    /// Visible item report as of `now`; see [`EmojiPicker::update_visible_items`]
    pub(crate) fn update_visible_items_at(&self, section_indices: Vec<u32>, now: Instant) -> u32 {
        let mut counts: HashMap<u32, usize> = HashMap::new();
        for index in section_indices {
            *counts.entry(index).or_default() += 1;
        }
        let most_visible = counts
            .into_iter()
            .max_by(|(a_index, a_count), (b_index, b_count)| {
                a_count.cmp(b_count).then_with(|| b_index.cmp(a_index))
            })
            .map_or(0, |(index, _)| index);

        let (focused, previous) = {
            let mut state = self.state.lock();
            let previous = state.focused_section;
            let override_until = state.focus_override_until;
            match override_until {
                Some(until) if now < until => return previous,
                Some(_) => state.focus_override_until = None,
                None => {}
            }
            state.focused_section = most_visible;
            (most_visible, previous)
        };

        self.notify_focus_change(focused, previous);
        focused
    }

    fn observer(&self) -> Option<Arc<dyn PickerObserver>> {
        self.observer.read().clone()
    }

    /// Pick a random emoji using `rng`: a random section, then a random emoji in it
    pub fn random_emoji_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Emoji> {
        let sections = self.cached_sections();
        let candidates: Vec<&EmojiSection> = sections.iter().filter(|s| !s.emojis.is_empty()).collect();
        let section = candidates.choose(rng)?;
        section.emojis.choose(rng).cloned()
    }
}

#[uniffi::export]
impl EmojiPicker {
    /// Session over the bundled emoji dataset
    #[uniffi::constructor]
    pub fn new(
        config: PickerConfiguration,
        localization: Localization,
        preferences: Arc<PreferenceStore>,
        platform_version: String,
    ) -> Result<Self, EmojiKitError> {
        let catalog = EmojiCatalog::bundled()?;
        Ok(Self::with_catalog(catalog, config, localization, preferences, platform_version))
    }

    /// Session over a dataset file in the bundled JSON format
    #[uniffi::constructor]
    pub fn from_dataset(
        path: String,
        config: PickerConfiguration,
        localization: Localization,
        preferences: Arc<PreferenceStore>,
        platform_version: String,
    ) -> Result<Self, EmojiKitError> {
        let catalog = Arc::new(EmojiCatalog::from_path(&path)?);
        Ok(Self::with_catalog(catalog, config, localization, preferences, platform_version))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Providers & observer
    // ─────────────────────────────────────────────────────────────────────────────

    /// Replace the section source. Cached sections are dropped.
    pub fn set_section_provider(&self, provider: Arc<dyn SectionProvider>) {
        *self.section_provider.write() = provider;
        self.invalidate_sections();
    }

    pub fn set_search_provider(&self, provider: Arc<dyn SearchProvider>) {
        *self.search_provider.write() = provider;
    }

    pub fn set_observer(&self, observer: Option<Arc<dyn PickerObserver>>) {
        *self.observer.write() = observer;
    }

    pub fn configuration(&self) -> PickerConfiguration {
        self.config.clone()
    }

    pub fn localization(&self) -> Localization {
        self.localization.clone()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Sections
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn sections(&self) -> Vec<EmojiSection> {
        self.cached_sections().as_ref().clone()
    }

    /// Recompute sections through the current provider
    pub fn reload_sections(&self) -> Vec<EmojiSection> {
        self.invalidate_sections();
        self.sections()
    }

    /// Header title for a section while not searching
    pub fn section_title(&self, index: u32) -> Option<String> {
        self.cached_sections().get(index as usize).map(|s| s.title.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn is_searching(&self) -> bool {
        self.state.lock().is_searching
    }

    /// Feed the current search field text.
    ///
    /// An empty prompt leaves search mode and returns `None`. Anything else
    /// enters search mode (if needed) and returns the results with their header
    /// title.
    pub fn update_search(&self, prompt: String) -> Option<SearchOutcome> {
        let searching = !prompt.is_empty();
        let changed = {
            let mut state = self.state.lock();
            let changed = state.is_searching != searching;
            state.is_searching = searching;
            changed
        };

        if changed {
            if let Some(observer) = self.observer() {
                if searching {
                    observer.did_start_searching();
                } else {
                    observer.did_end_searching();
                }
            }
        }

        if !searching {
            return None;
        }

        let provider = Arc::clone(&*self.search_provider.read());
        let emojis = provider.search_results(prompt, self.sections());
        let title = if emojis.is_empty() {
            self.localization.search_results_empty_title.clone()
        } else {
            self.localization.search_results_title.clone()
        };
        Some(SearchOutcome { title, emojis })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────────

    /// Report a selection (`None` for reset). Returns whether the host should
    /// dismiss the picker.
    pub fn select(&self, emoji: Option<Emoji>) -> bool {
        match self.observer() {
            Some(observer) => {
                observer.did_select_emoji(emoji);
                observer.should_dismiss_after_selection()
            }
            None => true,
        }
    }

    pub fn reset(&self) -> bool {
        self.select(None)
    }

    pub fn random_emoji(&self) -> Option<Emoji> {
        self.random_emoji_with(&mut rand::thread_rng())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Skin tones
    // ─────────────────────────────────────────────────────────────────────────────

    /// Glyphs for the skin tone selector: standard rendering first, then one
    /// per tone. Empty when tones are disabled or unsupported by the emoji.
    pub fn skin_tone_options(&self, emoji: Emoji) -> Vec<String> {
        if !self.config.supports_skin_tones || !emoji.supports_skin_tones {
            return Vec::new();
        }
        // Start from the untoned record so a toned glyph does not get a second modifier
        let base = self.catalog.get(&emoji.description).unwrap_or(&emoji);

        std::iter::once(None)
            .chain(SkinTone::ALL.into_iter().map(Some))
            .filter_map(|tone| base.with_skin_tone(tone))
            .collect()
    }

    /// Remember the tone chosen for `original`.
    ///
    /// Does nothing unless the configuration persists skin tones. Choosing the
    /// standard rendering is only recorded when a default tone is configured,
    /// since otherwise it is already what the user gets.
    pub fn persist_skin_tone(&self, original: Emoji, tone: Option<SkinTone>) -> Result<(), EmojiKitError> {
        if !self.config.persist_skin_tones {
            return Ok(());
        }
        let preference = match (tone, self.config.default_skin_tone) {
            (Some(tone), _) => SkinTonePreference::Tone { tone },
            (None, Some(_)) => SkinTonePreference::ExplicitNone,
            (None, None) => SkinTonePreference::NoPreference,
        };
        self.preferences.set_preference(original.description, preference)?;
        self.invalidate_sections();
        Ok(())
    }

    /// Forget every persisted skin tone
    pub fn clean_persisted_skin_tones(&self) -> Result<(), EmojiKitError> {
        self.preferences.clear_all()?;
        self.invalidate_sections();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Focus tracking
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn focused_section(&self) -> u32 {
        self.state.lock().focused_section
    }

    /// Focus `index` after the user picked it from a section toolbar. Scroll
    /// reports are ignored for a short while afterwards so the scroll animation
    /// towards the section does not move focus back.
    pub fn select_section(&self, index: u32) {
        self.select_section_at(index, Instant::now());
    }

    /// Report the section index of every visible item. The section with the
    /// most visible items becomes focused (lowest index on ties); nothing
    /// visible focuses section 0. Returns the focused section.
    pub fn update_visible_items(&self, section_indices: Vec<u32>) -> u32 {
        self.update_visible_items_at(section_indices, Instant::now())
    }
}

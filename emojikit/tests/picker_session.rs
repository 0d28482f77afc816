//! End-to-end picker session behaviour: the flow a host UI drives.

use emojikit::{
    Emoji, EmojiCategory, EmojiPicker, Localization, PickerConfiguration, PickerObserver, PreferenceStore,
    SkinTone, SkinTonePreference,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Default)]
struct Host {
    log: Mutex<Vec<String>>,
}

impl PickerObserver for Host {
    fn did_select_emoji(&self, emoji: Option<Emoji>) {
        let entry = match emoji {
            Some(emoji) => format!("select {}", emoji.glyph),
            None => "reset".to_string(),
        };
        self.log.lock().push(entry);
    }

    fn focused_section_changed(&self, to: u32, from: u32) {
        self.log.lock().push(format!("focus {from}->{to}"));
    }

    fn did_start_searching(&self) {
        self.log.lock().push("start".to_string());
    }

    fn did_end_searching(&self) {
        self.log.lock().push("end".to_string());
    }

    fn should_dismiss_after_selection(&self) -> bool {
        true
    }
}

fn session(config: PickerConfiguration, store: Arc<PreferenceStore>) -> (EmojiPicker, Arc<Host>) {
    let picker = EmojiPicker::new(config, Localization::default(), store, "17.0".to_string()).unwrap();
    let host = Arc::new(Host::default());
    picker.set_observer(Some(host.clone() as Arc<dyn PickerObserver>));
    (picker, host)
}

fn find(picker: &EmojiPicker, description: &str) -> Emoji {
    picker
        .sections()
        .into_iter()
        .flat_map(|s| s.emojis)
        .find(|e| e.description == description)
        .unwrap()
}

#[test]
fn search_then_select_then_clear() {
    let (picker, host) = session(PickerConfiguration::default(), Arc::new(PreferenceStore::in_memory()));

    let outcome = picker.update_search("p".to_string()).unwrap();
    assert!(!outcome.emojis.is_empty());
    let outcome = picker.update_search("pizza".to_string()).unwrap();
    assert_eq!(outcome.title, "Search results");
    let pizza = outcome.emojis[0].clone();

    assert!(picker.select(Some(pizza)));
    assert_eq!(picker.update_search(String::new()), None);

    assert_eq!(*host.log.lock(), vec!["start", "select \u{1F355}", "end"]);
}

#[test]
fn whitespace_prompt_stays_in_search_mode_with_no_results() {
    let (picker, host) = session(PickerConfiguration::default(), Arc::new(PreferenceStore::in_memory()));
    let outcome = picker.update_search(" ".to_string()).unwrap();
    assert!(outcome.emojis.is_empty());
    assert_eq!(outcome.title, "No emoji found");
    assert!(picker.is_searching());
    assert_eq!(*host.log.lock(), vec!["start"]);
}

#[test]
fn chosen_tone_persists_into_next_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.sqlite").to_string_lossy().to_string();

    {
        let store = Arc::new(PreferenceStore::open(path.clone()).unwrap());
        let (picker, _host) = session(PickerConfiguration::default(), store);
        let clap = find(&picker, "clapping hands");
        let options = picker.skin_tone_options(clap.clone());
        assert_eq!(options.len(), 6);
        picker.persist_skin_tone(clap, Some(SkinTone::MediumDark)).unwrap();
    }

    let store = Arc::new(PreferenceStore::open(path).unwrap());
    let (picker, _host) = session(PickerConfiguration::default(), Arc::clone(&store));
    assert_eq!(find(&picker, "clapping hands").glyph, "\u{1F44F}\u{1F3FE}");
    assert_eq!(
        store.get("clapping hands".to_string()),
        SkinTonePreference::Tone { tone: SkinTone::MediumDark }
    );
}

#[test]
fn standard_choice_overrides_default_tone() {
    let store = Arc::new(PreferenceStore::in_memory());
    let config = PickerConfiguration::default().with_default_skin_tone(Some(SkinTone::Light));
    let (picker, _host) = session(config, Arc::clone(&store));

    let baby = find(&picker, "baby");
    assert_eq!(baby.glyph, "\u{1F476}\u{1F3FB}");

    picker.persist_skin_tone(baby, None).unwrap();
    assert_eq!(store.get("baby".to_string()), SkinTonePreference::ExplicitNone);
    assert_eq!(find(&picker, "baby").glyph, "\u{1F476}");

    picker.clean_persisted_skin_tones().unwrap();
    assert_eq!(find(&picker, "baby").glyph, "\u{1F476}\u{1F3FB}");
}

#[test]
fn restricted_categories_drive_titles_and_random() {
    let config = PickerConfiguration::default().with_categories(vec![EmojiCategory::Flags, EmojiCategory::FoodAndDrink]);
    let (picker, _host) = session(config, Arc::new(PreferenceStore::in_memory()));

    assert_eq!(picker.section_title(0).as_deref(), Some("Food & Drink"));
    assert_eq!(picker.section_title(1).as_deref(), Some("Flags"));
    assert_eq!(picker.section_title(2), None);

    for _ in 0..10 {
        let emoji = picker.random_emoji().unwrap();
        assert!(matches!(emoji.category, EmojiCategory::Flags | EmojiCategory::FoodAndDrink));
    }
}

#[test]
fn scrolling_updates_focus() {
    let (picker, host) = session(PickerConfiguration::default(), Arc::new(PreferenceStore::in_memory()));
    picker.update_visible_items(vec![0, 0, 0]);
    picker.update_visible_items(vec![0, 1, 1, 1]);
    picker.update_visible_items(vec![1, 2, 2]);
    assert_eq!(picker.focused_section(), 2);
    assert_eq!(*host.log.lock(), vec!["focus 0->1", "focus 1->2"]);
}

#[test]
fn toolbar_jump_focuses_section_before_scrolling_catches_up() {
    let (picker, host) = session(PickerConfiguration::default(), Arc::new(PreferenceStore::in_memory()));
    picker.select_section(3);
    // The scroll towards section 3 reports earlier sections first
    assert_eq!(picker.update_visible_items(vec![0, 0, 1]), 3);
    assert_eq!(picker.focused_section(), 3);
    assert_eq!(*host.log.lock(), vec!["focus 0->3"]);
}

#[test]
fn missing_dataset_is_a_load_error() {
    let result = EmojiPicker::from_dataset(
        "/nonexistent/emoji.json".to_string(),
        PickerConfiguration::default(),
        Localization::default(),
        Arc::new(PreferenceStore::in_memory()),
        "17.0".to_string(),
    );
    assert!(matches!(result, Err(emojikit::EmojiKitError::DataLoad(_))));
}

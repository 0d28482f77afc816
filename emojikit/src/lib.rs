//! emojikit Core - Rust logic behind the emoji picker
//!
//! This library implements everything in the picker that does not draw pixels:
//! the emoji catalog, skin tone rendering, category sectioning, search ranking
//! and the persisted skin tone preferences, plus the picker session state.
//!
//! Types are exported via UniFFI proc-macros (#[derive(uniffi::Record/Enum)]).

pub mod catalog;
pub mod database;
pub mod interface;
pub mod models;
mod picker;
pub mod ranking;
pub mod search;
pub mod sections;
pub mod skin_tone;
mod store;
pub mod version;

pub use interface::*;
pub use picker::EmojiPicker;
pub use store::{install_shared_preferences, shared_preferences, PreferenceStore, SkinToneSnapshot};

uniffi::setup_scaffolding!("emojikit");

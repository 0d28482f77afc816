//! PreferenceStore - per-emoji skin tone choices, exported for host interop
//!
//! Concurrency Model:
//! - The whole map sits behind one `RwLock`; readers (section building on a
//!   background thread) never observe a half-applied write
//! - Writes persist to SQLite while holding the write lock, so memory and disk
//!   change together or not at all
//! - One process-wide store can be installed with [`install_shared_preferences`]

use crate::database::{Database, DatabaseResult};
use crate::interface::{EmojiKitError, SkinTone, SkinTonePreference};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Row holding the serialized description → token map
pub(crate) const SKIN_TONES_KEY: &str = "emoji_skin_tones";

static SHARED: OnceCell<Arc<PreferenceStore>> = OnceCell::new();

/// Read-only copy of the preference map taken under a single lock acquisition
#[derive(Debug, Clone, Default)]
pub struct SkinToneSnapshot {
    entries: HashMap<String, String>,
}

impl SkinToneSnapshot {
    pub fn get(&self, description: &str) -> SkinTonePreference {
        SkinTonePreference::from_token(self.entries.get(description).map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Thread-safe skin tone preference store, optionally backed by SQLite
#[derive(uniffi::Object)]
pub struct PreferenceStore {
    db: Option<Database>,
    entries: RwLock<HashMap<String, String>>,
}

// Internal implementation (not exported via FFI)
impl PreferenceStore {
    /// Consistent view for section building
    pub fn snapshot(&self) -> SkinToneSnapshot {
        SkinToneSnapshot {
            entries: self.entries.read().clone(),
        }
    }

    fn load_entries(db: &Database) -> DatabaseResult<HashMap<String, String>> {
        let Some(json) = db.get_value(SKIN_TONES_KEY)? else {
            return Ok(HashMap::new());
        };
        match serde_json::from_str::<HashMap<String, String>>(&json) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed persisted skin tones");
                Ok(HashMap::new())
            }
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) -> DatabaseResult<()> {
        let Some(db) = &self.db else {
            return Ok(());
        };
        if entries.is_empty() {
            return db.delete_value(SKIN_TONES_KEY);
        }
        let json = serde_json::to_string(entries)?;
        db.set_value(SKIN_TONES_KEY, &json)
    }

    /// Apply `update` to a copy of the map, persist it, then publish it.
    fn update<F>(&self, update: F) -> Result<(), EmojiKitError>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let mut guard = self.entries.write();
        let mut next = guard.clone();
        update(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }
}

#[uniffi::export]
impl PreferenceStore {
    /// Open (or create) a store persisted in the SQLite database at `db_path`
    #[uniffi::constructor]
    pub fn open(db_path: String) -> Result<Self, EmojiKitError> {
        let path = PathBuf::from(db_path);
        let db = Database::open(&path)?;
        let entries = Self::load_entries(&db)?;
        tracing::debug!(path = %path.display(), count = entries.len(), "opened preference store");
        Ok(Self {
            db: Some(db),
            entries: RwLock::new(entries),
        })
    }

    /// A store that lives only as long as the process
    #[uniffi::constructor]
    pub fn in_memory() -> Self {
        Self {
            db: None,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, description: String) -> SkinTonePreference {
        let entries = self.entries.read();
        SkinTonePreference::from_token(entries.get(&description).map(String::as_str))
    }

    /// Remember `tone` for the emoji. `None` forgets any recorded choice.
    pub fn set(&self, description: String, tone: Option<SkinTone>) -> Result<(), EmojiKitError> {
        let preference = match tone {
            Some(tone) => SkinTonePreference::Tone { tone },
            None => SkinTonePreference::NoPreference,
        };
        self.set_preference(description, preference)
    }

    /// Record a preference, including the explicit "standard yellow" choice
    pub fn set_preference(&self, description: String, preference: SkinTonePreference) -> Result<(), EmojiKitError> {
        self.update(|entries| match preference.to_token() {
            Some(token) => {
                entries.insert(description, token);
            }
            None => {
                entries.remove(&description);
            }
        })
    }

    /// Forget every recorded skin tone
    pub fn clear_all(&self) -> Result<(), EmojiKitError> {
        self.update(HashMap::clear)
    }

    /// Number of emoji with a recorded choice
    pub fn count(&self) -> u64 {
        self.entries.read().len() as u64
    }
}

/// Make `store` the process-wide preference store. Returns false if one was
/// already installed (the existing store stays in place).
#[uniffi::export]
pub fn install_shared_preferences(store: Arc<PreferenceStore>) -> bool {
    SHARED.set(store).is_ok()
}

/// The process-wide preference store; in-memory unless one was installed first
#[uniffi::export]
pub fn shared_preferences() -> Arc<PreferenceStore> {
    SHARED
        .get_or_init(|| Arc::new(PreferenceStore::in_memory()))
        .clone()
}

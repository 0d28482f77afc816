//! Emoji dataset loading
//!
//! The dataset is a JSON array of records (`emoji`, `description`, `category`,
//! `aliases`, `tags`, optional `skin_tones`, `ios_version`). The complete
//! fully-qualified emoji list (one record per base emoji, toned variants folded
//! into `skin_tones`) ships inside the library and is parsed at most once per
//! process.

use crate::interface::{Emoji, EmojiCategory, EmojiKitError};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

const BUNDLED_DATASET: &str = include_str!("../data/emoji.json");

static BUNDLED: OnceCell<Arc<EmojiCatalog>> = OnceCell::new();

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("emoji data not found at {0}")]
    Missing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed emoji data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// One record as stored in the dataset file
#[derive(Debug, Deserialize)]
struct DatasetRecord {
    emoji: String,
    description: String,
    category: EmojiCategory,
    aliases: Vec<String>,
    tags: Vec<String>,
    #[serde(default)]
    skin_tones: bool,
    ios_version: String,
}

impl From<DatasetRecord> for Emoji {
    fn from(record: DatasetRecord) -> Self {
        Emoji {
            glyph: record.emoji,
            description: record.description,
            category: record.category,
            aliases: record.aliases,
            tags: record.tags,
            supports_skin_tones: record.skin_tones,
            min_version: record.ios_version,
        }
    }
}

/// The master emoji list. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct EmojiCatalog {
    emojis: Vec<Emoji>,
}

impl EmojiCatalog {
    /// The dataset compiled into the library, shared for the whole process
    pub fn bundled() -> CatalogResult<Arc<EmojiCatalog>> {
        BUNDLED
            .get_or_try_init(|| Self::from_json(BUNDLED_DATASET).map(Arc::new))
            .cloned()
    }

    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let records: Vec<DatasetRecord> = serde_json::from_str(json)?;
        let emojis: Vec<Emoji> = records.into_iter().map(Emoji::from).collect();
        tracing::debug!(count = emojis.len(), "loaded emoji catalog");
        Ok(Self { emojis })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CatalogError::Missing(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_emojis(emojis: Vec<Emoji>) -> Self {
        Self { emojis }
    }

    pub fn emojis(&self) -> &[Emoji] {
        &self.emojis
    }

    /// Look up the base (untoned) record for a description
    pub fn get(&self, description: &str) -> Option<&Emoji> {
        self.emojis.iter().find(|e| e.description == description)
    }

    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }
}

/// All emoji from the bundled dataset
pub fn load_all() -> CatalogResult<Vec<Emoji>> {
    Ok(EmojiCatalog::bundled()?.emojis().to_vec())
}

/// All emoji from the bundled dataset, for hosts building their own collections
#[uniffi::export]
pub fn all_emoji() -> Result<Vec<Emoji>, EmojiKitError> {
    Ok(load_all()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_dataset_parses() {
        let catalog = EmojiCatalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        for category in EmojiCategory::ALL {
            assert!(
                catalog.emojis().iter().any(|e| e.category == category),
                "bundled data should cover {}",
                category.label()
            );
        }
    }

    #[test]
    fn test_bundled_dataset_is_complete() {
        let catalog = EmojiCatalog::bundled().unwrap();
        assert!(catalog.len() > 1800, "only {} records bundled", catalog.len());

        let mut seen = std::collections::HashSet::new();
        for emoji in catalog.emojis() {
            assert!(seen.insert(emoji.description.as_str()), "duplicate {}", emoji.description);
            assert!(!emoji.glyph.is_empty());
            // Toned variants are folded into their base record
            assert!(!emoji.glyph.chars().any(|c| ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)));
        }
        for description in ["shaking face", "goose", "flag: Norway", "woman cook"] {
            assert!(catalog.get(description).is_some(), "missing {description}");
        }
    }

    #[test]
    fn test_bundled_is_shared() {
        let a = EmojiCatalog::bundled().unwrap();
        let b = EmojiCatalog::bundled().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_skin_tones_default_false() {
        let catalog = EmojiCatalog::from_json(
            r#"[
                {"emoji": "🍕", "description": "pizza", "category": "Food & Drink",
                 "aliases": ["pizza"], "tags": [], "ios_version": "6.0"},
                {"emoji": "👍", "description": "thumbs up", "category": "People & Body",
                 "aliases": ["+1"], "tags": ["ok"], "skin_tones": true, "ios_version": "6.0",
                 "unicode_version": "6.0"}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.emojis()[0].supports_skin_tones);
        assert!(catalog.emojis()[1].supports_skin_tones);
        assert_eq!(catalog.get("thumbs up").map(|e| e.glyph.as_str()), Some("👍"));
    }

    #[test]
    fn test_unknown_category_is_schema_error() {
        let err = EmojiCatalog::from_json(
            r#"[{"emoji": "x", "description": "x", "category": "Component",
                 "aliases": [], "tags": [], "ios_version": "6.0"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_missing_field_is_schema_error() {
        let err = EmojiCatalog::from_json(r#"[{"emoji": "x", "description": "x"}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EmojiCatalog::from_path("/nonexistent/emoji.json").unwrap_err();
        assert!(matches!(err, CatalogError::Missing(_)));
        let ffi: EmojiKitError = err.into();
        assert!(matches!(ffi, EmojiKitError::DataLoad(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"emoji": "🐶", "description": "dog face", "category": "Animals & Nature",
                 "aliases": ["dog"], "tags": ["pet"], "ios_version": "6.0"}}]"#
        )
        .unwrap();
        let catalog = EmojiCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.emojis()[0].category, EmojiCategory::AnimalsAndNature);
    }
}

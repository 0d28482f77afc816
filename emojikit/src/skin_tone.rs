//! Skin tone rendering at the unicode scalar level.
//!
//! A tone modifier takes exactly one position in a glyph: it replaces the first
//! emoji presentation selector (U+FE0F), otherwise goes right before the first
//! zero width joiner, otherwise at the end.

use crate::interface::{Emoji, SkinTone};

pub(crate) const VARIATION_SELECTOR_16: char = '\u{FE0F}';
pub(crate) const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// Apply `tone` to `glyph`. A `None` tone gives the default (yellow) rendering.
///
/// Does not check whether the emoji supports tones; see [`Emoji::with_skin_tone`].
pub fn apply_tone(glyph: &str, tone: Option<SkinTone>) -> String {
    let Some(tone) = tone else {
        return default_rendering(glyph);
    };
    let modifier = tone.modifier();

    let mut toned = String::with_capacity(glyph.len() + modifier.len_utf8());
    let mut inserted = false;

    for scalar in glyph.chars() {
        if !inserted {
            match scalar {
                VARIATION_SELECTOR_16 => {
                    // Modifier takes the selector's place
                    toned.push(modifier);
                    inserted = true;
                    continue;
                }
                ZERO_WIDTH_JOINER => {
                    toned.push(modifier);
                    inserted = true;
                }
                _ => {}
            }
        }
        toned.push(scalar);
    }

    if !inserted {
        toned.push(modifier);
    }
    toned
}

/// First unicode scalar of the glyph, or the glyph itself when it is empty.
pub fn default_rendering(glyph: &str) -> String {
    glyph
        .chars()
        .next()
        .map(String::from)
        .unwrap_or_else(|| glyph.to_string())
}

/// Render `emoji` with `tone`. `None` when the emoji has no skin tone variants.
#[uniffi::export]
pub fn emoji_with_skin_tone(emoji: Emoji, tone: Option<SkinTone>) -> Option<String> {
    emoji.with_skin_tone(tone)
}

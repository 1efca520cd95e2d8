//! Local user preferences
//!
//! Settings live only for the lifetime of the window; nothing is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interface language
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Portuguese,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Portuguese, Language::Spanish];

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Portuguese => "Portuguese",
            Language::Spanish => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Preferences shown in the settings panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: Language,
    /// Text size step, 0 (smallest) to [`Settings::MAX_TEXT_SIZE`]
    pub text_size: u8,
    /// Suppress idle floating and thinking wobble
    pub reduce_motion: bool,
    pub sound_effects: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::English,
            text_size: 2,
            reduce_motion: false,
            sound_effects: true,
        }
    }
}

impl Settings {
    pub const MAX_TEXT_SIZE: u8 = 5;

    /// Body font size in points at the smallest step
    const BASE_FONT_SIZE: f32 = 12.0;

    pub fn set_text_size(&mut self, size: u8) {
        self.text_size = size.min(Self::MAX_TEXT_SIZE);
    }

    pub fn toggle_reduce_motion(&mut self) {
        self.reduce_motion = !self.reduce_motion;
    }

    pub fn toggle_sound_effects(&mut self) {
        self.sound_effects = !self.sound_effects;
    }

    /// Chat font size for the current text size step
    pub fn font_size(&self) -> f32 {
        Self::BASE_FONT_SIZE + 2.0 * f32::from(self.text_size.min(Self::MAX_TEXT_SIZE))
    }

    /// Copy with out-of-range values pulled back into range
    pub fn normalized(mut self) -> Self {
        self.set_text_size(self.text_size);
        self
    }
}

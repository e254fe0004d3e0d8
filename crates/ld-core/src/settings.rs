//! Draw settings
//!
//! Read-only input to the draw engine. Stored settings are merged over the
//! defaults field by field, so older buckets missing a field still load.

use serde::{Deserialize, Serialize};

/// Easing used by the reveal animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationEffect {
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    Bounce,
}

impl Default for AnimationEffect {
    fn default() -> Self {
        Self::EaseOut
    }
}

impl AnimationEffect {
    pub const ALL: [AnimationEffect; 5] = [
        Self::Ease,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::Bounce,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ease => "ease",
            Self::EaseIn => "easeIn",
            Self::EaseOut => "easeOut",
            Self::EaseInOut => "easeInOut",
            Self::Bounce => "bounce",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == s)
    }
}

/// Draw settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Reveal animation length (seconds)
    pub duration: f64,
    pub animation_effect: AnimationEffect,
    /// Allow a past winner to be drawn again
    pub allow_repeat: bool,
    pub show_history: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duration: 3.0,
            animation_effect: AnimationEffect::EaseOut,
            allow_repeat: true,
            show_history: true,
        }
    }
}

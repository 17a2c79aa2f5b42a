//! Error taxonomy.
//!
//! Everything that can go wrong while loading a deck is either a
//! configuration problem (bad YAML values, missing payloads, conflicting
//! options) or an external renderer failure. Both are fatal at load time;
//! nothing fails during playback. A terminal resize is *not* an error and
//! is modelled separately (see `player::SessionEnd`).

use thiserror::Error;

/// Author-facing configuration problems, always reported with the slide
/// name and the offending field.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("slide '{slide}': missing required field '{field}'")]
    MissingField { slide: String, field: &'static str },

    #[error("slide '{slide}': invalid value for '{field}': {reason}")]
    InvalidValue {
        slide: String,
        field: &'static str,
        reason: String,
    },

    #[error("slide '{slide}': '{a}' and '{b}' can't be used together")]
    Conflict {
        slide: String,
        a: &'static str,
        b: &'static str,
    },

    #[error("slide '{slide}': {reason}")]
    BadSlide { slide: String, reason: String },

    #[error("deck is empty: no slides defined")]
    EmptyDeck,
}

/// External renderer failures, reported with the offending content.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("diagram renderer failed ({reason}) for:\n{content}")]
    Uml { content: String, reason: String },

    #[error("failed to load image '{path}': {reason}")]
    Image { path: String, reason: String },
}

/// Any failure while composing a single slide into effects.
#[derive(Debug, Error)]
pub enum SlideError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

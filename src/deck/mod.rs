//! Deck data model — the human-authored YAML format.
//!
//! A deck file is a top-level mapping: an optional `title` key plus one
//! entry per slide, in presentation order. These types define *what the
//! author said*; turning a slide into timed effects is the engine's job.
//!
//! Parsing happens once at startup. The deck is immutable afterwards.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::ConfigError;
use crate::types::{Attr, NamedColour};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Figlet,
    Text,
    Uml,
    Table,
    Image,
    #[serde(rename = "color-image")]
    ColorImage,
    Box,
}

impl ContentType {
    /// Name of the required payload field in error reports. The table
    /// adapter historically called its payload `data`.
    pub fn payload_field(self) -> &'static str {
        match self {
            ContentType::Table => "data",
            _ => "content",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    Typing,
    Mirage,
    Fire,
    Noise,
}

impl Animation {
    pub fn name(self) -> &'static str {
        match self {
            Animation::Typing => "typing",
            Animation::Mirage => "mirage",
            Animation::Fire => "fire",
            Animation::Noise => "noise",
        }
    }
}

/// Content colour: one of the eight named colours, or one of the two
/// special modes the scheduler expands (per-character rainbow, palette
/// cycling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColourSpec {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Rainbow,
    Cycle,
}

impl ColourSpec {
    /// The fixed colour this spec resolves to, or `None` for the special
    /// modes.
    pub fn named(self) -> Option<NamedColour> {
        Some(match self {
            ColourSpec::Black => NamedColour::Black,
            ColourSpec::Red => NamedColour::Red,
            ColourSpec::Green => NamedColour::Green,
            ColourSpec::Yellow => NamedColour::Yellow,
            ColourSpec::Blue => NamedColour::Blue,
            ColourSpec::Magenta => NamedColour::Magenta,
            ColourSpec::Cyan => NamedColour::Cyan,
            ColourSpec::White => NamedColour::White,
            ColourSpec::Rainbow | ColourSpec::Cycle => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartAnimation {
    Scroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndAnimation {
    Scroll,
    Matrix,
    Shoot,
    Drop,
    Wipe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageAnimation {
    Stars,
    Snow,
    Rain,
    Explosion,
    Fireworks,
}

/// One item inside a slide's `content` list.
///
/// The payload stays a raw YAML value here because its shape depends on
/// `type` (text for most types, a row sequence for tables, a file path
/// for images); the engine validates and interprets it per type.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: ContentType,
    #[serde(default)]
    pub content: Option<serde_yaml::Value>,
    #[serde(default, rename = "afterStart")]
    pub after_start: bool,
    #[serde(default)]
    pub animation: Option<Animation>,
    #[serde(default)]
    pub colour: Option<ColourSpec>,
    #[serde(default)]
    pub x: Option<i64>,
    #[serde(default)]
    pub y: Option<i64>,
    #[serde(default)]
    pub attr: Option<Attr>,
    #[serde(default)]
    pub bg: Option<NamedColour>,
    #[serde(default)]
    pub delay: Option<u64>,
    /// Accepted for deck compatibility; a single built-in figlet font is
    /// shipped so the value is not consulted.
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default, rename = "hasHeader")]
    pub has_header: bool,
}

fn default_duration() -> i64 {
    -1
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slide {
    #[serde(default)]
    pub content: Vec<ContentItem>,
    /// Frame count before the slide auto-advances; negative = unlimited.
    #[serde(default = "default_duration")]
    pub duration: i64,
    #[serde(default, rename = "startAnimation")]
    pub start_animation: Option<StartAnimation>,
    #[serde(default, rename = "endAnimation")]
    pub end_animation: Option<EndAnimation>,
    #[serde(default, rename = "pageAnimation")]
    pub page_animation: Option<PageAnimation>,
    #[serde(default)]
    pub notes: String,
}

/// An ordered deck: slide names in authoring order define navigation
/// order. The top-level `title` key is consumed here and never shown as
/// a slide.
#[derive(Debug, Clone)]
pub struct SlideDeck {
    pub title: String,
    pub slides: Vec<(String, Slide)>,
}

impl SlideDeck {
    pub fn load(path: &Path) -> anyhow::Result<SlideDeck> {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        Ok(Self::parse(&text)?)
    }

    /// Parse deck YAML. Each slide is deserialized individually so an
    /// invalid value is reported against its slide name, not just a
    /// line number in the file.
    pub fn parse(text: &str) -> Result<SlideDeck, ConfigError> {
        let root: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| ConfigError::BadSlide {
                slide: "<deck>".to_owned(),
                reason: e.to_string(),
            })?;
        let mapping = root.as_mapping().ok_or_else(|| ConfigError::BadSlide {
            slide: "<deck>".to_owned(),
            reason: "deck must be a top-level mapping of slide names".to_owned(),
        })?;

        let mut title = String::from("TermSlides");
        let mut slides = Vec::new();

        for (key, value) in mapping {
            let name = key
                .as_str()
                .map(str::to_owned)
                .unwrap_or_else(|| format!("{key:?}"));
            if name == "title" {
                if let Some(t) = value.as_str() {
                    title = t.to_owned();
                }
                continue;
            }
            if slides.iter().any(|(n, _)| *n == name) {
                return Err(ConfigError::BadSlide {
                    slide: name,
                    reason: "duplicate slide name".to_owned(),
                });
            }
            let slide: Slide = serde_yaml::from_value(value.clone()).map_err(|e| {
                ConfigError::BadSlide {
                    slide: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            slides.push((name, slide));
        }

        if slides.is_empty() {
            return Err(ConfigError::EmptyDeck);
        }

        Ok(SlideDeck { title, slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

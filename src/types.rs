//! Shared style and cell primitives.
//!
//! These are the lowest-level data contracts: what a single terminal cell
//! looks like, and the named-colour/attribute vocabulary the deck format
//! exposes. Everything above (renderables, effects, the screen buffer)
//! is built out of these.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColour {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attr {
    Bold,
    #[default]
    Normal,
    Reverse,
    Underline,
}

/// Full style of one drawn character: foreground, attribute, background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharStyle {
    pub fg: NamedColour,
    pub attr: Attr,
    pub bg: NamedColour,
}

impl Default for CharStyle {
    fn default() -> Self {
        CharStyle {
            fg: NamedColour::White,
            attr: Attr::Normal,
            bg: NamedColour::Black,
        }
    }
}

impl CharStyle {
    pub fn fg(colour: NamedColour) -> Self {
        CharStyle {
            fg: colour,
            ..CharStyle::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CharStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: CharStyle::default(),
        }
    }
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

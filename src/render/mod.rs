//! Renderer adapters — content to static images.
//!
//! Every adapter produces the same thing: a `Renderable`, a rectangular-ish
//! grid of characters plus a parallel per-character colour grid. Adapters
//! are pure data transformations with no notion of timing; animating a
//! renderable is the engine's job.

mod boxed;
mod figlet;
mod image;
mod rainbow;
mod table;
mod text;
mod uml;

pub use boxed::boxed_text;
pub use figlet::figlet_text;
pub use image::{colour_image, mono_image};
pub use rainbow::rainbow;
pub use table::table_text;
pub use text::{plain_text, wrap_line};
pub use uml::{UmlCache, uml_text};

use crate::types::CharStyle;

/// The uniform "static image" every adapter produces: character rows and
/// a parallel grid of per-character colour overrides. `None` in the
/// colour grid means "use the effect's fixed style".
#[derive(Debug, Clone)]
pub struct Renderable {
    pub lines: Vec<Vec<char>>,
    pub colours: Vec<Vec<Option<CharStyle>>>,
    pub max_width: usize,
    pub max_height: usize,
}

impl Renderable {
    /// Build from plain text rows; every character uses the fixed style.
    pub fn from_lines(rows: Vec<String>) -> Renderable {
        let lines: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
        let colours = lines.iter().map(|l| vec![None; l.len()]).collect();
        let max_width = lines.iter().map(Vec::len).max().unwrap_or(0);
        let max_height = lines.len();
        Renderable {
            lines,
            colours,
            max_width,
            max_height,
        }
    }

    /// Colour override for the character at (row, col), if any.
    pub fn colour_at(&self, row: usize, col: usize) -> Option<CharStyle> {
        self.colours.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Total character count, used for typing-duration arithmetic.
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lines_tracks_dimensions() {
        let r = Renderable::from_lines(vec!["abc".into(), "de".into()]);
        assert_eq!(r.max_width, 3);
        assert_eq!(r.max_height, 2);
        assert_eq!(r.char_count(), 5);
        assert!(r.colour_at(0, 0).is_none());
    }
}

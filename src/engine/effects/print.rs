//! Plain reveal — paint a renderable every tick while active.

use crate::render::Renderable;
use crate::screen::Screen;
use crate::types::{CharStyle, NamedColour};

use super::Tick;

#[derive(Debug)]
pub struct Print {
    pub rend: Renderable,
    pub x: i64,
    pub y: i64,
    pub style: CharStyle,
    /// Paint only the glyph cells, all in background black — used as the
    /// punch-out mask layer of the fire composite.
    silhouette: bool,
}

impl Print {
    pub fn new(rend: Renderable, x: i64, y: i64, style: CharStyle) -> Print {
        Print {
            rend,
            x,
            y,
            style,
            silhouette: false,
        }
    }

    pub fn silhouette(rend: Renderable, x: i64, y: i64) -> Print {
        Print {
            rend,
            x,
            y,
            style: CharStyle {
                fg: NamedColour::Black,
                bg: NamedColour::Black,
                ..CharStyle::default()
            },
            silhouette: true,
        }
    }
}

impl Tick for Print {
    fn reset(&mut self) {}

    fn update(&mut self, screen: &mut Screen, _t: usize) {
        if self.silhouette {
            // Black out the glyph cells so whatever is layered beneath
            // (the flame backdrop) is punched out where text will sit.
            for (row, line) in self.rend.lines.iter().enumerate() {
                for (col, &ch) in line.iter().enumerate() {
                    if ch != ' ' {
                        screen.put(self.x + col as i64, self.y + row as i64, ' ', self.style);
                    }
                }
            }
        } else {
            screen.paint(&self.rend, self.x, self.y, self.style, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paints_fixed_style_each_tick() {
        let mut s = Screen::new(10, 3);
        let mut p = Print::new(
            Renderable::from_lines(vec!["ab".into()]),
            1,
            1,
            CharStyle::fg(NamedColour::Green),
        );
        p.update(&mut s, 0);
        let cell = s.get(1, 1).unwrap();
        assert_eq!(cell.ch, 'a');
        assert_eq!(cell.style.fg, NamedColour::Green);
    }

    #[test]
    fn silhouette_blanks_glyph_cells_only() {
        let mut s = Screen::new(10, 3);
        s.put(0, 0, '~', CharStyle::default());
        s.put(1, 0, '~', CharStyle::default());
        let mut p = Print::silhouette(Renderable::from_lines(vec!["x ".into()]), 0, 0);
        p.update(&mut s, 0);
        assert!(s.get(0, 0).unwrap().is_blank());
        assert_eq!(s.get(1, 0).unwrap().ch, '~'); // space is transparent
    }
}

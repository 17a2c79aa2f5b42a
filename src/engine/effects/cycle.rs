//! Colour cycle — the whole renderable steps through a palette.

use crate::render::Renderable;
use crate::screen::Screen;
use crate::types::{CharStyle, NamedColour};

use super::Tick;

const PALETTE: [NamedColour; 6] = [
    NamedColour::Red,
    NamedColour::Yellow,
    NamedColour::Green,
    NamedColour::Cyan,
    NamedColour::Blue,
    NamedColour::Magenta,
];

/// Ticks each palette colour is held for.
const HOLD: usize = 2;

#[derive(Debug)]
pub struct Cycle {
    pub rend: Renderable,
    pub x: i64,
    pub y: i64,
}

impl Cycle {
    pub fn new(rend: Renderable, x: i64, y: i64) -> Cycle {
        Cycle { rend, x, y }
    }

    pub fn colour_for(t: usize) -> NamedColour {
        PALETTE[(t / HOLD) % PALETTE.len()]
    }
}

impl Tick for Cycle {
    fn reset(&mut self) {}

    fn update(&mut self, screen: &mut Screen, t: usize) {
        let style = CharStyle::fg(Self::colour_for(t));
        screen.paint(&self.rend, self.x, self.y, style, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_changes_over_time_and_wraps() {
        assert_eq!(Cycle::colour_for(0), Cycle::colour_for(1));
        assert_ne!(Cycle::colour_for(0), Cycle::colour_for(2));
        assert_eq!(Cycle::colour_for(0), Cycle::colour_for(HOLD * PALETTE.len()));
    }

    #[test]
    fn paints_with_current_palette_colour() {
        let mut s = Screen::new(10, 2);
        let mut c = Cycle::new(crate::render::plain_text("z"), 0, 0);
        c.update(&mut s, 4);
        assert_eq!(s.get(0, 0).unwrap().style.fg, Cycle::colour_for(4));
    }
}

//! Static-noise reveal — glyph cells crackle with random characters,
//! showing the true character roughly one tick in five.

use rand::Rng;

use crate::render::Renderable;
use crate::screen::Screen;
use crate::types::CharStyle;

use super::Tick;

const STATIC_CHARS: &[char] = &[
    '#', '$', '%', '&', '*', '+', '=', '?', '@', '/', '\\', '<', '>', '~',
];

#[derive(Debug)]
pub struct Noise {
    pub rend: Renderable,
    pub x: i64,
    pub y: i64,
    pub style: CharStyle,
}

impl Noise {
    pub fn new(rend: Renderable, x: i64, y: i64, style: CharStyle) -> Noise {
        Noise { rend, x, y, style }
    }
}

impl Tick for Noise {
    fn reset(&mut self) {}

    fn update(&mut self, screen: &mut Screen, _t: usize) {
        let mut rng = rand::thread_rng();
        for (r, line) in self.rend.lines.iter().enumerate() {
            for (c, &ch) in line.iter().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let shown = if rng.gen_ratio(1, 5) {
                    ch
                } else {
                    STATIC_CHARS[rng.gen_range(0..STATIC_CHARS.len())]
                };
                screen.put(self.x + c as i64, self.y + r as i64, shown, self.style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_glyph_cell_is_drawn_spaces_stay_blank() {
        let mut s = Screen::new(12, 2);
        let mut n = Noise::new(crate::render::plain_text("ab cd"), 0, 0, CharStyle::default());
        n.update(&mut s, 0);
        for x in [0, 1, 3, 4] {
            assert!(!s.get(x, 0).unwrap().is_blank());
        }
        assert!(s.get(2, 0).unwrap().is_blank());
    }
}

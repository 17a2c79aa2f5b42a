//! Flicker reveal — characters pop in stochastically and stay.
//!
//! Time-boxed, not content-boxed: the scheduler gives the flicker a fixed
//! 30-frame window and chains a plain reveal directly after it.

use rand::Rng;

use crate::render::Renderable;
use crate::screen::Screen;
use crate::types::CharStyle;

use super::Tick;

#[derive(Debug)]
pub struct Mirage {
    pub rend: Renderable,
    pub x: i64,
    pub y: i64,
    pub style: CharStyle,
    revealed: Vec<Vec<bool>>,
}

impl Mirage {
    pub fn new(rend: Renderable, x: i64, y: i64, style: CharStyle) -> Mirage {
        let revealed = rend.lines.iter().map(|l| vec![false; l.len()]).collect();
        Mirage {
            rend,
            x,
            y,
            style,
            revealed,
        }
    }
}

impl Tick for Mirage {
    fn reset(&mut self) {
        for row in &mut self.revealed {
            row.fill(false);
        }
    }

    fn update(&mut self, screen: &mut Screen, t: usize) {
        let mut rng = rand::thread_rng();
        for (r, line) in self.rend.lines.iter().enumerate() {
            for (c, &ch) in line.iter().enumerate() {
                if ch == ' ' {
                    continue;
                }
                // New characters only appear on even ticks; once painted
                // a character is never un-painted.
                if t % 2 == 0 && !self.revealed[r][c] && rng.gen_bool(0.15) {
                    self.revealed[r][c] = true;
                }
                if self.revealed[r][c] {
                    let st = self.rend.colour_at(r, c).unwrap_or(self.style);
                    screen.put(self.x + c as i64, self.y + r as i64, ch, st);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revealed_chars_persist_across_ticks() {
        let mut s = Screen::new(30, 3);
        let mut m = Mirage::new(
            crate::render::plain_text("##########"),
            0,
            0,
            CharStyle::default(),
        );
        for t in 0..200 {
            m.update(&mut s, t);
        }
        // With 100 even ticks at 15% each, all ten cells are revealed
        // with overwhelming probability; at minimum, reveals never
        // regress.
        let shown: usize = (0..10)
            .filter(|&x| s.get(x, 0).map(|c| !c.is_blank()).unwrap_or(false))
            .count();
        assert!(shown > 0);
        let before = m.revealed[0].clone();
        m.update(&mut s, 1); // odd tick reveals nothing new
        assert_eq!(before, m.revealed[0]);
    }

    #[test]
    fn reset_clears_reveals() {
        let mut s = Screen::new(10, 2);
        let mut m = Mirage::new(crate::render::plain_text("####"), 0, 0, CharStyle::default());
        for t in 0..50 {
            m.update(&mut s, t);
        }
        m.reset();
        assert!(m.revealed[0].iter().all(|&b| !b));
    }
}

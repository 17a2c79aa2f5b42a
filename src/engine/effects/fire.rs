//! Flame backdrop — a classic intensity-buffer fire simulation.
//!
//! The bottom row is randomly re-seeded every tick; heat averages upward
//! with decay, and intensity maps to a character/colour ramp. Zero
//! intensity is transparent so the backdrop composes under the silhouette
//! and foreground layers of the fire effect.

use rand::Rng;

use crate::screen::Screen;
use crate::types::{Attr, CharStyle, NamedColour};

use super::Tick;

#[derive(Debug)]
pub struct Fire {
    pub x: i64,
    pub y: i64,
    pub width: usize,
    pub height: usize,
    heat: Vec<Vec<u16>>,
}

impl Fire {
    pub fn new(x: i64, y: i64, width: usize, height: usize) -> Fire {
        Fire {
            x,
            y,
            width,
            height,
            heat: vec![vec![0; width]; height],
        }
    }

    fn cell_for(intensity: u16) -> Option<(char, CharStyle)> {
        let (ch, fg, attr) = match intensity {
            0..=19 => return None,
            20..=69 => ('.', NamedColour::Red, Attr::Normal),
            70..=119 => (':', NamedColour::Red, Attr::Normal),
            120..=169 => ('*', NamedColour::Red, Attr::Bold),
            170..=219 => ('#', NamedColour::Yellow, Attr::Normal),
            _ => ('@', NamedColour::Yellow, Attr::Bold),
        };
        Some((
            ch,
            CharStyle {
                fg,
                attr,
                bg: NamedColour::Black,
            },
        ))
    }
}

impl Tick for Fire {
    fn reset(&mut self) {
        for row in &mut self.heat {
            row.fill(0);
        }
    }

    fn update(&mut self, screen: &mut Screen, _t: usize) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let mut rng = rand::thread_rng();

        // Re-seed emitters along the bottom row.
        let bottom = self.height - 1;
        for x in 0..self.width {
            self.heat[bottom][x] = if rng.gen_bool(0.4) {
                rng.gen_range(180..=255)
            } else {
                self.heat[bottom][x] / 2
            };
        }

        // Heat rises: each cell averages the three cells beneath it,
        // minus a random decay.
        for yy in 0..bottom {
            for x in 0..self.width {
                let below = &self.heat[yy + 1];
                let left = below[x.saturating_sub(1)];
                let mid = below[x];
                let right = below[(x + 1).min(self.width - 1)];
                let avg = (u32::from(left) + u32::from(mid) + u32::from(right)) / 3;
                let decay = rng.gen_range(10..40);
                self.heat[yy][x] = avg.saturating_sub(decay) as u16;
            }
        }

        for (yy, row) in self.heat.iter().enumerate() {
            for (x, &h) in row.iter().enumerate() {
                if let Some((ch, style)) = Self::cell_for(h) {
                    screen.put(self.x + x as i64, self.y + yy as i64, ch, style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_stays_in_range_and_rises() {
        let mut s = Screen::new(20, 10);
        let mut f = Fire::new(0, 0, 10, 8);
        for t in 0..50 {
            f.update(&mut s, t);
        }
        assert!(f.heat.iter().flatten().all(|&h| h <= 255));
        // The bottom half should be hot after 50 ticks.
        let bottom_heat: u32 = f.heat[7].iter().map(|&h| u32::from(h)).sum();
        assert!(bottom_heat > 0);
    }

    #[test]
    fn zero_intensity_is_transparent() {
        assert!(Fire::cell_for(0).is_none());
        assert!(Fire::cell_for(255).is_some());
    }

    #[test]
    fn reset_extinguishes() {
        let mut s = Screen::new(10, 6);
        let mut f = Fire::new(0, 0, 6, 4);
        for t in 0..10 {
            f.update(&mut s, t);
        }
        f.reset();
        assert!(f.heat.iter().flatten().all(|&h| h == 0));
    }
}

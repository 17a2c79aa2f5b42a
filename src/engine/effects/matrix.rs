//! Matrix dissolve — glyph rain overruns the viewport for a fixed number
//! of ticks.

use rand::Rng;

use crate::screen::Screen;
use crate::types::{Attr, CharStyle, NamedColour};

use super::{Command, Tick};

const GLYPHS: &[char] = &[
    '0', '1', 'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', '$', '+', '*', ':', '=',
];

#[derive(Debug)]
struct Column {
    head: i64,
    speed: usize,
    trail: usize,
}

#[derive(Debug)]
pub struct MatrixDissolve {
    width: usize,
    height: usize,
    duration: usize,
    columns: Vec<Column>,
    is_ending: bool,
    current: usize,
    go: bool,
    completed: bool,
}

impl MatrixDissolve {
    pub fn new(width: usize, height: usize, duration: usize, is_ending: bool) -> MatrixDissolve {
        MatrixDissolve {
            width,
            height,
            duration,
            columns: Vec::new(),
            is_ending,
            current: 0,
            go: !is_ending,
            completed: false,
        }
    }

    pub fn duration(&self) -> usize {
        self.duration
    }

    fn seed_columns(&mut self) {
        let mut rng = rand::thread_rng();
        self.columns = (0..self.width)
            .map(|_| Column {
                head: -rng.gen_range(0..self.height.max(1) as i64),
                speed: rng.gen_range(1..=3),
                trail: rng.gen_range(3..10),
            })
            .collect();
    }
}

impl Tick for MatrixDissolve {
    fn reset(&mut self) {
        self.columns.clear();
        self.current = 0;
        self.go = !self.is_ending;
        self.completed = false;
    }

    fn update(&mut self, screen: &mut Screen, t: usize) {
        if self.current >= self.duration {
            if self.is_ending {
                self.completed = true;
            }
            return;
        }
        if !self.go {
            return;
        }
        if self.columns.is_empty() {
            self.seed_columns();
        }
        let mut rng = rand::thread_rng();
        for (x, col) in self.columns.iter_mut().enumerate() {
            if t % col.speed == 0 {
                col.head += 1;
            }
            let head_style = CharStyle {
                fg: NamedColour::White,
                attr: Attr::Bold,
                bg: NamedColour::Black,
            };
            let trail_style = CharStyle::fg(NamedColour::Green);
            screen.put_view(
                x as i64,
                col.head,
                GLYPHS[rng.gen_range(0..GLYPHS.len())],
                head_style,
            );
            for back in 1..=col.trail as i64 {
                screen.put_view(
                    x as i64,
                    col.head - back,
                    GLYPHS[rng.gen_range(0..GLYPHS.len())],
                    trail_style,
                );
            }
            screen.put_view(
                x as i64,
                col.head - col.trail as i64 - 1,
                ' ',
                CharStyle::default(),
            );
            if col.head - col.trail as i64 > self.height as i64 {
                col.head = -rng.gen_range(0..self.height.max(1) as i64);
            }
        }
        self.current += 1;
    }

    fn is_finished(&self) -> bool {
        self.current >= self.duration
    }

    fn completed(&self) -> bool {
        self.completed
    }

    fn consume(&mut self, cmd: Command) -> bool {
        if !self.go && self.current == 0 && cmd == Command::Advance {
            self.go = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_for_exactly_duration_ticks() {
        let mut s = Screen::new(8, 6);
        let mut m = MatrixDissolve::new(8, 6, 5, true);
        assert!(m.consume(Command::Advance));
        for t in 0..10 {
            m.update(&mut s, t);
        }
        assert_eq!(m.current, 5);
        assert!(m.completed());
    }

    #[test]
    fn disarm_blocks_progress() {
        let mut s = Screen::new(8, 6);
        let mut m = MatrixDissolve::new(8, 6, 5, true);
        for t in 0..10 {
            m.update(&mut s, t);
        }
        assert_eq!(m.current, 0);
        assert!(!m.completed());
    }
}

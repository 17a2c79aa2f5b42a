//! Wipe — a clearing bar sweeps top to bottom. Always an ending.

use crate::screen::Screen;
use crate::types::{Attr, CharStyle, NamedColour};

use super::{Command, Tick};

/// Ticks the bar spends on each row.
const TICKS_PER_ROW: usize = 2;

#[derive(Debug)]
pub struct Wipe {
    width: usize,
    height: usize,
    go: bool,
    started_at: Option<usize>,
    completed: bool,
}

impl Wipe {
    pub fn new(width: usize, height: usize) -> Wipe {
        Wipe {
            width,
            height,
            go: false,
            started_at: None,
            completed: false,
        }
    }

    /// Total sweep length: 2 × screen height ticks.
    pub fn duration(&self) -> usize {
        self.height * TICKS_PER_ROW
    }
}

impl Tick for Wipe {
    fn reset(&mut self) {
        self.go = false;
        self.started_at = None;
        self.completed = false;
    }

    fn update(&mut self, screen: &mut Screen, t: usize) {
        if !self.go {
            return;
        }
        let since = t - *self.started_at.get_or_insert(t);
        let row = (since / TICKS_PER_ROW) as i64;
        if row as usize >= self.height {
            // Erase the bar's final resting row.
            for x in 0..self.width as i64 {
                screen.put_view(x, self.height as i64 - 1, ' ', CharStyle::default());
            }
            self.completed = true;
            return;
        }
        let bar = CharStyle {
            fg: NamedColour::White,
            attr: Attr::Reverse,
            bg: NamedColour::Black,
        };
        for x in 0..self.width as i64 {
            screen.put_view(x, row - 1, ' ', CharStyle::default());
            screen.put_view(x, row, ' ', bar);
        }
    }

    fn is_finished(&self) -> bool {
        self.completed
    }

    fn completed(&self) -> bool {
        self.completed
    }

    fn consume(&mut self, cmd: Command) -> bool {
        if !self.go && cmd == Command::Advance {
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
    fn sweep_clears_the_viewport() {
        let mut s = Screen::new(6, 4);
        for y in 0..4 {
            for x in 0..6 {
                s.put(x, y, '#', CharStyle::default());
            }
        }
        let mut w = Wipe::new(6, 4);
        assert!(w.consume(Command::Advance));
        for t in 0..=w.duration() {
            w.update(&mut s, t);
        }
        assert!(w.completed());
        assert!(s.view().iter().all(|row| row.iter().all(|c| c.is_blank())));
    }

    #[test]
    fn duration_is_twice_the_height() {
        assert_eq!(Wipe::new(10, 7).duration(), 14);
    }
}

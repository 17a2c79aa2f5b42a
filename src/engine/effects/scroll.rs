//! Scroll — slide the viewport one screenful down the canvas.
//!
//! Used both ways: as a start animation it carries below-the-fold content
//! into view; as an ending animation it carries the slide off the top.
//! Ending instances start disarmed and wait for space/right-arrow.

use crate::screen::Screen;

use super::{Command, Tick};

#[derive(Debug)]
pub struct Scroll {
    /// Ticks between scroll steps; each step moves `rate` rows.
    pub rate: usize,
    is_ending: bool,
    count: usize,
    current: usize,
    last_step: Option<usize>,
    go: bool,
    completed: bool,
}

impl Scroll {
    pub fn new(screen_height: usize, rate: usize, is_ending: bool) -> Scroll {
        let rate = rate.max(1);
        Scroll {
            rate,
            is_ending,
            count: screen_height / rate,
            current: 0,
            last_step: None,
            go: !is_ending,
            completed: false,
        }
    }

    /// Total ticks this animation occupies once armed.
    pub fn duration(&self) -> usize {
        self.count * self.rate
    }
}

impl Tick for Scroll {
    fn reset(&mut self) {
        self.current = 0;
        self.last_step = None;
        self.go = !self.is_ending;
        self.completed = false;
    }

    fn update(&mut self, screen: &mut Screen, t: usize) {
        if self.current >= self.count {
            if self.is_ending {
                self.completed = true;
            }
            return;
        }
        if !self.go {
            return;
        }
        let due = match self.last_step {
            None => true,
            Some(last) => t - last >= self.rate,
        };
        if due {
            screen.scroll_up(self.rate);
            self.current += 1;
            self.last_step = Some(t);
        }
    }

    fn is_finished(&self) -> bool {
        self.current >= self.count
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
    fn scrolls_exactly_one_screenful() {
        let mut s = Screen::new(10, 6);
        let mut sc = Scroll::new(6, 1, false);
        for t in 0..10 {
            sc.update(&mut s, t);
        }
        assert_eq!(s.start_line(), 6);
        assert!(sc.is_finished());
        assert!(!sc.completed()); // only endings complete
    }

    #[test]
    fn ending_waits_until_armed() {
        let mut s = Screen::new(10, 4);
        let mut sc = Scroll::new(4, 1, true);
        sc.update(&mut s, 0);
        assert_eq!(s.start_line(), 0);
        assert!(sc.consume(Command::Advance));
        assert!(!sc.consume(Command::Advance)); // already armed
        for t in 1..10 {
            sc.update(&mut s, t);
        }
        assert_eq!(s.start_line(), 4);
        assert!(sc.completed());
    }

    #[test]
    fn back_never_arms() {
        let mut sc = Scroll::new(4, 1, true);
        assert!(!sc.consume(Command::Back));
        assert!(!sc.consume(Command::Quit));
    }

    #[test]
    fn rate_slows_stepping() {
        let mut s = Screen::new(10, 6);
        let mut sc = Scroll::new(6, 2, false);
        sc.update(&mut s, 0);
        sc.update(&mut s, 1);
        assert_eq!(s.start_line(), 2); // one step of two rows
        assert_eq!(sc.duration(), 6);
    }
}

//! Typewriter reveal — characters appear a few at a time.

use crate::render::Renderable;
use crate::screen::Screen;
use crate::types::CharStyle;

use super::Tick;

#[derive(Debug)]
pub struct Typing {
    pub rend: Renderable,
    pub x: i64,
    pub y: i64,
    pub style: CharStyle,
    /// Characters revealed per advance.
    pub step: usize,
    /// Ticks between advances.
    pub speed: usize,
    row: usize,
    col: usize,
    finished: bool,
}

impl Typing {
    pub fn new(rend: Renderable, x: i64, y: i64, style: CharStyle) -> Typing {
        Typing {
            rend,
            x,
            y,
            style,
            step: 1,
            speed: 2,
            row: 0,
            col: 0,
            finished: false,
        }
    }

    /// Total ticks from start until every character is revealed; the
    /// scheduler uses this as the effect's natural duration.
    pub fn frame_count(&self) -> usize {
        self.rend.char_count().div_ceil(self.step) * self.speed
    }

    fn advance(&mut self) {
        let lines = &self.rend.lines;
        while self.row < lines.len() && self.col >= lines[self.row].len() {
            self.row += 1;
            self.col = 0;
        }
        if self.row >= lines.len() {
            self.finished = true;
            return;
        }
        // Runs of whitespace appear for free.
        let line = &lines[self.row];
        while self.col < line.len() && line[self.col].is_whitespace() {
            self.col += 1;
        }
        self.col += self.step;
        if self.row + 1 == lines.len() && self.col >= line.len() {
            self.finished = true;
        }
    }

    fn paint_revealed(&self, screen: &mut Screen) {
        for (r, line) in self.rend.lines.iter().enumerate() {
            if r > self.row {
                break;
            }
            let upto = if r < self.row {
                line.len()
            } else {
                self.col.min(line.len())
            };
            for (c, &ch) in line[..upto].iter().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let st = self.rend.colour_at(r, c).unwrap_or(self.style);
                screen.put(self.x + c as i64, self.y + r as i64, ch, st);
            }
        }
    }
}

impl Tick for Typing {
    fn reset(&mut self) {
        self.row = 0;
        self.col = 0;
        self.finished = false;
    }

    fn update(&mut self, screen: &mut Screen, t: usize) {
        if !self.finished && t % self.speed == 0 {
            self.advance();
        }
        self.paint_revealed(screen);
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

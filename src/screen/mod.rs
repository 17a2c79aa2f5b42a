//! Screen — the owned cell canvas effects draw on.
//!
//! The canvas is taller than the terminal: a viewport of `height` rows
//! slides down it as scroll animations advance (content parked below the
//! fold at composition time scrolls into view without any effect having
//! to move). Canvas coordinates are absolute; `*_view` accessors work in
//! viewport space for effects that care about what is visible (particle
//! capture, decorative overlays).
//!
//! The buffer is deliberately terminal-free so the engine and all
//! primitives are testable headless; flushing to a real terminal lives in
//! `screen::term`.

pub mod term;

use crate::types::{Cell, CharStyle};

pub struct Screen {
    width: usize,
    height: usize,
    start_line: usize,
    rows: Vec<Vec<Cell>>,
}

impl Screen {
    pub fn new(width: usize, height: usize) -> Screen {
        Screen {
            width,
            height,
            start_line: 0,
            rows: vec![vec![Cell::default(); width]; height * 2],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// First canvas row currently visible.
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    fn ensure_rows(&mut self, through: usize) {
        while self.rows.len() <= through {
            self.rows.push(vec![Cell::default(); self.width]);
        }
    }

    /// Write one cell at absolute canvas coordinates. Out-of-range x is
    /// clipped; negative y is clipped, positive y grows the canvas.
    pub fn put(&mut self, x: i64, y: i64, ch: char, style: CharStyle) {
        if x < 0 || x as usize >= self.width || y < 0 {
            return;
        }
        let y = y as usize;
        self.ensure_rows(y);
        self.rows[y][x as usize] = Cell { ch, style };
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Viewport-space write (row 0 = top visible row).
    pub fn put_view(&mut self, x: i64, y: i64, ch: char, style: CharStyle) {
        if y < 0 || y as usize >= self.height {
            return;
        }
        self.put(x, y + self.start_line as i64, ch, style);
    }

    pub fn get_view(&self, x: i64, y: i64) -> Option<Cell> {
        if y < 0 || y as usize >= self.height {
            return None;
        }
        self.get(x, y + self.start_line as i64)
    }

    /// Advance the viewport `n` rows down the canvas.
    pub fn scroll_up(&mut self, n: usize) {
        self.start_line += n;
        self.ensure_rows(self.start_line + self.height);
    }

    /// Blank everything and rewind the viewport. Called on slide entry.
    pub fn clear(&mut self) {
        self.start_line = 0;
        self.rows = vec![vec![Cell::default(); self.width]; self.height * 2];
    }

    /// The visible rows, top to bottom.
    pub fn view(&self) -> &[Vec<Cell>] {
        &self.rows[self.start_line..self.start_line + self.height]
    }

    /// Paint a renderable at absolute (x, y) with a fixed style.
    ///
    /// Spaces are transparent (other effects underneath stay visible)
    /// unless `opaque` is set, in which case the full glyph box including
    /// spaces is painted. Per-character colour overrides in the
    /// renderable win over the fixed style.
    pub fn paint(
        &mut self,
        rend: &crate::render::Renderable,
        x: i64,
        y: i64,
        style: CharStyle,
        opaque: bool,
    ) {
        for (row, line) in rend.lines.iter().enumerate() {
            for (col, &ch) in line.iter().enumerate() {
                if ch == ' ' && !opaque {
                    continue;
                }
                let st = rend.colour_at(row, col).unwrap_or(style);
                self.put(x + col as i64, y + row as i64, ch, st);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Renderable;

    #[test]
    fn put_and_get_roundtrip() {
        let mut s = Screen::new(10, 4);
        s.put(2, 1, 'x', CharStyle::default());
        assert_eq!(s.get(2, 1).unwrap().ch, 'x');
        assert!(s.get(-1, 0).is_none());
        // Clipped writes are silently dropped.
        s.put(99, 0, 'y', CharStyle::default());
        s.put(-1, 0, 'y', CharStyle::default());
    }

    #[test]
    fn scrolling_moves_the_viewport_not_the_cells() {
        let mut s = Screen::new(5, 3);
        // Parked one screen below the fold, like scroll-in content.
        s.put(0, 3, 'c', CharStyle::default());
        assert!(s.view()[0][0].is_blank());
        s.scroll_up(3);
        assert_eq!(s.view()[0][0].ch, 'c');
        assert_eq!(s.get_view(0, 0).unwrap().ch, 'c');
    }

    #[test]
    fn canvas_grows_under_deep_scroll() {
        let mut s = Screen::new(4, 4);
        s.scroll_up(40);
        assert_eq!(s.view().len(), 4);
        s.put_view(0, 0, 'z', CharStyle::default());
        assert_eq!(s.get(0, 40).unwrap().ch, 'z');
    }

    #[test]
    fn paint_skips_spaces_unless_opaque() {
        let mut s = Screen::new(6, 2);
        s.put(1, 0, '#', CharStyle::default());
        let r = Renderable::from_lines(vec!["a b".into()]);
        s.paint(&r, 0, 0, CharStyle::default(), false);
        assert_eq!(s.get(1, 0).unwrap().ch, '#'); // transparent space
        s.paint(&r, 0, 0, CharStyle::default(), true);
        assert!(s.get(1, 0).unwrap().is_blank());
    }

    #[test]
    fn clear_rewinds_viewport() {
        let mut s = Screen::new(4, 2);
        s.scroll_up(2);
        s.put_view(0, 0, 'q', CharStyle::default());
        s.clear();
        assert_eq!(s.start_line(), 0);
        assert!(s.view().iter().all(|r| r.iter().all(Cell::is_blank)));
    }
}

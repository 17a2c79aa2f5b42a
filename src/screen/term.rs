//! Terminal flusher — diff the screen's viewport against what the
//! terminal last showed and emit only the changed cells.

use std::io::{self, Write};

use crossterm::{cursor, queue, style};

use crate::types::{Attr, Cell, CharStyle, NamedColour};

use super::Screen;

pub struct TermFlusher {
    shown: Vec<Vec<Cell>>,
}

impl TermFlusher {
    pub fn new(width: usize, height: usize) -> TermFlusher {
        // A cell that can never match forces a full first paint.
        let unshown = Cell {
            ch: '\0',
            style: CharStyle::default(),
        };
        TermFlusher {
            shown: vec![vec![unshown; width]; height],
        }
    }

    /// Emit every viewport cell that differs from the last flush.
    pub fn flush(&mut self, screen: &Screen, stdout: &mut io::Stdout) -> anyhow::Result<()> {
        for (y, row) in screen.view().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if self.shown[y][x] == *cell {
                    continue;
                }
                let cs = to_content_style(&cell.style);
                queue!(
                    stdout,
                    cursor::MoveTo(x as u16, y as u16),
                    style::PrintStyledContent(style::StyledContent::new(cs, cell.ch)),
                )?;
                self.shown[y][x] = *cell;
            }
        }
        stdout.flush()?;
        Ok(())
    }
}

pub fn to_content_style(s: &CharStyle) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    cs.foreground_color = Some(to_ct_color(s.fg));
    cs.background_color = Some(to_ct_color(s.bg));
    match s.attr {
        Attr::Bold => cs.attributes.set(style::Attribute::Bold),
        Attr::Reverse => cs.attributes.set(style::Attribute::Reverse),
        Attr::Underline => cs.attributes.set(style::Attribute::Underlined),
        Attr::Normal => {}
    }
    cs
}

pub fn to_ct_color(c: NamedColour) -> style::Color {
    match c {
        NamedColour::Black => style::Color::Black,
        NamedColour::Red => style::Color::Red,
        NamedColour::Green => style::Color::Green,
        NamedColour::Yellow => style::Color::Yellow,
        NamedColour::Blue => style::Color::Blue,
        NamedColour::Magenta => style::Color::Magenta,
        NamedColour::Cyan => style::Color::Cyan,
        NamedColour::White => style::Color::White,
    }
}

//! Rainbow wrapper — per-character colour over any renderable.

use crate::types::{CharStyle, NamedColour};

use super::Renderable;

const PALETTE: [NamedColour; 6] = [
    NamedColour::Red,
    NamedColour::Yellow,
    NamedColour::Green,
    NamedColour::Cyan,
    NamedColour::Blue,
    NamedColour::Magenta,
];

/// Colour every non-space character diagonally through the palette.
/// The wrapped renderable supplies all colour; effects drawing it should
/// use a white fixed style.
pub fn rainbow(mut rend: Renderable) -> Renderable {
    for (row, line) in rend.lines.iter().enumerate() {
        for (col, &ch) in line.iter().enumerate() {
            if ch != ' ' {
                rend.colours[row][col] =
                    Some(CharStyle::fg(PALETTE[(row + col) % PALETTE.len()]));
            }
        }
    }
    rend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colours_every_visible_char() {
        let r = rainbow(Renderable::from_lines(vec!["a b".into()]));
        assert!(r.colours[0][0].is_some());
        assert!(r.colours[0][1].is_none()); // space stays transparent
        assert!(r.colours[0][2].is_some());
    }

    #[test]
    fn diagonal_neighbours_share_colour() {
        let r = rainbow(Renderable::from_lines(vec!["ab".into(), "cd".into()]));
        assert_eq!(r.colours[0][1], r.colours[1][0]);
        assert_ne!(r.colours[0][0], r.colours[0][1]);
    }
}

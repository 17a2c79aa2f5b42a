//! Figlet-style large text built from a 5-row bitmap font.
//!
//! One built-in font; every glyph is 5 rows tall with a constant row
//! width per glyph. Characters missing from the font render as blanks of
//! average width so spacing stays stable.

use super::Renderable;

const GLYPH_HEIGHT: usize = 5;

fn glyph(ch: char) -> Option<[&'static str; 5]> {
    let g = match ch.to_ascii_uppercase() {
        'A' => [" ## ", "#  #", "####", "#  #", "#  #"],
        'B' => ["### ", "#  #", "### ", "#  #", "### "],
        'C' => [" ###", "#   ", "#   ", "#   ", " ###"],
        'D' => ["### ", "#  #", "#  #", "#  #", "### "],
        'E' => ["####", "#   ", "### ", "#   ", "####"],
        'F' => ["####", "#   ", "### ", "#   ", "#   "],
        'G' => [" ###", "#   ", "# ##", "#  #", " ###"],
        'H' => ["#  #", "#  #", "####", "#  #", "#  #"],
        'I' => ["###", " # ", " # ", " # ", "###"],
        'J' => ["  ##", "   #", "   #", "#  #", " ## "],
        'K' => ["#  #", "# # ", "##  ", "# # ", "#  #"],
        'L' => ["#   ", "#   ", "#   ", "#   ", "####"],
        'M' => ["#   #", "## ##", "# # #", "#   #", "#   #"],
        'N' => ["#   #", "##  #", "# # #", "#  ##", "#   #"],
        'O' => [" ## ", "#  #", "#  #", "#  #", " ## "],
        'P' => ["### ", "#  #", "### ", "#   ", "#   "],
        'Q' => [" ## ", "#  #", "#  #", "# ##", " ###"],
        'R' => ["### ", "#  #", "### ", "# # ", "#  #"],
        'S' => [" ###", "#   ", " ## ", "   #", "### "],
        'T' => ["#####", "  #  ", "  #  ", "  #  ", "  #  "],
        'U' => ["#  #", "#  #", "#  #", "#  #", " ## "],
        'V' => ["#   #", "#   #", " # # ", " # # ", "  #  "],
        'W' => ["#   #", "#   #", "# # #", "## ##", "#   #"],
        'X' => ["#   #", " # # ", "  #  ", " # # ", "#   #"],
        'Y' => ["#   #", " # # ", "  #  ", "  #  ", "  #  "],
        'Z' => ["####", "  # ", " #  ", "#   ", "####"],
        '0' => [" ## ", "#  #", "#  #", "#  #", " ## "],
        '1' => [" # ", "## ", " # ", " # ", "###"],
        '2' => [" ## ", "#  #", "  # ", " #  ", "####"],
        '3' => ["### ", "   #", " ## ", "   #", "### "],
        '4' => ["#  #", "#  #", "####", "   #", "   #"],
        '5' => ["####", "#   ", "### ", "   #", "### "],
        '6' => [" ## ", "#   ", "### ", "#  #", " ## "],
        '7' => ["####", "   #", "  # ", " #  ", " #  "],
        '8' => [" ## ", "#  #", " ## ", "#  #", " ## "],
        '9' => [" ## ", "#  #", " ###", "   #", " ## "],
        ' ' => ["  ", "  ", "  ", "  ", "  "],
        '!' => ["#", "#", "#", " ", "#"],
        '.' => [" ", " ", " ", " ", "#"],
        ',' => [" ", " ", " ", "#", "#"],
        '-' => ["    ", "    ", "####", "    ", "    "],
        '?' => [" ## ", "#  #", "  # ", "    ", "  # "],
        ':' => [" ", "#", " ", "#", " "],
        '\'' => ["#", "#", " ", " ", " "],
        _ => return None,
    };
    debug_assert!(g.iter().all(|row| row.len() == g[0].len()));
    Some(g)
}

/// Render `text` as large bitmap-font rows with one blank column between
/// glyphs. Unknown characters become 3-column blanks.
pub fn figlet_text(text: &str) -> Renderable {
    let mut rows = vec![String::new(); GLYPH_HEIGHT];
    let mut first = true;
    for ch in text.chars() {
        let g = glyph(ch).unwrap_or(["   ", "   ", "   ", "   ", "   "]);
        for (i, row) in rows.iter_mut().enumerate() {
            if !first {
                row.push(' ');
            }
            row.push_str(g[i]);
        }
        first = false;
    }
    Renderable::from_lines(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figlet_is_five_rows_of_equal_width() {
        let r = figlet_text("HI");
        assert_eq!(r.max_height, GLYPH_HEIGHT);
        assert!(r.lines.iter().all(|l| l.len() == r.max_width));
        // H (4) + space + I (3)
        assert_eq!(r.max_width, 8);
    }

    #[test]
    fn unknown_chars_keep_spacing() {
        let r = figlet_text("A~B");
        assert!(r.max_width > figlet_text("AB").max_width);
    }

    #[test]
    fn lowercase_folds_to_uppercase() {
        assert_eq!(figlet_text("hi").lines, figlet_text("HI").lines);
    }
}

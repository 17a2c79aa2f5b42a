//! Tabular data → fixed-width character grid.
//!
//! Columns are sized to their widest cell. Numeric columns (every
//! non-header cell parses as a number) are right-aligned; everything else
//! is left-aligned. An optional header row is drawn bold with a heavier
//! separator beneath it.

use crate::types::{Attr, CharStyle};

use super::Renderable;

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.trim().parse::<f64>().is_ok()
}

/// Render `rows` as a bordered grid.
pub fn table_text(rows: &[Vec<String>], has_header: bool) -> Renderable {
    let ncols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if ncols == 0 || rows.is_empty() {
        return Renderable::from_lines(Vec::new());
    }

    let cell = |r: usize, c: usize| -> &str {
        rows.get(r).and_then(|row| row.get(c)).map_or("", String::as_str)
    };

    let mut widths = vec![1usize; ncols];
    for r in 0..rows.len() {
        for (c, w) in widths.iter_mut().enumerate() {
            *w = (*w).max(cell(r, c).chars().count());
        }
    }
    let numeric: Vec<bool> = (0..ncols)
        .map(|c| {
            let body = rows.iter().enumerate().filter(|(r, _)| !(has_header && *r == 0));
            let mut any = false;
            for (r, _) in body {
                let v = cell(r, c);
                if v.is_empty() {
                    continue;
                }
                if !is_numeric(v) {
                    return false;
                }
                any = true;
            }
            any
        })
        .collect();

    let border = |left: char, mid: char, right: char, fill: char| -> String {
        let mut s = String::new();
        s.push(left);
        for (c, w) in widths.iter().enumerate() {
            if c > 0 {
                s.push(mid);
            }
            for _ in 0..w + 2 {
                s.push(fill);
            }
        }
        s.push(right);
        s
    };

    let mut lines = Vec::new();
    let mut header_rows: Vec<usize> = Vec::new();
    lines.push(border('┌', '┬', '┐', '─'));
    for r in 0..rows.len() {
        let mut line = String::new();
        line.push('│');
        for (c, w) in widths.iter().enumerate() {
            let v = cell(r, c);
            let pad = w - v.chars().count();
            line.push(' ');
            if numeric[c] && !(has_header && r == 0) {
                for _ in 0..pad {
                    line.push(' ');
                }
                line.push_str(v);
            } else {
                line.push_str(v);
                for _ in 0..pad {
                    line.push(' ');
                }
            }
            line.push(' ');
            line.push('│');
        }
        if has_header && r == 0 {
            header_rows.push(lines.len());
        }
        lines.push(line);
        if r + 1 < rows.len() {
            let fill = if has_header && r == 0 { '═' } else { '─' };
            let (l, m, rt) = if fill == '═' { ('╞', '╪', '╡') } else { ('├', '┼', '┤') };
            lines.push(border(l, m, rt, fill));
        }
    }
    lines.push(border('└', '┴', '┘', '─'));

    let mut rend = Renderable::from_lines(lines);
    let bold = CharStyle {
        attr: Attr::Bold,
        ..CharStyle::default()
    };
    for row in header_rows {
        for slot in &mut rend.colours[row] {
            *slot = Some(bold);
        }
    }
    rend
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| (*s).to_owned()).collect())
            .collect()
    }

    #[test]
    fn grid_has_borders_and_equal_rows() {
        let r = table_text(&rows(&[&["name", "qty"], &["ant", "3"]]), true);
        assert!(r.lines[0].iter().collect::<String>().starts_with('┌'));
        assert!(r.lines.iter().all(|l| l.len() == r.max_width));
        // border, header, header sep, body, border
        assert_eq!(r.max_height, 5);
    }

    #[test]
    fn numeric_columns_right_align() {
        let r = table_text(&rows(&[&["a", "5"], &["bb", "100"]]), false);
        let row0: String = r.lines[1].iter().collect();
        let row1: String = r.lines[3].iter().collect();
        assert!(row0.contains("│   5 │"), "got {row0}");
        assert!(row1.contains("│ 100 │"), "got {row1}");
    }

    #[test]
    fn header_row_is_bold() {
        let r = table_text(&rows(&[&["h"], &["b"]]), true);
        assert!(r.colours[1].iter().all(|c| c.is_some()));
        assert!(r.colours[3].iter().all(|c| c.is_none()));
    }
}

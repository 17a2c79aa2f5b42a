//! Box adapter — text inside a box-drawing border.

use super::Renderable;

/// Render text surrounded by a single-cell box-drawing border with one
/// column of padding.
pub fn boxed_text(text: &str) -> Renderable {
    let body: Vec<&str> = text.lines().collect();
    let inner = body.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut rows = Vec::with_capacity(body.len() + 2);
    let horiz: String = std::iter::repeat_n('─', inner + 2).collect();
    rows.push(format!("┌{horiz}┐"));
    for line in &body {
        let pad = inner - line.chars().count();
        rows.push(format!("│ {}{} │", line, " ".repeat(pad)));
    }
    rows.push(format!("└{horiz}┘"));
    Renderable::from_lines(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_surrounds_longest_line() {
        let r = boxed_text("hi\nthere");
        assert_eq!(r.max_height, 4);
        assert_eq!(r.max_width, "there".len() + 4);
        let top: String = r.lines[0].iter().collect();
        assert!(top.starts_with('┌') && top.ends_with('┐'));
        assert!(r.lines.iter().all(|l| l.len() == r.max_width));
    }
}

//! Plain-text adapter and the shared word-wrap helper.

use super::Renderable;

/// Render text as-is, one row per input line.
pub fn plain_text(text: &str) -> Renderable {
    Renderable::from_lines(text.lines().map(str::to_owned).collect())
}

/// Wrap a single logical line to `w` columns using word-breaking.
///
/// Breaks happen at spaces where possible; the space at the break point
/// is consumed so no row starts with an accidental leading space. When no
/// space exists within the width the line is hard-broken.
pub fn wrap_line(line: &str, w: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() || w == 0 {
        return vec![String::new()];
    }
    let mut rows = Vec::new();
    let mut pos = 0usize;
    while pos < chars.len() {
        let remaining = &chars[pos..];
        if remaining.len() <= w {
            rows.push(remaining.iter().collect());
            break;
        }
        let chunk = &remaining[..w];
        let (row_len, advance) = match chunk.iter().rposition(|&c| c == ' ') {
            Some(sp) => (sp, sp + 1),
            None => (w, w),
        };
        rows.push(remaining[..row_len].iter().collect());
        pos += advance;
        while pos < chars.len() && chars[pos] == ' ' {
            pos += 1;
        }
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiline_text_keeps_rows() {
        let r = plain_text("one\ntwo three");
        assert_eq!(r.max_height, 2);
        assert_eq!(r.max_width, 9);
    }

    #[test]
    fn wrap_breaks_on_spaces() {
        assert_eq!(wrap_line("hello wide world", 6), vec!["hello", "wide", "world"]);
    }

    #[test]
    fn wrap_hard_breaks_long_words() {
        assert_eq!(wrap_line("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }
}

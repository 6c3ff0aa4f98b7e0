//! Formatting utilities used for CLI outputs.

use crate::models::status::Status;
use crate::utils::colors::{BLUE, CYAN, GREY, MAGENTA, YELLOW};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Left-align `s` in `width` terminal columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Cut `s` to at most `width` terminal columns, marking the cut with `…`.
/// Newlines are flattened so a note stays on one table row.
pub fn truncate(s: &str, width: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if UnicodeWidthStr::width(flat.as_str()) <= width {
        return flat;
    }

    let mut out = String::new();
    let mut used = 0;
    for c in flat.chars() {
        let cw = c.width().unwrap_or(0);
        if used + cw + 1 > width {
            break;
        }
        out.push(c);
        used += cw;
    }
    out.push('…');
    out
}

/// Colour for a status label.
pub fn status_color(status: Status) -> &'static str {
    match status {
        Status::Wfh => CYAN,
        Status::Wfo => BLUE,
        Status::Cuti => MAGENTA,
        Status::OnSite => YELLOW,
        Status::NoInput => GREY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_flattens_and_cuts() {
        assert_eq!(truncate("a\nb", 10), "a b");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(pad_right("ab", 4), "ab  ");
    }
}

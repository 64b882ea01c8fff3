use unicode_width::UnicodeWidthStr;

/// Pad a cell to a fixed display width. Worker and hospital names carry
/// accented characters, so byte length is not the display width.
pub fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(width - w))
}

/// Shorten an opaque id for table display.
pub fn short_id(id: &str) -> &str {
    if id.len() > 8 { &id[..8] } else { id }
}

//! HTML escaping applied to wrapped output when `--html` is given.

/// Escape text for embedding in markup. Applied to each wrapped line after
/// width accounting, so escaped entities never force an extra break.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{A0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

//! Resolved invocation settings and environment-derived defaults.

use std::path::PathBuf;

use clap::ValueEnum;
use regex::Regex;

use crate::encoding::Encoding;

/// Fallback when neither `COLUMNS` nor the terminal reports a width.
pub const DEFAULT_WIDTH: usize = 80;

/// What to do with a single word that is wider than the wrap width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Overflow {
    /// Leave the word intact on an over-wide line
    #[default]
    Visible,
    /// Truncate the word and append the ellipsis string
    Clip,
    /// Break the word at the width boundary, appending the hyphen string
    Anywhere,
}

/// The polymorphic `--indent` value, resolved once during option resolution.
///
/// `"2"` means "repeat the indent character twice"; anything that does not
/// parse as a non-negative integer is a literal prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indent {
    Literal(String),
    Repeat(usize),
}

impl Indent {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<usize>() {
            Ok(n) => Indent::Repeat(n),
            Err(_) => Indent::Literal(raw.to_string()),
        }
    }

    /// Render the indent into the string prepended to each wrapped line.
    pub fn render(&self, indent_char: &str) -> String {
        match self {
            Indent::Literal(s) => s.clone(),
            Indent::Repeat(n) => indent_char.repeat(*n),
        }
    }
}

/// Parse the `--firstCol` value. `"NaN"` (and anything else that is not a
/// non-negative integer) is the sentinel meaning "use the indent width".
pub fn parse_first_col(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok()
}

/// Resolve the wrap width: explicit flag, then the `COLUMNS` environment
/// variable, then the attached terminal, then [`DEFAULT_WIDTH`].
pub fn detect_width(explicit: Option<usize>) -> usize {
    if let Some(w) = explicit {
        return w;
    }
    if let Some(w) = std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse::<usize>().ok())
        .filter(|&w| w > 0)
    {
        return w;
    }
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .filter(|&w| w > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

/// The platform's native line ending, used when `--newline` is not given.
pub fn default_newline() -> String {
    if cfg!(windows) { "\r\n" } else { "\n" }.to_string()
}

/// Fully-resolved invocation configuration. Built once from the parsed
/// arguments and environment defaults, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    pub encoding: Encoding,
    pub width: usize,
    /// Rendered indent prefix (literal text, or `indentChar` repeated)
    pub indent: String,
    /// Whether the first output line of each unit receives the indent
    pub indent_first: bool,
    /// Indent even when the input is empty
    pub indent_empty: bool,
    /// Columns already consumed on the first line when `indent_first` is
    /// false; `None` is the NaN sentinel ("use the indent width")
    pub first_col: Option<usize>,
    pub overflow: Overflow,
    pub ellipsis: String,
    pub hyphen: String,
    /// Separator between output lines, and terminator after each unit
    pub newline: String,
    /// Pattern matching embedded line breaks to normalize; `None` leaves
    /// newlines in place
    pub is_newline: Option<Regex>,
    pub newline_replacement: String,
    pub locale: Option<String>,
    pub html: bool,
    pub out_file: Option<PathBuf>,
    /// Inline `--text` fragments, in argv order
    pub text: Vec<String>,
    /// Positional sources, in argv order; `-` means stdin
    pub files: Vec<String>,
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_numeric_is_repeat() {
        assert_eq!(Indent::parse("2"), Indent::Repeat(2));
        assert_eq!(Indent::parse("0"), Indent::Repeat(0));
    }

    #[test]
    fn test_indent_text_is_literal() {
        assert_eq!(Indent::parse("ab"), Indent::Literal("ab".to_string()));
        assert_eq!(Indent::parse(""), Indent::Literal(String::new()));
        // Negative counts are not repeat counts
        assert_eq!(Indent::parse("-1"), Indent::Literal("-1".to_string()));
    }

    #[test]
    fn test_indent_render_repeats_indent_char() {
        assert_eq!(Indent::Repeat(2).render(" "), "  ");
        // indentChar may be multi-character
        assert_eq!(Indent::Repeat(2).render("12"), "1212");
        assert_eq!(Indent::Repeat(0).render("x"), "");
    }

    #[test]
    fn test_indent_render_literal_ignores_indent_char() {
        assert_eq!(Indent::Literal("> ".to_string()).render("x"), "> ");
    }

    #[test]
    fn test_first_col_nan_sentinel() {
        assert_eq!(parse_first_col("NaN"), None);
        assert_eq!(parse_first_col("bogus"), None);
        assert_eq!(parse_first_col("0"), Some(0));
        assert_eq!(parse_first_col("12"), Some(12));
    }

    #[test]
    fn test_detect_width_prefers_explicit() {
        assert_eq!(detect_width(Some(42)), 42);
    }

    #[test]
    fn test_default_newline_matches_platform() {
        let nl = default_newline();
        if cfg!(windows) {
            assert_eq!(nl, "\r\n");
        } else {
            assert_eq!(nl, "\n");
        }
    }
}

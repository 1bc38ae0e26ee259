//! Greedy word-wrapping to a display width.
//!
//! Width accounting uses terminal columns (`unicode-width`) and breaks
//! over-wide words on grapheme-cluster boundaries (`unicode-segmentation`),
//! so CJK text and emoji wrap correctly. HTML escaping happens after width
//! accounting, so escaped entities never force an extra break.

use std::borrow::Cow;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::config::{Overflow, Settings};
use crate::escape::html_escape;

/// Escape hook applied to each wrapped line before the indent is prepended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escape {
    #[default]
    Identity,
    Html,
}

impl Escape {
    fn apply<'a>(self, line: &'a str) -> Cow<'a, str> {
        match self {
            Escape::Identity => Cow::Borrowed(line),
            Escape::Html => Cow::Owned(html_escape(line)),
        }
    }
}

/// Fully-resolved wrapping configuration, independent of where the text
/// comes from or goes to.
#[derive(Debug, Clone)]
pub struct WrapOptions {
    pub width: usize,
    /// Rendered indent prefix for every line (first line only when
    /// `indent_first`)
    pub indent: String,
    pub indent_first: bool,
    /// Emit the bare indent for empty input instead of nothing
    pub indent_empty: bool,
    /// Columns the first line already consumed externally when
    /// `indent_first` is false; `None` means "use the indent width"
    pub first_col: Option<usize>,
    pub overflow: Overflow,
    pub ellipsis: String,
    pub hyphen: String,
    /// Separator between output lines
    pub newline: String,
    /// When set, matches are replaced with `newline_replacement` before
    /// wrapping; when `None`, embedded line breaks are preserved
    pub is_newline: Option<Regex>,
    pub newline_replacement: String,
    /// Accepted for interface parity; grapheme segmentation is not locale
    /// sensitive here
    pub locale: Option<String>,
    pub escape: Escape,
}

impl WrapOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        WrapOptions {
            width: settings.width,
            indent: settings.indent.clone(),
            indent_first: settings.indent_first,
            indent_empty: settings.indent_empty,
            first_col: settings.first_col,
            overflow: settings.overflow,
            ellipsis: settings.ellipsis.clone(),
            hyphen: settings.hyphen.clone(),
            newline: settings.newline.clone(),
            is_newline: settings.is_newline.clone(),
            newline_replacement: settings.newline_replacement.clone(),
            locale: settings.locale.clone(),
            escape: if settings.html {
                Escape::Html
            } else {
                Escape::Identity
            },
        }
    }
}

/// A configured wrapping engine. Construct once per invocation, then call
/// [`Wrapper::fill`] for each independent unit of text.
pub struct Wrapper {
    opts: WrapOptions,
    indent_width: usize,
}

impl Wrapper {
    pub fn new(opts: WrapOptions) -> Self {
        let indent_width = opts.indent.width();
        Wrapper { opts, indent_width }
    }

    pub fn options(&self) -> &WrapOptions {
        &self.opts
    }

    /// Wrap one unit of text. Lines are joined with the configured newline;
    /// the caller appends the unit terminator.
    pub fn fill(&self, text: &str) -> String {
        let mut raw_lines: Vec<String> = Vec::new();
        match &self.opts.is_newline {
            Some(re) => {
                let normalized =
                    re.replace_all(text, self.opts.newline_replacement.as_str());
                self.wrap_paragraph(&normalized, true, &mut raw_lines);
            }
            None => {
                // Normalization disabled: hard line breaks are preserved,
                // each input line wraps independently. A trailing break is
                // dropped, matching normalization mode where it becomes
                // trailing whitespace and is trimmed.
                for (i, hard) in text.lines().enumerate() {
                    let before = raw_lines.len();
                    self.wrap_paragraph(hard, i == 0, &mut raw_lines);
                    if raw_lines.len() == before {
                        raw_lines.push(String::new());
                    }
                }
            }
        }

        if raw_lines.is_empty() {
            return if self.opts.indent_empty {
                self.opts.indent.clone()
            } else {
                String::new()
            };
        }

        let mut out = String::new();
        for (i, line) in raw_lines.iter().enumerate() {
            if i > 0 {
                out.push_str(&self.opts.newline);
            }
            if i > 0 || self.opts.indent_first {
                out.push_str(&self.opts.indent);
            }
            out.push_str(&self.opts.escape.apply(line));
        }
        out
    }

    /// Greedy fill of one paragraph, appending content lines (no indent, not
    /// yet escaped) to `lines`. `unit_first` marks the paragraph whose first
    /// line is the unit's first output line.
    fn wrap_paragraph(&self, text: &str, unit_first: bool, lines: &mut Vec<String>) {
        let rest_avail = self.opts.width.saturating_sub(self.indent_width).max(1);
        let first_avail = if !unit_first || self.opts.indent_first {
            rest_avail
        } else {
            // firstCol only applies to an outdented first line; the NaN
            // sentinel falls back to the indent width
            let consumed = self.opts.first_col.unwrap_or(self.indent_width);
            self.opts.width.saturating_sub(consumed).max(1)
        };
        let start = lines.len();

        let mut current = String::new();
        let mut current_width = 0usize;

        for word in split_words(text) {
            let word_width = word.width();
            let avail = if lines.len() == start {
                first_avail
            } else {
                rest_avail
            };

            if current.is_empty() {
                if word_width <= avail {
                    current.push_str(word);
                    current_width = word_width;
                } else {
                    self.place_overflow(word, avail, lines, &mut current, &mut current_width);
                }
            } else if current_width + 1 + word_width <= avail {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
                if word_width <= rest_avail {
                    current.push_str(word);
                    current_width = word_width;
                } else {
                    self.place_overflow(
                        word,
                        rest_avail,
                        lines,
                        &mut current,
                        &mut current_width,
                    );
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    /// Place a word wider than the available width, per the overflow mode.
    fn place_overflow(
        &self,
        word: &str,
        avail: usize,
        lines: &mut Vec<String>,
        current: &mut String,
        current_width: &mut usize,
    ) {
        match self.opts.overflow {
            Overflow::Visible => {
                current.push_str(word);
                *current_width = word.width();
            }
            Overflow::Clip => {
                let keep = avail.saturating_sub(self.opts.ellipsis.width());
                let (head, _) = take_width(word, keep);
                lines.push(format!("{head}{}", self.opts.ellipsis));
            }
            Overflow::Anywhere => {
                let chunk = avail.saturating_sub(self.opts.hyphen.width()).max(1);
                let mut rest = word;
                while rest.width() > chunk {
                    let (head, tail) = take_width(rest, chunk);
                    lines.push(format!("{head}{}", self.opts.hyphen));
                    rest = tail;
                }
                current.push_str(rest);
                *current_width = rest.width();
            }
        }
    }
}

/// Split on breaking whitespace. U+00A0 is non-breaking and stays inside its
/// word.
fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() && c != '\u{A0}')
        .filter(|w| !w.is_empty())
}

/// Longest prefix of `s` with display width at most `max`, split on a
/// grapheme boundary. Takes at least one grapheme when `max > 0` so callers
/// always make progress.
fn take_width(s: &str, max: usize) -> (&str, &str) {
    if max == 0 {
        return ("", s);
    }
    let mut end = 0usize;
    let mut used = 0usize;
    for (i, g) in s.grapheme_indices(true) {
        let gw = g.width();
        if end > 0 && used + gw > max {
            break;
        }
        end = i + g.len();
        used += gw;
    }
    (&s[..end], &s[end..])
}

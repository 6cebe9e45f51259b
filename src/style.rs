//! ANSI styling and text layout engine.
//!
//! Renders plain text into ANSI-coded, word-wrapped, aligned and margined
//! fragments. Rendering is idempotent: feeding already-styled text back in
//! merges the escape codes as a set instead of nesting new sequences around
//! the old ones.

use crate::error::{Result, UiError};
use std::collections::BTreeSet;
use tracing::warn;

/// Trailing SGR reset appended to every styled fragment.
pub const RESET: &str = "\x1b[00m";

const ESC: &str = "\x1b[";

/// The eight classic terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// SGR foreground code for this color
    fn fg_code(self) -> &'static str {
        match self {
            Color::Black => "30",
            Color::Red => "31",
            Color::Green => "32",
            Color::Yellow => "33",
            Color::Blue => "34",
            Color::Magenta => "35",
            Color::Cyan => "36",
            Color::White => "37",
        }
    }

    /// SGR background code for this color
    fn bg_code(self) -> &'static str {
        match self {
            Color::Black => "40",
            Color::Red => "41",
            Color::Green => "42",
            Color::Yellow => "43",
            Color::Blue => "44",
            Color::Magenta => "45",
            Color::Cyan => "46",
            Color::White => "47",
        }
    }
}

/// Text decorations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decor {
    Highlight,
    Underline,
    Reverse,
}

impl Decor {
    fn code(self) -> &'static str {
        match self {
            Decor::Highlight => "01",
            Decor::Underline => "04",
            Decor::Reverse => "07",
        }
    }
}

/// Horizontal alignment of the final wrapped segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

/// Per-widget styling and layout parameters.
///
/// `width` may start unset; the compositor resolves it once at
/// registration time. Rendering through [`StyleSpec::frame`] before the
/// width is resolved is a programming error.
#[derive(Debug, Clone, Default)]
pub struct StyleSpec {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub width: Option<usize>,
    pub align: Align,
    pub left_margin: usize,
    pub right_margin: usize,
    pub margin: usize,
}

impl StyleSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn left_margin(mut self, cells: usize) -> Self {
        self.left_margin = cells;
        self
    }

    pub fn right_margin(mut self, cells: usize) -> Self {
        self.right_margin = cells;
        self
    }

    /// Symmetric margin, used when neither side margin is set
    pub fn margin(mut self, cells: usize) -> Self {
        self.margin = cells;
        self
    }

    /// Render `text` with this spec's foreground and background colors.
    ///
    /// Any escape codes already present on `text` are merged, not nested.
    pub fn render(&self, text: &str) -> String {
        self.render_with(text, &[])
    }

    /// Render with this spec's colors plus extra decorations
    pub fn render_with(&self, text: &str, decor: &[Decor]) -> String {
        let (mut codes, payload) = split_codes(text);
        if let Some(fg) = self.fg {
            codes.insert(fg.fg_code().to_string());
        }
        if let Some(bg) = self.bg {
            codes.insert(bg.bg_code().to_string());
        }
        for d in decor {
            codes.insert(d.code().to_string());
        }
        emit(&codes, &payload)
    }

    /// Split `text` into width-sized segments.
    ///
    /// All segments except possibly the last are exactly `width` characters
    /// of payload; the last one is padded to `width` per the alignment. Any
    /// ANSI prefix on the input is preserved on every segment.
    pub fn wrap(&self, text: &str) -> Result<Vec<String>> {
        let width = self.width.filter(|w| *w > 0).ok_or(UiError::WidthUnresolved)?;
        let (codes, payload) = split_codes(text);
        let chars: Vec<char> = payload.chars().collect();
        let segment_count = if chars.is_empty() {
            1
        } else {
            chars.len().div_ceil(width)
        };

        let mut segments = Vec::with_capacity(segment_count);
        for n in 0..segment_count {
            let start = n * width;
            let end = (start + width).min(chars.len());
            let chunk: String = chars[start..end].iter().collect();
            let chunk = if n + 1 == segment_count {
                pad(&chunk, width, self.align)
            } else {
                chunk
            };
            segments.push(emit(&codes, &chunk));
        }
        Ok(segments)
    }

    /// Wrap, colorize and margin `text` into display-ready lines.
    ///
    /// Requires a resolved width. If a side margin is set the two sides pad
    /// independently, otherwise the symmetric margin pads both.
    pub fn frame(&self, text: &str) -> Result<Vec<String>> {
        let (left, right) = if self.left_margin > 0 || self.right_margin > 0 {
            (self.left_margin, self.right_margin)
        } else {
            (self.margin, self.margin)
        };
        let lines = self
            .wrap(text)?
            .iter()
            .map(|segment| {
                format!(
                    "{}{}{}",
                    " ".repeat(left),
                    self.render(segment),
                    " ".repeat(right)
                )
            })
            .collect();
        Ok(lines)
    }
}

/// Apply decorations without any color, merging existing codes
pub fn decorate(text: &str, decor: &[Decor]) -> String {
    let (mut codes, payload) = split_codes(text);
    for d in decor {
        codes.insert(d.code().to_string());
    }
    emit(&codes, &payload)
}

/// Remove every SGR escape sequence from `text`, keeping the visible payload
pub fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('\x1b') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find('m') {
            Some(end) => rest = &tail[end + 1..],
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Split styled text into its SGR code set and plain payload.
///
/// A well-formed styled fragment is `ESC [ codes m payload ESC [ 00 m`.
/// Anything else that starts with an escape byte is malformed input and
/// degrades to plain text. The reset code itself is never kept in the set.
fn split_codes(text: &str) -> (BTreeSet<String>, String) {
    if !text.starts_with(ESC) {
        return (BTreeSet::new(), text.to_string());
    }
    let Some(code_end) = text.find('m') else {
        warn!("malformed ANSI prefix without terminator; treating as plain text");
        return (BTreeSet::new(), text.to_string());
    };
    let Some(payload) = text[code_end + 1..].strip_suffix(RESET) else {
        warn!("styled text without trailing reset; treating as plain text");
        return (BTreeSet::new(), text.to_string());
    };
    let codes: BTreeSet<String> = text[ESC.len()..code_end]
        .split(';')
        .filter(|code| !code.is_empty() && *code != "00")
        .map(str::to_owned)
        .collect();
    if codes.iter().any(|code| !code.bytes().all(|b| b.is_ascii_digit())) {
        warn!("non-numeric SGR parameters; treating as plain text");
        return (BTreeSet::new(), text.to_string());
    }
    (codes, payload.to_string())
}

/// Wrap a payload in its merged code set; an empty set yields plain text
fn emit(codes: &BTreeSet<String>, payload: &str) -> String {
    if codes.is_empty() {
        payload.to_string()
    } else {
        let combined = codes.iter().cloned().collect::<Vec<_>>().join(";");
        format!("{ESC}{combined}m{payload}{RESET}")
    }
}

/// Pad `chunk` to `width` characters per the alignment
fn pad(chunk: &str, width: usize, align: Align) -> String {
    let len = chunk.chars().count();
    let fill = width.saturating_sub(len);
    match align {
        Align::Left => format!("{}{}", chunk, " ".repeat(fill)),
        Align::Right => format!("{}{}", " ".repeat(fill), chunk),
        Align::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), chunk, " ".repeat(fill - left))
        }
    }
}

//! Title banner widget.

use crate::error::Result;
use crate::style::StyleSpec;
use crate::widget::{Layout, Widget, WidgetId};

/// Non-focusable two-line banner: an uppercased title centered in a run of
/// `=` padding, followed by a right-justified uppercased subtitle.
pub struct Caption {
    id: WidgetId,
    title: String,
    subtitle: String,
    visible: bool,
    style: StyleSpec,
}

impl Caption {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, style: StyleSpec) -> Self {
        Self {
            id: WidgetId::next(),
            title: title.into(),
            subtitle: subtitle.into(),
            visible: true,
            style,
        }
    }

    pub fn set_style(&mut self, style: StyleSpec) {
        self.style = style;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// ` TITLE ` centered in `=` fill over `width` characters
    fn banner(&self, width: usize) -> String {
        let text = format!(" {} ", self.title.to_uppercase());
        let fill = width.saturating_sub(text.chars().count());
        let left = fill / 2;
        format!(
            "{}{}{}",
            "=".repeat(left),
            text,
            "=".repeat(fill - left)
        )
    }

    /// Subtitle right-justified over `width` characters
    fn bookmark_line(&self, width: usize) -> String {
        let text = self.subtitle.to_uppercase();
        let fill = width.saturating_sub(text.chars().count());
        format!("{}{}", " ".repeat(fill), text)
    }
}

impl Widget for Caption {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn declared_width(&self) -> Option<usize> {
        self.style.width
    }

    fn resolve_width(&mut self, compositor_width: usize) {
        // Banners always span the full compositor width unless given one.
        if self.style.width.is_none() {
            self.style.width = Some(compositor_width);
        }
    }

    fn rendered_lines(&self) -> Result<Vec<String>> {
        if !self.visible {
            return Ok(Vec::new());
        }
        let width = self.style.width.ok_or(crate::error::UiError::WidthUnresolved)?;
        Ok(vec![
            self.style.render(&self.banner(width)),
            self.style.render(&self.bookmark_line(width)),
        ])
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

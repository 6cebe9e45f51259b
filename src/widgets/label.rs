//! Static styled text widget.

use crate::error::Result;
use crate::style::StyleSpec;
use crate::widget::{Layout, Widget, WidgetId};

/// Non-focusable block of styled, wrapped text
pub struct Label {
    id: WidgetId,
    text: String,
    visible: bool,
    style: StyleSpec,
    layout: Layout,
}

impl Label {
    pub fn new(text: impl Into<String>, style: StyleSpec) -> Self {
        Self {
            id: WidgetId::next(),
            text: text.into(),
            visible: true,
            style,
            layout: Layout::Stacked,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
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
}

impl Widget for Label {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn layout(&self) -> Layout {
        self.layout
    }

    fn declared_width(&self) -> Option<usize> {
        self.style.width
    }

    fn resolve_width(&mut self, compositor_width: usize) {
        // Labels spread over the full compositor width unless given one.
        if self.style.width.is_none() {
            self.style.width = Some(compositor_width);
        }
    }

    fn rendered_lines(&self) -> Result<Vec<String>> {
        if !self.visible {
            return Ok(Vec::new());
        }
        self.style.frame(&self.text)
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

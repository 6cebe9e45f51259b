//! Single-choice option list widget.

use crate::binding::{Action, BindingTable};
use crate::compositor::join_columns;
use crate::cursor::{Cursor, CursorEvent};
use crate::error::{Result, UiError};
use crate::style::{decorate, Decor, StyleSpec};
use crate::widget::{KeyResponse, Layout, Widget, WidgetId};
use crossterm::event::KeyCode;

/// How an option list arranges its own option fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrange {
    /// One framed block per option, stacked vertically
    #[default]
    Vertical,
    /// Options placed side-by-side as aligned columns
    Horizontal,
}

/// Selectable list of labeled options.
///
/// The option at the cursor renders as `* <label>` in reverse video, the
/// rest as `  <label>`. Activating applies the binding at the cursor
/// position.
pub struct OptionList {
    id: WidgetId,
    options: Vec<String>,
    visible: bool,
    cursor: Cursor,
    bindings: BindingTable,
    style: StyleSpec,
    layout: Layout,
    arrange: Arrange,
}

impl OptionList {
    pub fn new(options: impl IntoIterator<Item = impl Into<String>>, style: StyleSpec) -> Self {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let cursor = Cursor::new(options.len());
        Self {
            id: WidgetId::next(),
            options,
            visible: true,
            cursor,
            bindings: BindingTable::new(),
            style,
            layout: Layout::Stacked,
            arrange: Arrange::Vertical,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_arrange(mut self, arrange: Arrange) -> Self {
        self.arrange = arrange;
        self
    }

    /// Bind `action` to the option at `index`
    pub fn set_func(&mut self, index: usize, action: Action) -> Result<()> {
        if index >= self.options.len() {
            return Err(UiError::BindingOutOfRange {
                index,
                bound: self.options.len(),
            });
        }
        self.bindings.bind(index, action);
        Ok(())
    }

    /// Replace the style. The widget re-resolves an unset width at its
    /// next compositor registration, so restyle before registering or
    /// carry an explicit width.
    pub fn set_style(&mut self, style: StyleSpec) {
        self.style = style;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Index of the option at the cursor
    pub fn selected(&self) -> usize {
        self.cursor.position()
    }

    pub fn map_advance(&mut self, keys: Vec<KeyCode>) {
        self.cursor.map_advance(keys);
    }

    pub fn map_retreat(&mut self, keys: Vec<KeyCode>) {
        self.cursor.map_retreat(keys);
    }

    pub fn map_activate(&mut self, keys: Vec<KeyCode>) {
        self.cursor.map_activate(keys);
    }

    /// One `* <label>` / `  <label>` fragment per option, cursor
    /// highlighted in reverse video
    fn fragments(&self) -> Vec<String> {
        self.options
            .iter()
            .enumerate()
            .map(|(index, label)| {
                if index == self.cursor.position() {
                    decorate(&format!("* {label}"), &[Decor::Reverse])
                } else {
                    format!("  {label}")
                }
            })
            .collect()
    }
}

impl Widget for OptionList {
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
        if self.style.width.is_none() {
            let natural = self
                .options
                .iter()
                .map(|label| label.chars().count() + 2)
                .max()
                .unwrap_or(0);
            self.style.width = Some(natural.min(compositor_width));
        }
    }

    fn rendered_lines(&self) -> Result<Vec<String>> {
        if !self.visible {
            return Ok(Vec::new());
        }
        match self.arrange {
            Arrange::Vertical => {
                let mut lines = Vec::new();
                for fragment in self.fragments() {
                    lines.extend(self.style.frame(&fragment)?);
                }
                Ok(lines)
            }
            Arrange::Horizontal => {
                let columns = self
                    .fragments()
                    .iter()
                    .map(|fragment| self.style.frame(fragment))
                    .collect::<Result<Vec<_>>>()?;
                Ok(join_columns(&columns))
            }
        }
    }

    fn accept_key(&mut self, key: KeyCode) -> KeyResponse {
        let Some(event) = self.cursor.accept(key) else {
            return KeyResponse::default();
        };
        let mut response = KeyResponse {
            redraw: true,
            ..KeyResponse::default()
        };
        if event == CursorEvent::Activated {
            response.instructions = self.bindings.resolve(self.cursor.position(), self.id);
        }
        response
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{FocusDir, Instruction};
    use crate::style::strip_codes;

    fn list() -> OptionList {
        OptionList::new(["one", "two", "three"], StyleSpec::new().width(9))
    }

    #[test]
    fn test_advance_twice_highlights_third_option() {
        let mut list = list();
        list.accept_key(KeyCode::Down);
        list.accept_key(KeyCode::Down);
        assert_eq!(list.selected(), 2);

        let lines = list.rendered_lines().unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(strip_codes(&lines[2]), "* three  ");
        assert!(lines[2].contains("07"));
        assert!(!lines[0].contains('\x1b'));
    }

    #[test]
    fn test_hidden_list_renders_nothing() {
        let mut list = list();
        list.hide();
        assert!(list.rendered_lines().unwrap().is_empty());
        list.show();
        assert_eq!(list.rendered_lines().unwrap().len(), 3);
    }

    #[test]
    fn test_activation_resolves_binding_at_cursor() {
        let mut list = list();
        list.set_func(1, Action::FocusNext).unwrap();
        list.accept_key(KeyCode::Down);
        let response = list.accept_key(KeyCode::Enter);
        assert!(response.redraw);
        assert!(matches!(
            response.instructions[..],
            [Instruction::Focus(_, FocusDir::Next)]
        ));
    }

    #[test]
    fn test_unrecognized_key_requests_no_redraw() {
        let mut list = list();
        let response = list.accept_key(KeyCode::Char('x'));
        assert!(!response.redraw);
        assert!(response.instructions.is_empty());
    }

    #[test]
    fn test_binding_out_of_range_fails() {
        let mut list = list();
        assert!(matches!(
            list.set_func(3, Action::FocusNext),
            Err(UiError::BindingOutOfRange { index: 3, bound: 3 })
        ));
    }

    #[test]
    fn test_horizontal_arrange_joins_columns() {
        let list = OptionList::new(["1.", "2."], StyleSpec::new().width(4))
            .with_arrange(Arrange::Horizontal);
        let lines = list.rendered_lines().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(strip_codes(&lines[0]), "* 1.  2.");
    }

    #[test]
    fn test_width_resolution_prefers_natural_width() {
        let mut list = OptionList::new(["ab", "cdef"], StyleSpec::new());
        list.resolve_width(76);
        assert_eq!(list.declared_width(), Some(6));

        let mut wide = OptionList::new(["a very long option label"], StyleSpec::new());
        wide.resolve_width(10);
        assert_eq!(wide.declared_width(), Some(10));
    }
}

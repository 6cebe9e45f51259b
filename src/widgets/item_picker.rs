//! Scrollable item picker widget.
//!
//! Renders exactly one item at a time — the one at the cursor — and
//! distinguishes two classes of confirm key: *record* (capture the current
//! item) and *select* (dispatch onward). The class of a confirm is decided
//! from the key that triggered it.

use crate::binding::{Action, BindingTable, Callback};
use crate::cursor::{Cursor, CursorEvent};
use crate::error::{Result, UiError};
use crate::style::{decorate, Decor, StyleSpec};
use crate::widget::{KeyResponse, Layout, Widget, WidgetId};
use crossterm::event::KeyCode;
use std::cell::RefCell;
use std::rc::Rc;

/// One-item-at-a-time picker over an opaque item list.
///
/// Binding indices `0..items.len()` address individual items; the two
/// confirm classes occupy the slots just past the item range.
pub struct ItemPicker {
    id: WidgetId,
    items: Vec<String>,
    visible: bool,
    cursor: Cursor,
    bindings: BindingTable,
    style: StyleSpec,
    layout: Layout,
    record_keys: Vec<KeyCode>,
    select_keys: Vec<KeyCode>,
    recorded: Rc<RefCell<Option<String>>>,
}

impl ItemPicker {
    /// Create a picker with the default key maps: advance on Down,
    /// retreat on Up, record-confirm on Left/`h`, select-confirm on
    /// Right/`l`/Enter.
    pub fn new(items: impl IntoIterator<Item = impl ToString>, style: StyleSpec) -> Self {
        let items: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
        let mut cursor = Cursor::new(items.len());
        cursor.map_advance(vec![KeyCode::Down]);
        cursor.map_retreat(vec![KeyCode::Up]);
        let record_keys = vec![KeyCode::Left, KeyCode::Char('h')];
        let select_keys = vec![KeyCode::Right, KeyCode::Char('l'), KeyCode::Enter];
        let mut confirm = record_keys.clone();
        confirm.extend(select_keys.iter().copied());
        cursor.map_activate(confirm);
        Self {
            id: WidgetId::next(),
            items,
            visible: true,
            cursor,
            bindings: BindingTable::new(),
            style,
            layout: Layout::Stacked,
            record_keys,
            select_keys,
            recorded: Rc::new(RefCell::new(None)),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Bind `action` to the item at `index`; it fires on any confirm while
    /// that item is at the cursor
    pub fn set_func(&mut self, index: usize, action: Action) -> Result<()> {
        if index >= self.items.len() {
            return Err(UiError::BindingOutOfRange {
                index,
                bound: self.items.len(),
            });
        }
        self.bindings.bind(index, action);
        Ok(())
    }

    /// Bind the action applied on every record-class confirm
    pub fn on_record(&mut self, action: Action) {
        self.bindings.bind(self.record_slot(), action);
    }

    /// Bind the action applied on every select-class confirm
    pub fn on_select(&mut self, action: Action) {
        self.bindings.bind(self.select_slot(), action);
    }

    /// Replace the confirm key classes. Both classes together form the
    /// cursor's activation set.
    pub fn map_confirm(&mut self, record: Vec<KeyCode>, select: Vec<KeyCode>) {
        let mut confirm = record.clone();
        confirm.extend(select.iter().copied());
        self.cursor.map_activate(confirm);
        self.record_keys = record;
        self.select_keys = select;
    }

    pub fn map_advance(&mut self, keys: Vec<KeyCode>) {
        self.cursor.map_advance(keys);
    }

    pub fn map_retreat(&mut self, keys: Vec<KeyCode>) {
        self.cursor.map_retreat(keys);
    }

    /// Bind a capture action for every item: confirming stores that item
    /// in the picker's recorded slot, leaving dispatch to the class
    /// bindings (capture-then-dispatch).
    pub fn record_mode(&mut self) {
        let slot = Rc::clone(&self.recorded);
        let capture: Callback = Rc::new(move |arg: Option<&str>| {
            *slot.borrow_mut() = arg.map(str::to_owned);
        });
        for (index, item) in self.items.iter().enumerate() {
            self.bindings.bind(
                index,
                Action::Invoke {
                    callback: Rc::clone(&capture),
                    arg: Some(item.clone()),
                },
            );
        }
    }

    /// The most recently captured item, if record mode has fired
    pub fn recorded(&self) -> Option<String> {
        self.recorded.borrow().clone()
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Index of the item at the cursor
    pub fn selected(&self) -> usize {
        self.cursor.position()
    }

    pub fn set_style(&mut self, style: StyleSpec) {
        self.style = style;
    }

    fn record_slot(&self) -> usize {
        self.items.len()
    }

    fn select_slot(&self) -> usize {
        self.items.len() + 1
    }
}

impl Widget for ItemPicker {
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
                .items
                .iter()
                .map(|item| item.chars().count())
                .max()
                .unwrap_or(0);
            self.style.width = Some(natural.min(compositor_width));
        }
    }

    fn rendered_lines(&self) -> Result<Vec<String>> {
        if !self.visible {
            return Ok(Vec::new());
        }
        let Some(item) = self.items.get(self.cursor.position()) else {
            return Ok(Vec::new());
        };
        self.style.frame(&decorate(item, &[Decor::Reverse]))
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
            response
                .instructions
                .extend(self.bindings.resolve(self.cursor.position(), self.id));
            let class_slot = if self.record_keys.contains(&key) {
                self.record_slot()
            } else {
                self.select_slot()
            };
            response
                .instructions
                .extend(self.bindings.resolve(class_slot, self.id));
        }
        response
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

//! Wrapping selection cursor with configurable key maps.
//!
//! A cursor tracks one index over a fixed-size option set. Three logical
//! operations (advance, retreat, activate) are each triggered by membership
//! of an incoming key in a small configurable key set, so several physical
//! keys can drive the same logical action.

use crossterm::event::KeyCode;

/// Logical outcome of feeding one key to a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEvent {
    /// The position changed (with wraparound)
    Moved,
    /// A confirm key was pressed; the position is unchanged
    Activated,
}

/// Wrapping selection index over `bound` entries.
///
/// The position invariant `0 <= position < bound` holds at all times;
/// movement wraps in both directions rather than saturating.
#[derive(Debug, Clone)]
pub struct Cursor {
    position: usize,
    bound: usize,
    advance_keys: Vec<KeyCode>,
    retreat_keys: Vec<KeyCode>,
    activate_keys: Vec<KeyCode>,
    last_key: Option<KeyCode>,
}

impl Cursor {
    /// Create a cursor over `bound` entries with the default key maps:
    /// advance on Down/`j`, retreat on Up/`k`, activate on Enter/Space.
    pub fn new(bound: usize) -> Self {
        Self {
            position: 0,
            bound,
            advance_keys: vec![KeyCode::Down, KeyCode::Char('j')],
            retreat_keys: vec![KeyCode::Up, KeyCode::Char('k')],
            activate_keys: vec![KeyCode::Enter, KeyCode::Char(' ')],
            last_key: None,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    /// The most recent key this cursor recognized
    pub fn last_key(&self) -> Option<KeyCode> {
        self.last_key
    }

    pub fn map_advance(&mut self, keys: impl Into<Vec<KeyCode>>) {
        self.advance_keys = keys.into();
    }

    pub fn map_retreat(&mut self, keys: impl Into<Vec<KeyCode>>) {
        self.retreat_keys = keys.into();
    }

    pub fn map_activate(&mut self, keys: impl Into<Vec<KeyCode>>) {
        self.activate_keys = keys.into();
    }

    /// Whether `key` belongs to any of this cursor's key sets
    pub fn recognizes(&self, key: KeyCode) -> bool {
        self.advance_keys.contains(&key)
            || self.retreat_keys.contains(&key)
            || self.activate_keys.contains(&key)
    }

    /// Increment the position, wrapping to 0 at the bound
    pub fn advance(&mut self) {
        if self.bound > 0 {
            self.position = (self.position + 1) % self.bound;
        }
    }

    /// Decrement the position, wrapping to `bound - 1` at 0
    pub fn retreat(&mut self) {
        if self.bound > 0 {
            self.position = (self.position + self.bound - 1) % self.bound;
        }
    }

    /// Feed one key. Unrecognized keys are a no-op and return `None`.
    pub fn accept(&mut self, key: KeyCode) -> Option<CursorEvent> {
        let event = if self.advance_keys.contains(&key) {
            self.advance();
            CursorEvent::Moved
        } else if self.retreat_keys.contains(&key) {
            self.retreat();
            CursorEvent::Moved
        } else if self.activate_keys.contains(&key) {
            CursorEvent::Activated
        } else {
            return None;
        };
        self.last_key = Some(key);
        Some(event)
    }
}

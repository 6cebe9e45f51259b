//! Per-widget action bindings.
//!
//! A [`BindingTable`] maps a widget-local index (usually a cursor position)
//! to an [`Action`]: either a reserved focus-navigation command or an
//! arbitrary callback with an optionally bound argument. Resolution turns
//! the bound action into [`Instruction`]s that the focus router executes
//! after widget borrows are released.

use crate::widget::WidgetId;
use std::fmt;
use std::rc::Rc;

/// Callback invoked by an [`Action::Invoke`] binding
pub type Callback = Rc<dyn Fn(Option<&str>)>;

/// Direction of a focus-navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDir {
    Next,
    Back,
}

/// Action bound to a widget-local index
#[derive(Clone)]
pub enum Action {
    /// Move the owning channel's focus to the next widget
    FocusNext,
    /// Move the owning channel's focus to the previous widget
    FocusBack,
    /// Call `callback`, passing `arg` when bound
    Invoke {
        callback: Callback,
        arg: Option<String>,
    },
}

impl Action {
    /// Bind a callback without an argument
    pub fn invoke(callback: impl Fn(Option<&str>) + 'static) -> Self {
        Action::Invoke {
            callback: Rc::new(callback),
            arg: None,
        }
    }

    /// Bind a callback with a fixed argument
    pub fn invoke_with(callback: impl Fn(Option<&str>) + 'static, arg: impl Into<String>) -> Self {
        Action::Invoke {
            callback: Rc::new(callback),
            arg: Some(arg.into()),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::FocusNext => write!(f, "FocusNext"),
            Action::FocusBack => write!(f, "FocusBack"),
            Action::Invoke { arg, .. } => f
                .debug_struct("Invoke")
                .field("arg", arg)
                .finish_non_exhaustive(),
        }
    }
}

/// One dispatch step produced by resolving a binding
#[derive(Clone)]
pub enum Instruction {
    /// Control command replayed into the routers the widget is attached to
    Focus(WidgetId, FocusDir),
    /// Direct callback invocation
    Invoke {
        callback: Callback,
        arg: Option<String>,
    },
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Focus(id, dir) => f.debug_tuple("Focus").field(id).field(dir).finish(),
            Instruction::Invoke { arg, .. } => f
                .debug_struct("Invoke")
                .field("arg", arg)
                .finish_non_exhaustive(),
        }
    }
}

/// Index-to-action lookup owned by a single widget.
///
/// At most one action is retained per index; rebinding an index replaces
/// the previous action in place, so the iteration order of distinct
/// indices stays stable across overwrites.
#[derive(Debug, Default)]
pub struct BindingTable {
    entries: Vec<(usize, Action)>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite the action for `index`
    pub fn bind(&mut self, index: usize, action: Action) {
        if let Some(entry) = self.entries.iter_mut().find(|(i, _)| *i == index) {
            entry.1 = action;
        } else {
            self.entries.push((index, action));
        }
    }

    pub fn is_bound(&self, index: usize) -> bool {
        self.entries.iter().any(|(i, _)| *i == index)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve `index` into dispatch instructions for the owning widget.
    ///
    /// An unbound index resolves to no instructions — a missing binding is
    /// an expected no-op, not an error.
    pub fn resolve(&self, index: usize, owner: WidgetId) -> Vec<Instruction> {
        self.entries
            .iter()
            .filter(|(i, _)| *i == index)
            .map(|(_, action)| match action {
                Action::FocusNext => Instruction::Focus(owner, FocusDir::Next),
                Action::FocusBack => Instruction::Focus(owner, FocusDir::Back),
                Action::Invoke { callback, arg } => Instruction::Invoke {
                    callback: Rc::clone(callback),
                    arg: arg.clone(),
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn owner() -> WidgetId {
        WidgetId::next()
    }

    #[test]
    fn test_unbound_index_resolves_to_nothing() {
        let table = BindingTable::new();
        assert!(table.resolve(0, owner()).is_empty());
    }

    #[test]
    fn test_navigation_actions_resolve_to_focus_instructions() {
        let id = owner();
        let mut table = BindingTable::new();
        table.bind(0, Action::FocusNext);
        table.bind(1, Action::FocusBack);

        assert!(matches!(
            table.resolve(0, id)[..],
            [Instruction::Focus(got, FocusDir::Next)] if got == id
        ));
        assert!(matches!(
            table.resolve(1, id)[..],
            [Instruction::Focus(got, FocusDir::Back)] if got == id
        ));
    }

    #[test]
    fn test_last_bind_for_an_index_wins() {
        let mut table = BindingTable::new();
        table.bind(2, Action::FocusNext);
        table.bind(2, Action::FocusBack);

        let resolved = table.resolve(2, owner());
        assert_eq!(resolved.len(), 1);
        assert!(matches!(resolved[0], Instruction::Focus(_, FocusDir::Back)));
    }

    #[test]
    fn test_invoke_carries_bound_argument() {
        let seen = Rc::new(Cell::new(false));
        let mut table = BindingTable::new();
        table.bind(0, {
            let seen = Rc::clone(&seen);
            Action::invoke_with(
                move |arg| {
                    assert_eq!(arg, Some("three"));
                    seen.set(true);
                },
                "three",
            )
        });

        match &table.resolve(0, owner())[..] {
            [Instruction::Invoke { callback, arg }] => callback(arg.as_deref()),
            other => panic!("unexpected resolution: {other:?}"),
        }
        assert!(seen.get());
    }

    #[test]
    fn test_distinct_indices_may_share_an_action() {
        let mut table = BindingTable::new();
        table.bind(0, Action::FocusNext);
        table.bind(1, Action::FocusNext);
        let id = owner();
        assert_eq!(table.resolve(0, id).len(), 1);
        assert_eq!(table.resolve(1, id).len(), 1);
    }
}

//! The widget capability and its shared handle type.
//!
//! Widgets are process-lifetime objects shared between one compositor and
//! zero or more focus channels. The toolkit is single-threaded, so the
//! sharing model is `Rc<RefCell<_>>`; routers snapshot channel membership
//! before delivering keys, and instructions produced by a widget are
//! executed only after its borrow is released.

use crate::binding::Instruction;
use crate::error::Result;
use crossterm::event::KeyCode;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable identity for a widget instance, used for focus-control lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate the next id. Monotonic for the lifetime of the process.
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// How a widget participates in frame assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Rendered as a full-width block of its own
    #[default]
    Stacked,
    /// Joined side-by-side with adjacent columnar widgets
    Columnar,
}

/// What a widget wants done after accepting one key.
///
/// `redraw` is true iff the key was in the widget's recognized key set;
/// `instructions` are executed by the router once the widget borrow ends.
#[derive(Debug, Default)]
pub struct KeyResponse {
    pub instructions: Vec<Instruction>,
    pub redraw: bool,
}

/// Capability implemented by every UI element
pub trait Widget {
    fn id(&self) -> WidgetId;

    /// Compositor-level layout participation
    fn layout(&self) -> Layout {
        Layout::Stacked
    }

    /// The width this widget renders at, if already resolved
    fn declared_width(&self) -> Option<usize>;

    /// Resolve an unset width once against the compositor's width.
    ///
    /// Called at registration time; a width set at construction wins.
    fn resolve_width(&mut self, compositor_width: usize);

    /// Display-ready styled lines; empty while the widget is hidden
    fn rendered_lines(&self) -> Result<Vec<String>>;

    /// React to one key. Non-focusable widgets ignore everything.
    fn accept_key(&mut self, _key: KeyCode) -> KeyResponse {
        KeyResponse::default()
    }

    fn is_visible(&self) -> bool;
}

/// Shared widget handle registered with routers and compositors
pub type SharedWidget = Rc<RefCell<dyn Widget>>;

/// Wrap a concrete widget for registration.
///
/// The returned handle stays concrete; it coerces to [`SharedWidget`] at
/// registration call sites while callers keep typed access for callbacks.
pub fn shared<W: Widget + 'static>(widget: W) -> Rc<RefCell<W>> {
    Rc::new(RefCell::new(widget))
}

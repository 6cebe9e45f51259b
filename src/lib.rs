//! termkit: a composable terminal widget toolkit
//!
//! This crate provides small composable UI elements (option lists, item
//! pickers, labels, captions) driven by raw keystrokes and rendered as
//! ANSI-styled text blocks: a focus-routing dispatcher fans keys out over
//! logical channels, and a compositor assembles widget output into full
//! frames using stacked or columnar layout.

pub mod binding;
pub mod compositor;
pub mod config;
pub mod cursor;
pub mod error;
pub mod router;
pub mod style;
pub mod terminal;
pub mod widget;
pub mod widgets;

pub use binding::{Action, BindingTable, FocusDir, Instruction};
pub use compositor::Compositor;
pub use config::ToolkitConfig;
pub use cursor::{Cursor, CursorEvent};
pub use error::{Result, UiError};
pub use router::{ChannelId, DispatchOutcome, FocusRouter};
pub use style::{Align, Color, Decor, StyleSpec};
pub use widget::{shared, KeyResponse, Layout, SharedWidget, Widget, WidgetId};
pub use widgets::{Arrange, Caption, ItemPicker, Label, OptionList};

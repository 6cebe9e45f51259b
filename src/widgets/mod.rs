//! Concrete UI elements built on the widget capability.

pub mod caption;
pub mod item_picker;
pub mod label;
pub mod option_list;

pub use caption::Caption;
pub use item_picker::ItemPicker;
pub use label::Label;
pub use option_list::{Arrange, OptionList};

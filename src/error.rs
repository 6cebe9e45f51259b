//! Unified error types for the termkit toolkit.
//!
//! Unknown keys, unknown channels and missing bindings are deliberately
//! *not* errors — those are expected, frequent conditions handled as quiet
//! no-ops. The variants here are contract violations that must surface
//! immediately at the call site.

use crate::widget::WidgetId;
use thiserror::Error;

/// Main toolkit error type
#[derive(Debug, Error)]
pub enum UiError {
    #[error("widget width is unresolved; register the widget with a compositor or set a width first")]
    WidthUnresolved,

    #[error("binding index {index} is outside [0, {bound})")]
    BindingOutOfRange { index: usize, bound: usize },

    #[error("widget {0:?} is not registered on any focus channel")]
    UnregisteredWidget(WidgetId),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the toolkit
pub type Result<T> = std::result::Result<T, UiError>;

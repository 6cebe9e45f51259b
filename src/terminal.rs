//! Terminal lifecycle and blocking key acquisition.
//!
//! Raw mode is a scoped resource: acquiring it returns a guard that
//! restores the previous terminal settings on every exit path, including
//! panics when the hook below is installed.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::{cursor, execute, terminal};
use std::io;
use std::panic;

/// Scoped raw-mode acquisition; restores the terminal on drop
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Enter raw mode
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), cursor::Show);
    }
}

/// Install a panic hook that restores the terminal before the panic
/// message prints
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), cursor::Show);
        original_hook(panic_info);
    }));
}

/// Block until one key press arrives and return its code.
///
/// Non-key events (resize, mouse, key release) are swallowed; escape
/// sequences for arrow keys are already decoded by the event source.
pub fn read_key() -> io::Result<KeyCode> {
    loop {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(code);
        }
    }
}

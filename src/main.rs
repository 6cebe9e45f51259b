//! termkit demo: a small focus-routed menu.
//!
//! Wires a caption, a label, two option lists (one hidden until revealed)
//! and an item picker onto a single-focus channel, then runs the blocking
//! read-key / dispatch / redraw loop until a quit action fires.

use anyhow::Result;
use crossterm::event::KeyCode;
use std::cell::Cell;
use std::io;
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use termkit::terminal::{install_panic_hook, read_key, RawModeGuard};
use termkit::{
    shared, Action, Align, Arrange, Caption, Color, Compositor, FocusRouter, ItemPicker, Label,
    Layout, OptionList, StyleSpec, ToolkitConfig,
};

/// Initialize logging with RUST_LOG environment variable support
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();

    // Restore the terminal even when a widget callback panics.
    install_panic_hook();

    let project_root = std::env::current_dir().ok();
    let config = ToolkitConfig::load(project_root.as_deref())?;
    tracing::info!(
        width = config.display.width,
        margin = config.display.margin,
        "starting termkit demo"
    );

    let mut compositor = Compositor::new(config.display.width, config.display.margin);
    let mut router = FocusRouter::new();
    let quit = Rc::new(Cell::new(false));

    let caption = shared(Caption::new("Menu", "index", StyleSpec::new()));
    let label = shared(Label::new("first:", StyleSpec::new().fg(Color::Green)));
    let menu = shared(
        OptionList::new(
            ["one", "two", "three"],
            StyleSpec::new()
                .fg(Color::Green)
                .bg(Color::Red)
                .width(8)
                .margin(4),
        )
        .with_layout(Layout::Columnar),
    );
    let pair = shared(
        OptionList::new(
            ["1.", "2."],
            StyleSpec::new()
                .fg(Color::Red)
                .width(8)
                .align(Align::Right)
                .margin(2),
        )
        .with_layout(Layout::Columnar)
        .with_arrange(Arrange::Horizontal),
    );
    let picker = shared(ItemPicker::new(0..10, StyleSpec::new().fg(Color::Green)));

    if !config.input.vim_navigation {
        for list in [&menu, &pair] {
            list.borrow_mut().map_advance(vec![KeyCode::Down]);
            list.borrow_mut().map_retreat(vec![KeyCode::Up]);
            list.borrow_mut().map_activate(vec![KeyCode::Enter]);
        }
        picker
            .borrow_mut()
            .map_confirm(vec![KeyCode::Left], vec![KeyCode::Right, KeyCode::Enter]);
    }

    // Menu: reveal the hidden pair, hand focus onward, or quit.
    {
        let pair = pair.clone();
        menu.borrow_mut()
            .set_func(0, Action::invoke(move |_| pair.borrow_mut().show()))?;
    }
    menu.borrow_mut().set_func(1, Action::FocusNext)?;
    {
        let quit = quit.clone();
        menu.borrow_mut()
            .set_func(2, Action::invoke(move |_| quit.set(true)))?;
    }

    // Pair: hide itself again, or quit.
    {
        let hidden = pair.clone();
        pair.borrow_mut()
            .set_func(0, Action::invoke(move |_| hidden.borrow_mut().hide()))?;
    }
    {
        let quit = quit.clone();
        pair.borrow_mut()
            .set_func(1, Action::invoke(move |_| quit.set(true)))?;
    }
    pair.borrow_mut().hide();

    // Picker: capture the confirmed item, then move focus by confirm class.
    picker.borrow_mut().record_mode();
    picker.borrow_mut().on_record(Action::FocusBack);
    picker.borrow_mut().on_select(Action::FocusNext);

    compositor.register(caption.clone());
    compositor.register(label.clone());
    compositor.register(menu.clone());
    compositor.register(pair.clone());
    compositor.register(picker.clone());

    router.register(menu.clone(), 1);
    router.register(pair.clone(), 1);
    router.register(picker.clone(), 1);
    router.select_channel(1);
    router.set_single_focus(1);

    let _raw = RawModeGuard::new()?;
    compositor.init_scene()?;

    while !quit.get() {
        let key = read_key()?;
        if key == KeyCode::Char('q') {
            break;
        }
        let outcome = router.dispatch(key)?;
        if outcome.redraw {
            compositor.redraw()?;
        }
    }

    if let Some(item) = picker.borrow().recorded() {
        tracing::info!(item = %item, "last recorded item");
    }
    Ok(())
}

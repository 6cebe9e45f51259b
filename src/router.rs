//! Focus routing and key dispatch.
//!
//! The router is the process-wide event bus: raw keys fan out to the
//! widgets registered on the currently selected channels, honoring
//! per-channel single-focus routing, and focus-navigation instructions
//! produced by widget bindings are replayed back into the router to move a
//! channel's focus position.

use crate::binding::{FocusDir, Instruction};
use crate::error::{Result, UiError};
use crate::widget::{SharedWidget, Widget, WidgetId};
use crossterm::event::KeyCode;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Identifier of a focus/broadcast domain
pub type ChannelId = u8;

/// What the caller should do after a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// At least one widget recognized the key and wants a redraw
    pub redraw: bool,
}

/// Channel-based key dispatcher with optional single-focus discipline.
///
/// Channel 0 always exists. Unknown channels and keys nobody recognizes
/// are quiet no-ops; asking for focus control on a widget registered
/// nowhere is an error.
pub struct FocusRouter {
    channels: BTreeMap<ChannelId, Vec<SharedWidget>>,
    single_focus: BTreeMap<ChannelId, bool>,
    focus_index: BTreeMap<ChannelId, usize>,
    active_channels: Vec<ChannelId>,
}

impl Default for FocusRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusRouter {
    pub fn new() -> Self {
        let mut channels = BTreeMap::new();
        channels.insert(0, Vec::new());
        let mut single_focus = BTreeMap::new();
        single_focus.insert(0, false);
        Self {
            channels,
            single_focus,
            focus_index: BTreeMap::new(),
            active_channels: Vec::new(),
        }
    }

    /// Append a widget to a channel, creating the channel on demand
    pub fn register(&mut self, widget: SharedWidget, channel: ChannelId) {
        self.channels.entry(channel).or_default().push(widget);
        self.single_focus.entry(channel).or_insert(false);
    }

    /// Remove a widget from a channel. Unknown widget or channel is a
    /// quiet no-op.
    pub fn remove(&mut self, id: WidgetId, channel: ChannelId) {
        if let Some(members) = self.channels.get_mut(&channel) {
            members.retain(|widget| widget.borrow().id() != id);
        }
    }

    /// Mark a channel single-focus and reset its focus to the first
    /// member. Unknown channels are a no-op.
    pub fn set_single_focus(&mut self, channel: ChannelId) {
        if self.channels.contains_key(&channel) {
            self.single_focus.insert(channel, true);
            self.focus_index.insert(channel, 0);
        } else {
            debug!(channel, "single-focus requested for unknown channel");
        }
    }

    /// Mark a channel active for dispatch. Selecting a channel twice makes
    /// it receive each key twice — an intentional fan-out mechanism.
    pub fn select_channel(&mut self, channel: ChannelId) {
        self.active_channels.push(channel);
    }

    /// Current focus position of a channel, if it is single-focus
    pub fn focus_index(&self, channel: ChannelId) -> Option<usize> {
        if self.single_focus.get(&channel).copied().unwrap_or(false) {
            Some(self.focus_index.get(&channel).copied().unwrap_or(0))
        } else {
            None
        }
    }

    /// Deliver one key to every active channel.
    ///
    /// Single-focus channels route to their focused member only; others
    /// broadcast to every member. Membership is snapshotted before
    /// delivery and all resulting instructions run after the widget
    /// borrows end, so callbacks may re-register or toggle visibility
    /// without invalidating iteration.
    pub fn dispatch(&mut self, key: KeyCode) -> Result<DispatchOutcome> {
        trace!(?key, "dispatching key");
        let mut redraw = false;
        let mut pending: Vec<Instruction> = Vec::new();

        for channel in self.active_channels.clone() {
            let Some(members) = self.channels.get(&channel) else {
                debug!(channel, "selected channel is unknown; skipping");
                continue;
            };
            if members.is_empty() {
                continue;
            }
            let targets: Vec<SharedWidget> =
                if self.single_focus.get(&channel).copied().unwrap_or(false) {
                    let index =
                        self.focus_index.get(&channel).copied().unwrap_or(0) % members.len();
                    vec![members[index].clone()]
                } else {
                    members.clone()
                };
            for widget in targets {
                let response = widget.borrow_mut().accept_key(key);
                redraw |= response.redraw;
                pending.extend(response.instructions);
            }
        }

        for instruction in pending {
            match instruction {
                Instruction::Focus(id, dir) => self.on_control(id, dir)?,
                Instruction::Invoke { callback, arg } => callback(arg.as_deref()),
            }
        }
        Ok(DispatchOutcome { redraw })
    }

    /// Move focus on the channel containing `id`.
    ///
    /// The lowest-numbered channel containing the widget wins when it is
    /// registered on several. Channels without single-focus ignore the
    /// command; a widget registered nowhere is a programming error.
    pub fn on_control(&mut self, id: WidgetId, dir: FocusDir) -> Result<()> {
        let channel = self
            .channels
            .iter()
            .find(|(_, members)| members.iter().any(|widget| widget.borrow().id() == id))
            .map(|(channel, _)| *channel)
            .ok_or(UiError::UnregisteredWidget(id))?;

        if !self.single_focus.get(&channel).copied().unwrap_or(false) {
            trace!(channel, "focus control on broadcast channel ignored");
            return Ok(());
        }
        let len = self.channels[&channel].len();
        if len == 0 {
            return Ok(());
        }
        let current = self.focus_index.get(&channel).copied().unwrap_or(0);
        let next = match dir {
            FocusDir::Next => (current + 1) % len,
            FocusDir::Back => (current + len - 1) % len,
        };
        debug!(channel, from = current, to = next, "focus moved");
        self.focus_index.insert(channel, next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Action;
    use crate::style::StyleSpec;
    use crate::widget::{shared, Widget};
    use crate::widgets::OptionList;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn three_lists() -> Vec<Rc<RefCell<OptionList>>> {
        (0..3)
            .map(|_| shared(OptionList::new(["a", "b", "c"], StyleSpec::new().width(5))))
            .collect()
    }

    #[test]
    fn test_broadcast_channel_delivers_to_every_member() {
        let mut router = FocusRouter::new();
        let lists = three_lists();
        for list in &lists {
            router.register(list.clone(), 0);
        }
        router.select_channel(0);

        router.dispatch(KeyCode::Down).unwrap();
        for list in &lists {
            assert_eq!(list.borrow().selected(), 1);
        }
    }

    #[test]
    fn test_single_focus_channel_updates_exactly_one_widget() {
        let mut router = FocusRouter::new();
        let lists = three_lists();
        for list in &lists {
            router.register(list.clone(), 1);
        }
        router.select_channel(1);
        router.set_single_focus(1);

        router.dispatch(KeyCode::Down).unwrap();
        assert_eq!(lists[0].borrow().selected(), 1);
        assert_eq!(lists[1].borrow().selected(), 0);
        assert_eq!(lists[2].borrow().selected(), 0);
    }

    #[test]
    fn test_focus_next_walks_and_wraps_the_channel() {
        let mut router = FocusRouter::new();
        let lists = three_lists();
        for list in &lists {
            router.register(list.clone(), 1);
        }
        router.select_channel(1);
        router.set_single_focus(1);

        let id = lists[0].borrow().id();
        for expected in [1, 2, 0] {
            router.on_control(id, FocusDir::Next).unwrap();
            assert_eq!(router.focus_index(1), Some(expected));
        }
    }

    #[test]
    fn test_focus_back_wraps_from_zero() {
        let mut router = FocusRouter::new();
        let lists = three_lists();
        for list in &lists {
            router.register(list.clone(), 1);
        }
        router.set_single_focus(1);

        router
            .on_control(lists[1].borrow().id(), FocusDir::Back)
            .unwrap();
        assert_eq!(router.focus_index(1), Some(2));
    }

    #[test]
    fn test_activation_moves_focus_through_binding() {
        // End-to-end: a bound FocusNext issued twice moves focus 0 -> 1 -> 2,
        // a third wraps back to widget 0.
        let mut router = FocusRouter::new();
        let lists = three_lists();
        for list in &lists {
            list.borrow_mut().set_func(0, Action::FocusNext).unwrap();
            router.register(list.clone(), 1);
        }
        router.select_channel(1);
        router.set_single_focus(1);

        for expected in [1, 2, 0] {
            router.dispatch(KeyCode::Enter).unwrap();
            assert_eq!(router.focus_index(1), Some(expected));
        }
    }

    #[test]
    fn test_focus_control_on_broadcast_channel_is_a_noop() {
        let mut router = FocusRouter::new();
        let lists = three_lists();
        for list in &lists {
            router.register(list.clone(), 0);
        }
        router
            .on_control(lists[0].borrow().id(), FocusDir::Next)
            .unwrap();
        assert_eq!(router.focus_index(0), None);
    }

    #[test]
    fn test_focus_control_for_unregistered_widget_fails() {
        let mut router = FocusRouter::new();
        let stray = shared(OptionList::new(["a"], StyleSpec::new().width(3)));
        let id = stray.borrow().id();
        assert!(matches!(
            router.on_control(id, FocusDir::Next),
            Err(UiError::UnregisteredWidget(got)) if got == id
        ));
    }

    #[test]
    fn test_duplicate_channel_selection_fans_out() {
        let mut router = FocusRouter::new();
        let list = shared(OptionList::new(["a", "b", "c"], StyleSpec::new().width(5)));
        router.register(list.clone(), 0);
        router.select_channel(0);
        router.select_channel(0);

        router.dispatch(KeyCode::Down).unwrap();
        assert_eq!(list.borrow().selected(), 2);
    }

    #[test]
    fn test_unknown_selected_channel_is_skipped() {
        let mut router = FocusRouter::new();
        router.select_channel(9);
        let outcome = router.dispatch(KeyCode::Down).unwrap();
        assert!(!outcome.redraw);
    }

    #[test]
    fn test_dispatch_reports_redraw_only_for_recognized_keys() {
        let mut router = FocusRouter::new();
        let list = shared(OptionList::new(["a"], StyleSpec::new().width(3)));
        router.register(list.clone(), 0);
        router.select_channel(0);

        assert!(router.dispatch(KeyCode::Down).unwrap().redraw);
        assert!(!router.dispatch(KeyCode::Char('z')).unwrap().redraw);
    }

    #[test]
    fn test_callback_may_toggle_visibility_during_dispatch() {
        let mut router = FocusRouter::new();
        let target = shared(OptionList::new(["x"], StyleSpec::new().width(3)));
        let trigger = shared(OptionList::new(["go"], StyleSpec::new().width(4)));
        {
            let target = target.clone();
            trigger
                .borrow_mut()
                .set_func(0, Action::invoke(move |_| target.borrow_mut().hide()))
                .unwrap();
        }
        router.register(trigger.clone(), 0);
        router.register(target.clone(), 0);
        router.select_channel(0);

        router.dispatch(KeyCode::Enter).unwrap();
        assert!(!target.borrow().is_visible());
    }

    #[test]
    fn test_remove_widget_from_channel() {
        let mut router = FocusRouter::new();
        let lists = three_lists();
        for list in &lists {
            router.register(list.clone(), 0);
        }
        router.select_channel(0);
        router.remove(lists[0].borrow().id(), 0);

        router.dispatch(KeyCode::Down).unwrap();
        assert_eq!(lists[0].borrow().selected(), 0);
        assert_eq!(lists[1].borrow().selected(), 1);
    }
}

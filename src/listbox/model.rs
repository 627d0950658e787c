//! Listbox state, open/close handling and the event queue.

use super::{CloseListMsg, ListboxEvent};
use crate::option::{ComboOption, OptionId};
use bubbletea_rs::{tick, Cmd, Msg};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::trace;

// Used to ensure that close messages are only received by the listbox that sent them.
static LAST_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    LAST_ID.fetch_add(1, Ordering::Relaxed)
}

/// The result list of a combobox.
#[derive(Debug, Clone)]
pub struct Listbox<I> {
    pub(super) options: Vec<ComboOption<I>>,
    pub(super) visible: Vec<OptionId>,
    pub(super) highlight: Option<OptionId>,
    open: bool,
    has_hover: bool,
    has_focus: bool,
    id: usize,
    close_tag: usize,
    events: Vec<ListboxEvent>,
}

impl<I> Default for Listbox<I> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<I> Listbox<I> {
    /// Creates a closed listbox showing every option.
    ///
    /// Options are renumbered by position so that an [`OptionId`] is always
    /// the option's index in the full set.
    pub fn new(options: Vec<ComboOption<I>>) -> Self {
        let options: Vec<_> = options
            .into_iter()
            .enumerate()
            .map(|(i, o)| o.renumbered(OptionId(i)))
            .collect();
        let visible = options.iter().map(ComboOption::id).collect();
        Self {
            options,
            visible,
            highlight: None,
            open: false,
            has_hover: false,
            has_focus: false,
            id: next_id(),
            close_tag: 0,
            events: Vec::new(),
        }
    }

    /// Every option, filtered or not.
    pub fn options(&self) -> &[ComboOption<I>] {
        &self.options
    }

    /// Looks up an option in the full set.
    pub fn option(&self, id: OptionId) -> Option<&ComboOption<I>> {
        self.options.get(id.index())
    }

    /// Visible options in display order.
    pub fn visible_options(&self) -> impl Iterator<Item = &ComboOption<I>> + '_ {
        self.visible.iter().filter_map(move |id| self.option(*id))
    }

    /// Display text of the visible options.
    pub fn visible_texts(&self) -> Vec<&str> {
        self.visible_options().map(ComboOption::text).collect()
    }

    /// Number of visible options.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Returns true if nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Returns true if at least one option is visible.
    pub fn has_options(&self) -> bool {
        !self.visible.is_empty()
    }

    /// Position of an option within the visible set.
    pub fn visible_position(&self, id: OptionId) -> Option<usize> {
        self.visible.iter().position(|v| *v == id)
    }

    /// Whether the popup is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the popup.
    pub fn open(&mut self) {
        if !self.open {
            trace!(listbox = self.id, "open");
            self.open = true;
            self.events.push(ListboxEvent::Opened);
        }
    }

    /// Closes the popup. Without `force` this is a no-op while the list or the
    /// input is hovered or the widget has focus. Returns true if the popup is
    /// closed afterwards.
    pub fn close(&mut self, force: bool, input_hover: bool) -> bool {
        if !force && (self.has_focus || self.has_hover || input_hover) {
            trace!(listbox = self.id, "close suppressed");
            return false;
        }

        // Pending delayed closes are moot now.
        self.close_tag += 1;
        if self.open {
            trace!(listbox = self.id, force, "close");
            self.open = false;
            self.events.push(ListboxEvent::Closed);
        }
        true
    }

    /// Schedules a non-forced close after `delay`. A newer schedule or a
    /// forced close supersedes this one.
    pub fn schedule_close(&mut self, delay: Duration) -> Cmd {
        self.close_tag += 1;
        let id = self.id;
        let tag = self.close_tag;
        tick(delay, move |_| Box::new(CloseListMsg { id, tag }) as Msg)
    }

    /// Returns true if `msg` answers the latest [`Listbox::schedule_close`].
    pub fn is_current_close(&self, msg: &CloseListMsg) -> bool {
        msg.id == self.id && msg.tag == self.close_tag
    }

    /// Whether the pointer hovers the list.
    pub fn has_hover(&self) -> bool {
        self.has_hover
    }

    /// Records pointer hover over the list.
    pub fn set_hover(&mut self, hover: bool) {
        self.has_hover = hover;
    }

    /// Whether the widget holds focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Records widget focus.
    pub fn set_focus(&mut self, focus: bool) {
        self.has_focus = focus;
    }

    /// Takes the queued state-change events.
    pub fn drain_events(&mut self) -> Vec<ListboxEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn push_event(&mut self, event: ListboxEvent) {
        self.events.push(event);
    }

    /// Drops any pending delayed close and gives the listbox a fresh identity
    /// so that messages scheduled before now are ignored.
    pub(crate) fn detach(&mut self) {
        self.id = next_id();
        self.close_tag = 0;
        self.has_hover = false;
        self.has_focus = false;
    }
}

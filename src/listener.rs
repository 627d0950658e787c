//! Notifications delivered to host code.
//!
//! Hosts implement [`Listener`] for the callbacks they care about and register
//! it with [`crate::combobox::Model::subscribe`]. Every subscription returns a
//! [`Subscription`] handle, and unsubscribing removes exactly that listener.

use crate::option::ComboOption;

/// Snapshot sent whenever the result list or its highlight changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEvent {
    /// Display text of every visible option, in order.
    pub results: Vec<String>,
    /// Position of the highlighted option within `results`.
    pub highlighted: Option<usize>,
    /// Current text value of the input.
    pub value: String,
}

/// Callback slots for combobox notifications. All methods default to no-ops.
pub trait Listener<I>: Send {
    /// A search was issued.
    fn on_loading(&mut self) {}
    /// The latest search finished.
    fn on_loaded(&mut self) {}
    /// Results or highlight changed.
    fn on_update(&mut self, _event: &UpdateEvent) {}
    /// An option was committed with Enter or a click.
    fn on_submit(&mut self, _option: &ComboOption<I>) {}
    /// The list opened.
    fn on_show(&mut self) {}
    /// The list closed.
    fn on_hide(&mut self) {}
}

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

pub(crate) struct Listeners<I> {
    next: u64,
    entries: Vec<(Subscription, Box<dyn Listener<I>>)>,
}

impl<I> Default for Listeners<I> {
    fn default() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }
}

impl<I> Listeners<I> {
    pub(crate) fn subscribe(&mut self, listener: Box<dyn Listener<I>>) -> Subscription {
        let sub = Subscription(self.next);
        self.next += 1;
        self.entries.push((sub, listener));
        sub
    }

    /// Returns false when the subscription was already removed.
    pub(crate) fn unsubscribe(&mut self, sub: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(s, _)| *s != sub);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, mut f: impl FnMut(&mut dyn Listener<I>)) {
        for (_, listener) in self.entries.iter_mut() {
            f(listener.as_mut());
        }
    }
}

//! Cyclic traversal and highlight management.

use super::{Listbox, ListboxEvent};
use crate::option::{ComboOption, OptionId};

impl<I> Listbox<I> {
    /// First visible option.
    pub fn first(&self) -> Option<OptionId> {
        self.visible.first().copied()
    }

    /// Last visible option.
    pub fn last(&self) -> Option<OptionId> {
        self.visible.last().copied()
    }

    /// Option after `current`, wrapping from last to first. A `current` that
    /// is not visible yields the first option.
    pub fn next(&self, current: OptionId) -> Option<OptionId> {
        match self.visible_position(current) {
            Some(i) => Some(self.visible[(i + 1) % self.visible.len()]),
            None => self.first(),
        }
    }

    /// Option before `current`, wrapping from first to last. A `current` that
    /// is not visible yields the last option.
    pub fn previous(&self, current: OptionId) -> Option<OptionId> {
        match self.visible_position(current) {
            Some(i) => {
                let len = self.visible.len();
                Some(self.visible[(i + len - 1) % len])
            }
            None => self.last(),
        }
    }

    /// The highlighted option, if any.
    pub fn highlighted(&self) -> Option<OptionId> {
        self.highlight
    }

    /// The highlighted option itself.
    pub fn highlighted_option(&self) -> Option<&ComboOption<I>> {
        self.highlight.and_then(|id| self.option(id))
    }

    /// Moves the highlight. Ids that are not visible are rejected and leave
    /// the highlight untouched.
    pub fn set_highlight(&mut self, id: Option<OptionId>) -> bool {
        if let Some(id) = id {
            if self.visible_position(id).is_none() {
                return false;
            }
        }
        if self.highlight != id {
            self.highlight = id;
            self.push_event(ListboxEvent::Highlighted(id));
        }
        true
    }
}

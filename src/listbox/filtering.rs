//! Prefix filtering and wholesale option replacement.

use super::{Listbox, ListboxEvent};
use crate::option::{ComboOption, OptionId};
use tracing::trace;

impl<I> Listbox<I> {
    /// Recomputes the visible set from `query` and picks an option to focus.
    ///
    /// An option stays visible when its comparison text starts with the
    /// lowercased query; an empty query shows everything. Returns `preferred`
    /// if it is still visible, otherwise the first visible option, or `None`
    /// when nothing matches. A highlight that was filtered out is cleared.
    pub fn filter(&mut self, query: &str, preferred: Option<OptionId>) -> Option<OptionId> {
        let query = query.to_lowercase();

        self.visible = self
            .options
            .iter()
            .filter(|o| o.matches_prefix(&query))
            .map(ComboOption::id)
            .collect();
        trace!(query = %query, visible = self.visible.len(), "filter");
        self.push_event(ListboxEvent::Filtered {
            visible: self.visible.len(),
        });

        if let Some(h) = self.highlight {
            if !self.visible.contains(&h) {
                self.highlight = None;
                self.push_event(ListboxEvent::Highlighted(None));
            }
        }

        match preferred {
            Some(p) if self.visible.contains(&p) => Some(p),
            _ => self.first(),
        }
    }

    /// Replaces every option, e.g. with fresh search results. Everything is
    /// visible afterwards and the highlight is cleared.
    pub fn set_options(&mut self, options: Vec<ComboOption<I>>) {
        self.options = options
            .into_iter()
            .enumerate()
            .map(|(i, o)| o.renumbered(OptionId(i)))
            .collect();
        self.visible = self.options.iter().map(ComboOption::id).collect();
        self.push_event(ListboxEvent::Replaced {
            count: self.options.len(),
        });
        if self.highlight.take().is_some() {
            self.push_event(ListboxEvent::Highlighted(None));
        }
    }
}

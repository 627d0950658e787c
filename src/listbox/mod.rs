//! Listbox half of the combobox.
//!
//! The listbox owns the full option set, the visible (filtered) subset, the
//! highlighted option and whether the popup is open. It never talks to the
//! input directly: every state change is queued as a [`ListboxEvent`] and the
//! owning combobox drains the queue after each operation to refresh its ARIA
//! state and notify listeners.
//!
//! # Filtering
//!
//! Filtering is an ordinal, case-insensitive prefix match on each option's
//! comparison text. The visible set always keeps the original order.
//!
//! ```rust
//! use bubbletea_combobox::listbox::Listbox;
//! use bubbletea_combobox::option::{ComboOption, OptionMarkup};
//!
//! let markup: Vec<_> = ["Apple", "Apricot", "Banana"]
//!     .into_iter()
//!     .map(OptionMarkup::option)
//!     .collect();
//! let mut listbox = Listbox::new(ComboOption::from_markup(&markup));
//!
//! let first = listbox.filter("AP", None);
//! assert_eq!(listbox.visible_texts(), vec!["Apple", "Apricot"]);
//! assert_eq!(first, listbox.first());
//! ```
//!
//! # Delayed close
//!
//! Closing without force is a no-op while the pointer hovers the list or the
//! input, or while the widget has focus. [`Listbox::schedule_close`] returns a
//! command that re-checks those flags once the delay has passed, which lets
//! focus move between input and list without the popup flickering shut.

mod filtering;
mod model;
mod navigation;


pub use model::Listbox;

use crate::option::OptionId;
use std::time::Duration;

/// Delay before a non-forced close re-checks hover and focus.
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(300);

/// State changes reported by the listbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListboxEvent {
    /// The popup opened.
    Opened,
    /// The popup closed.
    Closed,
    /// The highlight moved.
    Highlighted(Option<OptionId>),
    /// The visible set was recomputed by a filter.
    Filtered {
        /// Number of visible options after filtering.
        visible: usize,
    },
    /// The whole option set was replaced.
    Replaced {
        /// Number of options in the new set.
        count: usize,
    },
}

/// Message sent when a scheduled close comes due.
#[derive(Debug, Clone)]
pub struct CloseListMsg {
    /// Listbox instance that scheduled the close.
    pub id: usize,
    /// Schedule tag; anything but the latest tag is stale.
    pub tag: usize,
}

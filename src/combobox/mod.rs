//! Combobox component: a text input with a filterable popup list.
//!
//! The combobox ties an editable value to a [`Listbox`](crate::listbox::Listbox)
//! of options. Depending on the [`AutocompleteMode`](crate::AutocompleteMode)
//! typing filters the list by prefix and may complete the value inline with
//! the best match. Options come either from a fixed set given at construction
//! or from a [`SearchSource`](crate::search::SearchSource) queried on every
//! edit.
//!
//! ## Keys
//!
//! | Key | Effect |
//! |-----|--------|
//! | ↓ / ↑ | Open the list, or move the highlight cyclically |
//! | Enter | Commit the highlighted option and close |
//! | Esc | Close, clear the value and the highlight |
//! | Tab | Close; commit if the highlight was moved with the arrows |
//! | printable | Edit the value and re-filter |
//!
//! ## Basic Usage
//!
//! ```rust
//! use bubbletea_combobox::combobox::{new, Config, Model};
//! use bubbletea_combobox::AutocompleteMode;
//! use bubbletea_rs::{KeyMsg, Msg};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let mut combo = Model::from_texts(
//!     &["Apple", "Apricot", "Banana"],
//!     Config::default().with_mode(AutocompleteMode::Both),
//! );
//! let _ = combo.focus();
//! let _ = combo.update(Box::new(KeyMsg {
//!     key: KeyCode::Char('a'),
//!     modifiers: KeyModifiers::NONE,
//! }) as Msg);
//!
//! // "a" was completed to the first match
//! assert_eq!(combo.value(), "Apple");
//! assert_eq!(combo.selection(), Some(1..5));
//! assert!(combo.is_open());
//! # let _ = new(&[]);
//! ```

mod config;
mod input;
mod keymap;
mod model;
mod pointer;
mod update;
mod view;

#[cfg(test)]
mod tests;

pub use config::{Config, ResultValueFn, SetValueFn, DEFAULT_BASE_CLASS};
pub use keymap::{default_key_map, KeyMap};
pub use model::{new, Model};
pub use pointer::Region;
pub use view::{default_styles, Styles, HIGHLIGHT_MARKER};

use crate::Component;
use bubbletea_rs::Cmd;

impl<I: Clone + Send + 'static> Component for Model<I> {
    fn focus(&mut self) -> Option<Cmd> {
        Model::focus(self)
    }

    /// Blurs and closes the list right away unless it is hovered. Use the
    /// inherent [`Model::blur`] for the delayed close.
    fn blur(&mut self) {
        self.release_focus();
        if self.attached {
            self.close_unforced();
            self.flush();
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

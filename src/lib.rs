#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-combobox/")]

//! # bubbletea-combobox
//!
//! An accessible autocomplete combobox for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: a text input paired with a popup list of options that
//! filters as you type.
//!
//! ## Overview
//!
//! The combobox follows the Elm Architecture with `update()` and `view()`
//! methods. It supports three autocomplete modes:
//!
//! - **none**: the list is a static picklist
//! - **list**: typing filters the list by case-insensitive prefix
//! - **both**: filtering plus inline completion of the first match
//!
//! Options come either from a fixed set or from a synchronous or
//! asynchronous search function. Only the latest search result is ever
//! applied, so slow searches that finish out of order cannot clobber newer
//! results.
//!
//! Accessibility state (`aria-expanded`, `aria-activedescendant`,
//! `aria-posinset` and friends) is exposed as plain data through
//! [`combobox::Model::input_aria`] and [`combobox::Model::options_aria`].
//!
//! ## Focus Management
//!
//! The combobox implements the [`Component`] trait:
//!
//! ```rust
//! use bubbletea_combobox::prelude::*;
//! use bubbletea_rs::Cmd;
//!
//! fn handle_focus<T: Component>(component: &mut T) {
//!     let _cmd: Option<Cmd> = component.focus();
//!     assert!(component.focused());
//!     component.blur();
//!     assert!(!component.focused());
//! }
//!
//! let mut combo = combobox_new(&["red", "green", "blue"]);
//! handle_focus(&mut combo);
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_combobox::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     combo: Combobox<String>,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut combo = combobox_new(&["Apple", "Apricot", "Banana"]);
//!         let cmd = combo.focus();
//!         (Self { combo }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.combo.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.combo.view()
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! State changes are traced with the [`tracing`] crate: open, close, filter
//! and commit at `trace`, search issue and stale-result drops at `debug`,
//! failed searches at `warn`. Install any subscriber to see them.

pub mod aria;
pub mod combobox;
pub mod error;
pub mod key;
pub mod listbox;
pub mod listener;
pub mod option;
pub mod search;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Focused components receive keyboard input; blurred ones ignore it.
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// # Returns
    ///
    /// An optional command to be executed by the bubbletea runtime, such as
    /// a search that populates the option list.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use aria::{AutocompleteMode, InputAria, OptionAria};
pub use combobox::{new as combobox_new, Config as ComboboxConfig, Model as Combobox};
pub use error::{Error, Result};
pub use key::{matches_binding, Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use listbox::{CloseListMsg, Listbox, ListboxEvent};
pub use listener::{Listener, Subscription, UpdateEvent};
pub use option::{ComboOption, MarkupRole, OptionId, OptionMarkup};
pub use search::{SearchResultMsg, SearchSession, SearchSource};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_combobox::prelude::*;
///
/// let combo: Combobox<String> = Combobox::from_texts(
///     &["one", "two"],
///     ComboboxConfig::default().with_mode(AutocompleteMode::List),
/// );
/// assert_eq!(combo.mode(), AutocompleteMode::List);
/// ```
pub mod prelude {
    pub use crate::aria::AutocompleteMode;
    pub use crate::combobox::{
        new as combobox_new, Config as ComboboxConfig, Model as Combobox, Region,
    };
    pub use crate::key::{matches_binding, Binding, KeyMap, KeyPress};
    pub use crate::listener::{Listener, UpdateEvent};
    pub use crate::option::{ComboOption, OptionId, OptionMarkup};
    pub use crate::search::SearchSource;
    pub use crate::Component;
}

//! Type-safe key bindings.
//!
//! A [`Binding`] groups one or more key presses under a single action together
//! with the help text shown for it. Components keep their bindings in a keymap
//! struct and test incoming [`KeyMsg`]s against them with [`matches_binding`].
//!
//! ```rust
//! use bubbletea_combobox::key::{matches_binding, Binding};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let next = Binding::new(vec![KeyCode::Down]).with_help("↓", "next option");
//! let msg = KeyMsg { key: KeyCode::Down, modifiers: KeyModifiers::NONE };
//! assert!(matches_binding(&msg, &next));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code.
    pub code: KeyCode,
    /// Required modifiers. Shift is ignored when matching.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    fn matches(&self, msg: &KeyMsg) -> bool {
        let wanted = self.modifiers.difference(KeyModifiers::SHIFT);
        let held = msg.modifiers.difference(KeyModifiers::SHIFT);
        self.code == msg.key && wanted == held
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"↓"`.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A set of key presses that trigger one action.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from key codes or `(code, modifiers)` pairs.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns the key presses of this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Returns the help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding is active. Bindings without keys are never enabled.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Returns true if `msg` is one of this binding's key presses.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Free-function form of [`Binding::matches`].
pub fn matches_binding(msg: &KeyMsg, binding: &Binding) -> bool {
    binding.matches(msg)
}

/// Keymaps that can describe themselves for a help view.
pub trait KeyMap {
    /// Bindings shown in the compact help line.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped into columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

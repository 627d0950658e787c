//! Key bindings for the combobox.

use crate::key::{self, Binding};
use crossterm::event::{KeyCode, KeyModifiers};

/// KeyMap is the set of key bindings the combobox reacts to.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Open the list or highlight the next option.
    pub next_option: Binding,
    /// Open the list or highlight the previous option.
    pub prev_option: Binding,
    /// Commit the highlighted option.
    pub commit: Binding,
    /// Close the list and clear the value.
    pub dismiss: Binding,
    /// Close the list, committing an option the list had focus on.
    pub accept: Binding,
    /// Delete one character backward.
    pub delete_character_backward: Binding,
    /// Delete one character forward.
    pub delete_character_forward: Binding,
    /// Move cursor one character left.
    pub character_backward: Binding,
    /// Move cursor one character right.
    pub character_forward: Binding,
    /// Move to start of line.
    pub line_start: Binding,
    /// Move to end of line.
    pub line_end: Binding,
}

/// The default combobox bindings.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        next_option: Binding::new(vec![KeyCode::Down]).with_help("↓", "next option"),
        prev_option: Binding::new(vec![KeyCode::Up]).with_help("↑", "previous option"),
        commit: Binding::new(vec![KeyCode::Enter]).with_help("enter", "select"),
        dismiss: Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear"),
        accept: Binding::new(vec![KeyCode::Tab]).with_help("tab", "accept"),
        delete_character_backward: Binding::new(vec![
            (KeyCode::Backspace, KeyModifiers::NONE),
            (KeyCode::Char('h'), KeyModifiers::CONTROL),
        ]),
        delete_character_forward: Binding::new(vec![
            (KeyCode::Delete, KeyModifiers::NONE),
            (KeyCode::Char('d'), KeyModifiers::CONTROL),
        ]),
        character_backward: Binding::new(vec![
            (KeyCode::Left, KeyModifiers::NONE),
            (KeyCode::Char('b'), KeyModifiers::CONTROL),
        ]),
        character_forward: Binding::new(vec![
            (KeyCode::Right, KeyModifiers::NONE),
            (KeyCode::Char('f'), KeyModifiers::CONTROL),
        ]),
        line_start: Binding::new(vec![
            (KeyCode::Home, KeyModifiers::NONE),
            (KeyCode::Char('a'), KeyModifiers::CONTROL),
        ]),
        line_end: Binding::new(vec![
            (KeyCode::End, KeyModifiers::NONE),
            (KeyCode::Char('e'), KeyModifiers::CONTROL),
        ]),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next_option, &self.prev_option, &self.commit, &self.dismiss]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.next_option, &self.prev_option],
            vec![&self.commit, &self.accept, &self.dismiss],
        ]
    }
}

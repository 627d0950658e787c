//! Single-line text buffer behind the combobox input.
//!
//! Besides the value and cursor position the buffer remembers where an inline
//! completion starts: after typing `ap` against `Apple` the value reads
//! `Apple` and `ple` is selected. Typing replaces the selection, Backspace
//! removes it, cursor movement accepts it.

use std::ops::Range;

#[derive(Debug, Clone, Default)]
pub(super) struct TextBuffer {
    value: Vec<char>,
    pos: usize,
    completion: Option<usize>,
}

impl TextBuffer {
    pub(super) fn value(&self) -> String {
        self.value.iter().collect()
    }

    pub(super) fn position(&self) -> usize {
        self.pos
    }

    /// The inline-completed suffix, as a char range.
    pub(super) fn selection(&self) -> Option<Range<usize>> {
        self.completion.map(|start| start..self.value.len())
    }

    pub(super) fn set(&mut self, s: &str) {
        self.value = s.chars().collect();
        self.pos = self.value.len();
        self.completion = None;
    }

    /// Replaces the value with `full` and selects everything after the first
    /// `typed_len` characters.
    pub(super) fn set_with_completion(&mut self, typed_len: usize, full: &str) {
        self.value = full.chars().collect();
        self.pos = self.value.len();
        self.completion = (typed_len < self.value.len()).then_some(typed_len);
    }

    pub(super) fn clear(&mut self) {
        self.set("");
    }

    /// Drops the completed suffix, leaving the cursor where it started.
    fn drop_selection(&mut self) -> bool {
        match self.completion.take() {
            Some(start) => {
                self.value.truncate(start);
                self.pos = start;
                true
            }
            None => false,
        }
    }

    pub(super) fn insert(&mut self, ch: char) {
        self.drop_selection();
        self.value.insert(self.pos, ch);
        self.pos += 1;
    }

    pub(super) fn delete_backward(&mut self) {
        if self.drop_selection() {
            return;
        }
        if self.pos > 0 {
            self.value.remove(self.pos - 1);
            self.pos -= 1;
        }
    }

    pub(super) fn delete_forward(&mut self) {
        if self.drop_selection() {
            return;
        }
        if self.pos < self.value.len() {
            self.value.remove(self.pos);
        }
    }

    pub(super) fn move_left(&mut self) {
        if let Some(start) = self.completion.take() {
            self.pos = start;
        } else if self.pos > 0 {
            self.pos -= 1;
        }
    }

    pub(super) fn move_right(&mut self) {
        if self.completion.take().is_some() {
            self.pos = self.value.len();
        } else if self.pos < self.value.len() {
            self.pos += 1;
        }
    }

    pub(super) fn move_start(&mut self) {
        self.completion = None;
        self.pos = 0;
    }

    pub(super) fn move_end(&mut self) {
        self.completion = None;
        self.pos = self.value.len();
    }
}

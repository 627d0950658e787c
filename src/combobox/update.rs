//! Message handling and the keyboard state machine.

use super::Model;
use crate::aria::AutocompleteMode;
use crate::key::matches_binding;
use crate::listbox::CloseListMsg;
use crate::option::{options_from_items, OptionId};
use crate::search::SearchResultMsg;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Insert(char),
    Backward,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Movement {
    Left,
    Right,
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Next,
    Previous,
    Commit,
    Dismiss,
    Accept,
    Edit(Edit),
    Move(Movement),
    Ignore,
}

impl<I: Clone + Send + 'static> Model<I> {
    /// Handles a message.
    ///
    /// Key messages are only processed while the input has focus. Delayed
    /// closes and search results are processed regardless, but only the
    /// latest of each kind is acted on. A destroyed widget ignores
    /// everything.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.key_consumed = false;
        if !self.attached {
            return None;
        }

        if let Some(close) = msg.downcast_ref::<CloseListMsg>() {
            if self.listbox.is_current_close(close) {
                self.close_unforced();
                self.flush();
            }
            return None;
        }

        if msg.is::<SearchResultMsg<I>>() {
            if let Ok(result) = msg.downcast::<SearchResultMsg<I>>() {
                self.apply_search_result(*result);
                self.flush();
            }
            return None;
        }

        if !self.focus {
            return None;
        }

        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        let cmd = self.handle_key(key_msg);
        self.flush();
        cmd
    }

    /// Gives the input focus. With a search source configured this issues a
    /// search for the current value so the list can be populated.
    pub fn focus(&mut self) -> Option<Cmd> {
        if !self.attached {
            return None;
        }
        self.focus = true;
        self.listbox.set_focus(true);
        self.list_focus = false;
        self.complete_on_result = false;
        let cmd = self.run_search();
        self.flush();
        cmd
    }

    /// Removes focus. The list is not closed right away: the returned command
    /// delivers a close that takes effect only if neither the input nor the
    /// list is hovered by then. Searches still in flight are dropped.
    pub fn blur(&mut self) -> Option<Cmd> {
        self.release_focus();
        if !self.attached || !self.listbox.is_open() {
            return None;
        }
        Some(self.listbox.schedule_close(self.config.close_delay))
    }

    pub(super) fn release_focus(&mut self) {
        self.focus = false;
        self.list_focus = false;
        self.listbox.set_focus(false);
        if let Some(search) = self.search.as_mut() {
            search.invalidate();
        }
    }

    /// Non-forced close. If the list actually hid, an autoselected highlight
    /// is committed and, with `clear` set, the highlight and search results
    /// are dropped.
    pub(super) fn close_unforced(&mut self) {
        let was_open = self.listbox.is_open();
        if !self.listbox.close(false, self.has_hover) || !was_open {
            return;
        }
        self.list_focus = false;

        if self.config.autoselect {
            if let Some(option) = self.listbox.highlighted_option().cloned() {
                self.commit(option);
            }
        }
        if self.config.clear {
            self.listbox.set_highlight(None);
            if self.search.is_some() {
                self.listbox.set_options(Vec::new());
            }
        }
    }

    /// Closes the list regardless of hover or focus.
    pub(super) fn close_forced(&mut self) {
        self.listbox.close(true, self.has_hover);
        self.list_focus = false;
    }

    fn apply_search_result(&mut self, msg: SearchResultMsg<I>) {
        let Some(session) = self.search.as_mut() else {
            debug!("search result without a search source");
            return;
        };
        let query = msg.query.clone();
        let Some(results) = session.accept(msg) else {
            return;
        };
        self.listeners.emit(|l| l.on_loaded());

        let text_of = self.config.get_result_value.clone();
        self.listbox
            .set_options(options_from_items(results, |item| text_of(item)));
        if self.listbox.is_empty() {
            self.close_forced();
            return;
        }

        let inline = std::mem::take(&mut self.complete_on_result)
            && self.config.mode == AutocompleteMode::Both
            && !query.is_empty()
            && self.input.value() == query;
        let target = if inline || self.config.autoselect {
            self.listbox.first()
        } else {
            None
        };
        self.listbox.set_highlight(target);
        if inline {
            self.complete_inline(&query, target);
        }
        self.listbox.open();
    }

    /// Writes the text of `target` into the input, selecting the part after
    /// what the user typed.
    fn complete_inline(&mut self, query: &str, target: Option<OptionId>) {
        let query_lower = query.to_lowercase();
        let Some(option) = target.and_then(|id| self.listbox.option(id)) else {
            return;
        };
        if !option.matches_prefix(&query_lower) {
            return;
        }
        let typed_len = option.matched_prefix_len(&query_lower);
        let text = option.text().to_string();
        self.input.set_with_completion(typed_len, &text);
    }

    fn key_action(&self, msg: &KeyMsg) -> KeyAction {
        let km = &self.key_map;
        if matches_binding(msg, &km.next_option) {
            KeyAction::Next
        } else if matches_binding(msg, &km.prev_option) {
            KeyAction::Previous
        } else if matches_binding(msg, &km.commit) {
            KeyAction::Commit
        } else if matches_binding(msg, &km.dismiss) {
            KeyAction::Dismiss
        } else if matches_binding(msg, &km.accept) {
            KeyAction::Accept
        } else if matches_binding(msg, &km.delete_character_backward) {
            KeyAction::Edit(Edit::Backward)
        } else if matches_binding(msg, &km.delete_character_forward) {
            KeyAction::Edit(Edit::Forward)
        } else if matches_binding(msg, &km.character_backward) {
            KeyAction::Move(Movement::Left)
        } else if matches_binding(msg, &km.character_forward) {
            KeyAction::Move(Movement::Right)
        } else if matches_binding(msg, &km.line_start) {
            KeyAction::Move(Movement::Start)
        } else if matches_binding(msg, &km.line_end) {
            KeyAction::Move(Movement::End)
        } else {
            match msg.key {
                KeyCode::Char(ch)
                    if !msg
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                        && !ch.is_control() =>
                {
                    KeyAction::Edit(Edit::Insert(ch))
                }
                _ => KeyAction::Ignore,
            }
        }
    }

    fn handle_key(&mut self, msg: &KeyMsg) -> Option<Cmd> {
        let action = self.key_action(msg);
        trace!(?action, "key");
        match action {
            KeyAction::Next => self.navigate(true),
            KeyAction::Previous => self.navigate(false),
            KeyAction::Commit => self.commit_highlighted(),
            KeyAction::Dismiss => self.dismiss(),
            KeyAction::Accept => self.accept(),
            KeyAction::Edit(edit) => return self.edit(edit),
            KeyAction::Move(movement) => self.move_cursor(movement),
            KeyAction::Ignore => {}
        }
        None
    }

    fn navigate(&mut self, down: bool) {
        self.key_consumed = true;
        if !self.listbox.has_options() {
            return;
        }

        if !self.listbox.is_open() {
            self.listbox.open();
            if self.config.mode.filters() {
                let target = if down {
                    self.listbox.first()
                } else {
                    self.listbox.last()
                };
                self.listbox.set_highlight(target);
            }
        } else {
            let target = match (self.listbox.highlighted(), down) {
                (Some(current), true) => self.listbox.next(current),
                (Some(current), false) => self.listbox.previous(current),
                (None, true) => self.listbox.first(),
                (None, false) => self.listbox.last(),
            };
            self.listbox.set_highlight(target);
        }
        self.list_focus = self.listbox.highlighted().is_some();
    }

    fn commit_highlighted(&mut self) {
        let Some(option) = self.listbox.highlighted_option().cloned() else {
            if self.listbox.is_open() {
                self.key_consumed = true;
                self.close_forced();
            }
            return;
        };
        self.key_consumed = true;
        self.commit(option.clone());
        self.close_forced();
        self.submit(&option);
    }

    fn dismiss(&mut self) {
        self.key_consumed = true;
        self.close_forced();
        self.input.clear();
        self.selected = None;
        self.listbox.set_highlight(None);
        match self.search.as_mut() {
            Some(search) => search.invalidate(),
            None if self.config.mode.filters() => {
                self.listbox.filter("", None);
            }
            None => {}
        }
    }

    /// Tab: the key is never consumed, so focus moves on.
    fn accept(&mut self) {
        let commit = if self.list_focus {
            self.listbox.highlighted_option().cloned()
        } else {
            None
        };
        self.close_forced();
        if let Some(option) = commit {
            self.commit(option);
        }
    }

    fn edit(&mut self, edit: Edit) -> Option<Cmd> {
        self.key_consumed = true;
        let before = self.input.value();
        match edit {
            Edit::Insert(ch) => self.input.insert(ch),
            Edit::Backward => self.input.delete_backward(),
            Edit::Forward => self.input.delete_forward(),
        }
        if self.input.value() == before {
            return None;
        }

        self.selected = None;
        self.list_focus = false;
        if !self.config.mode.filters() {
            return None;
        }
        let printable = matches!(edit, Edit::Insert(_));
        if self.search.is_some() {
            self.complete_on_result = printable;
            return self.run_search();
        }
        self.refilter(printable);
        None
    }

    /// Filters by the current value and picks the highlight. `printable` is
    /// true when the value changed by typing a character, which is the only
    /// case that inline-completes.
    fn refilter(&mut self, printable: bool) {
        let query = self.input.value();
        let previous = self.listbox.highlighted();
        let found = self.listbox.filter(&query, previous);

        if query.is_empty() || self.listbox.is_empty() {
            self.listbox.set_highlight(None);
            self.close_forced();
            return;
        }

        let inline = printable && self.config.mode == AutocompleteMode::Both;
        let target = if inline || self.config.autoselect {
            found
        } else {
            self.listbox.highlighted()
        };
        self.listbox.set_highlight(target);

        if inline {
            self.complete_inline(&query, found);
        }
        self.listbox.open();
    }

    fn move_cursor(&mut self, movement: Movement) {
        self.key_consumed = true;
        match movement {
            Movement::Left => self.input.move_left(),
            Movement::Right => self.input.move_right(),
            Movement::Start => self.input.move_start(),
            Movement::End => self.input.move_end(),
        }
        self.list_focus = false;

        if self.config.mode != AutocompleteMode::Both {
            self.listbox.set_highlight(None);
        } else if self.search.is_none() {
            // The filter follows the whole value, accepted completion included.
            let query = self.input.value();
            let current = self.listbox.highlighted();
            self.listbox.filter(&query, current);
            if self.listbox.is_empty() {
                self.close_forced();
            }
        }
    }
}

//! Pointer interaction.
//!
//! Terminals report mouse input in host-specific ways, so the combobox does not
//! parse mouse events itself. Hosts register where the input and the list
//! were drawn and forward presses, hover changes and option clicks.

use super::Model;
use crate::option::OptionId;
use bubbletea_rs::Cmd;
use tracing::trace;

/// A rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Region {
    /// Creates a region.
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the cell at (`x`, `y`) lies inside the region.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && u32::from(x) < u32::from(self.x) + u32::from(self.width)
            && u32::from(y) < u32::from(self.y) + u32::from(self.height)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct Regions {
    pub(super) input: Option<Region>,
    pub(super) list: Option<Region>,
}

impl Regions {
    fn contains(&self, x: u16, y: u16) -> bool {
        self.input.is_some_and(|r| r.contains(x, y)) || self.list.is_some_and(|r| r.contains(x, y))
    }

    fn known(&self) -> bool {
        self.input.is_some() || self.list.is_some()
    }
}

impl<I: Clone + Send + 'static> Model<I> {
    /// Records where the input and the list were drawn. Pass `None` for the
    /// list while it is hidden.
    pub fn set_regions(&mut self, input: Region, list: Option<Region>) {
        self.regions = Regions {
            input: Some(input),
            list,
        };
    }

    /// A pointer press anywhere on screen. A press outside both the input
    /// and the list closes the list. Returns true if the list was closed.
    pub fn pointer_down(&mut self, x: u16, y: u16) -> bool {
        if !self.attached || !self.regions.known() || self.regions.contains(x, y) {
            return false;
        }
        let was_open = self.listbox.is_open();
        trace!(x, y, "pointer down outside");
        self.close_forced();
        self.flush();
        was_open
    }

    /// A click on the input toggles the list.
    pub fn click_input(&mut self) {
        if !self.attached {
            return;
        }
        if self.listbox.is_open() {
            self.close_forced();
        } else if self.listbox.has_options() {
            self.listbox.open();
        }
        self.flush();
    }

    /// A click on a visible option commits it, closes the list and notifies
    /// submit listeners.
    pub fn click_option(&mut self, id: OptionId) -> crate::Result<()> {
        self.select_option(id)?;
        self.close_forced();
        if let Some(option) = self.selected.clone() {
            self.submit(&option);
        }
        self.flush();
        Ok(())
    }

    /// The pointer entered the input.
    pub fn pointer_enter_input(&mut self) {
        self.has_hover = true;
    }

    /// The pointer left the input. Returns a delayed close if the list is open.
    pub fn pointer_leave_input(&mut self) -> Option<Cmd> {
        self.has_hover = false;
        self.delayed_close()
    }

    /// The pointer entered the list.
    pub fn pointer_enter_list(&mut self) {
        self.listbox.set_hover(true);
    }

    /// The pointer left the list. Returns a delayed close if the list is open.
    pub fn pointer_leave_list(&mut self) -> Option<Cmd> {
        self.listbox.set_hover(false);
        self.delayed_close()
    }

    fn delayed_close(&mut self) -> Option<Cmd> {
        if !self.attached || !self.listbox.is_open() {
            return None;
        }
        Some(self.listbox.schedule_close(self.config.close_delay))
    }
}

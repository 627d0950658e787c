//! ARIA state of the combobox.
//!
//! The combobox does not own any rendering surface, so its accessibility
//! state is exposed as plain data. Hosts that do have attributes to set (a
//! web view, a screen-reader bridge, a test harness) copy these values over
//! after each update.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// How typed text and the option list interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutocompleteMode {
    /// The list never filters; it is a static picklist.
    None,
    /// The list filters by prefix; the value only changes on commit.
    List,
    /// Filtering plus inline completion of the best match.
    #[default]
    Both,
}

impl AutocompleteMode {
    /// The `aria-autocomplete` attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            AutocompleteMode::None => "none",
            AutocompleteMode::List => "list",
            AutocompleteMode::Both => "both",
        }
    }

    /// Whether typing re-filters the list.
    pub fn filters(self) -> bool {
        self != AutocompleteMode::None
    }
}

impl fmt::Display for AutocompleteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AutocompleteMode {
    type Err = Error;

    /// Parses an `aria-autocomplete` value. `inline` behaves like `both`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(AutocompleteMode::None),
            "list" => Ok(AutocompleteMode::List),
            "both" | "inline" => Ok(AutocompleteMode::Both),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

/// Element id of the option at `index` in the visible list.
pub fn option_dom_id(base_class: &str, index: usize) -> String {
    format!("{base_class}-result-{index}")
}

/// Attributes of the text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputAria {
    /// `aria-expanded`
    pub expanded: bool,
    /// `aria-activedescendant`; `None` renders as an empty value.
    pub active_descendant: Option<String>,
    /// `aria-autocomplete`
    pub autocomplete: AutocompleteMode,
}

impl InputAria {
    /// Attribute name/value pairs in a stable order.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("aria-expanded", self.expanded.to_string()),
            (
                "aria-activedescendant",
                self.active_descendant.clone().unwrap_or_default(),
            ),
            ("aria-autocomplete", self.autocomplete.to_string()),
            ("aria-haspopup", "listbox".to_string()),
        ]
    }
}

impl fmt::Display for InputAria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_attributes(f, &self.attributes())
    }
}

/// Attributes of one visible option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionAria {
    /// Element id, see [`option_dom_id`].
    pub id: String,
    /// 1-based position in the visible list.
    pub pos_in_set: usize,
    /// Number of visible options.
    pub set_size: usize,
    /// Whether this option is highlighted.
    pub selected: bool,
}

impl OptionAria {
    /// Attribute name/value pairs. `aria-selected` only appears when set.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("id", self.id.clone()),
            ("role", "option".to_string()),
            ("aria-posinset", self.pos_in_set.to_string()),
            ("aria-setsize", self.set_size.to_string()),
        ];
        if self.selected {
            attrs.push(("aria-selected", "true".to_string()));
        }
        attrs
    }
}

impl fmt::Display for OptionAria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_attributes(f, &self.attributes())
    }
}

fn write_attributes(f: &mut fmt::Formatter<'_>, attrs: &[(&'static str, String)]) -> fmt::Result {
    for (i, (name, value)) in attrs.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{name}=\"{value}\"")?;
    }
    Ok(())
}

//! Selectable options.
//!
//! A [`ComboOption`] wraps one item the user can pick. Its display text is
//! trimmed once at creation and a lowercase copy is kept for prefix matching,
//! so filtering never re-normalizes text.

use std::fmt;

/// Position of an option in the full (unfiltered) option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(pub usize);

impl OptionId {
    /// Zero-based position in the full option set.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a markup entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupRole {
    /// A selectable option.
    Option,
    /// A visual separator between groups.
    Separator,
}

/// One entry of pre-existing listbox markup.
///
/// Hosts that describe their options declaratively (for example from a
/// config file or a template) hand these to [`ComboOption::from_markup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMarkup {
    /// Text content of the entry.
    pub text: String,
    /// Entry role.
    pub role: MarkupRole,
    /// Whether the entry nests further elements.
    pub has_children: bool,
}

impl OptionMarkup {
    /// A plain option entry.
    pub fn option(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: MarkupRole::Option,
            has_children: false,
        }
    }

    /// A separator entry.
    pub fn separator() -> Self {
        Self {
            text: String::new(),
            role: MarkupRole::Separator,
            has_children: false,
        }
    }

    /// Marks the entry as containing child elements.
    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }

    fn is_selectable(&self) -> bool {
        self.role == MarkupRole::Option && !self.has_children
    }
}

/// A single selectable option.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboOption<I> {
    id: OptionId,
    text: String,
    comparison: String,
    item: I,
}

impl<I> ComboOption<I> {
    /// Creates an option. The display text is trimmed.
    pub fn new(id: OptionId, text: &str, item: I) -> Self {
        let text = text.trim().to_string();
        let comparison = text.to_lowercase();
        Self {
            id,
            text,
            comparison,
            item,
        }
    }

    /// Position in the full option set.
    pub fn id(&self) -> OptionId {
        self.id
    }

    /// Trimmed display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercased display text used for matching.
    pub fn comparison(&self) -> &str {
        &self.comparison
    }

    /// The wrapped host item.
    pub fn item(&self) -> &I {
        &self.item
    }

    pub(crate) fn renumbered(mut self, id: OptionId) -> Self {
        self.id = id;
        self
    }

    /// Ordinal prefix match against an already lowercased query.
    pub fn matches_prefix(&self, query_lower: &str) -> bool {
        self.comparison.starts_with(query_lower)
    }

    /// Number of chars of the display text covered by a matching lowercased
    /// query. Lowercasing can change the char count, so this walks the text
    /// rather than counting the query.
    pub(crate) fn matched_prefix_len(&self, query_lower: &str) -> usize {
        let mut lowered = 0;
        for (count, ch) in self.text.chars().enumerate() {
            if lowered >= query_lower.len() {
                return count;
            }
            lowered += ch.to_lowercase().map(char::len_utf8).sum::<usize>();
        }
        self.text.chars().count()
    }
}

impl ComboOption<String> {
    /// Builds options from markup, skipping separators and entries with child
    /// elements. Kept entries are numbered consecutively.
    pub fn from_markup(markup: &[OptionMarkup]) -> Vec<Self> {
        markup
            .iter()
            .filter(|m| m.is_selectable())
            .enumerate()
            .map(|(i, m)| {
                let text = m.text.trim().to_string();
                ComboOption::new(OptionId(i), &text, text.clone())
            })
            .collect()
    }
}

/// Builds options from host items, numbering them in order.
pub fn options_from_items<I>(items: Vec<I>, text_of: impl Fn(&I) -> String) -> Vec<ComboOption<I>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let text = text_of(&item);
            ComboOption::new(OptionId(i), &text, item)
        })
        .collect()
}

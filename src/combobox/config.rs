//! Flat configuration for the combobox.

use crate::aria::AutocompleteMode;
use crate::listbox::DEFAULT_CLOSE_DELAY;
use crate::search::SearchSource;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Maps a result item to the text shown and committed for it.
pub type ResultValueFn<I> = Arc<dyn Fn(&I) -> String + Send + Sync>;

/// Maps committed option text to the value written into the input.
pub type SetValueFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Base used for option element ids (`{base}-result-{index}`).
pub const DEFAULT_BASE_CLASS: &str = "Combobox";

/// Combobox options.
///
/// ```rust
/// use bubbletea_combobox::combobox::Config;
/// use bubbletea_combobox::AutocompleteMode;
///
/// let config: Config<String> = Config::default()
///     .with_mode(AutocompleteMode::List)
///     .with_autoselect(true);
/// assert!(config.autoselect);
/// ```
pub struct Config<I> {
    /// Source of options. Without one the options given at construction are
    /// filtered locally.
    pub search: Option<SearchSource<I>>,
    /// Highlight the first option whenever the list is recomputed.
    pub autoselect: bool,
    /// Display text of an item.
    pub get_result_value: ResultValueFn<I>,
    /// Drop the highlight (and search results) when the list hides on blur.
    pub clear: bool,
    /// Transform applied to option text before it becomes the input value.
    /// Anything other than the identity leaves the value differing from the
    /// selected option's text, which in `Both` mode means the value no longer
    /// prefix-matches its own selection. Prefer `List` or `None` with one.
    pub set_value: SetValueFn,
    /// Autocomplete mode.
    pub mode: AutocompleteMode,
    /// Delay before a blur or pointer-leave closes the list.
    pub close_delay: Duration,
    /// Prefix for option element ids.
    pub base_class: String,
}

impl<I: fmt::Display + 'static> Default for Config<I> {
    fn default() -> Self {
        Self::new(Arc::new(|item: &I| item.to_string()))
    }
}

impl<I> Clone for Config<I> {
    fn clone(&self) -> Self {
        Self {
            search: self.search.clone(),
            autoselect: self.autoselect,
            get_result_value: Arc::clone(&self.get_result_value),
            clear: self.clear,
            set_value: Arc::clone(&self.set_value),
            mode: self.mode,
            close_delay: self.close_delay,
            base_class: self.base_class.clone(),
        }
    }
}

impl<I> fmt::Debug for Config<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("search", &self.search)
            .field("autoselect", &self.autoselect)
            .field("clear", &self.clear)
            .field("mode", &self.mode)
            .field("close_delay", &self.close_delay)
            .field("base_class", &self.base_class)
            .finish_non_exhaustive()
    }
}

impl<I> Config<I> {
    /// Creates a configuration for items without a `Display` impl.
    pub fn new(get_result_value: ResultValueFn<I>) -> Self {
        Self {
            search: None,
            autoselect: false,
            get_result_value,
            clear: true,
            set_value: Arc::new(|s: &str| s.to_string()),
            mode: AutocompleteMode::default(),
            close_delay: DEFAULT_CLOSE_DELAY,
            base_class: DEFAULT_BASE_CLASS.to_string(),
        }
    }

    /// Sets the search source.
    pub fn with_search(mut self, search: SearchSource<I>) -> Self {
        self.search = Some(search);
        self
    }

    /// Enables or disables autoselect.
    pub fn with_autoselect(mut self, autoselect: bool) -> Self {
        self.autoselect = autoselect;
        self
    }

    /// Sets how an item is turned into display text.
    pub fn with_result_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&I) -> String + Send + Sync + 'static,
    {
        self.get_result_value = Arc::new(f);
        self
    }

    /// Enables or disables clearing on hide.
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// Sets the transform applied to committed text.
    pub fn with_set_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.set_value = Arc::new(f);
        self
    }

    /// Sets the autocomplete mode.
    pub fn with_mode(mut self, mode: AutocompleteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the delayed-close interval.
    pub fn with_close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    /// Sets the element id prefix.
    pub fn with_base_class(mut self, base_class: impl Into<String>) -> Self {
        self.base_class = base_class.into();
        self
    }
}

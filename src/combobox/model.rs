//! Core model implementation for the combobox component.

use super::config::Config;
use super::input::TextBuffer;
use super::keymap::{default_key_map, KeyMap};
use super::pointer::Regions;
use super::view::{default_styles, Styles};
use crate::aria::{option_dom_id, AutocompleteMode, InputAria, OptionAria};
use crate::listbox::{Listbox, ListboxEvent};
use crate::listener::{Listener, Listeners, Subscription, UpdateEvent};
use crate::option::{options_from_items, ComboOption, OptionId, OptionMarkup};
use crate::search::SearchSession;
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
use std::ops::Range;
use tracing::trace;

/// The combobox model: a text input paired with a filterable listbox.
///
/// The model follows the Elm Architecture used by Bubble Tea. Keyboard input
/// arrives through [`Model::update`]; focus, pointer and option clicks have
/// dedicated methods because terminals report them in host-specific ways.
///
/// # Examples
///
/// ```rust
/// use bubbletea_combobox::combobox::{Config, Model};
/// use bubbletea_combobox::AutocompleteMode;
///
/// let mut combo = Model::from_texts(
///     &["Apple", "Apricot", "Banana"],
///     Config::default().with_mode(AutocompleteMode::List),
/// );
/// combo.set_value("ap");
/// assert_eq!(combo.value(), "ap");
/// assert_eq!(combo.visible_texts(), vec!["Apple", "Apricot"]);
/// ```
pub struct Model<I> {
    /// Prompt shown before the text.
    pub prompt: String,
    /// Placeholder shown while the value is empty.
    pub placeholder: String,
    /// Maximum rendered width of the input and each option. 0 means no limit.
    pub width: usize,
    /// Key bindings.
    pub key_map: KeyMap,
    /// Rendering styles.
    pub styles: Styles,

    pub(super) config: Config<I>,
    pub(super) input: TextBuffer,
    pub(super) listbox: Listbox<I>,
    pub(super) search: Option<SearchSession<I>>,
    pub(super) selected: Option<ComboOption<I>>,
    pub(super) focus: bool,
    pub(super) has_hover: bool,
    /// The listbox holds visual focus, i.e. the highlight was moved with the arrows.
    pub(super) list_focus: bool,
    pub(super) attached: bool,
    pub(super) key_consumed: bool,
    /// The pending search was issued by typing in `Both` mode and its
    /// result should complete the value inline.
    pub(super) complete_on_result: bool,
    pub(super) regions: Regions,
    pub(super) listeners: Listeners<I>,
    last_value: String,
}

impl<I: Clone + Send + 'static> Model<I> {
    /// Creates a combobox over `options`.
    pub fn new(options: Vec<ComboOption<I>>, config: Config<I>) -> Self {
        let search = config.search.clone().map(SearchSession::new);
        Self {
            prompt: "> ".to_string(),
            placeholder: String::new(),
            width: 0,
            key_map: default_key_map(),
            styles: default_styles(),
            config,
            input: TextBuffer::default(),
            listbox: Listbox::new(options),
            search,
            selected: None,
            focus: false,
            has_hover: false,
            list_focus: false,
            attached: true,
            key_consumed: false,
            complete_on_result: false,
            regions: Regions::default(),
            listeners: Listeners::default(),
            last_value: String::new(),
        }
    }

    /// Creates a combobox over host items, using the configured
    /// `get_result_value` for their text.
    pub fn with_items(items: Vec<I>, config: Config<I>) -> Self {
        let text_of = config.get_result_value.clone();
        let options = options_from_items(items, |item| text_of(item));
        Self::new(options, config)
    }

    /// Current text value.
    pub fn value(&self) -> String {
        self.input.value()
    }

    /// Cursor position in characters.
    pub fn position(&self) -> usize {
        self.input.position()
    }

    /// The inline-completed suffix as a character range, if any.
    pub fn selection(&self) -> Option<Range<usize>> {
        self.input.selection()
    }

    /// Replaces the value programmatically. The list is re-filtered but not
    /// opened.
    pub fn set_value(&mut self, value: &str) {
        self.input.set(value);
        self.selected = None;
        if self.config.mode.filters() && self.search.is_none() {
            let current = self.listbox.highlighted();
            self.listbox.filter(value, current);
        }
        self.flush();
    }

    /// The last committed option.
    pub fn selected(&self) -> Option<&ComboOption<I>> {
        self.selected.as_ref()
    }

    /// The highlighted option.
    pub fn highlighted(&self) -> Option<&ComboOption<I>> {
        self.listbox.highlighted_option()
    }

    /// Display text of the visible options.
    pub fn visible_texts(&self) -> Vec<&str> {
        self.listbox.visible_texts()
    }

    /// Whether the list is open.
    pub fn is_open(&self) -> bool {
        self.listbox.is_open()
    }

    /// The autocomplete mode.
    pub fn mode(&self) -> AutocompleteMode {
        self.config.mode
    }

    /// The configuration.
    pub fn config(&self) -> &Config<I> {
        &self.config
    }

    /// Read access to the listbox.
    pub fn listbox(&self) -> &Listbox<I> {
        &self.listbox
    }

    /// Whether a search is waiting for its result.
    pub fn loading(&self) -> bool {
        self.search.as_ref().is_some_and(SearchSession::in_flight)
    }

    /// Whether the input has focus.
    pub fn focused(&self) -> bool {
        self.focus
    }

    /// Whether the last key message was handled. Unhandled keys (Tab in
    /// particular) should get their default behavior from the host.
    pub fn key_consumed(&self) -> bool {
        self.key_consumed
    }

    /// Whether the widget is attached, see [`Model::init`].
    pub fn attached(&self) -> bool {
        self.attached
    }

    /// Registers a listener.
    pub fn subscribe(&mut self, listener: impl Listener<I> + 'static) -> Subscription {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Removes a listener. Returns false if it was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    /// Re-attaches a destroyed widget. Attaching twice is a no-op.
    pub fn init(&mut self) {
        if self.attached {
            return;
        }
        trace!("combobox init");
        self.attached = true;
    }

    /// Detaches the widget: it stops reacting to messages and every delayed
    /// close or search issued before now is dropped when it arrives.
    /// Destroying twice is a no-op.
    pub fn destroy(&mut self) {
        if !self.attached {
            return;
        }
        trace!("combobox destroy");
        self.attached = false;
        self.focus = false;
        self.has_hover = false;
        self.list_focus = false;
        self.listbox.close(true, false);
        self.listbox.detach();
        if let Some(search) = self.search.as_mut() {
            search.invalidate();
        }
        self.listbox.drain_events();
    }

    /// ARIA attributes of the input.
    pub fn input_aria(&self) -> InputAria {
        let expanded = self.listbox.is_open();
        let active_descendant = if expanded {
            self.listbox
                .highlighted()
                .and_then(|id| self.listbox.visible_position(id))
                .map(|pos| option_dom_id(&self.config.base_class, pos))
        } else {
            None
        };
        InputAria {
            expanded,
            active_descendant,
            autocomplete: self.config.mode,
        }
    }

    /// ARIA attributes of every visible option.
    pub fn options_aria(&self) -> Vec<OptionAria> {
        let set_size = self.listbox.len();
        let highlight = self.listbox.highlighted();
        self.listbox
            .visible_options()
            .enumerate()
            .map(|(pos, option)| OptionAria {
                id: option_dom_id(&self.config.base_class, pos),
                pos_in_set: pos + 1,
                set_size,
                selected: Some(option.id()) == highlight,
            })
            .collect()
    }

    /// Writes an option's text into the input and remembers it as selected.
    pub(super) fn commit(&mut self, option: ComboOption<I>) {
        let value = (self.config.set_value)(option.text());
        trace!(value = %value, "commit");
        self.input.set(&value);
        if self.config.mode.filters() && self.search.is_none() {
            self.listbox.filter(&value, Some(option.id()));
            self.listbox.set_highlight(Some(option.id()));
        }
        self.selected = Some(option);
    }

    pub(super) fn submit(&mut self, option: &ComboOption<I>) {
        self.listeners.emit(|l| l.on_submit(option));
    }

    /// Commits the visible option `id` without notifying submit listeners.
    pub fn select_option(&mut self, id: OptionId) -> crate::Result<()> {
        if self.listbox.visible_position(id).is_none() {
            return Err(crate::Error::UnknownOption(id.index()));
        }
        self.listbox.set_highlight(Some(id));
        if let Some(option) = self.listbox.option(id).cloned() {
            self.commit(option);
        }
        self.flush();
        Ok(())
    }

    /// Issues a search for the current value, if a search source is configured.
    pub(super) fn run_search(&mut self) -> Option<Cmd> {
        let query = self.input.value();
        let session = self.search.as_mut()?;
        let cmd = session.search(&query);
        self.listeners.emit(|l| l.on_loading());
        Some(cmd)
    }

    /// Forwards queued listbox events and value changes to listeners.
    pub(super) fn flush(&mut self) {
        let mut changed = false;
        for event in self.listbox.drain_events() {
            match event {
                ListboxEvent::Opened => self.listeners.emit(|l| l.on_show()),
                ListboxEvent::Closed => self.listeners.emit(|l| l.on_hide()),
                ListboxEvent::Highlighted(_)
                | ListboxEvent::Filtered { .. }
                | ListboxEvent::Replaced { .. } => changed = true,
            }
        }

        let value = self.input.value();
        if value != self.last_value {
            self.last_value = value;
            changed = true;
        }

        if changed {
            let event = self.update_event();
            self.listeners.emit(|l| l.on_update(&event));
        }
    }

    fn update_event(&self) -> UpdateEvent {
        UpdateEvent {
            results: self
                .listbox
                .visible_texts()
                .into_iter()
                .map(str::to_string)
                .collect(),
            highlighted: self
                .listbox
                .highlighted()
                .and_then(|id| self.listbox.visible_position(id)),
            value: self.input.value(),
        }
    }
}

impl Model<String> {
    /// Creates a combobox from listbox markup. Separators and entries with
    /// child elements are skipped.
    pub fn from_markup(markup: &[OptionMarkup], config: Config<String>) -> Self {
        Self::new(ComboOption::from_markup(markup), config)
    }

    /// Creates a combobox over plain strings.
    pub fn from_texts(texts: &[&str], config: Config<String>) -> Self {
        let markup: Vec<_> = texts.iter().map(|t| OptionMarkup::option(*t)).collect();
        Self::from_markup(&markup, config)
    }
}

/// Creates a combobox over plain strings with the default configuration.
///
/// ```rust
/// let combo = bubbletea_combobox::combobox::new(&["red", "green", "blue"]);
/// assert_eq!(combo.visible_texts().len(), 3);
/// ```
pub fn new(texts: &[&str]) -> Model<String> {
    Model::from_texts(texts, Config::default())
}

impl Default for Model<String> {
    fn default() -> Self {
        new(&[])
    }
}

impl BubbleTeaModel for Model<String> {
    fn init() -> (Self, Option<Cmd>) {
        (Self::default(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

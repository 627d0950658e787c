use super::*;
use crate::aria::AutocompleteMode;
use crate::listener::{Listener, UpdateEvent};
use crate::option::{ComboOption, OptionId, OptionMarkup};
use crate::search::SearchSource;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const FRUIT: [&str; 3] = ["Apple", "Apricot", "Banana"];

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    }) as Msg
}

fn combo(mode: AutocompleteMode, autoselect: bool) -> Model<String> {
    let mut m = Model::from_texts(
        &FRUIT,
        Config::default()
            .with_mode(mode)
            .with_autoselect(autoselect)
            .with_close_delay(Duration::from_millis(1)),
    );
    let _ = m.focus();
    m
}

fn type_str<I: Clone + Send + 'static>(m: &mut Model<I>, s: &str) -> Vec<Cmd> {
    s.chars()
        .filter_map(|ch| m.update(key(KeyCode::Char(ch))))
        .collect()
}

fn highlighted_text<I: Clone + Send + 'static>(m: &Model<I>) -> Option<String> {
    m.highlighted().map(|o| o.text().to_string())
}

async fn deliver(cmd: Cmd) -> Msg {
    cmd.await.expect("command should produce a message")
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn count(&self, name: &str) -> usize {
        self.events().iter().filter(|e| e.as_str() == name).count()
    }

    fn push(&self, event: String) {
        self.0.lock().unwrap().push(event);
    }
}

impl<I> Listener<I> for Recorder {
    fn on_loading(&mut self) {
        self.push("loading".into());
    }
    fn on_loaded(&mut self) {
        self.push("loaded".into());
    }
    fn on_update(&mut self, event: &UpdateEvent) {
        self.push(format!("update:{}:{}", event.value, event.results.len()));
    }
    fn on_submit(&mut self, option: &ComboOption<I>) {
        self.push(format!("submit:{}", option.text()));
    }
    fn on_show(&mut self) {
        self.push("show".into());
    }
    fn on_hide(&mut self) {
        self.push("hide".into());
    }
}

#[test]
fn test_list_mode_filters_without_highlight() {
    let mut m = combo(AutocompleteMode::List, false);
    type_str(&mut m, "ap");

    assert_eq!(m.value(), "ap");
    assert_eq!(m.visible_texts(), vec!["Apple", "Apricot"]);
    assert!(m.is_open());
    assert_eq!(m.highlighted(), None);
    assert!(m.key_consumed());
}

#[test]
fn test_autoselect_highlights_first_match() {
    let mut m = combo(AutocompleteMode::List, true);
    type_str(&mut m, "ap");
    assert_eq!(highlighted_text(&m).as_deref(), Some("Apple"));

    type_str(&mut m, "r");
    assert_eq!(m.visible_texts(), vec!["Apricot"]);
    assert_eq!(highlighted_text(&m).as_deref(), Some("Apricot"));
}

#[test]
fn test_no_match_closes_and_clears_highlight() {
    let mut m = combo(AutocompleteMode::List, true);
    type_str(&mut m, "ap");
    assert!(m.is_open());

    type_str(&mut m, "x");
    assert!(m.visible_texts().is_empty());
    assert!(!m.is_open());
    assert_eq!(m.highlighted(), None);
}

#[test]
fn test_filter_is_case_insensitive_prefix() {
    let mut m = combo(AutocompleteMode::List, false);
    type_str(&mut m, "BAN");
    assert_eq!(m.visible_texts(), vec!["Banana"]);

    let mut m = combo(AutocompleteMode::List, false);
    type_str(&mut m, "nan");
    assert!(m.visible_texts().is_empty());
}

#[test]
fn test_inline_completion() {
    let mut m = combo(AutocompleteMode::Both, false);
    type_str(&mut m, "a");
    assert_eq!(m.value(), "Apple");
    assert_eq!(m.selection(), Some(1..5));
    assert_eq!(highlighted_text(&m).as_deref(), Some("Apple"));

    type_str(&mut m, "pr");
    assert_eq!(m.value(), "Apricot");
    assert_eq!(m.selection(), Some(3..7));
    assert_eq!(highlighted_text(&m).as_deref(), Some("Apricot"));

    // Backspace drops only the completed part; the typed prefix keeps the
    // option's casing
    m.update(key(KeyCode::Backspace));
    assert_eq!(m.value(), "Apr");
    assert_eq!(m.selection(), None);
}

#[test]
fn test_cursor_movement_accepts_completion() {
    let mut m = combo(AutocompleteMode::Both, false);
    type_str(&mut m, "b");
    assert_eq!(m.value(), "Banana");

    m.update(key(KeyCode::Right));
    assert_eq!(m.value(), "Banana");
    assert_eq!(m.selection(), None);
    assert_eq!(m.position(), 6);
    assert_eq!(m.visible_texts(), vec!["Banana"]);
    assert_eq!(highlighted_text(&m).as_deref(), Some("Banana"));
}

#[test]
fn test_movement_clears_highlight_outside_both_mode() {
    let mut m = combo(AutocompleteMode::List, true);
    type_str(&mut m, "ap");
    assert!(m.highlighted().is_some());

    m.update(key(KeyCode::Left));
    assert_eq!(m.highlighted(), None);
    assert_eq!(m.position(), 1);
}

#[test]
fn test_arrows_open_and_cycle() {
    let mut m = combo(AutocompleteMode::List, false);
    assert!(!m.is_open());

    m.update(key(KeyCode::Down));
    assert!(m.is_open());
    assert_eq!(highlighted_text(&m).as_deref(), Some("Apple"));

    m.update(key(KeyCode::Down));
    m.update(key(KeyCode::Down));
    assert_eq!(highlighted_text(&m).as_deref(), Some("Banana"));
    m.update(key(KeyCode::Down));
    assert_eq!(highlighted_text(&m).as_deref(), Some("Apple"));

    m.update(key(KeyCode::Up));
    assert_eq!(highlighted_text(&m).as_deref(), Some("Banana"));

    // Arrows never touch the value in list mode
    assert_eq!(m.value(), "");
}

#[test]
fn test_up_opens_on_last() {
    let mut m = combo(AutocompleteMode::Both, false);
    m.update(key(KeyCode::Up));
    assert!(m.is_open());
    assert_eq!(highlighted_text(&m).as_deref(), Some("Banana"));
}

#[test]
fn test_none_mode_is_a_picklist() {
    let mut m = combo(AutocompleteMode::None, false);
    type_str(&mut m, "zz");
    assert_eq!(m.visible_texts().len(), 3);
    assert!(!m.is_open());

    // Opening does not highlight; the next arrow does
    m.update(key(KeyCode::Down));
    assert!(m.is_open());
    assert_eq!(m.highlighted(), None);
    m.update(key(KeyCode::Down));
    assert_eq!(highlighted_text(&m).as_deref(), Some("Apple"));
}

#[test]
fn test_enter_commits_exact_text() {
    let mut m = combo(AutocompleteMode::Both, false);
    let rec = Recorder::default();
    m.subscribe(rec.clone());

    type_str(&mut m, "apr");
    m.update(key(KeyCode::Enter));

    assert_eq!(m.value(), "Apricot");
    assert_eq!(m.selected().map(ComboOption::text), Some("Apricot"));
    assert!(!m.is_open());
    assert!(m.key_consumed());
    assert_eq!(rec.count("submit:Apricot"), 1);
}

#[test]
fn test_enter_applies_set_value_transform() {
    let mut m = Model::from_texts(
        &FRUIT,
        Config::default()
            .with_mode(AutocompleteMode::List)
            .with_set_value(|s: &str| s.to_uppercase()),
    );
    let _ = m.focus();
    m.update(key(KeyCode::Down));
    m.update(key(KeyCode::Enter));
    assert_eq!(m.value(), "APPLE");
    assert!(!m.is_open());
    assert_eq!(m.selected().map(ComboOption::text), Some("Apple"));
}

#[test]
fn test_enter_without_highlight_only_closes() {
    let mut m = combo(AutocompleteMode::List, false);
    let rec = Recorder::default();
    m.subscribe(rec.clone());

    type_str(&mut m, "b");
    m.update(key(KeyCode::Enter));
    assert!(!m.is_open());
    assert_eq!(m.value(), "b");
    assert_eq!(m.selected(), None);
    assert_eq!(rec.events().iter().filter(|e| e.starts_with("submit")).count(), 0);
}

#[test]
fn test_escape_clears_everything() {
    for mode in [
        AutocompleteMode::None,
        AutocompleteMode::List,
        AutocompleteMode::Both,
    ] {
        let mut m = combo(mode, true);
        type_str(&mut m, "ap");
        m.update(key(KeyCode::Down));
        if mode == AutocompleteMode::None {
            // the first arrow only opens the picklist
            m.update(key(KeyCode::Down));
        }
        assert!(m.is_open(), "{mode:?}");
        assert!(m.highlighted().is_some(), "{mode:?}");

        m.update(key(KeyCode::Esc));
        assert_eq!(m.value(), "", "{mode:?}");
        assert_eq!(m.highlighted(), None, "{mode:?}");
        assert!(!m.is_open(), "{mode:?}");
        assert!(m.key_consumed(), "{mode:?}");
        assert_eq!(m.visible_texts().len(), 3, "{mode:?}");
    }
}

#[test]
fn test_tab_commits_only_with_list_focus() {
    let mut m = combo(AutocompleteMode::List, true);
    type_str(&mut m, "ap");
    m.update(key(KeyCode::Tab));
    assert!(!m.is_open());
    assert_eq!(m.value(), "ap");
    assert!(!m.key_consumed());

    m.update(key(KeyCode::Down));
    assert!(m.is_open());
    m.update(key(KeyCode::Down));
    assert_eq!(highlighted_text(&m).as_deref(), Some("Apricot"));
    m.update(key(KeyCode::Tab));
    assert_eq!(m.value(), "Apricot");
    assert!(!m.is_open());
    assert!(!m.key_consumed());
}

#[test]
fn test_keys_ignored_without_focus() {
    let mut m = Model::from_texts(&FRUIT, Config::default());
    assert!(m.update(key(KeyCode::Char('a'))).is_none());
    assert_eq!(m.value(), "");
    assert!(!m.key_consumed());
}

#[test]
fn test_listener_notifications() {
    let mut m = combo(AutocompleteMode::List, false);
    let rec = Recorder::default();
    let sub = m.subscribe(rec.clone());

    type_str(&mut m, "a");
    assert_eq!(rec.events(), vec!["show".to_string(), "update:a:2".to_string()]);

    m.update(key(KeyCode::Esc));
    assert_eq!(rec.count("hide"), 1);

    assert!(m.unsubscribe(sub));
    assert!(!m.unsubscribe(sub));
    let before = rec.events().len();
    type_str(&mut m, "b");
    assert_eq!(rec.events().len(), before);
}

#[test]
fn test_aria_state() {
    let mut m = combo(AutocompleteMode::List, false);
    let aria = m.input_aria();
    assert!(!aria.expanded);
    assert_eq!(aria.active_descendant, None);
    assert_eq!(aria.autocomplete, AutocompleteMode::List);

    m.update(key(KeyCode::Down));
    m.update(key(KeyCode::Down));
    let aria = m.input_aria();
    assert!(aria.expanded);
    assert_eq!(aria.active_descendant.as_deref(), Some("Combobox-result-1"));

    let options = m.options_aria();
    assert_eq!(options.len(), 3);
    assert_eq!(options[1].pos_in_set, 2);
    assert_eq!(options[1].set_size, 3);
    assert!(options[1].selected);
    assert!(!options[0].selected);

    // Closed lists have no active descendant even with a highlight
    m.update(key(KeyCode::Enter));
    assert_eq!(m.input_aria().active_descendant, None);
}

#[test]
fn test_base_class_prefixes_option_ids() {
    let mut m = Model::from_texts(&FRUIT, Config::default().with_base_class("Fruit"));
    let _ = m.focus();
    m.update(key(KeyCode::Down));
    assert_eq!(
        m.input_aria().active_descendant.as_deref(),
        Some("Fruit-result-0")
    );
}

#[test]
fn test_from_markup_skips_separators_and_nested() {
    let markup = vec![
        OptionMarkup::option("  Red "),
        OptionMarkup::separator(),
        OptionMarkup::option("Group").with_children(),
        OptionMarkup::option("Green"),
    ];
    let m = Model::from_markup(&markup, Config::default());
    assert_eq!(m.visible_texts(), vec!["Red", "Green"]);
    assert_eq!(m.listbox().options()[1].id(), OptionId(1));
}

#[test]
fn test_with_items_uses_result_value() {
    #[derive(Clone)]
    struct City {
        name: &'static str,
    }
    let config = Config::new(Arc::new(|c: &City| c.name.to_string()));
    let mut m = Model::with_items(vec![City { name: "Oslo" }, City { name: "Osaka" }], config);
    let _ = m.focus();
    m.update(key(KeyCode::Down));
    m.update(key(KeyCode::Enter));
    assert_eq!(m.value(), "Oslo");
    assert_eq!(m.selected().map(|o| o.item().name), Some("Oslo"));
}

#[test]
fn test_pointer_down_outside_closes() {
    let mut m = combo(AutocompleteMode::List, false);
    m.set_regions(Region::new(0, 0, 20, 1), Some(Region::new(0, 1, 20, 3)));
    m.update(key(KeyCode::Down));

    assert!(!m.pointer_down(5, 2));
    assert!(m.is_open());
    assert!(m.pointer_down(30, 10));
    assert!(!m.is_open());
}

#[test]
fn test_click_option() {
    let mut m = combo(AutocompleteMode::List, false);
    let rec = Recorder::default();
    m.subscribe(rec.clone());
    m.click_input();
    assert!(m.is_open());

    assert_eq!(
        m.click_option(OptionId(7)),
        Err(crate::Error::UnknownOption(7))
    );
    m.click_option(OptionId(2)).unwrap();
    assert_eq!(m.value(), "Banana");
    assert!(!m.is_open());
    assert_eq!(rec.count("submit:Banana"), 1);
}

#[test]
fn test_component_blur_closes_immediately() {
    let mut m = combo(AutocompleteMode::List, false);
    m.update(key(KeyCode::Down));
    Component::blur(&mut m);
    assert!(!m.focused());
    assert!(!m.is_open());
}

#[tokio::test]
async fn test_blur_closes_after_delay_unless_hovered() {
    let mut m = combo(AutocompleteMode::List, false);
    m.update(key(KeyCode::Down));
    m.pointer_enter_input();

    let cmd = m.blur().expect("open list schedules a close");
    let msg = deliver(cmd).await;
    m.update(msg);
    assert!(m.is_open());

    let cmd = m.pointer_leave_input().expect("still open");
    let msg = deliver(cmd).await;
    m.update(msg);
    assert!(!m.is_open());
}

#[tokio::test]
async fn test_stale_close_is_ignored() {
    let mut m = combo(AutocompleteMode::List, false);
    m.update(key(KeyCode::Down));
    let stale = m.blur().expect("scheduled");

    // Focus comes back and the list is reopened before the close arrives
    let _ = m.focus();
    m.update(key(KeyCode::Esc));
    m.update(key(KeyCode::Down));
    let msg = deliver(stale).await;
    m.update(msg);
    assert!(m.is_open());
}

#[tokio::test]
async fn test_blur_autoselect_commits_and_clears() {
    let mut m = combo(AutocompleteMode::List, true);
    type_str(&mut m, "apr");
    assert_eq!(highlighted_text(&m).as_deref(), Some("Apricot"));

    let msg = deliver(m.blur().expect("scheduled")).await;
    m.update(msg);
    assert!(!m.is_open());
    assert_eq!(m.value(), "Apricot");
    assert_eq!(m.selected().map(ComboOption::text), Some("Apricot"));
    assert_eq!(m.highlighted(), None);
}

#[tokio::test]
async fn test_blur_without_clear_keeps_highlight() {
    let mut m = Model::from_texts(
        &FRUIT,
        Config::default()
            .with_clear(false)
            .with_close_delay(Duration::from_millis(1)),
    );
    let _ = m.focus();
    m.update(key(KeyCode::Down));

    let msg = deliver(m.blur().expect("scheduled")).await;
    m.update(msg);
    assert!(!m.is_open());
    assert_eq!(highlighted_text(&m).as_deref(), Some("Apple"));
}

fn fruit_search() -> SearchSource<String> {
    SearchSource::sync(|q: &str| {
        let q = q.to_lowercase();
        FRUIT
            .iter()
            .filter(|f| f.to_lowercase().starts_with(&q))
            .map(|f| f.to_string())
            .collect()
    })
}

fn searching(autoselect: bool) -> (Model<String>, Option<Cmd>) {
    let mut m = Model::new(
        Vec::new(),
        Config::default()
            .with_search(fruit_search())
            .with_autoselect(autoselect),
    );
    let cmd = m.focus();
    (m, cmd)
}

#[tokio::test]
async fn test_focus_searches_current_value() {
    let (mut m, cmd) = searching(false);
    let rec = Recorder::default();
    m.subscribe(rec.clone());
    assert!(m.loading());

    let msg = deliver(cmd.expect("focus issues a search")).await;
    m.update(msg);
    assert!(!m.loading());
    assert_eq!(m.visible_texts().len(), 3);
    assert!(m.is_open());
    assert_eq!(m.highlighted(), None);
    assert!(rec.events().contains(&"loaded".to_string()));
}

#[tokio::test]
async fn test_only_latest_search_is_applied() {
    let (mut m, _) = searching(true);
    let rec = Recorder::default();
    m.subscribe(rec.clone());

    let mut cmds = type_str(&mut m, "ab");
    assert_eq!(cmds.len(), 2);
    assert_eq!(rec.count("loading"), 2);
    let second = cmds.pop().expect("second search");
    let first = cmds.pop().expect("first search");

    // Deliver out of order: the newer result lands first
    let msg = deliver(second).await;
    m.update(msg);
    assert!(m.visible_texts().is_empty());
    assert!(!m.is_open());

    let msg = deliver(first).await;
    m.update(msg);
    assert!(m.visible_texts().is_empty());
    assert_eq!(rec.count("loaded"), 1);
}

#[tokio::test]
async fn test_search_results_replace_options() {
    let (mut m, _) = searching(true);
    let cmds = type_str(&mut m, "ap");
    let last = cmds.into_iter().last().expect("search issued");

    let msg = deliver(last).await;
    m.update(msg);
    assert_eq!(m.visible_texts(), vec!["Apple", "Apricot"]);
    assert_eq!(highlighted_text(&m).as_deref(), Some("Apple"));

    m.update(key(KeyCode::Enter));
    assert_eq!(m.value(), "Apple");
}

#[tokio::test]
async fn test_failed_search_reads_as_empty() {
    let source = SearchSource::try_future(|q: String| async move {
        if q.is_empty() {
            Ok(vec!["Apple".to_string()])
        } else {
            Err("backend unavailable")
        }
    });
    let mut m = Model::new(Vec::new(), Config::default().with_search(source));
    let msg = deliver(m.focus().expect("search")).await;
    m.update(msg);
    assert_eq!(m.visible_texts(), vec!["Apple"]);

    let cmd = type_str(&mut m, "x").pop().expect("search");
    let msg = deliver(cmd).await;
    m.update(msg);
    assert!(m.visible_texts().is_empty());
    assert!(!m.is_open());
}

#[tokio::test]
async fn test_escape_drops_pending_search() {
    let (mut m, _) = searching(false);
    let cmd = type_str(&mut m, "a").pop().expect("search");
    m.update(key(KeyCode::Esc));

    let msg = deliver(cmd).await;
    m.update(msg);
    assert!(!m.is_open());
    assert!(!m.loading());
}

#[tokio::test]
async fn test_blur_drops_pending_search() {
    let (mut m, _) = searching(false);
    let cmd = type_str(&mut m, "a").pop().expect("search");
    assert!(m.blur().is_none());
    assert!(!m.loading());

    let msg = deliver(cmd).await;
    m.update(msg);
    assert!(!m.is_open());
    assert!(m.visible_texts().is_empty());
    assert!(m.input_aria().active_descendant.is_none());
}

#[tokio::test]
async fn test_component_blur_drops_pending_search() {
    let (mut m, _) = searching(true);
    let cmd = type_str(&mut m, "b").pop().expect("search");
    Component::blur(&mut m);

    let msg = deliver(cmd).await;
    m.update(msg);
    assert!(!m.is_open());
    assert_eq!(m.highlighted(), None);
}

#[tokio::test]
async fn test_search_results_complete_inline() {
    let (mut m, _) = searching(false);
    let cmd = type_str(&mut m, "ap").pop().expect("search");
    let msg = deliver(cmd).await;
    m.update(msg);

    assert_eq!(m.value(), "Apple");
    assert_eq!(m.selection(), Some(2..5));
    assert_eq!(highlighted_text(&m).as_deref(), Some("Apple"));
    assert!(m.is_open());

    // Backspace removes the completed suffix and searches without completing
    let cmd = m.update(key(KeyCode::Backspace)).expect("search");
    assert_eq!(m.value(), "ap");
    let msg = deliver(cmd).await;
    m.update(msg);
    assert_eq!(m.value(), "ap");
    assert_eq!(m.selection(), None);
}

#[tokio::test]
async fn test_none_mode_searches_only_on_focus() {
    let mut m = Model::new(
        Vec::new(),
        Config::default()
            .with_mode(AutocompleteMode::None)
            .with_search(fruit_search()),
    );
    let msg = deliver(m.focus().expect("focus issues a search")).await;
    m.update(msg);
    assert_eq!(m.visible_texts().len(), 3);

    assert!(type_str(&mut m, "b").is_empty());
    assert_eq!(m.value(), "b");
    assert!(!m.loading());
    assert_eq!(m.visible_texts().len(), 3);
    assert_eq!(m.selection(), None);
}

#[tokio::test]
async fn test_destroy_detaches() {
    let mut m = combo(AutocompleteMode::List, false);
    let rec = Recorder::default();
    m.subscribe(rec.clone());
    m.update(key(KeyCode::Down));
    let close = m.blur().expect("scheduled");

    m.destroy();
    m.destroy();
    assert!(!m.attached());
    assert!(!m.is_open());
    assert!(m.focus().is_none());

    let msg = deliver(close).await;
    let before = rec.events().len();
    m.update(msg);
    m.update(key(KeyCode::Char('a')));
    assert_eq!(rec.events().len(), before);
    assert_eq!(m.value(), "");

    m.init();
    m.init();
    assert!(m.attached());
    let _ = m.focus();
    type_str(&mut m, "b");
    assert_eq!(m.visible_texts(), vec!["Banana"]);
}

#[test]
fn test_view_renders_input_and_list() {
    let mut m = combo(AutocompleteMode::List, false);
    m.placeholder = "fruit".to_string();
    let plain = |s: String| String::from_utf8(strip_ansi_escapes::strip(s)).unwrap();

    assert_eq!(plain(m.view()), "> fruit");

    m.update(key(KeyCode::Down));
    let view = plain(m.view());
    let lines: Vec<&str> = view.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "> fruit");
    assert!(lines[1].contains(HIGHLIGHT_MARKER));
    assert!(lines[1].contains("Apple"));
    assert!(lines[3].contains("Banana"));
}

#[test]
fn test_view_truncates_to_width() {
    let mut m = combo(AutocompleteMode::Both, false);
    m.width = 3;
    type_str(&mut m, "b");
    let view = String::from_utf8(strip_ansi_escapes::strip(m.view())).unwrap();
    assert_eq!(view.lines().next(), Some("> Ban"));
}
